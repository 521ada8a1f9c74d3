use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lattice_core::Direction;
use lattice_world::{
    block::property::{EAST, HORIZONTAL_FACING, NORTH, WATERLOGGED},
    default_registry,
};

pub fn state_transitions(c: &mut Criterion) {
    let registry = default_registry().unwrap();
    let fence = registry.default_state("oak_fence").unwrap();
    let trapdoor = registry.default_state("oak_trapdoor").unwrap();

    c.bench_function("with: boolean property", |b| {
        b.iter(|| black_box(fence).with(&EAST, black_box(true)))
    });
    c.bench_function("with: enum property", |b| {
        b.iter(|| black_box(trapdoor).with(&HORIZONTAL_FACING, black_box(Direction::West)))
    });
    c.bench_function("get: boolean property", |b| {
        b.iter(|| black_box(fence).get(&NORTH))
    });
    c.bench_function("cycle: waterlogged", |b| {
        b.iter(|| black_box(trapdoor).cycle(&WATERLOGGED))
    });

    let east = fence.block().slot(&EAST).unwrap();
    let facing = trapdoor.block().slot(&HORIZONTAL_FACING).unwrap();
    c.bench_function("with_slot: boolean property", |b| {
        b.iter(|| black_box(fence).with_slot(&east, black_box(true)))
    });
    c.bench_function("with_slot: enum property", |b| {
        b.iter(|| black_box(trapdoor).with_slot(&facing, black_box(Direction::West)))
    });
    c.bench_function("get_slot: boolean property", |b| {
        b.iter(|| black_box(fence).get_slot(&east))
    });
}

pub fn state_lookup(c: &mut Criterion) {
    let registry = default_registry().unwrap();
    let last = registry.state_count() as u32 - 1;

    c.bench_function("state by id: last", |b| {
        b.iter(|| registry.state(black_box(last.into())))
    });
    c.bench_function("parse state string", |b| {
        b.iter(|| {
            registry.parse_state(black_box("oak_fence[east=true,north=true,waterlogged=true]"))
        })
    });
}

criterion_group!(benches, state_transitions, state_lookup);
criterion_main!(benches);
