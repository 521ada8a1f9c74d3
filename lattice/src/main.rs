use std::time::Instant;

use lattice_config::{LatticeConfiguration, LoadTomlConfiguration, LoggingConfig};
use lattice_core::{BlockPos, Direction};
use lattice_world::{default_registry, tick::TickScheduler, Level, UpdateFlags};

use ticker::Ticker;

mod ticker;

fn init_logger(config: &LoggingConfig) {
    if config.enabled {
        let mut logger = simple_logger::SimpleLogger::new();
        logger = logger.with_timestamp_format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));

        if !config.timestamp {
            logger = logger.without_timestamps();
        }

        if config.env {
            logger = logger.env();
        }

        logger = logger.with_level(config.level.into());

        logger = logger.with_colors(config.color);
        logger = logger.with_threads(config.threads);
        if let Err(err) = logger.init() {
            eprintln!("Couldn't set up logging: {err}");
        }
    }
}

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out a small scene that exercises every default block.
fn seed_demo(level: &mut Level<'_>) {
    let registry = level.registry();
    let state = |name: &str| registry.default_state(name);
    let (Some(stone), Some(dirt), Some(sand), Some(fence), Some(wheat), Some(observer), Some(ladder)) = (
        state("stone"),
        state("dirt"),
        state("sand"),
        state("oak_fence"),
        state("wheat"),
        state("observer"),
        state("ladder"),
    ) else {
        log::warn!("Default blocks are missing, starting with an empty level");
        return;
    };

    for x in 0..16 {
        for z in 0..16 {
            level.set_block_state(BlockPos::new(x, 0, z), stone, UpdateFlags::NO_NEIGHBOR_NOTIFY);
        }
    }
    for x in 0..8 {
        level.place_block(BlockPos::new(x, 1, 0), fence);
    }
    for x in 2..6 {
        let soil = BlockPos::new(x, 1, 4);
        level.set_block_state(soil, dirt, UpdateFlags::empty());
        level.place_block(soil.above(), wheat);
    }

    let wall = BlockPos::new(10, 1, 10);
    level.set_block_state(wall, stone, UpdateFlags::empty());
    level.place_block(wall.offset(Direction::North), ladder);

    // The sand lands right in front of the observer.
    level.place_block(BlockPos::new(12, 1, 12), observer);
    level.place_block(BlockPos::new(12, 6, 13), sand);
}

fn main() {
    let time = Instant::now();
    let config = match LatticeConfiguration::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logger(&config.logging);

    log::info!("Starting Lattice {CARGO_PKG_VERSION}");

    let registry = match default_registry() {
        Ok(registry) => registry,
        Err(err) => {
            log::error!("Couldn't build the block registry: {err}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Registered {} blocks with {} states",
        registry.blocks().len(),
        registry.state_count()
    );

    let mut level = Level::new(&registry, config.level.clone());
    seed_demo(&mut level);
    log::info!(
        "Seeded {} sections, took {}ms",
        level.section_count(),
        time.elapsed().as_millis()
    );

    let mut ticker = Ticker::new(config.tps);
    ticker.run(&mut level, config.run_ticks);

    log::info!(
        "Stopped at game time {} with {} scheduled ticks pending",
        level.game_time(),
        level.block_ticks().len()
    );
}
