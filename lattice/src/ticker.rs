use std::time::{Duration, Instant};

use lattice_world::Level;

pub struct Ticker {
    tick_interval: Duration,
    last_tick: Instant,
}

impl Ticker {
    pub fn new(tps: f32) -> Self {
        Self {
            tick_interval: Duration::from_secs_f32(1.0 / tps),
            last_tick: Instant::now(),
        }
    }

    /// Ticks `level` at the configured rate. `run_ticks == 0` never returns.
    pub fn run(&mut self, level: &mut Level<'_>, run_ticks: u64) {
        let mut ticked = 0;
        while run_ticks == 0 || ticked < run_ticks {
            let now = Instant::now();
            let elapsed = now - self.last_tick;

            if elapsed >= self.tick_interval {
                level.reset_stats();
                level.tick();
                self.last_tick = now;
                ticked += 1;

                let stats = level.stats();
                log::debug!(
                    "tick {}: {} scheduled ({} stale), {} random, {} notifications, {} changes",
                    level.game_time(),
                    stats.scheduled_ticks,
                    stats.stale_ticks,
                    stats.random_ticks,
                    stats.notifications,
                    stats.changes,
                );
                let events = level.drain_events();
                if !events.is_empty() {
                    log::trace!("tick {}: {events:?}", level.game_time());
                }
            } else {
                // Wait for the remaining time until the next tick
                std::thread::sleep(self.tick_interval - elapsed);
            }
        }
    }
}
