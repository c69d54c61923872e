//! Device loop: tick the engine, write the strip, wait one tick period.

use core::convert::Infallible;

use defmt::{debug, info};
use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::{Instant, Timer};

use crate::engine::{Engine, TickReport};
use crate::inputs::{Entropy, Switches};
use crate::scoring::ScoreChange;

/// Run `engine` forever, writing each frame to `strip`.
///
/// Every tick reads `switches`, draws kinds from `entropy`, logs what
/// happened, and sleeps for the configured tick period. After the run is
/// solved the loop keeps ticking so the celebration animates.
pub async fn run<const POOL: usize, const LEDS: usize, P, const SM: usize, S, E>(
    engine: &mut Engine<POOL, LEDS>,
    strip: &mut PioWs2812<'_, P, SM, LEDS>,
    switches: &mut S,
    entropy: &mut E,
) -> Infallible
where
    P: Instance,
    S: Switches,
    E: Entropy,
{
    let tick_period = engine.config().tick_period;
    info!(
        "track sorter: {} lights, {} slots, {} destinations",
        LEDS,
        POOL,
        engine.scoreboard().scores().len()
    );

    loop {
        let report = engine.tick(Instant::now(), switches, entropy);
        log_report(&report, engine);
        strip.write(&engine.frame().0).await;
        Timer::after(tick_period).await;
    }
}

fn log_report<const POOL: usize, const LEDS: usize>(
    report: &TickReport<POOL>,
    engine: &Engine<POOL, LEDS>,
) {
    if let Some(spawn) = report.spawned {
        debug!("spawn kind {} in slot {}", spawn.kind, spawn.slot);
    }
    if report.spawn_dropped {
        debug!("spawn dropped: all {} slots busy", POOL);
    }
    for routing in &report.routings {
        debug!(
            "switch {} ({}) routes track {} -> {}",
            routing.switch, routing.switch_on, routing.from, routing.to
        );
    }
    for arrival in &report.arrivals {
        match arrival.change {
            ScoreChange::Increment => info!(
                "kind {} home on track {}: {}",
                arrival.kind,
                arrival.track,
                engine.scoreboard().scores()
            ),
            ScoreChange::Decrement => info!(
                "kind {} lost on track {}: {}",
                arrival.kind,
                arrival.track,
                engine.scoreboard().scores()
            ),
            ScoreChange::Unchanged => debug!("kind {} off track {}", arrival.kind, arrival.track),
        }
    }
    if report.solved {
        info!("solved: {}", engine.scoreboard().scores());
    }
}
