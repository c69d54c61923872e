//! The particle engine: one owned state object ticked by the caller.
//!
//! See [`Engine`] for the per-tick pipeline.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::Result;
use crate::config::Config;
use crate::frame::Frame1d;
use crate::inputs::{Entropy, Switches};
use crate::particle::{KindId, Particle, ParticlePool};
use crate::render::{render_particle, render_score_trail};
use crate::resolver::{Routing, resolve};
use crate::scoring::{ScoreChange, Scoreboard};
use crate::topology::{Topology, TrackId};

#[cfg(test)]
mod host_tests;

// ============================================================================
// Phase and reports
// ============================================================================

/// Engine state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Spawning, routing, scoring.
    Running,
    /// Terminal: every destination is full. Only the celebration renders.
    Solved {
        /// When the run was solved.
        since: Instant,
    },
}

/// A particle placed into the pool this tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Spawn {
    /// Pool slot claimed.
    pub slot: usize,
    /// Kind drawn from entropy.
    pub kind: KindId,
}

/// A particle that reached the end of its track this tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Arrival {
    /// Pool slot freed.
    pub slot: usize,
    /// Kind of the particle.
    pub kind: KindId,
    /// Track it ended on.
    pub track: TrackId,
    /// Effect on the scoreboard.
    pub change: ScoreChange,
}

/// What happened during one [`Engine::tick`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct TickReport<const POOL: usize> {
    /// Particle spawned, if the spawn timer fired and a slot was free.
    pub spawned: Option<Spawn>,
    /// The spawn timer fired but the pool was full.
    pub spawn_dropped: bool,
    /// Branch decisions taken, in slot order.
    pub routings: Vec<Routing, POOL>,
    /// Particles that finished, in slot order.
    pub arrivals: Vec<Arrival, POOL>,
    /// This tick moved the engine into [`Phase::Solved`].
    pub solved: bool,
}

// ============================================================================
// Engine
// ============================================================================

/// Particle engine for a `LEDS`-light strip with a `POOL`-slot particle pool.
///
/// Each [`Engine::tick`] runs, in order:
///
/// 1. spawn check against the wall-clock spawn timer,
/// 2. branch resolution for every live particle,
/// 3. advance, kill, and score every live particle,
/// 4. render the score trail and the live particles,
/// 5. the solved check.
///
/// Once solved, a tick only renders the configured celebration.
///
/// # Example
///
/// ```rust,ignore
/// use embassy_time::Instant;
/// use track_sorter::{engine::Engine, presets::{STRIP_42, STRIP_42_LEN}};
///
/// let mut engine = Engine::<4, STRIP_42_LEN>::new(&STRIP_42, Instant::now())?;
/// let mut switches = [false, true, false];
/// let report = engine.tick(Instant::now(), &mut switches, &mut rng);
/// strip.write(engine.frame()).await;
/// ```
pub struct Engine<const POOL: usize, const LEDS: usize> {
    config: &'static Config,
    pool: ParticlePool<POOL>,
    scoreboard: Scoreboard,
    phase: Phase,
    next_spawn_at: Instant,
    frame: Frame1d<LEDS>,
}

impl<const POOL: usize, const LEDS: usize> Engine<POOL, LEDS> {
    /// Build an engine started at `now`. The first spawn is due one spawn
    /// interval later.
    ///
    /// # Errors
    /// Returns an error if `config` does not fit a `LEDS`-light strip and a
    /// `POOL`-slot pool; see [`Config::validate`].
    pub fn new(config: &'static Config, now: Instant) -> Result<Self> {
        config.validate(LEDS, POOL)?;
        Ok(Self {
            config,
            pool: ParticlePool::new(),
            scoreboard: Scoreboard::new(config.destination_count(), config.score_max),
            phase: Phase::Running,
            next_spawn_at: now + config.spawn_interval,
            frame: Frame1d::new(),
        })
    }

    /// Run one tick at time `now` and return what happened.
    pub fn tick<S, E>(
        &mut self,
        now: Instant,
        switches: &mut S,
        entropy: &mut E,
    ) -> TickReport<POOL>
    where
        S: Switches + ?Sized,
        E: Entropy + ?Sized,
    {
        let mut report = TickReport::default();

        if let Phase::Solved { since } = self.phase {
            (self.config.celebration)(&mut self.frame.0, now.saturating_duration_since(since));
            return report;
        }

        if now >= self.next_spawn_at {
            self.next_spawn_at = now + self.config.spawn_interval;
            match self.spawn(&mut *entropy) {
                Some(spawn) => report.spawned = Some(spawn),
                None => report.spawn_dropped = true,
            }
        }

        let checkpoints = self.config.checkpoints;
        self.pool.for_each_alive(|_, particle| {
            if let Some(routing) = resolve(particle, checkpoints, &mut *switches) {
                // At most one routing per live particle, so POOL always fits.
                let _ = report.routings.push(routing);
            }
        });

        let topology = &self.config.topology;
        let scoreboard = &mut self.scoreboard;
        self.pool.for_each_alive(|slot, particle| {
            particle.advance();
            if has_left_track(topology, particle) {
                particle.kill();
                let change = scoreboard.record(particle.kind(), particle.track());
                let _ = report.arrivals.push(Arrival {
                    slot,
                    kind: particle.kind(),
                    track: particle.track(),
                    change,
                });
            }
        });

        self.render();

        if self.scoreboard.is_full() {
            self.phase = Phase::Solved { since: now };
            report.solved = true;
        }
        report
    }

    /// Claim a pool slot for a new particle of a random kind.
    ///
    /// Returns `None` (and draws no entropy) when the pool is full. Ignored
    /// once solved.
    pub fn spawn<E: Entropy + ?Sized>(&mut self, entropy: &mut E) -> Option<Spawn> {
        if self.is_solved() {
            return None;
        }
        let config = self.config;
        let mut kind = 0;
        let slot = self.pool.allocate(|| {
            kind = entropy.pick_kind(config.kinds.len() as u8);
            let length = config.kind(kind).map_or(1, |kind| kind.length);
            Particle::spawn(kind, length, config.start_track, config.speed)
        })?;
        Some(Spawn { slot, kind })
    }

    fn render(&mut self) {
        let config = self.config;
        self.frame.clear();
        render_score_trail(
            &mut self.frame,
            &config.topology,
            &self.scoreboard,
            config.colors(),
            config.score_trail_level,
        );
        for particle in self.pool.alive() {
            if let Some(kind) = config.kind(particle.kind()) {
                render_particle(&mut self.frame, &config.topology, particle, kind.color);
            }
        }
    }

    /// Light buffer from the last tick.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<LEDS> {
        &self.frame
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` once the run is solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.phase, Phase::Solved { .. })
    }

    /// Per-destination scores.
    #[must_use]
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Particle slots.
    #[must_use]
    pub const fn pool(&self) -> &ParticlePool<POOL> {
        &self.pool
    }

    /// Configuration the engine runs.
    #[must_use]
    pub const fn config(&self) -> &'static Config {
        self.config
    }

    /// Time until the spawn timer next fires, measured from `now`.
    #[must_use]
    pub fn until_next_spawn(&self, now: Instant) -> Duration {
        self.next_spawn_at.saturating_duration_since(now)
    }
}

/// Returns `true` when the head has run past the end of the particle's track.
///
/// Offsets past the table read as the sentinel, so this also covers running
/// past the track's last light.
fn has_left_track(topology: &Topology, particle: &Particle) -> bool {
    topology
        .light_at(particle.track(), particle.head() as usize)
        .is_none()
}
