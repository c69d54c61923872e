#![allow(missing_docs)]

use super::{Arrival, Engine, Phase, TickReport};
use crate::celebrate::rainbow_chase;
use crate::config::Config;
use crate::frame::{Frame1d, Rgb, scale};
use crate::particle::{KindId, Speed};
use crate::presets::{STRIP_30, STRIP_30_LEN, STRIP_42, STRIP_42_LEN};
use crate::resolver::Routing;
use crate::scoring::ScoreChange;
use embassy_time::{Duration, Instant};
use std::error::Error;

const TICK_MS: u64 = 20;
const MAX_TICKS: usize = 2_000;

type Engine42<const POOL: usize> = Engine<POOL, STRIP_42_LEN>;

/// Replays a fixed list of kinds (as raw words) forever.
struct ScriptedKinds(&'static [u32], usize);

impl rand_core::RngCore for ScriptedKinds {
    fn next_u32(&mut self) -> u32 {
        let word = self.0[self.1 % self.0.len()];
        self.1 += 1;
        word
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

struct XorShift(u32);

impl XorShift {
    fn next_bool(&mut self) -> bool {
        rand_core::RngCore::next_u32(self) & 1 == 1
    }
}

impl rand_core::RngCore for XorShift {
    fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32()) << 32 | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn leak(config: Config) -> &'static Config {
    Box::leak(Box::new(config))
}

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// Tick from the first spawn until the first arrival; returns the arrival,
/// the report of that tick, all routings seen, and the time of that tick.
fn run_until_arrival<const POOL: usize>(
    engine: &mut Engine42<POOL>,
    switches: &mut [bool; 3],
    kinds: &mut ScriptedKinds,
) -> Result<(Arrival, TickReport<POOL>, usize, u64), Box<dyn Error>> {
    let mut now_ms = engine.config().spawn_interval.as_millis();
    let mut routing_count = 0;
    for _ in 0..MAX_TICKS {
        let report = engine.tick(at(now_ms), switches, kinds);
        routing_count += report.routings.len();
        if let Some(arrival) = report.arrivals.first().copied() {
            return Ok((arrival, report, routing_count, now_ms));
        }
        now_ms += TICK_MS;
    }
    Err("no particle arrived".into())
}

#[test]
fn routed_kind_scores_on_its_own_track() -> Result<(), Box<dyn Error>> {
    let slow = leak(Config {
        speed: Speed::new(1),
        ..STRIP_42
    });
    let mut engine = Engine42::<1>::new(slow, at(0))?;
    let mut switches = [true, false, false];
    let mut kinds = ScriptedKinds(&[2], 0);

    let (arrival, _, routing_count, _) = run_until_arrival(&mut engine, &mut switches, &mut kinds)?;

    assert_eq!(
        arrival,
        Arrival {
            slot: 0,
            kind: 2,
            track: 2,
            change: ScoreChange::Increment,
        }
    );
    assert_eq!(engine.scoreboard().scores(), [0, 0, 1, 0], "only score[2] changes");
    assert_eq!(
        routing_count, 2,
        "a speed-1 particle sits on each checkpoint offset for 16 ticks but fires it once"
    );
    Ok(())
}

#[test]
fn misrouted_kind_decrements_only_above_zero() -> Result<(), Box<dyn Error>> {
    for (score_before, score_after, change) in [
        (2, 1, ScoreChange::Decrement),
        (0, 0, ScoreChange::Unchanged),
    ] {
        let mut engine = Engine42::<1>::new(&STRIP_42, at(0))?;
        engine.scoreboard.set(3, score_before);
        let mut switches = [true, false, true];
        let mut kinds = ScriptedKinds(&[0], 0);

        let (arrival, _, _, _) = run_until_arrival(&mut engine, &mut switches, &mut kinds)?;

        assert_eq!((arrival.kind, arrival.track), (0, 3));
        assert_eq!(arrival.change, change);
        assert_eq!(engine.scoreboard().get(3), Some(score_after));
        assert_eq!(engine.scoreboard().total(), u16::from(score_after));
    }
    Ok(())
}

#[test]
fn full_pool_drops_spawns_until_a_slot_frees() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<1>::new(&STRIP_42, at(0))?;
    let mut kinds = ScriptedKinds(&[1], 0);

    assert!(engine.spawn(&mut kinds).is_some());
    assert_eq!(engine.spawn(&mut kinds), None, "second spawn must be dropped");
    assert_eq!(kinds.1, 1, "dropped spawn draws no entropy");

    // Timer-driven: the first timer spawn is dropped while slot 0 is busy.
    let interval_ms = STRIP_42.spawn_interval.as_millis();
    let mut switches = [false; 3];
    let report = engine.tick(at(interval_ms), &mut switches, &mut kinds);
    assert!(report.spawn_dropped);
    assert_eq!(report.spawned, None);

    let mut now_ms = interval_ms;
    let mut died_at = None;
    for _ in 0..MAX_TICKS {
        now_ms += TICK_MS;
        let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
        if died_at.is_none() && !report.arrivals.is_empty() {
            died_at = Some(now_ms);
        }
        if let Some(spawn) = report.spawned {
            let died_at = died_at.ok_or("spawned before the first particle died")?;
            assert!(now_ms > died_at);
            assert_eq!(spawn.slot, 0, "freed slot is reused");
            return Ok(());
        }
    }
    Err("no spawn after the slot was freed".into())
}

#[test]
fn spawn_timer_follows_wall_clock_not_ticks() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<4>::new(&STRIP_42, at(0))?;
    let mut kinds = ScriptedKinds(&[0, 1, 2, 3], 0);
    let mut switches = [false; 3];

    for _ in 0..50 {
        let report = engine.tick(at(1_499), &mut switches, &mut kinds);
        assert_eq!(report.spawned, None, "interval has not elapsed");
    }
    assert_eq!(engine.until_next_spawn(at(1_499)), Duration::from_millis(1));

    let report = engine.tick(at(1_500), &mut switches, &mut kinds);
    assert_eq!(report.spawned.map(|spawn| spawn.kind), Some(0));
    let report = engine.tick(at(1_500), &mut switches, &mut kinds);
    assert_eq!(report.spawned, None, "timer re-arms after firing");

    let report = engine.tick(at(3_000), &mut switches, &mut kinds);
    assert_eq!(report.spawned.map(|spawn| spawn.kind), Some(1));
    assert_eq!(engine.pool().alive_count(), 2);
    Ok(())
}

#[test]
fn positions_advance_and_scores_stay_bounded() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<4>::new(&STRIP_42, at(0))?;
    let mut rng = XorShift(0x1234_5678);
    let mut switches_rng = XorShift(0x9e37_79b9);
    let score_max = STRIP_42.score_max;

    for tick_index in 0..20_000_u64 {
        let before: Vec<Option<u32>> = (0..4)
            .map(|slot| {
                engine
                    .pool()
                    .get(slot)
                    .filter(|particle| particle.is_alive())
                    .map(|particle| particle.position())
            })
            .collect();

        let mut switches = [
            switches_rng.next_bool(),
            switches_rng.next_bool(),
            switches_rng.next_bool(),
        ];
        engine.tick(at(tick_index * TICK_MS), &mut switches, &mut rng);

        for (slot, position_before) in before.iter().enumerate() {
            let (Some(position_before), Some(particle)) = (position_before, engine.pool().get(slot))
            else {
                continue;
            };
            if particle.is_alive() && !engine.is_solved() {
                assert!(particle.position() > *position_before, "slot {slot} moved backwards");
            }
        }
        assert!(
            engine
                .scoreboard()
                .scores()
                .iter()
                .all(|score| *score <= score_max)
        );
    }
    Ok(())
}

#[test]
fn only_lights_behind_the_head_are_lit() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<1>::new(&STRIP_42, at(0))?;
    let mut switches = [true, true, true];
    let mut kinds = ScriptedKinds(&[2], 0);
    let topology = STRIP_42.topology;

    let mut now_ms = STRIP_42.spawn_interval.as_millis();
    for _ in 0..MAX_TICKS {
        let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
        if !report.arrivals.is_empty() {
            return Ok(());
        }
        let particle = engine.pool().get(0).copied().ok_or("slot 0 missing")?;
        let head = particle.head();
        let length = u32::from(particle.length());
        let lit_span: Vec<usize> = (0..=length.min(head))
            .filter_map(|n| topology.light_at(particle.track(), (head - n) as usize))
            .map(usize::from)
            .collect();

        for (light_index, pixel) in engine.frame().iter().enumerate() {
            if !lit_span.contains(&light_index) {
                assert_eq!(*pixel, Rgb::new(0, 0, 0), "light {light_index} at head {head}");
            }
        }
        now_ms += TICK_MS;
    }
    Err("particle never arrived".into())
}

#[test]
fn dying_particle_is_not_drawn_on_its_death_tick() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<1>::new(&STRIP_42, at(0))?;
    let mut switches = [true, false, false];
    let mut kinds = ScriptedKinds(&[2], 0);

    let (arrival, _, _, _) = run_until_arrival(&mut engine, &mut switches, &mut kinds)?;
    assert_eq!(arrival.change, ScoreChange::Increment);

    // Only the new score-trail light (far end of track 2) remains.
    let mut expected = Frame1d::<STRIP_42_LEN>::new();
    expected[35] = scale(STRIP_42.kinds[2].color, STRIP_42.score_trail_level);
    assert_eq!(engine.frame(), &expected);
    Ok(())
}

#[test]
fn solved_fires_once_and_freezes_play() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<1>::new(&STRIP_42, at(0))?;
    for (track, score) in [(0, 3), (1, 3), (2, 2), (3, 3)] {
        engine.scoreboard.set(track, score);
    }
    let mut switches = [true, false, false];
    let mut kinds = ScriptedKinds(&[2], 0);

    let (arrival, report, _, solved_ms) =
        run_until_arrival(&mut engine, &mut switches, &mut kinds)?;
    assert_eq!(arrival.change, ScoreChange::Increment);
    assert!(report.solved, "reaching max × destinations solves the run");
    assert_eq!(
        engine.phase(),
        Phase::Solved {
            since: at(solved_ms)
        }
    );

    let mut solved_count = 0;
    for tick_index in 1..=500_u64 {
        let now_ms = solved_ms + tick_index * TICK_MS;
        let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
        solved_count += usize::from(report.solved);
        assert_eq!(report.spawned, None);
        assert!(report.arrivals.is_empty() && report.routings.is_empty());

        let mut expected = Frame1d::<STRIP_42_LEN>::new();
        rainbow_chase(&mut expected.0, Duration::from_millis(tick_index * TICK_MS));
        assert_eq!(engine.frame(), &expected, "celebration depends only on elapsed time");
    }
    assert_eq!(solved_count, 0, "solved must not re-trigger");
    assert!(engine.scoreboard().is_full());
    assert_eq!(engine.spawn(&mut kinds), None, "no spawning once solved");
    Ok(())
}

#[test]
fn second_preset_runs_on_the_same_engine() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine::<2, STRIP_30_LEN>::new(&STRIP_30, at(0))?;
    let mut switches = [true, true];
    let mut kinds = ScriptedKinds(&[2], 0);
    let mut now_ms = STRIP_30.spawn_interval.as_millis();

    for _ in 0..MAX_TICKS {
        let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
        if let Some(arrival) = report.arrivals.first() {
            assert_eq!((arrival.kind, arrival.track), (2, 2));
            assert_eq!(engine.scoreboard().scores(), [0, 0, 1]);
            // Track 2 runs backwards, so its score trail starts at light 25.
            let trail = scale(STRIP_30.kinds[2].color, STRIP_30.score_trail_level);
            assert_eq!(engine.frame()[25], trail);
            return Ok(());
        }
        now_ms += TICK_MS;
    }
    Err("particle never arrived".into())
}

#[test]
fn kind_draw_uses_the_kind_range() -> Result<(), Box<dyn Error>> {
    let mut engine = Engine42::<4>::new(&STRIP_42, at(0))?;
    let mut kinds = ScriptedKinds(&[7, 9], 0);
    let first = engine.spawn(&mut kinds).ok_or("pool empty")?;
    let second = engine.spawn(&mut kinds).ok_or("pool empty")?;
    let drawn: [KindId; 2] = [first.kind, second.kind];
    assert_eq!(drawn, [3, 1]);
    let particle = engine.pool().get(0).ok_or("slot 0 missing")?;
    assert_eq!(particle.length(), STRIP_42.kinds[3].length);
    assert_eq!(particle.speed(), STRIP_42.speed);
    assert_eq!(particle.track(), STRIP_42.start_track);
    Ok(())
}

#[test]
fn branch_is_decided_before_the_particle_moves() -> Result<(), Box<dyn Error>> {
    let fast = leak(Config {
        speed: Speed::MAX,
        ..STRIP_42
    });
    let mut engine = Engine42::<1>::new(fast, at(0))?;
    let mut switches = [true, false, false];
    let mut kinds = ScriptedKinds(&[2], 0);
    let mut now_ms = fast.spawn_interval.as_millis();

    // One light per tick: after tick k the head sits on offset k + 1.
    for _ in 0..5 {
        engine.tick(at(now_ms), &mut switches, &mut kinds);
        now_ms += TICK_MS;
    }
    let particle = engine.pool().get(0).copied().ok_or("slot 0 missing")?;
    assert_eq!(particle.head(), 5);

    // Resolved at offset 5, then moved onto the checkpoint offset: no routing yet.
    let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
    let particle = engine.pool().get(0).copied().ok_or("slot 0 missing")?;
    assert_eq!(particle.head(), 6);
    assert_eq!(particle.track(), 0);
    assert!(report.routings.is_empty());
    now_ms += TICK_MS;

    // Resolved at offset 6, then moved onto the new branch.
    let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
    let particle = engine.pool().get(0).copied().ok_or("slot 0 missing")?;
    assert_eq!(particle.head(), 7);
    assert_eq!(
        report.routings.as_slice(),
        [Routing {
            checkpoint: 0,
            switch: 0,
            switch_on: true,
            from: 0,
            to: 2,
        }]
    );
    let frame = engine.frame();
    assert_eq!(frame[24], STRIP_42.kinds[2].color, "offset 6 of track 2 is light 24");
    assert_eq!(frame[6], Rgb::new(0, 0, 0));
    assert_eq!(frame[7], Rgb::new(0, 0, 0));
    Ok(())
}

#[test]
fn particle_dies_when_its_head_passes_the_last_light() -> Result<(), Box<dyn Error>> {
    let fast = leak(Config {
        speed: Speed::MAX,
        ..STRIP_42
    });
    let mut engine = Engine42::<1>::new(fast, at(0))?;
    let mut switches = [false; 3];
    let mut kinds = ScriptedKinds(&[0], 0);
    let mut now_ms = fast.spawn_interval.as_millis();
    let track_len = fast.topology.max_offset(0) + 1;

    // Head reaches the last offset after track_len - 1 ticks.
    for _ in 0..track_len - 1 {
        let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
        assert!(report.arrivals.is_empty());
        now_ms += TICK_MS;
    }
    let particle = engine.pool().get(0).copied().ok_or("slot 0 missing")?;
    assert!(particle.is_alive());
    assert_eq!(particle.head() as usize, track_len - 1);

    let report = engine.tick(at(now_ms), &mut switches, &mut kinds);
    assert_eq!(report.arrivals.len(), 1, "one step past the last light ends the run");
    assert_eq!(engine.pool().alive_count(), 0);
    Ok(())
}
