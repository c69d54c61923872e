//! Ready-made configurations for the two sorter builds.
//!
//! Both use the same engine; only the tables differ.
//!
//! **[`STRIP_42`]**: 42 lights, 3 switches, 4 destinations.
//!
//! ```text
//!                      ┌─ sw1 on ─ 18..23  (track 1)
//!          ┌─ 6..11 ───┤
//!          │           └─ sw1 off ─ 12..17 (track 0)
//! 0..5 ────┤ sw0
//!          │           ┌─ sw2 on ─ 36..41  (track 3)
//!          └─ 24..29 ──┤
//!                      └─ sw2 off ─ 30..35 (track 2)
//! ```
//!
//! **[`STRIP_30`]**: 30 lights, 2 switches, 3 destinations. The last branch
//! is wired back toward the controller, so its lights run downward.

use embassy_time::Duration;

use crate::celebrate;
use crate::config::{Config, Kind};
use crate::frame::colors;
use crate::particle::Speed;
use crate::topology::{Checkpoint, LightIndex, Segment, Topology, Track, TrackSet, path};

// ============================================================================
// STRIP_42
// ============================================================================

/// Lights on the 42-light build.
pub const STRIP_42_LEN: usize = 42;

const STRIP_42_TRACK_LEN: usize = 18;
const STRIP_42_TRUNK: Segment = Segment::new(0, 5);
const STRIP_42_LEFT: Segment = Segment::new(6, 11);
const STRIP_42_RIGHT: Segment = Segment::new(24, 29);

static STRIP_42_TRACK_0: [Option<LightIndex>; STRIP_42_TRACK_LEN] =
    path([STRIP_42_TRUNK, STRIP_42_LEFT, Segment::new(12, 17)]);
static STRIP_42_TRACK_1: [Option<LightIndex>; STRIP_42_TRACK_LEN] =
    path([STRIP_42_TRUNK, STRIP_42_LEFT, Segment::new(18, 23)]);
static STRIP_42_TRACK_2: [Option<LightIndex>; STRIP_42_TRACK_LEN] =
    path([STRIP_42_TRUNK, STRIP_42_RIGHT, Segment::new(30, 35)]);
static STRIP_42_TRACK_3: [Option<LightIndex>; STRIP_42_TRACK_LEN] =
    path([STRIP_42_TRUNK, STRIP_42_RIGHT, Segment::new(36, 41)]);

static STRIP_42_TRACKS: [Track; 4] = [
    &STRIP_42_TRACK_0,
    &STRIP_42_TRACK_1,
    &STRIP_42_TRACK_2,
    &STRIP_42_TRACK_3,
];

static STRIP_42_CHECKPOINTS: [Checkpoint; 3] = [
    Checkpoint {
        offset: 6,
        on: TrackSet::of([0]),
        switch: 0,
        if_on: 2,
        if_off: 0,
    },
    Checkpoint {
        offset: 12,
        on: TrackSet::of([0]),
        switch: 1,
        if_on: 1,
        if_off: 0,
    },
    Checkpoint {
        offset: 12,
        on: TrackSet::of([2]),
        switch: 2,
        if_on: 3,
        if_off: 2,
    },
];

static STRIP_42_KINDS: [Kind; 4] = [
    Kind::new(colors::RED, 3),
    Kind::new(colors::LIME, 2),
    Kind::new(colors::BLUE, 3),
    Kind::new(colors::YELLOW, 2),
];

/// Four-destination build on 42 lights.
pub static STRIP_42: Config = Config {
    topology: Topology::new(&STRIP_42_TRACKS),
    checkpoints: &STRIP_42_CHECKPOINTS,
    kinds: &STRIP_42_KINDS,
    start_track: 0,
    speed: Speed::new(4),
    spawn_interval: Duration::from_millis(1_500),
    score_max: 3,
    score_trail_level: 48,
    celebration: celebrate::rainbow_chase,
    tick_period: Duration::from_millis(20),
};

// ============================================================================
// STRIP_30
// ============================================================================

/// Lights on the 30-light build.
pub const STRIP_30_LEN: usize = 30;

const STRIP_30_TRACK_LEN: usize = 15;
const STRIP_30_TRUNK: Segment = Segment::new(0, 4);
const STRIP_30_FORK: Segment = Segment::new(15, 19);

static STRIP_30_TRACK_0: [Option<LightIndex>; STRIP_30_TRACK_LEN] =
    path([STRIP_30_TRUNK, Segment::new(5, 14)]);
static STRIP_30_TRACK_1: [Option<LightIndex>; STRIP_30_TRACK_LEN] =
    path([STRIP_30_TRUNK, STRIP_30_FORK, Segment::new(20, 24)]);
static STRIP_30_TRACK_2: [Option<LightIndex>; STRIP_30_TRACK_LEN] =
    path([STRIP_30_TRUNK, STRIP_30_FORK, Segment::new(29, 25)]);

static STRIP_30_TRACKS: [Track; 3] = [&STRIP_30_TRACK_0, &STRIP_30_TRACK_1, &STRIP_30_TRACK_2];

static STRIP_30_CHECKPOINTS: [Checkpoint; 2] = [
    Checkpoint {
        offset: 5,
        on: TrackSet::of([0]),
        switch: 0,
        if_on: 1,
        if_off: 0,
    },
    Checkpoint {
        offset: 10,
        on: TrackSet::of([1]),
        switch: 1,
        if_on: 2,
        if_off: 1,
    },
];

static STRIP_30_KINDS: [Kind; 3] = [
    Kind::new(colors::RED, 2),
    Kind::new(colors::LIME, 2),
    Kind::new(colors::BLUE, 3),
];

/// Three-destination build on 30 lights.
pub static STRIP_30: Config = Config {
    topology: Topology::new(&STRIP_30_TRACKS),
    checkpoints: &STRIP_30_CHECKPOINTS,
    kinds: &STRIP_30_KINDS,
    start_track: 0,
    speed: Speed::new(6),
    spawn_interval: Duration::from_millis(2_000),
    score_max: 2,
    score_trail_level: 40,
    celebration: celebrate::rainbow_chase,
    tick_period: Duration::from_millis(25),
};
