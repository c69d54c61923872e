//! Error type for configuration checks.
//!
//! The tick itself never fails. Everything that can go wrong with a
//! compiled-in configuration is reported once, when the engine is built.

use crate::particle::KindId;
use crate::topology::{LightIndex, TrackId};

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors found while validating a [`Config`](crate::config::Config).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Error {
    /// The topology declares no tracks.
    #[error("topology has no tracks")]
    NoTracks,

    /// More tracks than a track set can name.
    #[error("topology has {count} tracks, at most {max} are supported")]
    TooManyTracks { count: usize, max: usize },

    /// A track has no light at offset 0.
    #[error("track {track} has no light at offset 0")]
    EmptyTrack { track: TrackId },

    /// A track addresses a light the strip does not have.
    #[error("track {track} uses light {light}, strip has {len} lights")]
    LightOutOfRange {
        track: TrackId,
        light: LightIndex,
        len: usize,
    },

    /// A checkpoint or the start track names a track that does not exist.
    #[error("reference to unknown track {track}")]
    UnknownTrack { track: TrackId },

    /// More checkpoints than a particle can remember.
    #[error("{count} checkpoints declared, at most {max} are supported")]
    TooManyCheckpoints { count: usize, max: usize },

    /// Two checkpoints match the same (track, offset) pair.
    #[error("checkpoints {first} and {second} both match offset {offset}")]
    OverlappingCheckpoints {
        first: usize,
        second: usize,
        offset: u16,
    },

    /// No particle kinds are declared.
    #[error("no particle kinds declared")]
    NoKinds,

    /// More kinds than destinations or than the scoreboard holds.
    #[error("{count} particle kinds declared, at most {max} are supported")]
    TooManyKinds { count: usize, max: usize },

    /// A particle kind spans zero lights.
    #[error("particle kind {kind} has zero length")]
    ZeroLength { kind: KindId },

    /// Scores could never rise above zero.
    #[error("score max must be at least 1")]
    ZeroScoreMax,

    /// The particle pool has no slots.
    #[error("particle pool capacity must be at least 1")]
    EmptyPool,
}
