//! Compiled-in configuration: topology, checkpoints, kinds, and timing.
//!
//! A [`Config`] is a `static` built once at compile time. See
//! [`presets`](crate::presets) for complete examples.

use embassy_time::Duration;

use crate::celebrate::Celebration;
use crate::frame::Rgb;
use crate::particle::{KindId, MAX_CHECKPOINTS, Speed};
use crate::scoring::MAX_KINDS;
use crate::topology::{Checkpoint, MAX_TRACKS, Topology, TrackId};
use crate::{Error, Result};

/// Appearance of one particle kind. Kind `k` belongs on track `k`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Kind {
    /// Particle color, also used for this destination's score trail.
    pub color: Rgb,
    /// Lights spanned behind the head (at least 1).
    pub length: u8,
}

impl Kind {
    /// A kind drawn in `color` spanning `length` lights.
    #[must_use]
    pub const fn new(color: Rgb, length: u8) -> Self {
        Self { color, length }
    }
}

/// Everything the engine needs to know about one hardware build.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Track table.
    pub topology: Topology,
    /// Branch rules, evaluated in declaration order.
    pub checkpoints: &'static [Checkpoint],
    /// Particle kinds; kind `k` is scored on track `k`.
    pub kinds: &'static [Kind],
    /// Track every particle starts on.
    pub start_track: TrackId,
    /// Particle speed.
    pub speed: Speed,
    /// Time between spawn attempts.
    pub spawn_interval: Duration,
    /// Upper bound of every destination score.
    pub score_max: u8,
    /// Brightness of score-trail lights.
    pub score_trail_level: u8,
    /// Solved-state renderer.
    pub celebration: Celebration,
    /// Frame pacing used by the device runner.
    pub tick_period: Duration,
}

impl Config {
    /// Number of destinations (one per kind).
    #[must_use]
    pub const fn destination_count(&self) -> usize {
        self.kinds.len()
    }

    /// Appearance of `kind`.
    #[must_use]
    pub fn kind(&self, kind: KindId) -> Option<&Kind> {
        self.kinds.get(kind as usize)
    }

    /// Kind colors in kind order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.kinds.iter().map(|kind| kind.color)
    }

    /// Check the configuration against a strip of `led_count` lights and a
    /// pool of `pool_capacity` slots.
    ///
    /// # Errors
    /// Returns the first problem found; see [`Error`] for the checks.
    pub fn validate(&self, led_count: usize, pool_capacity: usize) -> Result<()> {
        if pool_capacity == 0 {
            return Err(Error::EmptyPool);
        }
        self.validate_tracks(led_count)?;
        self.validate_kinds()?;
        self.validate_checkpoints()?;
        if self.score_max == 0 {
            return Err(Error::ZeroScoreMax);
        }
        Ok(())
    }

    fn validate_tracks(&self, led_count: usize) -> Result<()> {
        let track_count = self.topology.track_count();
        if track_count == 0 {
            return Err(Error::NoTracks);
        }
        if track_count > MAX_TRACKS {
            return Err(Error::TooManyTracks {
                count: track_count,
                max: MAX_TRACKS,
            });
        }
        for track in 0..track_count as TrackId {
            if self.topology.light_at(track, 0).is_none() {
                return Err(Error::EmptyTrack { track });
            }
            if let Some(light) = self
                .topology
                .lights_from_end(track)
                .find(|light| usize::from(*light) >= led_count)
            {
                return Err(Error::LightOutOfRange {
                    track,
                    light,
                    len: led_count,
                });
            }
        }
        if !self.topology.contains(self.start_track) {
            return Err(Error::UnknownTrack {
                track: self.start_track,
            });
        }
        Ok(())
    }

    fn validate_kinds(&self) -> Result<()> {
        let kind_count = self.kinds.len();
        if kind_count == 0 {
            return Err(Error::NoKinds);
        }
        let max = MAX_KINDS.min(self.topology.track_count());
        if kind_count > max {
            return Err(Error::TooManyKinds {
                count: kind_count,
                max,
            });
        }
        if let Some(kind) = self.kinds.iter().position(|kind| kind.length == 0) {
            return Err(Error::ZeroLength {
                kind: kind as KindId,
            });
        }
        Ok(())
    }

    fn validate_checkpoints(&self) -> Result<()> {
        let count = self.checkpoints.len();
        if count > MAX_CHECKPOINTS {
            return Err(Error::TooManyCheckpoints {
                count,
                max: MAX_CHECKPOINTS,
            });
        }
        for (first, checkpoint) in self.checkpoints.iter().enumerate() {
            for track in checkpoint
                .on
                .iter()
                .chain([checkpoint.if_on, checkpoint.if_off])
            {
                if !self.topology.contains(track) {
                    return Err(Error::UnknownTrack { track });
                }
            }
            if let Some(second) = self.checkpoints[first + 1..]
                .iter()
                .position(|other| {
                    other.offset == checkpoint.offset && other.on.overlaps(checkpoint.on)
                })
            {
                return Err(Error::OverlappingCheckpoints {
                    first,
                    second: first + 1 + second,
                    offset: checkpoint.offset,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebrate;
    use crate::frame::colors;
    use crate::topology::{LightIndex, Segment, Track, TrackSet, path};

    static TRACK_0: [Option<LightIndex>; 6] = path([Segment::new(0, 5)]);
    static TRACK_1: [Option<LightIndex>; 6] = path([Segment::new(0, 2), Segment::new(6, 8)]);
    static TRACKS: [Track; 2] = [&TRACK_0, &TRACK_1];
    static EMPTY_TRACK: [Option<LightIndex>; 2] = [None, Some(1)];
    static TRACKS_WITH_EMPTY: [Track; 2] = [&TRACK_0, &EMPTY_TRACK];
    static CHECKPOINTS: [Checkpoint; 1] = [Checkpoint {
        offset: 3,
        on: TrackSet::of([0]),
        switch: 0,
        if_on: 1,
        if_off: 0,
    }];
    static KINDS: [Kind; 2] = [Kind::new(colors::RED, 2), Kind::new(colors::BLUE, 1)];

    fn base_config() -> Config {
        Config {
            topology: Topology::new(&TRACKS),
            checkpoints: &CHECKPOINTS,
            kinds: &KINDS,
            start_track: 0,
            speed: Speed::new(4),
            spawn_interval: Duration::from_millis(500),
            score_max: 3,
            score_trail_level: 40,
            celebration: celebrate::dark,
            tick_period: Duration::from_millis(20),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(base_config().validate(9, 4), Ok(()));
    }

    #[test]
    fn light_past_strip_is_rejected() {
        assert_eq!(
            base_config().validate(8, 4),
            Err(Error::LightOutOfRange {
                track: 1,
                light: 8,
                len: 8,
            })
        );
    }

    #[test]
    fn empty_pool_and_zero_score_are_rejected() {
        assert_eq!(base_config().validate(9, 0), Err(Error::EmptyPool));
        let config = Config {
            score_max: 0,
            ..base_config()
        };
        assert_eq!(config.validate(9, 4), Err(Error::ZeroScoreMax));
    }

    #[test]
    fn track_without_start_light_is_rejected() {
        let config = Config {
            topology: Topology::new(&TRACKS_WITH_EMPTY),
            ..base_config()
        };
        assert_eq!(config.validate(9, 4), Err(Error::EmptyTrack { track: 1 }));
    }

    #[test]
    fn unknown_tracks_are_rejected() {
        let config = Config {
            start_track: 2,
            ..base_config()
        };
        assert_eq!(config.validate(9, 4), Err(Error::UnknownTrack { track: 2 }));

        static BAD_TARGET: [Checkpoint; 1] = [Checkpoint {
            offset: 3,
            on: TrackSet::of([0]),
            switch: 0,
            if_on: 5,
            if_off: 0,
        }];
        let config = Config {
            checkpoints: &BAD_TARGET,
            ..base_config()
        };
        assert_eq!(config.validate(9, 4), Err(Error::UnknownTrack { track: 5 }));
    }

    #[test]
    fn overlapping_checkpoints_are_rejected() {
        static OVERLAP: [Checkpoint; 2] = [
            Checkpoint {
                offset: 3,
                on: TrackSet::of([0]),
                switch: 0,
                if_on: 1,
                if_off: 0,
            },
            Checkpoint {
                offset: 3,
                on: TrackSet::of([0, 1]),
                switch: 1,
                if_on: 0,
                if_off: 1,
            },
        ];
        let config = Config {
            checkpoints: &OVERLAP,
            ..base_config()
        };
        assert_eq!(
            config.validate(9, 4),
            Err(Error::OverlappingCheckpoints {
                first: 0,
                second: 1,
                offset: 3,
            })
        );
    }

    #[test]
    fn kinds_are_checked() {
        static ZERO_LENGTH: [Kind; 1] = [Kind::new(colors::RED, 0)];
        static TOO_MANY: [Kind; 3] = [
            Kind::new(colors::RED, 1),
            Kind::new(colors::GREEN, 1),
            Kind::new(colors::BLUE, 1),
        ];
        let config_zero = Config {
            kinds: &ZERO_LENGTH,
            ..base_config()
        };
        assert_eq!(config_zero.validate(9, 4), Err(Error::ZeroLength { kind: 0 }));
        let config_many = Config {
            kinds: &TOO_MANY,
            ..base_config()
        };
        assert_eq!(
            config_many.validate(9, 4),
            Err(Error::TooManyKinds { count: 3, max: 2 })
        );
        let config_none = Config {
            kinds: &[],
            ..base_config()
        };
        assert_eq!(config_none.validate(9, 4), Err(Error::NoKinds));
    }
}
