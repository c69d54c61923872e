//! Branching track layout: which light each track visits at each offset.
//!
//! A [`Track`] lists light indices by offset from the start of the run. Every
//! track starts at offset 0, so a particle can switch tracks at a checkpoint
//! and keep its position. `None`, or any offset past the end of the slice,
//! is the end-of-track sentinel.
//!
//! Tracks are usually written with [`path`], which expands light-index
//! [`Segment`]s into a `const` array:
//!
//! ```rust,ignore
//! const TRUNK: Segment = Segment::new(0, 5);
//! static TRACK_0: [Option<LightIndex>; 12] = path([TRUNK, Segment::new(6, 11)]);
//! ```

/// Index of one light on the strip.
pub type LightIndex = u16;

/// Identifier of a track (and, for destinations, of the matching particle kind).
pub type TrackId = u8;

/// Identifier of an external switch.
pub type SwitchId = u8;

/// Light offsets per track as stored in the table; `None` is the sentinel.
pub type Track = &'static [Option<LightIndex>];

/// Fixed-point sub-steps per light: positions are in sixteenths of a light.
pub const SUBSTEPS: u32 = 16;

/// Most tracks a [`Topology`] may hold (limited by [`TrackSet`] width).
pub const MAX_TRACKS: usize = 16;

// ============================================================================
// TrackSet
// ============================================================================

/// Set of tracks a [`Checkpoint`] applies to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct TrackSet(u16);

impl TrackSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set from a list of track ids.
    #[must_use]
    pub const fn of<const COUNT: usize>(tracks: [TrackId; COUNT]) -> Self {
        let mut set = Self::EMPTY;
        let mut track_index = 0;
        while track_index < COUNT {
            set = set.with(tracks[track_index]);
            track_index += 1;
        }
        set
    }

    /// This set plus `track`.
    #[must_use]
    pub const fn with(self, track: TrackId) -> Self {
        assert!((track as usize) < MAX_TRACKS, "track id must be < MAX_TRACKS");
        Self(self.0 | (1 << track))
    }

    /// Returns `true` if `track` is in the set.
    #[must_use]
    pub const fn contains(self, track: TrackId) -> bool {
        (track as usize) < MAX_TRACKS && self.0 & (1 << track) != 0
    }

    /// Returns `true` if the two sets share a track.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate the track ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = TrackId> {
        (0..MAX_TRACKS as TrackId).filter(move |track| self.contains(*track))
    }
}

// ============================================================================
// Checkpoint
// ============================================================================

/// A branch rule: at `offset`, particles on a track in `on` take the track
/// chosen by `switch`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Checkpoint {
    /// Light offset (position / 16) at which the rule is evaluated.
    pub offset: u16,
    /// Tracks the rule applies to.
    pub on: TrackSet,
    /// Switch read when the rule fires.
    pub switch: SwitchId,
    /// Track taken when the switch is on.
    pub if_on: TrackId,
    /// Track taken when the switch is off.
    pub if_off: TrackId,
}

impl Checkpoint {
    /// Returns `true` if a particle at `offset` on `track` meets this rule.
    #[must_use]
    pub const fn applies(&self, track: TrackId, offset: u32) -> bool {
        self.offset as u32 == offset && self.on.contains(track)
    }

    /// Track chosen for the given switch reading.
    #[must_use]
    pub const fn route(&self, switch_on: bool) -> TrackId {
        if switch_on { self.if_on } else { self.if_off }
    }
}

// ============================================================================
// Segment and path builder
// ============================================================================

/// Inclusive run of consecutive light indices, ascending or descending.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment {
    first: LightIndex,
    last: LightIndex,
}

impl Segment {
    /// Lights `first..=last`; `first > last` walks the strip backwards.
    #[must_use]
    pub const fn new(first: LightIndex, last: LightIndex) -> Self {
        Self { first, last }
    }

    const fn len(&self) -> usize {
        if self.first <= self.last {
            (self.last - self.first) as usize + 1
        } else {
            (self.first - self.last) as usize + 1
        }
    }

    const fn light(&self, step: usize) -> LightIndex {
        if self.first <= self.last {
            self.first + step as LightIndex
        } else {
            self.first - step as LightIndex
        }
    }
}

/// Expand segments into a track table of `LEN` offsets, padded with the
/// end-of-track sentinel.
///
/// Panics (at compile time, in `const` use) if the segments hold more than
/// `LEN` lights.
#[must_use]
pub const fn path<const LEN: usize, const SEGMENTS: usize>(
    segments: [Segment; SEGMENTS],
) -> [Option<LightIndex>; LEN] {
    let mut lights = [None; LEN];
    let mut offset = 0;
    let mut segment_index = 0;
    while segment_index < SEGMENTS {
        let segment = segments[segment_index];
        let mut step = 0;
        while step < segment.len() {
            assert!(offset < LEN, "segments must fit in the track length");
            lights[offset] = Some(segment.light(step));
            offset += 1;
            step += 1;
        }
        segment_index += 1;
    }
    lights
}

// ============================================================================
// Topology
// ============================================================================

/// Static table of every track, indexed by [`TrackId`].
#[derive(Clone, Copy, Debug)]
pub struct Topology {
    tracks: &'static [Track],
}

impl Topology {
    /// Wrap a compiled-in track table.
    #[must_use]
    pub const fn new(tracks: &'static [Track]) -> Self {
        Self { tracks }
    }

    /// Number of tracks.
    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Table entries of `track`, or `None` for an unknown track.
    #[must_use]
    pub fn track(&self, track: TrackId) -> Option<Track> {
        self.tracks.get(track as usize).copied()
    }

    /// Returns `true` if `track` names a table entry.
    #[must_use]
    pub const fn contains(&self, track: TrackId) -> bool {
        (track as usize) < self.tracks.len()
    }

    /// Light at `offset` on `track`, or `None` past the end of the track.
    #[must_use]
    pub fn light_at(&self, track: TrackId, offset: usize) -> Option<LightIndex> {
        self.track(track)?.get(offset).copied().flatten()
    }

    /// Largest offset with a table entry on `track` (0 for an unknown or
    /// empty track).
    #[must_use]
    pub fn max_offset(&self, track: TrackId) -> usize {
        self.track(track)
            .map_or(0, |lights| lights.len().saturating_sub(1))
    }

    /// Real lights of `track` from its far end back toward the start.
    pub fn lights_from_end(&self, track: TrackId) -> impl Iterator<Item = LightIndex> {
        self.track(track)
            .unwrap_or(&[])
            .iter()
            .rev()
            .filter_map(|light| *light)
    }
}
