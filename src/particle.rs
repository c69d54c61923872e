//! Particles and the fixed-capacity pool that holds them.
//!
//! Positions are fixed-point: one light is [`SUBSTEPS`] (16) position units,
//! so a particle can sit part-way between two lights.

use crate::topology::{SUBSTEPS, TrackId};

/// Particle kind: picks its color and length, and names its destination track.
pub type KindId = u8;

/// Most checkpoints a particle can remember firing (width of the fired set).
pub const MAX_CHECKPOINTS: usize = 32;

// ============================================================================
// Speed
// ============================================================================

/// Distance a particle moves per tick, in sixteenths of a light (1..=16).
///
/// Capping the speed at one light per tick means the head visits every
/// offset, so no checkpoint can be stepped over.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Speed(u8);

impl Speed {
    /// Slowest speed: one sixteenth of a light per tick.
    pub const MIN: Self = Self(1);
    /// Fastest speed: one light per tick.
    pub const MAX: Self = Self(SUBSTEPS as u8);

    /// Creates a speed of `sixteenths` per tick.
    ///
    /// Panics if `sixteenths` is outside 1..=16; in a `const` this fails the build.
    #[must_use]
    pub const fn new(sixteenths: u8) -> Self {
        assert!(sixteenths >= 1, "speed must be at least 1 sixteenth per tick");
        assert!(
            sixteenths <= Self::MAX.0,
            "speed must be at most one light (16 sixteenths) per tick"
        );
        Self(sixteenths)
    }

    /// Sixteenths per tick.
    #[must_use]
    pub const fn sixteenths(self) -> u8 {
        self.0
    }
}

// ============================================================================
// Particle
// ============================================================================

/// One moving particle (or an idle pool slot when not alive).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Particle {
    kind: KindId,
    position: u32,
    speed: Speed,
    length: u8,
    track: TrackId,
    alive: bool,
    fired: u32,
}

impl Particle {
    /// An inactive slot.
    pub const IDLE: Self = Self {
        kind: 0,
        position: 0,
        speed: Speed::MIN,
        length: 0,
        track: 0,
        alive: false,
        fired: 0,
    };

    /// A freshly spawned particle at position 0 on `track`.
    #[must_use]
    pub const fn spawn(kind: KindId, length: u8, track: TrackId, speed: Speed) -> Self {
        Self {
            kind,
            position: 0,
            speed,
            length,
            track,
            alive: true,
            fired: 0,
        }
    }

    /// Kind (color and destination).
    #[must_use]
    pub const fn kind(&self) -> KindId {
        self.kind
    }

    /// Distance traveled, in sixteenths of a light.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Light offset of the head (`position / 16`).
    #[must_use]
    pub const fn head(&self) -> u32 {
        self.position / SUBSTEPS
    }

    /// Sub-light phase of the head (`position % 16`).
    #[must_use]
    pub const fn phase(&self) -> u32 {
        self.position % SUBSTEPS
    }

    /// Speed in sixteenths per tick.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Number of lights the particle spans behind its head.
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Track currently traveled.
    #[must_use]
    pub const fn track(&self) -> TrackId {
        self.track
    }

    /// Whether the slot holds a live particle.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns `true` if checkpoint `index` already fired for this particle.
    #[must_use]
    pub const fn has_fired(&self, index: usize) -> bool {
        index < MAX_CHECKPOINTS && self.fired & (1 << index) != 0
    }

    /// Switch to `track` and remember that checkpoint `index` fired.
    pub(crate) fn reroute(&mut self, index: usize, track: TrackId) {
        debug_assert!(index < MAX_CHECKPOINTS);
        self.fired |= 1 << index;
        self.track = track;
    }

    /// Move forward by one tick of speed.
    pub(crate) fn advance(&mut self) {
        self.position = self.position.saturating_add(u32::from(self.speed.0));
    }

    /// Free the slot.
    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::IDLE
    }
}

// ============================================================================
// ParticlePool
// ============================================================================

/// Fixed-capacity set of reusable particle slots.
///
/// Slots are claimed first-fit by [`ParticlePool::allocate`] and freed by
/// clearing the alive flag. There is no heap and no explicit free.
#[derive(Clone, Debug)]
pub struct ParticlePool<const N: usize> {
    slots: [Particle; N],
}

impl<const N: usize> ParticlePool<N> {
    /// A pool with every slot inactive.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Particle::IDLE; N],
        }
    }

    /// Claim the first inactive slot and fill it with `init()`.
    ///
    /// `init` only runs when a slot is free. A full pool drops the request and
    /// returns `None`.
    pub fn allocate(&mut self, init: impl FnOnce() -> Particle) -> Option<usize> {
        let slot_index = self.slots.iter().position(|slot| !slot.alive)?;
        self.slots[slot_index] = init();
        Some(slot_index)
    }

    /// Apply `f` to every live particle in slot order.
    pub fn for_each_alive(&mut self, mut f: impl FnMut(usize, &mut Particle)) {
        for (slot_index, particle) in self.slots.iter_mut().enumerate() {
            if particle.alive {
                f(slot_index, particle);
            }
        }
    }

    /// Iterate live particles in slot order.
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|particle| particle.alive)
    }

    /// Number of live particles.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Slot contents, live or not.
    #[must_use]
    pub fn get(&self, slot_index: usize) -> Option<&Particle> {
        self.slots.get(slot_index)
    }
}

impl<const N: usize> Default for ParticlePool<N> {
    fn default() -> Self {
        Self::new()
    }
}
