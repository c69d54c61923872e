//! Collaborator traits the engine reads from: branch switches and entropy.

use crate::particle::KindId;
use crate::topology::SwitchId;

/// Source of switch readings for checkpoints.
///
/// Readings are taken as-is: no debouncing, and every `bool` is a valid
/// branch decision.
pub trait Switches {
    /// Returns `true` if `switch` is on.
    fn is_on(&mut self, switch: SwitchId) -> bool;
}

/// Fixed switch states, indexed by [`SwitchId`]. Unknown switches read off.
impl<const N: usize> Switches for [bool; N] {
    fn is_on(&mut self, switch: SwitchId) -> bool {
        self.get(switch as usize).copied().unwrap_or(false)
    }
}

impl<S: Switches + ?Sized> Switches for &mut S {
    fn is_on(&mut self, switch: SwitchId) -> bool {
        (**self).is_on(switch)
    }
}

/// Source of particle kinds for spawning.
pub trait Entropy {
    /// Returns a kind in `0..kind_count`. `kind_count` is never 0.
    fn pick_kind(&mut self, kind_count: u8) -> KindId;
}

/// Any `rand_core` generator (for example `embassy_rp::clocks::RoscRng`).
impl<R: rand_core::RngCore> Entropy for R {
    fn pick_kind(&mut self, kind_count: u8) -> KindId {
        debug_assert!(kind_count > 0);
        (self.next_u32() % u32::from(kind_count.max(1))) as KindId
    }
}
