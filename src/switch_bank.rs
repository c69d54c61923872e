//! Route switches read from GPIO pins.
//!
//! See [`SwitchBank`] for usage.

use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pull};

use crate::inputs::Switches;
use crate::topology::SwitchId;

/// How a switch is wired, which decides the pull and the "on" level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum PressedTo {
    /// Switch connects the pin to ground when on. The pin is pulled up.
    Ground,
    /// Switch connects the pin to 3.3 V when on. The pin is pulled down.
    Voltage,
}

impl PressedTo {
    const fn pull(self) -> Pull {
        match self {
            Self::Ground => Pull::Up,
            Self::Voltage => Pull::Down,
        }
    }
}

/// `N` toggle switches, indexed by [`SwitchId`] in pin order.
///
/// # Example
///
/// ```rust,ignore
/// let mut switches = SwitchBank::new(
///     [p.PIN_13.into(), p.PIN_14.into(), p.PIN_15.into()],
///     PressedTo::Ground,
/// );
/// let report = engine.tick(Instant::now(), &mut switches, &mut rng);
/// ```
pub struct SwitchBank<'d, const N: usize> {
    inputs: [Input<'d>; N],
    pressed_to: PressedTo,
}

impl<'d, const N: usize> SwitchBank<'d, N> {
    /// Configure `pins` as inputs with the pull matching `pressed_to`.
    #[must_use]
    pub fn new(pins: [Peri<'d, AnyPin>; N], pressed_to: PressedTo) -> Self {
        Self {
            inputs: pins.map(|pin| Input::new(pin, pressed_to.pull())),
            pressed_to,
        }
    }

    /// Current position of every switch.
    #[must_use]
    pub fn states(&self) -> [bool; N] {
        core::array::from_fn(|index| self.read(index))
    }

    fn read(&self, index: usize) -> bool {
        let input = &self.inputs[index];
        match self.pressed_to {
            PressedTo::Ground => input.is_low(),
            PressedTo::Voltage => input.is_high(),
        }
    }
}

impl<const N: usize> Switches for SwitchBank<'_, N> {
    fn is_on(&mut self, switch: SwitchId) -> bool {
        let index = usize::from(switch);
        index < N && self.read(index)
    }
}
