//! PIO interrupt bindings, one set per PIO block.

use embassy_rp::interrupt::typelevel::Binding;
use embassy_rp::peripherals;
use embassy_rp::pio::{Instance, InterruptHandler};

/// Maps a PIO block to the interrupt binding its driver needs.
pub trait PioIrqMap: Instance {
    /// Interrupt binding type for this PIO block.
    type Irqs: Binding<Self::Interrupt, InterruptHandler<Self>>;

    /// Returns the interrupt bindings for this PIO block.
    fn irqs() -> Self::Irqs;
}

macro_rules! pio_irq_map {
    ($pio:ident, $irq:ident, $irqs:ident) => {
        ::embassy_rp::bind_interrupts! {
            pub struct $irqs {
                $irq => InterruptHandler<peripherals::$pio>;
            }
        }

        impl PioIrqMap for peripherals::$pio {
            type Irqs = $irqs;

            fn irqs() -> Self::Irqs {
                $irqs
            }
        }
    };
}

pio_irq_map!(PIO0, PIO0_IRQ_0, Pio0Irqs);
pio_irq_map!(PIO1, PIO1_IRQ_0, Pio1Irqs);
#[cfg(feature = "pico2")]
pio_irq_map!(PIO2, PIO2_IRQ_0, Pio2Irqs);
