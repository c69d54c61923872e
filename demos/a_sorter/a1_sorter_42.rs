#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::Instant;
use track_sorter::{
    Result,
    engine::Engine,
    pio_irqs::PioIrqMap,
    presets::{STRIP_42, STRIP_42_LEN},
    runner,
    switch_bank::{PressedTo, SwitchBank},
};
use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "pico2")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Four particles on the strip at once is plenty for three switches.
const POOL: usize = 4;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, PIO0::irqs());
    let program = PioWs2812Program::new(&mut common);
    let mut strip = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_0, &program);

    // Toggle switches to ground: GP13 picks the fork, GP14 and GP15 the branches.
    let mut switches = SwitchBank::new(
        [p.PIN_13.into(), p.PIN_14.into(), p.PIN_15.into()],
        PressedTo::Ground,
    );
    info!("switches at startup: {}", switches.states());
    let mut rng = RoscRng;

    let mut engine = Engine::<POOL, STRIP_42_LEN>::new(&STRIP_42, Instant::now())?;
    Ok(runner::run(&mut engine, &mut strip, &mut switches, &mut rng).await)
}
