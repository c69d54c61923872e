#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::Instant;
use track_sorter::{
    Result,
    engine::Engine,
    pio_irqs::PioIrqMap,
    presets::{STRIP_30, STRIP_30_LEN},
    runner,
    switch_bank::{PressedTo, SwitchBank},
};
use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "pico2")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

const POOL: usize = 3;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // The 30-light build drives its strip from PIO1 on GP2.
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO1, PIO1::irqs());
    let program = PioWs2812Program::new(&mut common);
    let mut strip = PioWs2812::new(&mut common, sm0, p.DMA_CH1, p.PIN_2, &program);

    // Switches wired to 3.3 V: GP10 picks the first fork, GP11 the second.
    let mut switches = SwitchBank::new([p.PIN_10.into(), p.PIN_11.into()], PressedTo::Voltage);
    info!("switches at startup: {}", switches.states());
    let mut rng = RoscRng;

    let mut engine = Engine::<POOL, STRIP_30_LEN>::new(&STRIP_30, Instant::now())?;
    Ok(runner::run(&mut engine, &mut strip, &mut switches, &mut rng).await)
}
