#![allow(missing_docs)]
//! Compile-only negative test: a compiled-in speed of zero must be rejected.
//!
//! This file is expected to fail compilation and is validated by `cargo check-all`.

#![cfg(not(feature = "host"))]
#![no_std]
#![no_main]

use embassy_executor::Spawner;
use track_sorter::particle::Speed;

const STALLED: Speed = Speed::new(0);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let _ = STALLED.sixteenths();
}

#[cfg(target_arch = "arm")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo<'_>) -> ! {
    loop {}
}
