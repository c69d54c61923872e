//! Solved-state animations. They depend only on elapsed time.

use embassy_time::Duration;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::frame::Rgb;

/// Signature of a solved-state renderer: overwrite `lights` for `elapsed`
/// time since the run was solved.
pub type Celebration = fn(lights: &mut [Rgb], elapsed: Duration);

const HUE_STEP_PER_LIGHT: u8 = 12;
const HUE_STEP_MS: u64 = 8;
const PULSE_PERIOD_MS: u64 = 1_200;
const PULSE_FLOOR: u8 = 64;

/// A rainbow that scrolls along the strip and slowly breathes.
pub fn rainbow_chase(lights: &mut [Rgb], elapsed: Duration) {
    let elapsed_ms = elapsed.as_millis();
    let hue_offset = (elapsed_ms / HUE_STEP_MS) as u8;
    let val = pulse(elapsed_ms);
    for (light_index, light) in lights.iter_mut().enumerate() {
        let hue = hue_offset.wrapping_add((light_index as u8).wrapping_mul(HUE_STEP_PER_LIGHT));
        *light = hsv2rgb(Hsv { hue, sat: 255, val });
    }
}

/// Triangle wave between `PULSE_FLOOR` and 255.
const fn pulse(elapsed_ms: u64) -> u8 {
    let half_period_ms = PULSE_PERIOD_MS / 2;
    let phase_ms = elapsed_ms % PULSE_PERIOD_MS;
    let rising_ms = if phase_ms < half_period_ms {
        phase_ms
    } else {
        PULSE_PERIOD_MS - phase_ms
    };
    let span = (u8::MAX - PULSE_FLOOR) as u64;
    PULSE_FLOOR + (rising_ms * span / half_period_ms) as u8
}

/// All lights off. Useful when the solved state should simply go dark.
pub fn dark(lights: &mut [Rgb], _elapsed: Duration) {
    lights.fill(Rgb::new(0, 0, 0));
}
