//! Sub-light particle rendering and the score trail.
//!
//! Every contribution is added onto the frame with [`Frame1d::add`], so
//! particles that overlap each other or the score trail blend together.

use crate::frame::{FULL_LEVEL, Frame1d, Rgb};
use crate::particle::Particle;
use crate::scoring::Scoreboard;
use crate::topology::{SUBSTEPS, Topology, TrackId};

/// Brightness step per sixteenth of phase: 16 × 15 = 240 at the last phase.
const LEVEL_PER_PHASE: u32 = 256 / SUBSTEPS;

/// Brightness of the light `n` places behind a particle's head.
///
/// - `n == 0` (leading edge): `phase * 16`, fading in as the head enters a light.
/// - `n == length` (trailing edge): `255 - phase * 16`, fading out at the tail.
/// - otherwise: full brightness.
///
/// `phase` is the head's sub-light position, `0..16`.
#[must_use]
pub const fn edge_level(n: u32, length: u32, phase: u32) -> u8 {
    assert!(phase < SUBSTEPS, "phase must be < 16");
    let fade_in = phase * LEVEL_PER_PHASE;
    if n == 0 {
        fade_in as u8
    } else if n == length {
        FULL_LEVEL - fade_in as u8
    } else {
        FULL_LEVEL
    }
}

/// Add one live particle onto `frame` in `color`.
///
/// Lights `head - n` for `n` in `0..=min(length, head)` are lit at
/// [`edge_level`]. Offsets are clamped into the track's table before lookup,
/// and sentinel entries and lights past the frame are skipped.
pub fn render_particle<const N: usize>(
    frame: &mut Frame1d<N>,
    topology: &Topology,
    particle: &Particle,
    color: Rgb,
) {
    if !particle.is_alive() {
        return;
    }
    let head = particle.head();
    let phase = particle.phase();
    let length = u32::from(particle.length());
    let max_offset = topology.max_offset(particle.track());

    for n in 0..=length.min(head) {
        let offset = ((head - n) as usize).min(max_offset);
        let Some(light) = topology.light_at(particle.track(), offset) else {
            continue;
        };
        frame.add(light as usize, color, edge_level(n, length, phase));
    }
}

/// Light the last `score[d]` lights of each destination track `d` in
/// `colors[d]` at `level`.
pub fn render_score_trail<const N: usize>(
    frame: &mut Frame1d<N>,
    topology: &Topology,
    scoreboard: &Scoreboard,
    colors: impl IntoIterator<Item = Rgb>,
    level: u8,
) {
    for (track_index, (score, color)) in scoreboard.scores().iter().zip(colors).enumerate() {
        let track = track_index as TrackId;
        for light in topology.lights_from_end(track).take(usize::from(*score)) {
            frame.add(light as usize, color, level);
        }
    }
}
