//! Fixed-size light buffer with additive, level-scaled blending.
//!
//! See [`Frame1d`] for the buffer the engine renders into each tick.

use core::ops::{Deref, DerefMut};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by light frames.
pub type Rgb = smart_leds::RGB8;

/// Full brightness level for [`Frame1d::add`].
pub const FULL_LEVEL: u8 = u8::MAX;

/// Fixed-size 1D light frame.
///
/// Indexing works like an array (`frame[3]`). Renderers use [`Frame1d::add`]
/// so overlapping contributions blend instead of replacing each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame1d<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of lights in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    /// Set every light to black.
    pub fn clear(&mut self) {
        self.0 = [Rgb::new(0, 0, 0); N];
    }

    /// Add `color` scaled by `level / 255` onto the light at `index`.
    ///
    /// Channels saturate at 255. An `index` outside the frame is ignored and
    /// returns `false`.
    pub fn add(&mut self, index: usize, color: Rgb, level: u8) -> bool {
        let Some(pixel) = self.0.get_mut(index) else {
            return false;
        };
        let scaled = scale(color, level);
        pixel.r = pixel.r.saturating_add(scaled.r);
        pixel.g = pixel.g.saturating_add(scaled.g);
        pixel.b = pixel.b.saturating_add(scaled.b);
        true
    }

    /// Returns `true` when every light is black.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.0.iter().all(|pixel| *pixel == Rgb::new(0, 0, 0))
    }
}

/// Scale each channel of `color` by `level / 255`.
#[must_use]
pub const fn scale(color: Rgb, level: u8) -> Rgb {
    Rgb::new(
        scale_channel(color.r, level),
        scale_channel(color.g, level),
        scale_channel(color.b, level),
    )
}

#[inline]
const fn scale_channel(channel: u8, level: u8) -> u8 {
    ((channel as u16 * level as u16) / FULL_LEVEL as u16) as u8
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame1d<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [Rgb; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}
