//! PNG timelines of recorded frames, for inspecting runs on the host.

#![cfg(feature = "host")]

use std::fs;
use std::path::Path;

use crate::frame::Frame1d;

/// Encode a run as a PNG timeline: one row per frame, one column per light.
///
/// Each light is drawn as a `light_px` × `light_px` square, so short strips
/// stay readable.
///
/// # Errors
/// Returns an error if PNG encoding fails.
pub fn timeline_png<const N: usize>(
    frames: &[Frame1d<N>],
    light_px: u32,
) -> Result<Vec<u8>, png::EncodingError> {
    let light_px = light_px.max(1);
    let width = N as u32 * light_px;
    let height = frames.len() as u32 * light_px;

    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for frame in frames {
        let mut row = Vec::with_capacity(width as usize * 3);
        for pixel in frame.iter() {
            for _ in 0..light_px {
                row.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
            }
        }
        for _ in 0..light_px {
            data.extend_from_slice(&row);
        }
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }
    Ok(bytes)
}

/// Write [`timeline_png`] output to `path`.
///
/// # Errors
/// Returns an error if encoding or writing the file fails.
pub fn write_timeline_png<const N: usize>(
    path: impl AsRef<Path>,
    frames: &[Frame1d<N>],
    light_px: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = timeline_png(frames, light_px)?;
    fs::write(path, bytes)?;
    Ok(())
}
