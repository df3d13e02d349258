// SPDX-License-Identifier: GPL-3.0-only

//! Depth to display image conversion
//!
//! Millimeter samples are remapped onto an 8-bit gray ramp over
//! `0..=DISPLAY_RANGE_MM` and replicated into three channels. There is no
//! invalid marker: anything past the range saturates at the far end.

use crate::config::DepthColoring;
use crate::constants::depth::DISPLAY_RANGE_MM;
use crate::sdk::{DepthFrame, UserMap};
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use tracing::warn;

/// Gray level for one depth sample
///
/// `NearBright` yields `round(255 - 255 * v / range)` and `NearDark`
/// yields `round(255 * v / range)`, both clamped to `0..=255`. Halves
/// round up.
#[inline]
pub fn depth_intensity(depth_mm: u16, coloring: DepthColoring) -> u8 {
    let range = DISPLAY_RANGE_MM as u32;
    let v = (depth_mm as u32).min(range);
    let distance = match coloring {
        DepthColoring::NearBright => range - v,
        DepthColoring::NearDark => v,
    };
    // range is even, so range / 2 is an exact half
    ((255 * distance + range / 2) / range) as u8
}

/// Convert a depth frame into a 3-channel gray image
///
/// Returns `None` for an empty frame so the caller skips drawing and
/// display for that tick.
pub fn depth_to_image(frame: &DepthFrame, coloring: DepthColoring) -> Option<RgbImage> {
    if frame.is_empty() || frame.width() == 0 || frame.height() == 0 {
        return None;
    }

    let width = frame.width() as usize;
    let mut rgb = vec![0u8; frame.data().len() * 3];

    rgb.par_chunks_mut(width * 3)
        .zip(frame.data().par_chunks(width))
        .for_each(|(out_row, depth_row)| {
            for (pixel, &depth) in out_row.chunks_exact_mut(3).zip(depth_row) {
                let gray = depth_intensity(depth, coloring);
                pixel.copy_from_slice(&[gray, gray, gray]);
            }
        });

    RgbImage::from_raw(frame.width(), frame.height(), rgb)
}

/// Paint every pixel that belongs to user `1..=palette.len()` with that
/// user's palette color; background (0) and higher ids keep the depth gray
pub fn paint_user_map(image: &mut RgbImage, map: &UserMap, palette: &[Rgb<u8>]) {
    let width = image.width() as usize;
    if width == 0 || map.width != image.width() || map.height != image.height() {
        warn!(
            map_width = map.width,
            map_height = map.height,
            image_width = image.width(),
            image_height = image.height(),
            "User map does not match depth image, skipping segmentation overlay"
        );
        return;
    }

    let buffer: &mut [u8] = image;
    buffer
        .par_chunks_mut(width * 3)
        .zip(map.pixels.par_chunks(width))
        .for_each(|(row, ids)| {
            for (pixel, &id) in row.chunks_exact_mut(3).zip(ids) {
                let id = id as usize;
                if id != 0 && id <= palette.len() {
                    pixel.copy_from_slice(&palette[id - 1].0);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::overlay::PALETTE;

    fn reference(v: u16) -> u8 {
        let value = 255.0 - 255.0 * v as f64 / 10_000.0;
        value.round().clamp(0.0, 255.0) as u8
    }

    #[test]
    fn test_intensity_matches_affine_remap() {
        for v in (0..=10_000u16).step_by(7) {
            assert_eq!(
                depth_intensity(v, DepthColoring::NearBright),
                reference(v),
                "depth {}",
                v
            );
        }
        assert_eq!(depth_intensity(10_000, DepthColoring::NearBright), 0);
    }

    #[test]
    fn test_intensity_extremes() {
        assert_eq!(depth_intensity(0, DepthColoring::NearBright), 255);
        assert_eq!(depth_intensity(10_001, DepthColoring::NearBright), 0);
        assert_eq!(depth_intensity(u16::MAX, DepthColoring::NearBright), 0);

        assert_eq!(depth_intensity(0, DepthColoring::NearDark), 0);
        assert_eq!(depth_intensity(u16::MAX, DepthColoring::NearDark), 255);
    }

    #[test]
    fn test_depth_to_image_replicates_channels() {
        let frame = DepthFrame::new(2, 2, vec![0, 5_000, 10_000, 40_000]).unwrap();
        let image = depth_to_image(&frame, DepthColoring::NearBright).unwrap();

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([128, 128, 128]));
        assert_eq!(image.get_pixel(0, 1), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_empty_frame_yields_no_image() {
        let frame = DepthFrame::default();
        assert!(depth_to_image(&frame, DepthColoring::NearBright).is_none());
    }

    #[test]
    fn test_user_map_painting() {
        let frame = DepthFrame::new(4, 1, vec![0; 4]).unwrap();
        let mut image = depth_to_image(&frame, DepthColoring::NearBright).unwrap();
        let map = UserMap {
            width: 4,
            height: 1,
            pixels: vec![0, 1, 6, 7],
        };

        paint_user_map(&mut image, &map, &PALETTE);

        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(1, 0), &PALETTE[0]);
        assert_eq!(image.get_pixel(2, 0), &PALETTE[5]);
        assert_eq!(image.get_pixel(3, 0), &Rgb([255, 255, 255]));
    }
}
