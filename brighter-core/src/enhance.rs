//! Per-frame brightness transform.

use image::RgbImage;

/// Applies a uniform linear brightness scaling to a frame.
///
/// Pure function: same dimensions and color space in and out. Each
/// channel is multiplied by `factor` with saturation, so factor 1 is the
/// identity and larger factors clip at 255 instead of wrapping.
pub fn brighten(frame: &RgbImage, factor: u32) -> RgbImage {
    let mut out = frame.clone();
    if factor == 1 {
        return out;
    }
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            // Widen before multiplying: 255 * u32::MAX still fits in u64,
            // so no factor a caller can pass wraps or panics.
            let scaled = u64::from(*channel) * u64::from(factor);
            *channel = scaled.min(u8::MAX.into()) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample_frame() -> RgbImage {
        let mut frame = RgbImage::new(3, 2);
        frame.put_pixel(0, 0, Rgb([0, 10, 100]));
        frame.put_pixel(1, 0, Rgb([50, 128, 200]));
        frame.put_pixel(2, 1, Rgb([255, 1, 90]));
        frame
    }

    #[test]
    fn test_factor_one_is_identity() {
        let frame = sample_frame();
        assert_eq!(brighten(&frame, 1), frame);
    }

    #[test]
    fn test_geometry_preserved() {
        let frame = sample_frame();
        assert_eq!(brighten(&frame, 4).dimensions(), frame.dimensions());
    }

    #[test]
    fn test_channels_never_decrease() {
        let frame = sample_frame();
        for factor in 2..=9 {
            let brighter = brighten(&frame, factor);
            for (before, after) in frame.pixels().zip(brighter.pixels()) {
                for c in 0..3 {
                    assert!(after.0[c] >= before.0[c]);
                }
            }
        }
    }

    #[test]
    fn test_extreme_factors_clip_without_overflow() {
        let mut frame = RgbImage::new(1, 1);
        frame.put_pixel(0, 0, Rgb([2, 200, 0]));

        // Factors far outside the documented range must still clip every
        // nonzero channel to 255, never wrap back down or panic. The
        // first factor is chosen so channel * factor is a multiple of
        // 2^32, the worst case for 32-bit wrapping arithmetic.
        for factor in [2_147_483_648u32, 100_000_000, u32::MAX] {
            let brighter = brighten(&frame, factor);
            assert_eq!(brighter.get_pixel(0, 0), &Rgb([255, 255, 0]));
        }
    }

    #[test]
    fn test_clips_instead_of_wrapping() {
        let frame = sample_frame();
        let brighter = brighten(&frame, 9);
        // 100 * 9 = 900 clips to 255 rather than wrapping
        assert_eq!(brighter.get_pixel(0, 0), &Rgb([0, 90, 255]));
        assert_eq!(brighter.get_pixel(2, 1), &Rgb([255, 9, 255]));
    }
}
