//! Camera frame rendering.
//!
//! The Plus mounts its onboard camera upside down, so every capture
//! arrives rotated 180 degrees from what a viewer expects.

use image::codecs::jpeg::JpegEncoder;

use crate::error::Error;

/// Quality used when re-encoding the flipped frame.
const JPEG_QUALITY: u8 = 90;

/// Decode a captured frame, flip it right side up, and encode it as JPEG.
pub fn render_jpeg(raw: &[u8]) -> Result<Vec<u8>, Error> {
    let frame = image::load_from_memory(raw)?.rotate180().into_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&frame)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::Rgb;

    use super::*;

    #[test]
    fn test_render_flips_the_frame() {
        // 8x8 with a dark top-left quadrant on a light background.
        let mut img = image::RgbImage::from_pixel(8, 8, Rgb([230, 230, 230]));
        for y in 0..4 {
            for x in 0..4 {
                img.put_pixel(x, y, Rgb([20, 20, 20]));
            }
        }
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let jpeg = render_jpeg(&png).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap().into_rgb8();
        assert_eq!(out.dimensions(), (8, 8));

        // The dark quadrant must now sit bottom-right. The tolerance
        // absorbs JPEG loss.
        assert!(out.get_pixel(6, 6)[0] < 100, "bottom-right should be dark");
        assert!(out.get_pixel(1, 1)[0] > 150, "top-left should be light");
    }

    #[test]
    fn test_render_rejects_non_image_bytes() {
        assert!(matches!(
            render_jpeg(b"definitely not an image"),
            Err(Error::ImageDecode(_))
        ));
    }

    #[test]
    fn test_render_output_is_jpeg() {
        let img = image::RgbImage::from_pixel(2, 2, Rgb([128, 64, 32]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let jpeg = render_jpeg(&png).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }
}
