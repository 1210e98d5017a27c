//! GIF decoding and 1-bpp conversion.
//!
//! Each frame is shrunk to fit the target size (never enlarged), centred on
//! a white canvas, converted to luma and thresholded. Pixels brighter than
//! the threshold become set bits, which the display shows lit.

use std::io::{BufRead, Seek};

use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, GrayImage, Luma, Rgba, RgbaImage};

/// Used when a GIF frame carries no delay; zero-length frames are not
/// accepted by the animation table.
pub const DEFAULT_DURATION_MS: u16 = 100;

/// One converted frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFrame {
    pub bitmap: Vec<u8>,
    pub duration_ms: u16,
}

/// Conversion settings.
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    pub width: u32,
    pub height: u32,
    /// Luma values strictly above this are lit.
    pub threshold: u8,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            threshold: 128,
        }
    }
}

impl Converter {
    /// Bytes per converted frame.
    pub fn bitmap_len(&self) -> usize {
        self.width.div_ceil(8) as usize * self.height as usize
    }

    /// Decode every frame of a GIF, up to `max_frames`.
    pub fn convert_gif<R>(&self, reader: R, max_frames: Option<usize>) -> Result<Vec<BitmapFrame>>
    where
        R: BufRead + Seek,
    {
        let decoder = GifDecoder::new(reader).context("not a readable GIF")?;
        let mut frames = Vec::new();

        for (index, frame) in decoder.into_frames().enumerate() {
            if max_frames.is_some_and(|max| index >= max) {
                break;
            }
            let frame = frame.with_context(|| format!("decoding frame {}", index))?;
            let duration_ms = delay_ms(frame.delay());
            let bitmap = self.convert_frame(frame.buffer());
            log::debug!("frame {} converted ({} ms)", index, duration_ms);
            frames.push(BitmapFrame {
                bitmap,
                duration_ms,
            });
        }

        anyhow::ensure!(!frames.is_empty(), "GIF contains no frames");
        Ok(frames)
    }

    /// Convert one composited RGBA frame to packed 1-bpp rows.
    pub fn convert_frame(&self, frame: &RgbaImage) -> Vec<u8> {
        let (w, h) = fit_within(frame.width(), frame.height(), self.width, self.height);
        let scaled = if (w, h) == frame.dimensions() {
            frame.clone()
        } else {
            imageops::resize(frame, w, h, FilterType::Lanczos3)
        };

        let mut canvas = GrayImage::from_pixel(self.width, self.height, Luma([255]));
        let off_x = (self.width - w) / 2;
        let off_y = (self.height - h) / 2;
        for (x, y, px) in scaled.enumerate_pixels() {
            canvas.put_pixel(off_x + x, off_y + y, Luma([luma_on_white(*px)]));
        }

        pack(&canvas, self.threshold)
    }
}

/// Largest size with the same aspect ratio that fits `max_w` × `max_h`.
/// Images that already fit are left alone.
pub fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = f64::min(max_w as f64 / w as f64, max_h as f64 / h as f64);
    let fw = ((w as f64 * scale).round() as u32).clamp(1, max_w);
    let fh = ((h as f64 * scale).round() as u32).clamp(1, max_h);
    (fw, fh)
}

/// Composite over white and take ITU-R 601 luma.
fn luma_on_white(px: Rgba<u8>) -> u8 {
    let [r, g, b, a] = px.0.map(u32::from);
    let over = |c: u32| (c * a + 255 * (255 - a)) / 255;
    ((over(r) * 299 + over(g) * 587 + over(b) * 114) / 1000) as u8
}

/// Pack rows MSB-first, padding each row to a whole byte.
pub fn pack(image: &GrayImage, threshold: u8) -> Vec<u8> {
    let stride = image.width().div_ceil(8) as usize;
    let mut bytes = vec![0u8; stride * image.height() as usize];
    for (x, y, Luma([l])) in image.enumerate_pixels() {
        if *l > threshold {
            bytes[y as usize * stride + x as usize / 8] |= 0x80 >> (x % 8);
        }
    }
    bytes
}

fn delay_ms(delay: image::Delay) -> u16 {
    let (numer, denom) = delay.numer_denom_ms();
    match numer.checked_div(denom).unwrap_or(0) {
        0 => DEFAULT_DURATION_MS,
        ms => u16::try_from(ms).unwrap_or(u16::MAX),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame};

    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn pack_is_msb_first_with_row_padding() {
        let mut img = GrayImage::from_pixel(10, 2, Luma([0]));
        img.put_pixel(0, 0, Luma([255]));
        img.put_pixel(9, 0, Luma([255]));
        img.put_pixel(8, 1, Luma([255]));
        assert_eq!(pack(&img, 128), [0x80, 0x40, 0x00, 0x80]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let img = GrayImage::from_pixel(8, 1, Luma([128]));
        assert_eq!(pack(&img, 128), [0x00]);
        assert_eq!(pack(&img, 127), [0xFF]);
    }

    #[test]
    fn fit_keeps_aspect_and_never_enlarges() {
        assert_eq!(fit_within(64, 32, 128, 64), (64, 32));
        assert_eq!(fit_within(256, 128, 128, 64), (128, 64));
        assert_eq!(fit_within(200, 200, 128, 64), (64, 64));
        assert_eq!(fit_within(1000, 10, 128, 64), (128, 1));
    }

    #[test]
    fn transparent_pixels_count_as_white() {
        assert_eq!(luma_on_white(Rgba([0, 0, 0, 0])), 255);
        assert_eq!(luma_on_white(Rgba([0, 0, 0, 255])), 0);
        assert_eq!(luma_on_white(Rgba([255, 255, 255, 255])), 255);
    }

    #[test]
    fn small_frame_is_centred_on_white() {
        let conv = Converter {
            width: 16,
            height: 4,
            threshold: 128,
        };
        let bits = conv.convert_frame(&solid(8, 2, [0, 0, 0, 255]));
        // Black 8x2 block at x 4..12, y 1..3 on a lit background.
        assert_eq!(bits, [0xFF, 0xFF, 0xF0, 0x0F, 0xF0, 0x0F, 0xFF, 0xFF]);
    }

    #[test]
    fn output_length_matches_geometry() {
        let conv = Converter::default();
        assert_eq!(conv.bitmap_len(), 1024);
        let bits = conv.convert_frame(&solid(300, 100, [255, 0, 0, 255]));
        assert_eq!(bits.len(), 1024);
    }

    fn gif(frames: &[(RgbaImage, u32)]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            for (img, ms) in frames {
                let frame = Frame::from_parts(img.clone(), 0, 0, Delay::from_numer_denom_ms(*ms, 1));
                encoder.encode_frame(frame).unwrap();
            }
        }
        out
    }

    #[test]
    fn decodes_frames_and_delays() {
        let data = gif(&[
            (solid(16, 8, [255, 255, 255, 255]), 80),
            (solid(16, 8, [0, 0, 0, 255]), 0),
        ]);
        let conv = Converter {
            width: 16,
            height: 8,
            threshold: 128,
        };
        let frames = conv.convert_gif(Cursor::new(data), None).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].duration_ms, 80);
        assert!(frames[0].bitmap.iter().all(|&b| b == 0xFF));
        assert_eq!(frames[1].duration_ms, DEFAULT_DURATION_MS);
        assert!(frames[1].bitmap.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn max_frames_limits_output() {
        let white = solid(8, 8, [255, 255, 255, 255]);
        let black = solid(8, 8, [0, 0, 0, 255]);
        let data = gif(&[(white.clone(), 50), (black, 50), (white, 50)]);
        let conv = Converter {
            width: 8,
            height: 8,
            threshold: 128,
        };
        let frames = conv.convert_gif(Cursor::new(data), Some(2)).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn rejects_non_gif_input() {
        let conv = Converter::default();
        assert!(conv.convert_gif(Cursor::new(b"not a gif".to_vec()), None).is_err());
    }
}
