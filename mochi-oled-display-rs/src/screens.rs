//! Screen layouts and bitmap drawing.
//!
//! This module defines [`DisplayConfig`], the [`draw_frame`] function that
//! paints one animation frame, and the two text screens shown at boot: the
//! splash screen and the network information screen. Everything here draws
//! into any `embedded-graphics` target, so it is tested on the host.

use core::fmt::Write;

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use mochi::animation::bitmap_len;
use mochi::FrameRef;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Panel geometry, address and boot-screen timing.
///
/// [`DisplayConfig::default()`] matches the SSD1306 128×64 module at
/// address `0x3C`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    /// 7-bit I2C address. Default: `0x3C`.
    pub i2c_address: u8,
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// How long the splash screen stays up. Default: 2000 ms.
    pub splash_hold_ms: u64,
    /// Pause on the first idle frame before the network screen. Default: 1000 ms.
    pub boot_pause_ms: u64,
    /// How long the network information screen stays up. Default: 5000 ms.
    pub info_hold_ms: u64,
    /// Vertical distance between text lines on the info screen. Default: 10.
    pub line_height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            display_width: 128,
            display_height: 64,
            splash_hold_ms: 2000,
            boot_pause_ms: 1000,
            info_hold_ms: 5000,
            line_height: 10,
        }
    }
}

// ── Animation frames ─────────────────────────────────────────────────────

/// `true` if the frame's bitmap length matches its width and height.
pub fn frame_fits(frame: &FrameRef<'_>) -> bool {
    frame.width > 0 && frame.bitmap.len() == bitmap_len(frame.width, frame.height)
}

/// Paint a packed 1-bpp frame at the origin. Set bits are lit.
///
/// Callers should check [`frame_fits`] first; a short bitmap draws only the
/// rows it contains.
pub fn draw_frame<D>(display: &mut D, frame: &FrameRef<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let raw: ImageRaw<BinaryColor> = ImageRaw::new(frame.bitmap, frame.width);
    Image::new(&raw, Point::zero()).draw(display)
}

// ── Boot screens ─────────────────────────────────────────────────────────

/// "The Mochi / Web Control" title card.
///
/// ```text
/// ┌────────────────────────────┐
/// │                            │
/// │   The Mochi     (10×20)    │
/// │                            │
/// │  Web Control    (6×10)     │
/// └────────────────────────────┘
/// ```
pub fn render_splash<D>(display: &mut D, config: &DisplayConfig) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let title = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    let title_y = config.display_height as i32 / 4;
    Text::with_baseline("The Mochi", Point::new(15, title_y - 5), title, Baseline::Top)
        .draw(display)?;
    Text::with_baseline(
        "Web Control",
        Point::new(10, config.display_height as i32 * 5 / 8),
        small,
        Baseline::Top,
    )
    .draw(display)?;
    Ok(())
}

/// What the network information screen shows.
#[derive(Debug, Clone, Copy)]
pub struct NetworkInfo<'a> {
    /// Access point name.
    pub ssid: &'a str,
    /// Access point passphrase.
    pub passphrase: &'a str,
    /// Device address, e.g. `"192.168.4.1"`.
    pub address: &'a str,
}

/// Lines of the network information screen, top to bottom.
///
/// Blank lines are empty strings. Each line is truncated to fit the
/// 21-character width of the 6×10 font on a 128 px panel.
pub fn network_info_lines(info: &NetworkInfo<'_>) -> [String<21>; 6] {
    let mut lines: [String<21>; 6] = Default::default();
    push_truncated(&mut lines[0], format_args!("WiFi: {}", info.ssid));
    push_truncated(&mut lines[1], format_args!("Pass: {}", info.passphrase));
    push_truncated(&mut lines[3], format_args!("IP: {}", info.address));
    push_truncated(&mut lines[5], format_args!("Visit IP in browser"));
    lines
}

/// Access point credentials and address, one fact per line.
pub fn render_network_info<D>(
    display: &mut D,
    info: &NetworkInfo<'_>,
    config: &DisplayConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    for (row, line) in network_info_lines(info).iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = row as i32 * config.line_height;
        Text::with_baseline(line.as_str(), Point::new(0, y), style, Baseline::Top).draw(display)?;
    }
    Ok(())
}

// ── Helper ───────────────────────────────────────────────────────────────

/// Write formatted text into `buf`, dropping whatever does not fit.
fn push_truncated<const N: usize>(buf: &mut String<N>, args: core::fmt::Arguments<'_>) {
    struct Truncating<'b, const N: usize>(&'b mut String<N>);

    impl<const N: usize> Write for Truncating<'_, N> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    // Truncating never reports an error.
    let _ = Truncating(buf).write_fmt(args);
}

// ── Tests ────────────────────────────────────────────────────────────────
