//! Rust source generation for converted animations.

use std::fmt::Write;

use crate::convert::BitmapFrame;

/// Bytes per line in the generated arrays.
const BYTES_PER_LINE: usize = 12;

/// Turn a file stem into a snake_case module name.
///
/// Non-alphanumeric characters become `_`; a leading digit gets an
/// `anim_` prefix so the result is a valid identifier.
pub fn module_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "anim_");
    }
    name
}

/// Render a module exposing `WIDTH`, `HEIGHT`, `FRAMES` and `DURATIONS`.
///
/// The output drops straight into an `AnimationDescriptor`:
///
/// ```text
/// AnimationDescriptor {
///     name: "Wink",
///     width: wink::WIDTH,
///     height: wink::HEIGHT,
///     frames: &wink::FRAMES,
///     durations: &wink::DURATIONS,
/// }
/// ```
pub fn rust_module(source: &str, width: u32, height: u32, frames: &[BitmapFrame]) -> String {
    let mut out = String::new();
    let len = frames.first().map_or(0, |f| f.bitmap.len());
    let total: u32 = frames.iter().map(|f| u32::from(f.duration_ms)).sum();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "//! Generated by mochi-gif2bitmap from {}", source);
    let _ = writeln!(
        out,
        "//! Frames: {}, Size: {}x{}, Loop: {} ms",
        frames.len(),
        width,
        height,
        total
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const WIDTH: u32 = {};", width);
    let _ = writeln!(out, "pub const HEIGHT: u32 = {};", height);

    for (i, frame) in frames.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "// Frame {} ({} ms)", i, frame.duration_ms);
        let _ = writeln!(out, "static FRAME_{}: [u8; {}] = [", i, len);
        for chunk in frame.bitmap.chunks(BYTES_PER_LINE) {
            out.push_str("   ");
            for byte in chunk {
                let _ = write!(out, " 0x{:02X},", byte);
            }
            out.push('\n');
        }
        out.push_str("];\n");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "pub static FRAMES: [&[u8]; {}] = [", frames.len());
    for i in 0..frames.len() {
        let _ = writeln!(out, "    &FRAME_{},", i);
    }
    out.push_str("];\n");

    let _ = writeln!(out);
    let durations: Vec<String> = frames.iter().map(|f| f.duration_ms.to_string()).collect();
    let _ = writeln!(
        out,
        "pub static DURATIONS: [u16; {}] = [{}];",
        frames.len(),
        durations.join(", ")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(bitmap: &[u8], duration_ms: u16) -> BitmapFrame {
        BitmapFrame {
            bitmap: bitmap.to_vec(),
            duration_ms,
        }
    }

    #[test]
    fn module_names() {
        assert_eq!(module_name("Wink"), "wink");
        assert_eq!(module_name("cool-glasses 2"), "cool_glasses_2");
        assert_eq!(module_name("3d"), "anim_3d");
        assert_eq!(module_name(""), "anim_");
    }

    #[test]
    fn emits_constants_and_tables() {
        let src = rust_module("blink.gif", 8, 2, &[frame(&[0x80, 0x01], 120), frame(&[0xFF, 0x00], 40)]);
        assert!(src.starts_with("//! Generated by mochi-gif2bitmap from blink.gif\n"));
        assert!(src.contains("//! Frames: 2, Size: 8x2, Loop: 160 ms\n"));
        assert!(src.contains("pub const WIDTH: u32 = 8;\n"));
        assert!(src.contains("pub const HEIGHT: u32 = 2;\n"));
        assert!(src.contains("static FRAME_0: [u8; 2] = [\n    0x80, 0x01,\n];\n"));
        assert!(src.contains("static FRAME_1: [u8; 2] = [\n    0xFF, 0x00,\n];\n"));
        assert!(src.contains("pub static FRAMES: [&[u8]; 2] = [\n    &FRAME_0,\n    &FRAME_1,\n];\n"));
        assert!(src.contains("pub static DURATIONS: [u16; 2] = [120, 40];\n"));
    }

    #[test]
    fn wraps_long_bitmaps() {
        let bytes = [0xAAu8; 30];
        let src = rust_module("x.gif", 240, 1, &[frame(&bytes, 100)]);
        let rows = src.lines().filter(|l| l.starts_with("    0xAA")).count();
        assert_eq!(rows, 3);
        assert_eq!(src.matches("0xAA").count(), 30);
    }
}
