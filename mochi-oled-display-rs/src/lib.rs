//! Async SSD1306 (128×64) display support for the Mochi animation player.
//!
//! This crate provides [`OledDriver`], a wrapper around the [`ssd1306`]
//! crate in async buffered-graphics mode that implements
//! [`mochi::RenderSink`], plus the boot screens drawn before the animation
//! loop starts.
//!
//! # Quick Start
//!
//! ```ignore
//! use mochi_oled_display_rs::{render_splash, DisplayConfig, OledDriver};
//!
//! let config = DisplayConfig::default();
//! let mut oled = OledDriver::new(i2c, config.i2c_address);
//! oled.init().await?;
//! oled.show(|d| render_splash(d, &config)).await?;
//!
//! // Later, from the playback loop:
//! if let Some(frame) = player.advance(now_ms, &mut diagnostics) {
//!     oled.render(&frame).await?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: `defmt::Format` for [`OledError`].

#![no_std]

pub mod driver;
pub mod error;
pub mod screens;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::{Display, OledDriver};
pub use error::OledError;
pub use screens::{
    draw_frame, frame_fits, network_info_lines, render_network_info, render_splash,
    DisplayConfig, NetworkInfo,
};
