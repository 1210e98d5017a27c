//! Animation playback core for the Mochi OLED player.
//!
//! The crate is hardware-agnostic and `no_std`. It provides:
//!
//! - [`animation`]: the frame table types, the validated [`Registry`],
//!   and the [`Player`] that owns the playback state and advances frames.
//! - [`assets`]: the built-in animation table, drawn at compile time.
//! - [`Diagnostics`]: the injected logging capability.
//! - [`RenderSink`]: the seam to the display driver.
//!
//! # Quick Start
//!
//! ```
//! use mochi::animation::{Player, Registry};
//! use mochi::assets::ANIMATIONS;
//! use mochi::NoopDiagnostics;
//!
//! let registry = Registry::new(&ANIMATIONS).unwrap();
//! let mut player = Player::new(registry, 0);
//!
//! // In the main loop:
//! let now_ms: u32 = 5_000;
//! if let Some(frame) = player.advance(now_ms, &mut NoopDiagnostics) {
//!     // hand `frame` to the display
//!     assert_eq!(frame.width, 128);
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: `defmt::Format` on public types and [`DefmtDiagnostics`].

#![no_std]

#[cfg(test)]
extern crate std;

pub mod animation;
pub mod assets;
pub mod diagnostics;
pub mod render;

pub use animation::{
    AnimationDescriptor, FrameRef, PlaybackError, PlaybackState, Player, Registry, Status,
};
#[cfg(feature = "defmt")]
pub use diagnostics::DefmtDiagnostics;
pub use diagnostics::{DiagnosticEvent, Diagnostics, NoopDiagnostics};
pub use render::{present, RenderSink};
