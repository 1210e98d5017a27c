//! Frame table, animation registry and playback state.
//!
//! This module holds the one piece of real logic in the firmware: advancing
//! the active animation frame by frame against a per-frame duration table.
//!
//! # Architecture
//!
//! ```text
//! &'static [AnimationDescriptor]      immutable frame table (bitmaps + ms)
//!            │ Registry::new()
//!            ▼
//!        Registry                      validated, index 0 = idle
//!            │
//!            ▼
//!        Player ── PlaybackState       animation, frame, last transition
//!          │  advance(now)   → Option<FrameRef>   (frame advancer)
//!          │  select(id,now) → Result<FrameRef>   (command surface)
//!          │  status()       → Status
//! ```
//!
//! The [`Player`] is owned by the main loop and lent to the command
//! handlers, so there is a single writer and no shared global state.
//!
//! # Timing
//!
//! Time is a wrapping `u32` millisecond counter. A frame transition is due
//! when `now.wrapping_sub(last_transition_ms) >= duration`, which keeps
//! working when the counter overflows after ~49 days of uptime.

mod descriptor;
mod error;
mod player;
mod registry;

pub use descriptor::{bitmap_len, AnimationDescriptor, FrameRef};
pub use error::{PlaybackError, RegistryError};
pub use player::{PlaybackState, Player, Status};
pub use registry::Registry;

/// Registry index of the default animation played at boot and on reset.
pub const IDLE_ANIMATION: usize = 0;

/// Longest accepted animation name, in bytes.
pub const MAX_NAME_LEN: usize = 31;
