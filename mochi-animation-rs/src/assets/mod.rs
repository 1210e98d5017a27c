//! Built-in animation table.
//!
//! [`ANIMATIONS`] is the frame table the firmware ships with. Index 0 is
//! the idle animation. Extra animations converted with `mochi-gif2bitmap`
//! can be appended here; the generated module exposes `WIDTH`, `HEIGHT`,
//! `FRAMES` and `DURATIONS` in the shape [`AnimationDescriptor`] expects.

mod canvas;
mod faces;

use crate::animation::{bitmap_len, AnimationDescriptor};
use faces::Eye;

/// Panel width the built-in faces are drawn for.
pub const FRAME_WIDTH: u32 = 128;
/// Panel height the built-in faces are drawn for.
pub const FRAME_HEIGHT: u32 = 64;
/// Bytes per built-in frame.
pub const FRAME_BYTES: usize = bitmap_len(FRAME_WIDTH, FRAME_HEIGHT);

type Frame = [u8; FRAME_BYTES];

static IDLE_OPEN: Frame = faces::idle(Eye::Open);
static IDLE_HALF: Frame = faces::idle(Eye::Half);
static IDLE_SHUT: Frame = faces::idle(Eye::Closed);

static WINK_OPEN: Frame = faces::wink(Eye::Open);
static WINK_HALF: Frame = faces::wink(Eye::Half);
static WINK_SHUT: Frame = faces::wink(Eye::Closed);

static COOL_0: Frame = faces::cool(4);
static COOL_1: Frame = faces::cool(9);
static COOL_2: Frame = faces::cool(14);
static COOL_3: Frame = faces::cool(19);
static COOL_4: Frame = faces::cool(24);

static EXPLODE_0: Frame = faces::shocked(3, 2, 1);
static EXPLODE_1: Frame = faces::shocked(5, 5, 3);
static EXPLODE_2: Frame = faces::shocked(7, 7, 4);
static EXPLODE_3: Frame = faces::blast(34, false);
static EXPLODE_4: Frame = faces::blast(42, false);
static EXPLODE_5: Frame = faces::blast(42, true);

static SLEEPY_0: Frame = faces::sleepy(1);
static SLEEPY_1: Frame = faces::sleepy(2);
static SLEEPY_2: Frame = faces::sleepy(3);

/// The built-in animations, idle first.
pub static ANIMATIONS: [AnimationDescriptor; 5] = [
    AnimationDescriptor {
        name: "Idle",
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        frames: &[&IDLE_OPEN, &IDLE_HALF, &IDLE_SHUT, &IDLE_HALF],
        durations: &[1800, 80, 120, 80],
    },
    AnimationDescriptor {
        name: "Wink",
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        frames: &[&WINK_OPEN, &WINK_HALF, &WINK_SHUT, &WINK_HALF],
        durations: &[600, 80, 400, 80],
    },
    AnimationDescriptor {
        name: "Cool",
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        frames: &[&COOL_0, &COOL_1, &COOL_2, &COOL_3, &COOL_4],
        durations: &[120, 120, 120, 120, 1500],
    },
    AnimationDescriptor {
        name: "Explode",
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        frames: &[
            &EXPLODE_0, &EXPLODE_1, &EXPLODE_2, &EXPLODE_3, &EXPLODE_4, &EXPLODE_5,
        ],
        durations: &[300, 150, 150, 100, 100, 600],
    },
    AnimationDescriptor {
        name: "Sleepy",
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        frames: &[&SLEEPY_0, &SLEEPY_1, &SLEEPY_2],
        durations: &[600, 600, 900],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Registry, IDLE_ANIMATION};

    #[test]
    fn built_in_table_is_valid() {
        let registry = Registry::new(&ANIMATIONS).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(IDLE_ANIMATION).unwrap().name, "Idle");
    }

    #[test]
    fn every_frame_fills_the_panel_buffer() {
        for anim in &ANIMATIONS {
            for frame in anim.frames {
                assert_eq!(frame.len(), FRAME_BYTES, "{}", anim.name);
            }
        }
    }

    #[test]
    fn frames_within_an_animation_differ() {
        for anim in &ANIMATIONS {
            for pair in anim.frames.windows(2) {
                assert_ne!(pair[0], pair[1], "{} repeats a frame", anim.name);
            }
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in ANIMATIONS.iter().enumerate() {
            for b in &ANIMATIONS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
