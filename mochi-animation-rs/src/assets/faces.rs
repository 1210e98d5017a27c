//! Built-in Mochi faces, rasterised at compile time.
//!
//! All faces share one head outline centred on the 128×64 panel with the
//! eyes on a common line, so switching animations never makes the head
//! jump.

use super::canvas::Canvas;
use super::FRAME_BYTES;

const CX: i32 = 64;
const CY: i32 = 32;
const HEAD_R: i32 = 28;
const EYE_DX: i32 = 12;
const EYE_Y: i32 = CY - 8;
const LEFT_EYE: i32 = CX - EYE_DX;
const RIGHT_EYE: i32 = CX + EYE_DX;

/// Eyelid position.
#[derive(Clone, Copy)]
pub(crate) enum Eye {
    Open,
    Half,
    Closed,
}

/// Unit vectors (scaled by 100) every 30°, starting at 3 o'clock.
const RAYS: [(i32, i32); 12] = [
    (100, 0),
    (87, 50),
    (50, 87),
    (0, 100),
    (-50, 87),
    (-87, 50),
    (-100, 0),
    (-87, -50),
    (-50, -87),
    (0, -100),
    (50, -87),
    (87, -50),
];

const fn head() -> Canvas {
    Canvas::new().ring(CX, CY, HEAD_R, 2)
}

const fn eye(canvas: Canvas, x: i32, state: Eye) -> Canvas {
    match state {
        Eye::Open => canvas.disc(x, EYE_Y, 4),
        Eye::Half => canvas.ellipse(x, EYE_Y, 4, 2),
        Eye::Closed => canvas.rect(x - 5, EYE_Y, x + 5, EYE_Y + 1),
    }
}

const fn z_glyph(canvas: Canvas, x: i32, y: i32, size: i32) -> Canvas {
    canvas
        .line(x, y, x + size, y, 1)
        .line(x + size, y, x, y + size, 1)
        .line(x, y + size, x + size, y + size, 1)
}

/// Idle: a slow blink, both eyes together.
pub(crate) const fn idle(lids: Eye) -> [u8; FRAME_BYTES] {
    let c = eye(head(), LEFT_EYE, lids);
    eye(c, RIGHT_EYE, lids).smile(CX, CY + 2, 12, 2).into_bytes()
}

/// Wink: left eye stays open, right eye closes.
pub(crate) const fn wink(right: Eye) -> [u8; FRAME_BYTES] {
    let c = eye(head(), LEFT_EYE, Eye::Open);
    eye(c, RIGHT_EYE, right).smile(CX, CY + 2, 12, 2).into_bytes()
}

/// Cool: sunglasses slide down until they cover the eyes at `glasses_y == EYE_Y`.
pub(crate) const fn cool(glasses_y: i32) -> [u8; FRAME_BYTES] {
    let c = eye(head(), LEFT_EYE, Eye::Open);
    eye(c, RIGHT_EYE, Eye::Open)
        .rect(LEFT_EYE - 8, glasses_y - 5, LEFT_EYE + 8, glasses_y + 5)
        .rect(RIGHT_EYE - 8, glasses_y - 5, RIGHT_EYE + 8, glasses_y + 5)
        .line(LEFT_EYE + 8, glasses_y, RIGHT_EYE - 8, glasses_y, 2)
        .smile(CX + 3, CY + 4, 9, 2)
        .into_bytes()
}

/// Explode, shock phase: eyes and mouth widen.
pub(crate) const fn shocked(eye_r: i32, mouth_rx: i32, mouth_ry: i32) -> [u8; FRAME_BYTES] {
    head()
        .disc(LEFT_EYE, EYE_Y, eye_r)
        .disc(RIGHT_EYE, EYE_Y, eye_r)
        .ellipse(CX, CY + 12, mouth_rx, mouth_ry)
        .into_bytes()
}

/// Explode, blast phase: rays of length `reach` leave the head, with
/// debris dots at their tips when `debris` is set.
pub(crate) const fn blast(reach: i32, debris: bool) -> [u8; FRAME_BYTES] {
    let mut c = head()
        .disc(LEFT_EYE, EYE_Y, 7)
        .disc(RIGHT_EYE, EYE_Y, 7)
        .ellipse(CX, CY + 12, 7, 4);
    let mut i = 0;
    while i < RAYS.len() {
        let (ux, uy) = RAYS[i];
        let x0 = CX + ux * HEAD_R / 100;
        let y0 = CY + uy * HEAD_R / 100;
        let x1 = CX + ux * reach / 100;
        let y1 = CY + uy * reach / 100;
        c = c.line(x0, y0, x1, y1, 2);
        if debris {
            c = c.disc(CX + ux * (reach + 5) / 100, CY + uy * (reach + 5) / 100, 2);
        }
        i += 1;
    }
    c.into_bytes()
}

/// Sleepy: closed eyes, a small mouth and `zs` rising Z glyphs.
pub(crate) const fn sleepy(zs: i32) -> [u8; FRAME_BYTES] {
    let c = eye(head(), LEFT_EYE, Eye::Closed);
    let mut c = eye(c, RIGHT_EYE, Eye::Closed).ellipse(CX, CY + 12, 3, 2);
    let mut i = 0;
    while i < zs {
        c = z_glyph(c, CX + HEAD_R + 4 + i * 8, CY - 4 - i * 10, 4 + i * 2);
        i += 1;
    }
    c.into_bytes()
}
