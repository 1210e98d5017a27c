/// One named, looping animation in the Frame Table.
///
/// Bitmaps are 1 bit per pixel, row-major, most significant bit first, with
/// each row padded to a whole byte. This is the layout produced by
/// `mochi-gif2bitmap` and understood by `embedded-graphics`' `ImageRaw`.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDescriptor {
    /// Display name, shown on the control page and in status reports.
    pub name: &'static str,
    /// Pixel width, shared by every frame.
    pub width: u32,
    /// Pixel height, shared by every frame.
    pub height: u32,
    /// Frame bitmaps in playback order.
    pub frames: &'static [&'static [u8]],
    /// Per-frame display time in milliseconds, parallel to `frames`.
    pub durations: &'static [u16],
}

impl AnimationDescriptor {
    /// Number of frames in one loop of the animation.
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bytes one frame bitmap must occupy for this geometry.
    pub const fn bitmap_len(&self) -> usize {
        bitmap_len(self.width, self.height)
    }

    /// Sum of all frame durations, i.e. the length of one loop in ms.
    pub fn loop_duration_ms(&self) -> u32 {
        self.durations.iter().map(|&d| u32::from(d)).sum()
    }
}

/// Byte length of a packed 1-bpp bitmap of the given size.
pub const fn bitmap_len(width: u32, height: u32) -> usize {
    (width as usize).div_ceil(8) * height as usize
}

/// A frame the Render Sink is asked to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameRef<'a> {
    /// Registry index of the animation the frame belongs to.
    pub animation_index: usize,
    /// Index of the frame within its animation.
    pub frame_index: usize,
    /// Packed bitmap data.
    pub bitmap: &'a [u8],
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    static FRAME: [u8; 2] = [0xF0, 0x0F];

    static PAIR: AnimationDescriptor = AnimationDescriptor {
        name: "Pair",
        width: 8,
        height: 2,
        frames: &[&FRAME, &FRAME, &FRAME],
        durations: &[100, 250, 650],
    };

    #[test]
    fn bitmap_len_pads_rows_to_bytes() {
        assert_eq!(bitmap_len(128, 64), 1024);
        assert_eq!(bitmap_len(8, 1), 1);
        assert_eq!(bitmap_len(9, 2), 4);
        assert_eq!(bitmap_len(1, 1), 1);
    }

    #[test]
    fn frame_count_and_loop_duration() {
        assert_eq!(PAIR.frame_count(), 3);
        assert_eq!(PAIR.bitmap_len(), 2);
        assert_eq!(PAIR.loop_duration_ms(), 1000);
    }
}
