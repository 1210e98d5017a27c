//! Injected diagnostic logging.
//!
//! Playback code reports noteworthy events through the [`Diagnostics`]
//! trait instead of logging directly. Firmware built with logging passes a
//! [`DefmtDiagnostics`]; builds without it pass [`NoopDiagnostics`]. Nothing
//! in this crate behaves differently depending on which one is used.

/// Something worth telling the developer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticEvent<'a> {
    /// An animation was selected (including reset to idle).
    Selected {
        name: &'a str,
        frame_count: usize,
        width: u32,
        height: u32,
    },
    /// The active animation wrapped from its last frame back to frame 0.
    LoopCompleted { name: &'a str, frame_count: usize },
    /// The frame index was not valid for the active animation.
    FrameOutOfRange {
        animation_index: usize,
        frame_index: usize,
        frame_count: usize,
    },
    /// The animation index was not valid for the registry.
    AnimationOutOfRange {
        animation_index: usize,
        registry_size: usize,
    },
    /// The render sink failed to paint a frame.
    RenderFailed {
        animation_index: usize,
        frame_index: usize,
    },
}

/// Sink for [`DiagnosticEvent`]s.
pub trait Diagnostics {
    /// Record one event. Must not block and must not fail.
    fn record(&mut self, event: DiagnosticEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&mut self, _event: DiagnosticEvent<'_>) {}
}

/// Logs every event through `defmt`.
#[cfg(feature = "defmt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtDiagnostics;

#[cfg(feature = "defmt")]
impl Diagnostics for DefmtDiagnostics {
    fn record(&mut self, event: DiagnosticEvent<'_>) {
        match event {
            DiagnosticEvent::Selected {
                name,
                frame_count,
                width,
                height,
            } => defmt::info!(
                "Playing: {} - Frames: {}, Size: {}x{}",
                name,
                frame_count,
                width,
                height
            ),
            DiagnosticEvent::LoopCompleted { name, frame_count } => {
                defmt::debug!("Animation loop: {} ({} frames)", name, frame_count)
            }
            DiagnosticEvent::FrameOutOfRange {
                animation_index,
                frame_index,
                frame_count,
            } => defmt::error!(
                "Frame {} >= {} in animation {}",
                frame_index,
                frame_count,
                animation_index
            ),
            DiagnosticEvent::AnimationOutOfRange {
                animation_index,
                registry_size,
            } => defmt::error!(
                "Animation {} >= registry size {}",
                animation_index,
                registry_size
            ),
            DiagnosticEvent::RenderFailed {
                animation_index,
                frame_index,
            } => defmt::warn!(
                "Render failed: animation {}, frame {}",
                animation_index,
                frame_index
            ),
        }
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn record(&mut self, event: DiagnosticEvent<'_>) {
        (**self).record(event);
    }
}
