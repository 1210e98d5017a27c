//! The Render Sink seam between playback and the display hardware.

use crate::animation::FrameRef;
use crate::diagnostics::{DiagnosticEvent, Diagnostics};

/// Paints a frame on a physical display.
///
/// Implementations draw `frame.bitmap` at the display origin and push it to
/// the device before returning. They are called once per frame transition
/// and once per selection; no batching is expected.
///
/// The trait uses `async fn` so bus-driven displays can await their flush.
/// Callers are single-threaded (one Embassy task), so the returned futures
/// need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait RenderSink {
    /// Error produced by the underlying display.
    type Error;

    /// Paint `frame` and flush it to the device.
    async fn render(&mut self, frame: &FrameRef<'_>) -> Result<(), Self::Error>;
}

/// Render `frame`, reporting a failure to `diagnostics` instead of the caller.
///
/// Returns `true` if the sink accepted the frame. Playback state is never
/// touched, so a failed render is simply retried on the next transition.
pub async fn present<S, D>(sink: &mut S, frame: &FrameRef<'_>, diagnostics: &mut D) -> bool
where
    S: RenderSink,
    D: Diagnostics + ?Sized,
{
    match sink.render(frame).await {
        Ok(()) => true,
        Err(_) => {
            diagnostics.record(DiagnosticEvent::RenderFailed {
                animation_index: frame.animation_index,
                frame_index: frame.frame_index,
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use embassy_futures::block_on;

    use super::*;

    struct Flaky {
        fail: bool,
        painted: Vec<(usize, usize)>,
    }

    impl RenderSink for Flaky {
        type Error = ();

        async fn render(&mut self, frame: &FrameRef<'_>) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.painted.push((frame.animation_index, frame.frame_index));
            Ok(())
        }
    }

    struct Events(Vec<DiagnosticEvent<'static>>);

    impl Diagnostics for Events {
        fn record(&mut self, event: DiagnosticEvent<'_>) {
            if let DiagnosticEvent::RenderFailed {
                animation_index,
                frame_index,
            } = event
            {
                self.0.push(DiagnosticEvent::RenderFailed {
                    animation_index,
                    frame_index,
                });
            }
        }
    }

    const BITMAP: [u8; 1] = [0xAA];

    fn frame() -> FrameRef<'static> {
        FrameRef {
            animation_index: 2,
            frame_index: 1,
            bitmap: &BITMAP,
            width: 8,
            height: 1,
        }
    }

    #[test]
    fn successful_render_is_silent() {
        let mut sink = Flaky {
            fail: false,
            painted: Vec::new(),
        };
        let mut events = Events(Vec::new());
        assert!(block_on(present(&mut sink, &frame(), &mut events)));
        assert_eq!(sink.painted, [(2, 1)]);
        assert!(events.0.is_empty());
    }

    #[test]
    fn failed_render_is_recorded() {
        let mut sink = Flaky {
            fail: true,
            painted: Vec::new(),
        };
        let mut events = Events(Vec::new());
        assert!(!block_on(present(&mut sink, &frame(), &mut events)));
        assert_eq!(
            events.0,
            [DiagnosticEvent::RenderFailed {
                animation_index: 2,
                frame_index: 1
            }]
        );
    }
}
