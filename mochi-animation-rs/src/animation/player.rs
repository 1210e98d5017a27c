use core::fmt;

use super::descriptor::{AnimationDescriptor, FrameRef};
use super::error::PlaybackError;
use super::registry::Registry;
use super::IDLE_ANIMATION;
use crate::diagnostics::{DiagnosticEvent, Diagnostics};

/// The single mutable playback record.
///
/// `frame_index` is always valid for `animation_index` when the state is
/// mutated through [`Player`]. Timestamps come from a wrapping millisecond
/// counter; only differences computed with `wrapping_sub` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    /// Registry index of the active animation.
    pub animation_index: usize,
    /// Index of the frame currently on screen.
    pub frame_index: usize,
    /// Counter value at the last frame transition or selection.
    pub last_transition_ms: u32,
}

impl PlaybackState {
    /// Frame 0 of `animation_index`, starting at `now`.
    pub const fn start(animation_index: usize, now: u32) -> Self {
        Self {
            animation_index,
            frame_index: 0,
            last_transition_ms: now,
        }
    }
}

/// Read-only snapshot of what is playing.
///
/// Formats as `"{name} (Frame {frame_number}/{frame_count})"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Name of the active animation.
    pub name: &'static str,
    /// 1-based number of the frame on screen.
    pub frame_number: usize,
    /// Frames in the active animation.
    pub frame_count: usize,
}

impl Status {
    fn first_frame(anim: &AnimationDescriptor) -> Self {
        Self {
            name: anim.name,
            frame_number: 1,
            frame_count: anim.frame_count(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (Frame {}/{})",
            self.name, self.frame_number, self.frame_count
        )
    }
}

/// Owns the [`PlaybackState`] and advances it against a [`Registry`].
///
/// There is exactly one `Player` per device. It is handed by `&mut` to the
/// main loop and to the command handlers, so no locking is involved.
///
/// # Examples
///
/// ```
/// use mochi::animation::{AnimationDescriptor, Player, Registry};
/// use mochi::NoopDiagnostics;
///
/// static DOT: [u8; 1] = [0x80];
/// static TABLE: [AnimationDescriptor; 1] = [AnimationDescriptor {
///     name: "Idle",
///     width: 1,
///     height: 1,
///     frames: &[&DOT, &DOT],
///     durations: &[500, 500],
/// }];
///
/// let mut player = Player::new(Registry::new(&TABLE).unwrap(), 0);
/// assert!(player.advance(499, &mut NoopDiagnostics).is_none());
/// let frame = player.advance(500, &mut NoopDiagnostics).unwrap();
/// assert_eq!(frame.frame_index, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Player {
    registry: Registry,
    state: PlaybackState,
}

impl Player {
    /// Start playing the idle animation at `now`.
    pub fn new(registry: Registry, now: u32) -> Self {
        Self::with_state(registry, PlaybackState::start(IDLE_ANIMATION, now))
    }

    /// Resume from an explicit state. The state is not validated here;
    /// [`advance()`](Self::advance) repairs out-of-range indices.
    pub fn with_state(registry: Registry, state: PlaybackState) -> Self {
        Self { registry, state }
    }

    /// The animation table being played.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current playback record.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    // ── Frame advancer ───────────────────────────────────────────────

    /// Move to the next frame if the current one has been shown long enough.
    ///
    /// Returns the frame to render when a transition happened, `None`
    /// otherwise. Calling this before the frame duration has elapsed leaves
    /// the state untouched, so it is safe to call on every loop iteration.
    ///
    /// The duration is looked up on every call. Elapsed time is computed
    /// with wrapping subtraction, which keeps timing correct across counter
    /// overflow.
    ///
    /// Out-of-range indices suppress the render and report a diagnostic.
    /// A bad frame index restarts the active animation at frame 0; a bad
    /// animation index falls back to the idle animation. Either way the
    /// next call proceeds normally.
    pub fn advance<D>(&mut self, now: u32, diagnostics: &mut D) -> Option<FrameRef<'static>>
    where
        D: Diagnostics + ?Sized,
    {
        let anim = self.active_or_repair(now, diagnostics)?;

        let duration = u32::from(anim.durations[self.state.frame_index]);
        if now.wrapping_sub(self.state.last_transition_ms) < duration {
            return None;
        }

        self.state.last_transition_ms = now;
        self.state.frame_index = (self.state.frame_index + 1) % anim.frame_count();

        if self.state.frame_index == 0 {
            diagnostics.record(DiagnosticEvent::LoopCompleted {
                name: anim.name,
                frame_count: anim.frame_count(),
            });
        }

        Some(self.frame_ref(anim))
    }

    /// Milliseconds until [`advance()`](Self::advance) will next produce a
    /// frame. Returns 0 when a transition is already due or the state needs
    /// repair.
    pub fn millis_until_next_frame(&self, now: u32) -> u32 {
        let Some(anim) = self.registry.get(self.state.animation_index) else {
            return 0;
        };
        let Some(&duration) = anim.durations.get(self.state.frame_index) else {
            return 0;
        };
        u32::from(duration).saturating_sub(now.wrapping_sub(self.state.last_transition_ms))
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Switch to animation `id`, starting at frame 0.
    ///
    /// Returns frame 0 of the new animation, which the caller renders
    /// immediately rather than waiting for the next frame transition.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::InvalidAnimationId`] if `id >= registry.len()`; the
    /// state is left unchanged.
    pub fn select<D>(
        &mut self,
        id: usize,
        now: u32,
        diagnostics: &mut D,
    ) -> Result<FrameRef<'static>, PlaybackError>
    where
        D: Diagnostics + ?Sized,
    {
        let anim = self
            .registry
            .get(id)
            .ok_or(PlaybackError::InvalidAnimationId)?;

        self.state = PlaybackState::start(id, now);
        diagnostics.record(DiagnosticEvent::Selected {
            name: anim.name,
            frame_count: anim.frame_count(),
            width: anim.width,
            height: anim.height,
        });

        Ok(self.frame_ref(anim))
    }

    /// Return to the idle animation. Same as `select(0, ..)`, which cannot
    /// fail on a validated registry.
    pub fn reset_to_idle<D>(&mut self, now: u32, diagnostics: &mut D) -> FrameRef<'static>
    where
        D: Diagnostics + ?Sized,
    {
        let anim = self.registry.idle();
        self.state = PlaybackState::start(IDLE_ANIMATION, now);
        diagnostics.record(DiagnosticEvent::Selected {
            name: anim.name,
            frame_count: anim.frame_count(),
            width: anim.width,
            height: anim.height,
        });
        self.frame_ref(anim)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of the active animation and frame.
    ///
    /// An out-of-range state reports the frame [`advance()`](Self::advance)
    /// will repair to: frame 1 of the idle animation for a bad animation
    /// index, frame 1 of the active animation for a bad frame index.
    pub fn status(&self) -> Status {
        let Some(anim) = self.registry.get(self.state.animation_index) else {
            return Status::first_frame(self.registry.idle());
        };
        if self.state.frame_index >= anim.frame_count() {
            return Status::first_frame(anim);
        }
        Status {
            name: anim.name,
            frame_number: self.state.frame_index + 1,
            frame_count: anim.frame_count(),
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn active_or_repair<D>(
        &mut self,
        now: u32,
        diagnostics: &mut D,
    ) -> Option<&'static AnimationDescriptor>
    where
        D: Diagnostics + ?Sized,
    {
        let Some(anim) = self.registry.get(self.state.animation_index) else {
            diagnostics.record(DiagnosticEvent::AnimationOutOfRange {
                animation_index: self.state.animation_index,
                registry_size: self.registry.len(),
            });
            self.state = PlaybackState::start(IDLE_ANIMATION, now);
            return None;
        };

        if self.state.frame_index >= anim.frame_count() {
            diagnostics.record(DiagnosticEvent::FrameOutOfRange {
                animation_index: self.state.animation_index,
                frame_index: self.state.frame_index,
                frame_count: anim.frame_count(),
            });
            self.state = PlaybackState::start(self.state.animation_index, now);
            return None;
        }

        Some(anim)
    }

    fn frame_ref(&self, anim: &'static AnimationDescriptor) -> FrameRef<'static> {
        FrameRef {
            animation_index: self.state.animation_index,
            frame_index: self.state.frame_index,
            bitmap: anim.frames[self.state.frame_index],
            width: anim.width,
            height: anim.height,
        }
    }
}
