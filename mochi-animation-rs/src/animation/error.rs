use core::fmt;

/// Errors returned by [`Player`](super::Player) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError {
    /// Requested animation id is outside `[0, registry_size)`.
    InvalidAnimationId,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlaybackError::InvalidAnimationId => write!(f, "Invalid animation id"),
        }
    }
}

/// Reasons a table of [`AnimationDescriptor`](super::AnimationDescriptor)s
/// is rejected by [`Registry::new()`](super::Registry::new).
///
/// Every variant except [`EmptyRegistry`](Self::EmptyRegistry) carries the
/// index of the offending animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The table holds no animations; index 0 (idle) must exist.
    EmptyRegistry,
    /// An animation has no frames.
    EmptyAnimation(usize),
    /// `durations.len()` differs from `frames.len()`.
    DurationCountMismatch(usize),
    /// A frame duration of 0 ms.
    ZeroDuration(usize),
    /// Width or height is 0.
    ZeroDimension(usize),
    /// A bitmap is not exactly `ceil(width / 8) * height` bytes.
    BitmapSizeMismatch(usize),
    /// Name longer than [`MAX_NAME_LEN`](super::MAX_NAME_LEN) bytes.
    NameTooLong(usize),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::EmptyRegistry => write!(f, "registry holds no animations"),
            RegistryError::EmptyAnimation(i) => write!(f, "animation {} has no frames", i),
            RegistryError::DurationCountMismatch(i) => {
                write!(f, "animation {}: duration count differs from frame count", i)
            }
            RegistryError::ZeroDuration(i) => write!(f, "animation {} has a 0 ms frame", i),
            RegistryError::ZeroDimension(i) => write!(f, "animation {} has a zero dimension", i),
            RegistryError::BitmapSizeMismatch(i) => {
                write!(f, "animation {}: bitmap size does not match geometry", i)
            }
            RegistryError::NameTooLong(i) => write!(f, "animation {}: name too long", i),
        }
    }
}
