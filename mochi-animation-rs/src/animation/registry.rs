use super::descriptor::AnimationDescriptor;
use super::error::RegistryError;
use super::{IDLE_ANIMATION, MAX_NAME_LEN};

/// Validated, ordered table of animations.
///
/// Index [`IDLE_ANIMATION`] (0) is the default animation played at boot and
/// after a reset. The table is borrowed for the program lifetime and never
/// changes once constructed.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    animations: &'static [AnimationDescriptor],
}

impl Registry {
    /// Check every descriptor in `animations` and wrap the table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found, scanning animations in
    /// index order.
    pub fn new(animations: &'static [AnimationDescriptor]) -> Result<Self, RegistryError> {
        if animations.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        for (i, anim) in animations.iter().enumerate() {
            if anim.name.len() > MAX_NAME_LEN {
                return Err(RegistryError::NameTooLong(i));
            }
            if anim.width == 0 || anim.height == 0 {
                return Err(RegistryError::ZeroDimension(i));
            }
            if anim.frames.is_empty() {
                return Err(RegistryError::EmptyAnimation(i));
            }
            if anim.durations.len() != anim.frames.len() {
                return Err(RegistryError::DurationCountMismatch(i));
            }
            if anim.durations.iter().any(|&d| d == 0) {
                return Err(RegistryError::ZeroDuration(i));
            }
            let expected = anim.bitmap_len();
            if anim.frames.iter().any(|frame| frame.len() != expected) {
                return Err(RegistryError::BitmapSizeMismatch(i));
            }
        }

        Ok(Self { animations })
    }

    /// Number of animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Always `false`: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Animation at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&'static AnimationDescriptor> {
        self.animations.get(index)
    }

    /// The default animation (index 0).
    pub fn idle(&self) -> &'static AnimationDescriptor {
        &self.animations[IDLE_ANIMATION]
    }

    /// Iterate animations in index order.
    pub fn iter(&self) -> impl Iterator<Item = &'static AnimationDescriptor> {
        self.animations.iter()
    }
}
