//! Advisory state describing an ongoing interactive manipulation.
//!
//! Nothing in this crate changes behavior based on these values. A linking
//! collaborator reads them to decide which parameters of a frame to copy to
//! other frames while the user drags.

use bitflags::bitflags;

bitflags! {
    /// Parameter categories that can be broadcast to linked frames.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InteractionFlags: u32 {
        /// Slice-to-world matrix.
        const SLICE_TO_WORLD       = 1;
        /// A specific field of view setting.
        const FIELD_OF_VIEW        = 1 << 1;
        const ORIENTATION          = 1 << 2;
        /// Request to reset the field of view in all linked views.
        const RESET_FIELD_OF_VIEW  = 1 << 3;
        /// Reformat widget transformation.
        const MULTIPLANAR_REFORMAT = 1 << 4;
        const XYZ_ORIGIN           = 1 << 5;
        const LABEL_OUTLINE        = 1 << 6;
        /// Display of the slice in 3D views.
        const SLICE_VISIBLE        = 1 << 7;
        const SLICE_SPACING        = 1 << 8;
    }
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionState {
    interacting: bool,
    flags: InteractionFlags,
    modifier: InteractionFlags,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            interacting: false,
            flags: InteractionFlags::empty(),
            modifier: InteractionFlags::all(),
        }
    }
}

impl InteractionState {
    pub fn interacting(&self) -> bool {
        self.interacting
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.interacting = interacting;
    }

    /// Categories declared in flux by the component doing the interaction
    pub fn flags(&self) -> InteractionFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: InteractionFlags) {
        self.flags = flags;
    }

    /// Categories this frame allows to propagate
    pub fn modifier(&self) -> InteractionFlags {
        self.modifier
    }

    pub fn set_modifier(&mut self, modifier: InteractionFlags) {
        self.modifier = modifier;
    }

    pub fn reset_modifier(&mut self) {
        self.modifier = InteractionFlags::all();
    }

    /// True if every category in `category` is both declared and allowed
    pub fn should_broadcast(&self, category: InteractionFlags) -> bool {
        !category.is_empty() && self.broadcast_flags().contains(category)
    }

    /// Categories eligible for propagation right now
    pub fn broadcast_flags(&self) -> InteractionFlags {
        self.flags & self.modifier
    }
}
