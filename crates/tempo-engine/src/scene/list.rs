use crate::coords::Affine2;

use super::DrawCmd;

/// A single draw item: command + the transform it is drawn under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Canvas transform at record time (logical pixels -> target pixels).
    pub transform: Affine2,
}

/// Recorded draw stream for a frame.
///
/// Items are painted back-to-front in insertion order. The list keeps a
/// "current transform" that is stamped onto every pushed command; the UI
/// painter owns the save/restore stack and updates it through
/// [`set_transform`](Self::set_transform).
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    transform: Affine2,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and resets the transform. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.transform = Affine2::IDENTITY;
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Affine2) {
        debug_assert!(transform.is_finite(), "non-finite canvas transform: {transform:?}");
        self.transform = transform;
    }

    /// Pushes a draw command under the current transform.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, transform: self.transform });
    }
}
