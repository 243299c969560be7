// ── MeasureMode ───────────────────────────────────────────────────────────

/// How strictly the parent constrains one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The child gets exactly `size`.
    Exactly,
    /// The child may be at most `size`.
    AtMost,
    /// No constraint. `size` is only a hint, and may be absent (`INFINITY`).
    Unspecified,
}

// ── MeasureSpec ───────────────────────────────────────────────────────────

/// Per-axis layout constraint passed from parent to child during measure.
///
/// A widget computes the size it wants and then calls [`resolve`](Self::resolve)
/// so the parent's policy is applied consistently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: f32,
}

impl MeasureSpec {
    /// Tight: the child must be exactly `size`.
    #[inline]
    pub fn exactly(size: f32) -> Self {
        Self { mode: MeasureMode::Exactly, size: size.max(0.0) }
    }

    /// Loose: the child can be anywhere from zero up to `size`.
    #[inline]
    pub fn at_most(size: f32) -> Self {
        Self { mode: MeasureMode::AtMost, size: size.max(0.0) }
    }

    /// No constraint and no hint.
    #[inline]
    pub fn unspecified() -> Self {
        Self { mode: MeasureMode::Unspecified, size: f32::INFINITY }
    }

    /// No constraint, but the parent suggests `hint`.
    #[inline]
    pub fn unspecified_with_hint(hint: f32) -> Self {
        Self { mode: MeasureMode::Unspecified, size: hint }
    }

    /// The size hint of an `Unspecified` spec, if it carries a usable one.
    ///
    /// Zero, negative, and non-finite hints count as "no hint".
    #[inline]
    pub fn hint(self) -> Option<f32> {
        (self.mode == MeasureMode::Unspecified && self.size.is_finite() && self.size > 0.0)
            .then_some(self.size)
    }

    /// Applies the parent's policy to a desired size.
    ///
    /// - `Exactly` → the spec size
    /// - `AtMost`  → `min(desired, spec size)`
    /// - `Unspecified` → `desired`
    #[inline]
    #[must_use]
    pub fn resolve(self, desired: f32) -> f32 {
        match self.mode {
            MeasureMode::Exactly => self.size,
            MeasureMode::AtMost => desired.min(self.size),
            MeasureMode::Unspecified => desired,
        }
    }
}
