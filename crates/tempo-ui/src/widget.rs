use tempo_engine::coords::{Rect, Vec2};

use crate::constraints::MeasureSpec;
use crate::host::HostCtx;
use crate::painter::Painter;

/// The core trait every component implements.
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use tempo_ui::prelude::*;
///
/// pub struct Badge { image: Drawable }
///
/// impl Widget for Badge {
///     fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
///         let s = self.image.intrinsic_size();
///         Vec2::new(width.resolve(s.x), height.resolve(s.y))
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         self.image.center_on(rect.center());
///         self.image.draw(painter);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Compute the size this widget wants under the parent's per-axis specs.
    ///
    /// Must be deterministic; the host may call it more than once per frame.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2;

    /// Draw this widget into `painter` within `rect`.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Called when the laid-out size differs from the previous frame.
    fn on_size_changed(&mut self, _new: Vec2, _old: Vec2) {}

    /// Called when the widget is placed into a live host.
    fn on_attach(&mut self, _host: &HostCtx) {}

    /// Called when the widget leaves the host.
    fn on_detach(&mut self) {}
}
