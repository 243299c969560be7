use tempo_engine::coords::{Rect, Vec2};
use tempo_engine::scene::DrawList;

use crate::constraints::MeasureSpec;
use crate::host::HostCtx;
use crate::painter::Painter;
use crate::widget::Widget;

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns the host services and the draw list.
///
/// Drives a root widget through the lifecycle a UI toolkit would:
/// attach, measure, size change, paint, detach. The rasterizer lives in the
/// application and receives the `DrawList` returned by [`frame`](Self::frame).
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = UiScene::new(host);
/// scene.attach(&mut clock);
///
/// // On every redraw request:
/// let draw_list = scene.frame(&mut clock, MeasureSpec::exactly(w), MeasureSpec::exactly(h));
/// rasterizer.render(&mut target, draw_list, &images, clear);
///
/// scene.detach(&mut clock);
/// ```
pub struct UiScene {
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
    host: HostCtx,
    last_size: Option<Vec2>,
    attached: bool,
}

impl UiScene {
    pub fn new(host: HostCtx) -> Self {
        Self { draw_list: DrawList::new(), host, last_size: None, attached: false }
    }

    #[inline]
    pub fn host(&self) -> &HostCtx {
        &self.host
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Size the root was laid out at in the last frame.
    #[inline]
    pub fn last_size(&self) -> Option<Vec2> {
        self.last_size
    }

    /// Hands the host services to `root`.
    pub fn attach<W: Widget + ?Sized>(&mut self, root: &mut W) {
        root.on_attach(&self.host);
        self.attached = true;
    }

    /// Takes `root` out of the host. The next frame reports a fresh size.
    pub fn detach<W: Widget + ?Sized>(&mut self, root: &mut W) {
        root.on_detach();
        self.attached = false;
        self.last_size = None;
    }

    /// Measure, lay out and paint `root` for this frame.
    ///
    /// The returned list is owned by the scene and valid until the next call.
    pub fn frame<W: Widget + ?Sized>(
        &mut self,
        root: &mut W,
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> &DrawList {
        self.draw_list.clear();

        // ── measure ───────────────────────────────────────────────────────
        let size = root.measure(width, height);
        let old = self.last_size.unwrap_or(Vec2::zero());
        if self.last_size != Some(size) {
            log::trace!("root resized {}x{} -> {}x{}", old.x, old.y, size.x, size.y);
            root.on_size_changed(size, old);
            self.last_size = Some(size);
        }

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter = Painter::new(&mut self.draw_list);
            root.paint(&mut painter, Rect::from_origin_size(Vec2::zero(), size));
            if painter.save_count() != 0 {
                log::debug!("{} unbalanced save(s) after paint", painter.save_count());
            }
        }

        &self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempo_engine::images::ImageId;
    use tempo_engine::time::ManualScheduler;

    use crate::broadcast::ClockEventHub;
    use crate::host::RedrawCounter;

    #[derive(Default)]
    struct Recorder {
        attached: usize,
        detached: usize,
        resizes: Vec<(Vec2, Vec2)>,
    }

    impl Widget for Recorder {
        fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
            Vec2::new(width.resolve(50.0), height.resolve(50.0))
        }
        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.draw_image(ImageId::from_raw(0), rect);
        }
        fn on_size_changed(&mut self, new: Vec2, old: Vec2) {
            self.resizes.push((new, old));
        }
        fn on_attach(&mut self, _host: &HostCtx) {
            self.attached += 1;
        }
        fn on_detach(&mut self) {
            self.detached += 1;
        }
    }

    fn scene() -> UiScene {
        UiScene::new(HostCtx::new(
            Arc::new(ManualScheduler::new()),
            Arc::new(ClockEventHub::new()),
            Arc::new(RedrawCounter::new()),
        ))
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn first_frame_reports_size_change() {
        let mut scene = scene();
        let mut recorder = Recorder::default();
        scene.frame(&mut recorder, MeasureSpec::exactly(100.0), MeasureSpec::exactly(80.0));
        assert_eq!(recorder.resizes, vec![(Vec2::new(100.0, 80.0), Vec2::zero())]);
    }

    #[test]
    fn same_size_does_not_report_again() {
        let mut scene = scene();
        let mut recorder = Recorder::default();
        let spec = MeasureSpec::exactly(100.0);
        scene.frame(&mut recorder, spec, spec);
        scene.frame(&mut recorder, spec, spec);
        assert_eq!(recorder.resizes.len(), 1);

        scene.frame(&mut recorder, MeasureSpec::exactly(60.0), spec);
        assert_eq!(recorder.resizes[1], (Vec2::new(60.0, 100.0), Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn frame_paints_into_measured_rect() {
        let mut scene = scene();
        let mut recorder = Recorder::default();
        let list = scene.frame(&mut recorder, MeasureSpec::at_most(30.0), MeasureSpec::unspecified());
        assert_eq!(list.len(), 1);
        let tempo_engine::scene::DrawCmd::Image(cmd) = &list.items()[0].cmd;
        assert_eq!(cmd.bounds, Rect::new(0.0, 0.0, 30.0, 50.0));
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn detach_forgets_last_size() {
        let mut scene = scene();
        let mut recorder = Recorder::default();
        scene.attach(&mut recorder);
        assert!(scene.is_attached());
        scene.frame(&mut recorder, MeasureSpec::exactly(10.0), MeasureSpec::exactly(10.0));
        scene.detach(&mut recorder);
        assert!(!scene.is_attached());
        assert_eq!(scene.last_size(), None);
        assert_eq!((recorder.attached, recorder.detached), (1, 1));
    }
}
