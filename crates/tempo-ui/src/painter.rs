use tempo_engine::coords::{Affine2, Rect, Vec2};
use tempo_engine::images::ImageId;
use tempo_engine::scene::DrawList;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// A canvas over the engine's `DrawList`: it owns the current transform and
/// a save/restore stack, and stamps the current transform onto every image
/// it records. Transform operations pre-concatenate, so the most recent
/// operation applies first to drawn geometry (rotate-then-scale reads the
/// same as on any 2D canvas).
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    stack: Vec<Affine2>,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list, stack: Vec::new() }
    }

    // ── transform state ───────────────────────────────────────────────────

    /// Pushes the current transform. Returns the stack depth after the push.
    pub fn save(&mut self) -> usize {
        self.stack.push(self.draw_list.transform());
        self.stack.len()
    }

    /// Pops the most recent [`save`](Self::save).
    ///
    /// An unmatched restore is ignored.
    pub fn restore(&mut self) {
        match self.stack.pop() {
            Some(t) => self.draw_list.set_transform(t),
            None => log::debug!("Painter::restore without matching save; ignored"),
        }
    }

    /// Pops saves until the stack depth is `depth`.
    pub fn restore_to_count(&mut self, depth: usize) {
        while self.stack.len() > depth {
            self.restore();
        }
    }

    /// Number of outstanding saves.
    #[inline]
    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn transform(&self) -> Affine2 {
        self.draw_list.transform()
    }

    /// Pre-concatenates `m` onto the current transform.
    pub fn concat(&mut self, m: Affine2) {
        let t = self.draw_list.transform() * m;
        self.draw_list.set_transform(t);
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(Affine2::translation(dx, dy));
    }

    /// Rotates by `degrees` (clockwise) around `pivot`.
    pub fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.concat(Affine2::rotation_about(degrees, pivot));
    }

    /// Scales by `(sx, sy)` keeping `pivot` fixed.
    pub fn scale(&mut self, sx: f32, sy: f32, pivot: Vec2) {
        self.concat(Affine2::scaling_about(sx, sy, pivot));
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Image stretched into `bounds` under the current transform.
    pub fn draw_image(&mut self, image: ImageId, bounds: Rect) {
        self.draw_list.push_image(image, bounds);
    }
}
