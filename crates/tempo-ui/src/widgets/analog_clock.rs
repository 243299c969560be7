use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tempo_engine::coords::{Rect, Vec2};
use tempo_engine::time::{ClockZone, SystemWallClock, TaskHandle, WallClock};

use crate::broadcast::{ClockEventSource, ListenerId};
use crate::clock::state::ClockState;
use crate::clock::{ClockAssets, ClockConfig, HandAngles};
use crate::constraints::MeasureSpec;
use crate::event::ClockEvent;
use crate::host::HostCtx;
use crate::painter::Painter;
use crate::widget::Widget;

struct Subscription {
    source: Arc<dyn ClockEventSource>,
    id: ListenerId,
    /// Cleared on detach. A broadcast already delivering from a listener
    /// snapshot may still call in afterwards.
    live: Arc<AtomicBool>,
}

/// An analog clock face drawn from a dial and three rotating hands.
///
/// While attached the clock resamples the wall clock on every tick of its
/// ticker and on every host time notification, then asks the host to
/// redraw. Hands rotate about the center of the laid-out rect; the dial is
/// scaled down uniformly when the rect is smaller than its natural size.
///
/// # Example
/// ```rust,ignore
/// let clock = AnalogClock::new(ClockAssets::builtin(&mut images)?)
///     .config(ClockConfig::default().time_zone("Europe/Paris"));
/// ```
pub struct AnalogClock {
    assets: ClockAssets,
    config: ClockConfig,
    state: Arc<ClockState>,
    ticker: Option<TaskHandle>,
    subscription: Option<Subscription>,
    attached: bool,
}

impl AnalogClock {
    pub fn new(assets: ClockAssets) -> Self {
        let config = ClockConfig::default();
        let state = ClockState::new(Arc::new(SystemWallClock), config.default_zone());
        Self {
            assets,
            config,
            state: Arc::new(state),
            ticker: None,
            subscription: None,
            attached: false,
        }
    }

    pub fn config(mut self, config: ClockConfig) -> Self {
        self.state.set_zone(config.default_zone());
        self.config = config;
        self
    }

    /// Replaces the time source.
    ///
    /// Ignored while attached: the running ticker and listener hold the
    /// current state. Detach first.
    pub fn wall_clock(mut self, clock: Arc<dyn WallClock>) -> Self {
        if self.attached {
            log::warn!("AnalogClock::wall_clock called while attached; ignored");
            return self;
        }
        self.state = Arc::new(ClockState::new(clock, self.config.default_zone()));
        self
    }

    /// Hand positions from the latest sample.
    #[inline]
    pub fn angles(&self) -> HandAngles {
        self.state.angles()
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Natural size of the dial image.
    #[inline]
    pub fn dial_size(&self) -> Vec2 {
        self.assets.dial.intrinsic_size()
    }

    /// Zone the face currently reads time in.
    #[inline]
    pub fn zone(&self) -> ClockZone {
        self.state.zone()
    }

    /// `true` if drawable bounds will be recomputed on the next paint.
    #[inline]
    pub fn needs_relayout(&self) -> bool {
        self.state.is_dirty()
    }

    #[inline]
    pub fn assets(&self) -> &ClockAssets {
        &self.assets
    }

    fn start_ticker(&mut self, host: &HostCtx) {
        let state = self.state.clone();
        let redraw = host.redraw.clone();
        let interval = self.config.refresh_interval;
        self.ticker = Some(host.scheduler.schedule_repeating(
            interval,
            Box::new(move || {
                state.on_time_changed();
                redraw.invalidate();
            }),
        ));
    }

    fn subscribe(&mut self, host: &HostCtx) {
        let state = self.state.clone();
        let redraw = host.redraw.clone();
        let live = Arc::new(AtomicBool::new(true));
        let listening = live.clone();
        let id = host.events.start_listening(Arc::new(move |event: &ClockEvent| {
            if !listening.load(Ordering::Acquire) {
                log::trace!("dropping {:?} delivered after detach", event.kind());
                return;
            }
            log::debug!("clock notified: {:?}", event.kind());
            state.on_event(event);
            redraw.invalidate();
        }));
        self.subscription = Some(Subscription { source: host.events.clone(), id, live });
    }
}

impl Widget for AnalogClock {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
        let dial = self.dial_size();
        let mut h_scale = 1.0_f32;
        let mut v_scale = 1.0_f32;

        if let Some(hint) = width.hint() {
            if hint < dial.x {
                h_scale = hint / dial.x;
            }
        }
        if let Some(hint) = height.hint() {
            if hint < dial.y {
                v_scale = hint / dial.y;
            }
        }
        let scale = h_scale.min(v_scale);

        Vec2::new(
            width.resolve((dial.x * scale).floor()),
            height.resolve((dial.y * scale).floor()),
        )
    }

    fn on_size_changed(&mut self, _new: Vec2, _old: Vec2) {
        self.state.mark_dirty();
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let changed = self.state.take_dirty();
        let center = rect.center();
        let dial = self.dial_size();

        let scaled = dial.exceeds(rect.size);
        if scaled {
            let scale = (rect.size.x / dial.x).min(rect.size.y / dial.y);
            painter.save();
            painter.scale(scale, scale, center);
        }

        if changed {
            self.assets.dial.center_on(center);
        }
        self.assets.dial.draw(painter);

        let angles = self.state.angles();
        let hands = [
            (&self.assets.hour_hand, angles.hour_degrees()),
            (&self.assets.minute_hand, angles.minute_degrees()),
            (&self.assets.second_hand, angles.second_degrees()),
        ];
        for (hand, degrees) in hands {
            painter.save();
            painter.rotate(degrees, center);
            if changed {
                hand.center_on(center);
            }
            hand.draw(painter);
            painter.restore();
        }

        if scaled {
            painter.restore();
        }
    }

    fn on_attach(&mut self, host: &HostCtx) {
        self.state.set_zone(self.config.default_zone());

        if !self.attached {
            self.attached = true;
            self.start_ticker(host);
            self.subscribe(host);
            log::debug!(
                "clock attached ({:?} refresh, zone {})",
                self.config.refresh_interval,
                self.state.zone().name()
            );
        }

        self.state.on_time_changed();
    }

    fn on_detach(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if let Some(sub) = self.subscription.take() {
            sub.live.store(false, Ordering::Release);
            sub.source.stop_listening(sub.id);
        }
        if self.attached {
            self.attached = false;
            log::debug!("clock detached");
        }
    }
}

impl Drop for AnalogClock {
    fn drop(&mut self) {
        self.on_detach();
    }
}
