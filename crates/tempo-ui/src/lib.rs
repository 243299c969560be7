//! Tempo UI: an analog clock widget on top of `tempo-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tempo_ui::prelude::*;
//!
//! let mut images = ImageStore::new();
//! let assets = ClockAssets::builtin(&mut images)?;
//! let mut clock = AnalogClock::new(assets);
//!
//! let redraw = Arc::new(RedrawSignal::new());
//! let host = HostCtx::new(
//!     Arc::new(ThreadScheduler::new()),
//!     Arc::new(ClockEventHub::new()),
//!     redraw.clone(),
//! );
//! let mut scene = UiScene::new(host);
//! scene.attach(&mut clock);
//!
//! // Whenever `redraw` fires:
//! let draw_list = scene.frame(&mut clock, MeasureSpec::exactly(240.0), MeasureSpec::exactly(240.0));
//! // Pass draw_list to a Rasterizer.
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type. Only `measure` and
//! `paint` are required; lifecycle hooks default to no-ops.

pub mod app;
pub mod broadcast;
pub mod clock;
pub mod constraints;
pub mod drawable;
pub mod event;
pub mod host;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to host or extend the clock — import this in your component files.
pub mod prelude {
    pub use crate::broadcast::{
        ClockEventHub, ClockEventSource, ClockListener, ListenerId, SystemClockWatcher, WatcherConfig,
    };
    pub use crate::clock::{ClockAssets, ClockConfig, HandAngles};
    pub use crate::constraints::{MeasureMode, MeasureSpec};
    pub use crate::drawable::Drawable;
    pub use crate::event::{ClockEvent, ClockEventKind};
    pub use crate::host::{HostCtx, Invalidate, RedrawCounter, RedrawSignal};
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::widget::Widget;
    pub use crate::widgets::analog_clock::AnalogClock;

    // Re-export the engine primitives everyone needs.
    pub use tempo_engine::coords::{Affine2, Rect, Vec2};
    pub use tempo_engine::images::{ImageId, ImageLoadError, ImageStore};
    pub use tempo_engine::paint::Color;
    pub use tempo_engine::render::Rasterizer;
    pub use tempo_engine::time::{
        ClockZone, FixedWallClock, ManualScheduler, Scheduler, SystemWallClock, ThreadScheduler,
        TimeSample, WallClock,
    };

    pub use std::sync::Arc;

    pub use crate::app::Application;
}
