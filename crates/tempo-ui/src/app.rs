use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use tempo_engine::images::ImageStore;
use tempo_engine::paint::Color;
use tempo_engine::render::{save_png, Rasterizer};
use tempo_engine::time::{SystemWallClock, ThreadScheduler};

use crate::broadcast::{SystemClockWatcher, WatcherConfig};
use crate::clock::{ClockAssets, ClockConfig};
use crate::constraints::MeasureSpec;
use crate::host::{HostCtx, RedrawSignal};
use crate::scene::UiScene;
use crate::widget::Widget;
use crate::widgets::AnalogClock;

// ── Application ───────────────────────────────────────────────────────────

/// Headless host: drives a widget with real time and writes PNG frames.
///
/// The widget is attached to a host backed by a [`ThreadScheduler`] and a
/// [`SystemClockWatcher`]. A frame is rendered immediately, then once per
/// redraw request until `frames` images exist; the widget is detached
/// before returning.
///
/// # Clock face
///
/// ```rust,ignore
/// Application::new()
///     .size(240, 240)
///     .frames(5)
///     .time_zone("Europe/Paris")
///     .output_dir("frames")
///     .run()?;
/// ```
///
/// # Custom widget
///
/// ```rust,ignore
/// Application::new().run_widget(|images| {
///     Ok(AnalogClock::new(ClockAssets::from_dir(images, "my-face")?))
/// })?;
/// ```
pub struct Application {
    width:         u32,
    height:        u32,
    frames:        usize,
    output_dir:    PathBuf,
    clear_color:   Color,
    clock:         ClockConfig,
    assets_dir:    Option<PathBuf>,
    frame_timeout: Duration,
    watcher:       WatcherConfig,
}

impl Application {
    pub fn new() -> Self {
        Self {
            width:         240,
            height:        240,
            frames:        3,
            output_dir:    PathBuf::from("frames"),
            clear_color:   Color::from_srgb_u8(0x1e, 0x1f, 0x26, 0xff),
            clock:         ClockConfig::default(),
            assets_dir:    None,
            frame_timeout: Duration::from_secs(5),
            watcher:       WatcherConfig::default(),
        }
    }

    /// Canvas size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width  = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Number of frames to write.
    pub fn frames(mut self, n: usize) -> Self {
        self.frames = n;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn clear_color(mut self, c: Color) -> Self {
        self.clear_color = c;
        self
    }

    /// Ticker period of the clock face.
    pub fn refresh_interval(mut self, v: Duration) -> Self {
        self.clock.refresh_interval = v;
        self
    }

    /// IANA zone shown by the clock face instead of the host zone.
    pub fn time_zone(mut self, id: impl Into<String>) -> Self {
        self.clock.time_zone = Some(id.into());
        self
    }

    /// Load the face from a directory instead of the built-in SVGs.
    ///
    /// See [`ClockAssets::from_dir`] for the expected file names.
    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// Longest wait for a redraw request before a frame is rendered anyway.
    pub fn frame_timeout(mut self, v: Duration) -> Self {
        self.frame_timeout = v;
        self
    }

    pub fn watcher(mut self, config: WatcherConfig) -> Self {
        self.watcher = config;
        self
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// Renders the analog clock face. Returns the written frame paths.
    pub fn run(self) -> Result<Vec<PathBuf>> {
        let clock = self.clock.clone();
        let assets_dir = self.assets_dir.clone();
        self.run_widget(move |images| {
            let assets = match &assets_dir {
                Some(dir) => ClockAssets::from_dir(images, dir)
                    .with_context(|| format!("loading clock face from {}", dir.display()))?,
                None => ClockAssets::builtin(images).context("loading built-in clock face")?,
            };
            Ok(AnalogClock::new(assets).config(clock))
        })
    }

    /// Renders the widget returned by `build`. Returns the written frame paths.
    ///
    /// `build` receives the image store the frames are rasterized from, so
    /// the widget's images must be loaded into it.
    pub fn run_widget<W, F>(self, build: F) -> Result<Vec<PathBuf>>
    where
        W: Widget,
        F: FnOnce(&mut ImageStore) -> Result<W>,
    {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating {}", self.output_dir.display()))?;

        let mut images = ImageStore::new();
        let mut root = build(&mut images)?;

        let watcher = SystemClockWatcher::spawn(self.watcher.clone(), Arc::new(SystemWallClock))
            .context("starting clock watcher")?;
        let redraw = Arc::new(RedrawSignal::new());
        let host = HostCtx::new(Arc::new(ThreadScheduler::new()), watcher.hub(), redraw.clone());
        let mut scene = UiScene::new(host);

        scene.attach(&mut root);
        log::info!(
            "rendering {} frame(s) at {}x{} into {}",
            self.frames, self.width, self.height, self.output_dir.display()
        );
        let result = self.render_frames(&mut scene, &mut root, &images, &redraw);
        scene.detach(&mut root);
        drop(watcher);

        result
    }

    fn render_frames<W: Widget>(
        &self,
        scene: &mut UiScene,
        root: &mut W,
        images: &ImageStore,
        redraw: &RedrawSignal,
    ) -> Result<Vec<PathBuf>> {
        let mut rasterizer = Rasterizer::new();
        let mut written = Vec::with_capacity(self.frames);
        let (w, h) = (self.width, self.height);

        for i in 0..self.frames {
            if i > 0 && !redraw.wait(self.frame_timeout) {
                log::warn!("no redraw request within {:?}; rendering anyway", self.frame_timeout);
            }

            let draw_list = scene.frame(root, MeasureSpec::exactly(w as f32), MeasureSpec::exactly(h as f32));
            let pixmap = rasterizer.render_new(w, h, draw_list, images, self.clear_color)?;
            let path = frame_path(&self.output_dir, i);
            save_png(&pixmap, &path)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:04}.png"))
}
