use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tempo_engine::logging::{init_logging, LoggingConfig};
use tempo_ui::Application;

/// Usage: `tempo-studio [OUTPUT_DIR]`
///
/// Environment:
/// - `TEMPO_TZ`: IANA zone shown by the face (host zone if unset)
/// - `TEMPO_FRAMES`: number of frames to write (default 5)
/// - `TEMPO_FACE`: directory with custom dial and hand images
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let output_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("frames"));

    let frames = match std::env::var("TEMPO_FRAMES") {
        Ok(v) => v.parse::<usize>().with_context(|| format!("TEMPO_FRAMES={v:?} is not a count"))?,
        Err(_) => 5,
    };

    let mut app = Application::new()
        .size(320, 320)
        .frames(frames)
        .refresh_interval(Duration::from_millis(1000))
        .output_dir(&output_dir);

    if let Ok(zone) = std::env::var("TEMPO_TZ") {
        app = app.time_zone(zone);
    }
    if let Some(face) = std::env::var_os("TEMPO_FACE") {
        app = app.assets_dir(PathBuf::from(face));
    }

    let written = app.run()?;
    log::info!("wrote {} frame(s) to {}", written.len(), output_dir.display());
    Ok(())
}
