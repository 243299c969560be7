use std::path::{Path, PathBuf};

use tempo_engine::images::{ImageLoadError, ImageStore};

use crate::drawable::Drawable;

const DIAL_SVG: &[u8] = include_bytes!("../../assets/clock_dial.svg");
const HOUR_SVG: &[u8] = include_bytes!("../../assets/clock_hand_hour.svg");
const MINUTE_SVG: &[u8] = include_bytes!("../../assets/clock_hand_minute.svg");
const SECOND_SVG: &[u8] = include_bytes!("../../assets/clock_hand_second.svg");

/// File stems [`ClockAssets::from_dir`] looks for.
const STEMS: [&str; 4] = ["clock_dial", "clock_hand_hour", "clock_hand_minute", "clock_hand_second"];
const EXTENSIONS: [&str; 4] = ["svg", "png", "jpg", "jpeg"];

/// The four images a clock face is drawn from.
///
/// Hands are drawn centered on the dial center and rotated about it, so
/// each hand image should have its pivot at the image center, pointing
/// to twelve o'clock.
#[derive(Debug, Clone)]
pub struct ClockAssets {
    pub dial: Drawable,
    pub hour_hand: Drawable,
    pub minute_hand: Drawable,
    pub second_hand: Drawable,
}

impl ClockAssets {
    /// Loads the SVG face bundled with this crate.
    pub fn builtin(store: &mut ImageStore) -> Result<Self, ImageLoadError> {
        Ok(Self {
            dial: load(store, DIAL_SVG)?,
            hour_hand: load(store, HOUR_SVG)?,
            minute_hand: load(store, MINUTE_SVG)?,
            second_hand: load(store, SECOND_SVG)?,
        })
    }

    /// Loads four image files.
    pub fn from_files(
        store: &mut ImageStore,
        dial: impl AsRef<Path>,
        hour_hand: impl AsRef<Path>,
        minute_hand: impl AsRef<Path>,
        second_hand: impl AsRef<Path>,
    ) -> Result<Self, ImageLoadError> {
        Ok(Self {
            dial: load_file(store, dial.as_ref())?,
            hour_hand: load_file(store, hour_hand.as_ref())?,
            minute_hand: load_file(store, minute_hand.as_ref())?,
            second_hand: load_file(store, second_hand.as_ref())?,
        })
    }

    /// Loads `clock_dial`, `clock_hand_hour`, `clock_hand_minute` and
    /// `clock_hand_second` from `dir`, each as `.svg`, `.png`, `.jpg` or `.jpeg`.
    pub fn from_dir(store: &mut ImageStore, dir: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let dir = dir.as_ref();
        let [dial, hour, minute, second] = STEMS.map(|stem| find(dir, stem));
        Self::from_files(store, dial?, hour?, minute?, second?)
    }
}

fn load(store: &mut ImageStore, bytes: &[u8]) -> Result<Drawable, ImageLoadError> {
    let id = store.load(bytes)?;
    Drawable::from_store(store, id)
}

fn load_file(store: &mut ImageStore, path: &Path) -> Result<Drawable, ImageLoadError> {
    let id = store.load_file(path)?;
    Drawable::from_store(store, id)
}

fn find(dir: &Path, stem: &str) -> Result<PathBuf, ImageLoadError> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| ImageLoadError(format!("no {stem} image in {}", dir.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_engine::coords::Vec2;

    #[test]
    fn builtin_face_loads() {
        let mut store = ImageStore::new();
        let assets = ClockAssets::builtin(&mut store).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(assets.dial.intrinsic_size(), Vec2::new(200.0, 200.0));
        // Hands share the dial height so they pivot on its center.
        for hand in [&assets.hour_hand, &assets.minute_hand, &assets.second_hand] {
            assert_eq!(hand.intrinsic_size().y, 200.0);
        }
    }

    #[test]
    fn from_dir_reports_missing_stem() {
        let dir = std::env::temp_dir().join(format!("tempo-assets-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let err = ClockAssets::from_dir(&mut ImageStore::new(), &dir).unwrap_err();
        assert!(err.0.contains("clock_dial"), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn from_dir_loads_mixed_formats() {
        let dir = std::env::temp_dir().join(format!("tempo-assets-mixed-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("clock_dial.svg"), DIAL_SVG).unwrap();
        std::fs::write(dir.join("clock_hand_hour.svg"), HOUR_SVG).unwrap();
        std::fs::write(dir.join("clock_hand_minute.svg"), MINUTE_SVG).unwrap();
        image::RgbaImage::from_pixel(4, 200, image::Rgba([255, 0, 0, 255]))
            .save(dir.join("clock_hand_second.png"))
            .unwrap();

        let assets = ClockAssets::from_dir(&mut ImageStore::new(), &dir).unwrap();
        assert_eq!(assets.second_hand.intrinsic_size(), Vec2::new(4.0, 200.0));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
