use std::time::Duration;

use tempo_engine::time::ClockZone;

/// Clock face configuration.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Ticker period. Also the second hand's step.
    pub refresh_interval: Duration,
    /// IANA zone the face shows on attach; `None` for the host zone.
    pub time_zone: Option<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { refresh_interval: Duration::from_millis(1000), time_zone: None }
    }
}

impl ClockConfig {
    pub fn refresh_interval(mut self, v: Duration) -> Self { self.refresh_interval = v; self }
    pub fn time_zone(mut self, id: impl Into<String>) -> Self { self.time_zone = Some(id.into()); self }

    /// The zone restored on every attach.
    pub fn default_zone(&self) -> ClockZone {
        self.time_zone
            .as_deref()
            .map(ClockZone::from_id_or_utc)
            .unwrap_or_default()
    }
}
