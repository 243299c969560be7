use chrono::Timelike;

/// Hour, minute and second read off a zoned clock.
///
/// Ephemeral: taken on every tick or notification and never stored beyond
/// the angles derived from it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TimeSample {
    /// 0–23
    pub hour: u32,
    /// 0–59
    pub minute: u32,
    /// 0–59 (a leap second reads as 59)
    pub second: u32,
}

impl TimeSample {
    /// Builds a sample, wrapping out-of-range fields into their unit.
    #[inline]
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour: hour % 24, minute: minute % 60, second: second % 60 }
    }

    /// Reads the wall-clock fields of any `chrono` time value.
    pub fn from_time<T: Timelike>(t: &T) -> Self {
        // chrono reports leap seconds through nanosecond(), so second() is already 0–59.
        Self::new(t.hour(), t.minute(), t.second())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn from_time_reads_fields() {
        let t = NaiveTime::from_hms_opt(15, 4, 5).unwrap();
        assert_eq!(TimeSample::from_time(&t), TimeSample { hour: 15, minute: 4, second: 5 });
    }

    #[test]
    fn new_wraps_fields() {
        assert_eq!(TimeSample::new(25, 61, 60), TimeSample { hour: 1, minute: 1, second: 0 });
    }
}
