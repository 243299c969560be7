use tempo_engine::time::TimeSample;

/// Hand positions as fractions of a full turn, each in `[0, 1)`.
///
/// Every hand includes the progress of the unit below it, so the hour hand
/// creeps between numerals and the minute hand between ticks.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn from_sample(t: TimeSample) -> Self {
        let hour = (t.hour % 12) as f32;
        let minute = t.minute as f32;
        let second = t.second as f32;
        Self {
            hour: (hour + minute / 60.0) / 12.0,
            minute: (minute + second / 60.0) / 60.0,
            second: second / 60.0,
        }
    }

    /// Clockwise rotation of the hour hand from twelve o'clock.
    #[inline]
    pub fn hour_degrees(self) -> f32 {
        self.hour * 360.0
    }

    #[inline]
    pub fn minute_degrees(self) -> f32 {
        self.minute * 360.0
    }

    #[inline]
    pub fn second_degrees(self) -> f32 {
        self.second * 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn three_oclock() {
        let a = HandAngles::from_sample(TimeSample::new(3, 0, 0));
        assert!(close(a.hour, 0.25));
        assert!(close(a.hour_degrees(), 90.0));
        assert_eq!((a.minute, a.second), (0.0, 0.0));
    }

    #[test]
    fn half_past_midnight() {
        let a = HandAngles::from_sample(TimeSample::new(0, 30, 0));
        assert!(close(a.hour, 1.0 / 24.0));
        assert!(close(a.hour_degrees(), 15.0));
        assert!(close(a.minute, 0.5));
        assert!(close(a.minute_degrees(), 180.0));
    }

    #[test]
    fn afternoon_folds_onto_twelve_hours() {
        assert_eq!(
            HandAngles::from_sample(TimeSample::new(15, 20, 10)),
            HandAngles::from_sample(TimeSample::new(3, 20, 10)),
        );
    }

    #[test]
    fn fractions_follow_formulas() {
        let a = HandAngles::from_sample(TimeSample::new(7, 42, 18));
        assert!(close(a.hour, 7.0 / 12.0 + 42.0 / 720.0));
        assert!(close(a.minute, 42.0 / 60.0 + 18.0 / 3600.0));
        assert!(close(a.second, 18.0 / 60.0));
    }

    #[test]
    fn every_second_of_the_day_stays_below_one_turn() {
        for s in (0..86_400).step_by(7) {
            let a = HandAngles::from_sample(TimeSample::new(s / 3600, (s / 60) % 60, s % 60));
            for f in [a.hour, a.minute, a.second] {
                assert!((0.0..1.0).contains(&f), "{s}: {a:?}");
            }
        }
    }
}
