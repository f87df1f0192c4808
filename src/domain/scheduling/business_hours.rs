//! Bookable hours window

use chrono::{DateTime, Timelike, Utc};

/// The daily window inside which bookings may be placed.
///
/// The window is `[open_hour:00, close_hour:00]` — a booking may start at
/// any time whose hour component is `>= open_hour` and `< close_hour`, and
/// may end no later than `close_hour:00` sharp (the closing boundary itself
/// is a valid end time, anything past it is not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl BusinessHours {
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    /// Whether `t` is an admissible booking start.
    pub fn admits_start(&self, t: DateTime<Utc>) -> bool {
        let hour = t.hour();
        hour >= self.open_hour && hour < self.close_hour
    }

    /// Whether `t` is an admissible booking end.
    ///
    /// Ends exactly on `close_hour:00:00` are allowed; a nonzero minute or
    /// second past the closing hour is not.
    pub fn admits_end(&self, t: DateTime<Utc>) -> bool {
        let hour = t.hour();
        if hour < self.close_hour {
            return true;
        }
        hour == self.close_hour && t.minute() == 0 && t.second() == 0
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 16,
        }
    }
}

impl std::fmt::Display for BusinessHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.open_hour, self.close_hour)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 5, h, m, s).unwrap()
    }

    #[test]
    fn default_window_is_8_to_16() {
        let hours = BusinessHours::default();
        assert_eq!(hours.open_hour, 8);
        assert_eq!(hours.close_hour, 16);
    }

    #[test]
    fn start_at_opening_is_admitted() {
        let hours = BusinessHours::default();
        assert!(hours.admits_start(at(8, 0, 0)));
        assert!(hours.admits_start(at(15, 59, 59)));
    }

    #[test]
    fn start_before_opening_is_rejected() {
        let hours = BusinessHours::default();
        assert!(!hours.admits_start(at(7, 0, 0)));
        assert!(!hours.admits_start(at(7, 59, 59)));
    }

    #[test]
    fn start_at_or_after_closing_is_rejected() {
        let hours = BusinessHours::default();
        assert!(!hours.admits_start(at(16, 0, 0)));
        assert!(!hours.admits_start(at(17, 0, 0)));
    }

    #[test]
    fn end_exactly_at_closing_is_admitted() {
        let hours = BusinessHours::default();
        assert!(hours.admits_end(at(16, 0, 0)));
        assert!(hours.admits_end(at(15, 30, 0)));
    }

    #[test]
    fn end_past_closing_is_rejected() {
        let hours = BusinessHours::default();
        assert!(!hours.admits_end(at(16, 0, 1)));
        assert!(!hours.admits_end(at(16, 30, 0)));
        assert!(!hours.admits_end(at(17, 0, 0)));
    }

    #[test]
    fn custom_window() {
        let hours = BusinessHours::new(9, 18);
        assert!(!hours.admits_start(at(8, 30, 0)));
        assert!(hours.admits_start(at(9, 0, 0)));
        assert!(hours.admits_end(at(18, 0, 0)));
        assert!(!hours.admits_end(at(18, 15, 0)));
    }

    #[test]
    fn display_format() {
        assert_eq!(BusinessHours::default().to_string(), "08:00-16:00");
    }
}
