//! Half-open time intervals

use chrono::{DateTime, Duration, Utc};

/// A half-open time interval `[start, end)`.
///
/// All overlap math in the scheduling engine goes through this type so the
/// half-open convention is stated in exactly one place: two slots conflict
/// iff `a.end > b.start && a.start < b.end`. Back-to-back slots
/// (`a.end == b.start`) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Half-open overlap test. Symmetric.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.end > other.start && self.start < other.end
    }

    /// `start < end`. A slot that fails this is malformed and must be
    /// rejected before any other check runs.
    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Whether start and end fall on the same calendar date.
    pub fn is_same_day(&self) -> bool {
        self.start.date_naive() == self.end.date_naive()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn slot(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeSlot {
        TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, start_h, start_m, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 5, end_h, end_m, 0).unwrap(),
        )
    }

    #[test]
    fn overlapping_slots_overlap_both_ways() {
        let a = slot(9, 0, 11, 0);
        let b = slot(10, 0, 12, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn contained_slot_overlaps() {
        let outer = slot(9, 0, 15, 0);
        let inner = slot(10, 0, 11, 0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn back_to_back_slots_do_not_overlap() {
        let a = slot(9, 0, 11, 0);
        let b = slot(11, 0, 13, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn disjoint_slots_do_not_overlap() {
        let a = slot(8, 0, 9, 0);
        let b = slot(13, 0, 14, 0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn identical_slots_overlap() {
        let a = slot(9, 0, 11, 0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn ordering_check() {
        assert!(slot(9, 0, 11, 0).is_ordered());
        let backwards = TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, 11, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
        );
        assert!(!backwards.is_ordered());
        let empty = TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
        );
        assert!(!empty.is_ordered());
    }

    #[test]
    fn same_day_check() {
        assert!(slot(9, 0, 16, 0).is_same_day());
        let overnight = TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0).unwrap(),
        );
        assert!(!overnight.is_same_day());
    }

    #[test]
    fn duration_in_minutes() {
        assert_eq!(slot(9, 0, 10, 30).duration().num_minutes(), 90);
    }
}
