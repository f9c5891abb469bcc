use super::types::TimeSlot;

/// A run of adjacent slots on one date, before scoring
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateWindow<'a> {
    pub date: &'a str,
    pub start_index: usize,
    pub slots: &'a [TimeSlot],
}

/// Number of hourly slots needed to cover `duration_minutes`, rounded up
///
/// Missing or non-positive durations fall back to single-slot windows. Durations too
/// long for `usize` saturate, which leaves no window that fits.
pub fn slots_per_window(duration_minutes: Option<i64>) -> usize {
    match duration_minutes {
        Some(minutes) if minutes > 0 => {
            let slots = minutes / 60 + i64::from(minutes % 60 != 0);
            usize::try_from(slots).unwrap_or(usize::MAX)
        }
        _ => 1,
    }
}

/// Emits every window of `slots_per_window` consecutive slots, date by date
///
/// Order is earliest date first, then earliest start slot. A window never spans two
/// dates, and a date contributes nothing when the window is longer than its slots.
pub fn enumerate_windows<'a>(
    dates: &'a [String],
    time_slots: &'a [TimeSlot],
    slots_per_window: usize,
) -> Vec<CandidateWindow<'a>> {
    if slots_per_window == 0 || slots_per_window > time_slots.len() {
        return Vec::new();
    }

    let mut windows = Vec::with_capacity(dates.len() * (time_slots.len() - slots_per_window + 1));
    for date in dates {
        for (start_index, slots) in time_slots.windows(slots_per_window).enumerate() {
            windows.push(CandidateWindow {
                date: date.as_str(),
                start_index,
                slots,
            });
        }
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(times: &[&str]) -> Vec<TimeSlot> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| TimeSlot::new(i.to_string(), *t))
            .collect()
    }

    #[test]
    fn test_slots_per_window_rounds_up() {
        assert_eq!(slots_per_window(Some(60)), 1);
        assert_eq!(slots_per_window(Some(61)), 2);
        assert_eq!(slots_per_window(Some(90)), 2);
        assert_eq!(slots_per_window(Some(120)), 2);
        assert_eq!(slots_per_window(Some(420)), 7);
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let dates = vec!["2026-01-10".to_string()];
        let slots = hourly(&["09:00", "10:00", "11:00"]);

        let needed = slots_per_window(Some(i64::MAX));
        assert_eq!(needed, usize::try_from(i64::MAX / 60 + 1).unwrap_or(usize::MAX));
        assert!(enumerate_windows(&dates, &slots, needed).is_empty());
    }

    #[test]
    fn test_slots_per_window_fallback() {
        assert_eq!(slots_per_window(None), 1);
        assert_eq!(slots_per_window(Some(0)), 1);
        assert_eq!(slots_per_window(Some(-30)), 1);
    }

    #[test]
    fn test_two_hour_windows_over_three_slots() {
        let dates = vec!["2026-01-10".to_string()];
        let slots = hourly(&["09:00", "10:00", "11:00"]);

        let windows = enumerate_windows(&dates, &slots, 2);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start_index, 0);
        assert_eq!(windows[0].slots[0].time, "09:00");
        assert_eq!(windows[0].slots[1].time, "10:00");
        assert_eq!(windows[1].start_index, 1);
        assert_eq!(windows[1].slots[0].time, "10:00");
        assert_eq!(windows[1].slots[1].time, "11:00");
    }

    #[test]
    fn test_windows_are_ordered_by_date_then_slot() {
        let dates = vec!["2026-01-10".to_string(), "2026-01-11".to_string()];
        let slots = hourly(&["09:00", "10:00"]);

        let windows = enumerate_windows(&dates, &slots, 1);
        let order: Vec<(&str, usize)> = windows.iter().map(|w| (w.date, w.start_index)).collect();

        assert_eq!(
            order,
            vec![("2026-01-10", 0), ("2026-01-10", 1), ("2026-01-11", 0), ("2026-01-11", 1)]
        );
    }

    #[test]
    fn test_window_longer_than_day_emits_nothing() {
        let dates = vec!["2026-01-10".to_string(), "2026-01-11".to_string()];
        let slots = hourly(&["09:00", "10:00", "11:00", "12:00", "13:00"]);

        assert!(enumerate_windows(&dates, &slots, 7).is_empty());
        assert_eq!(enumerate_windows(&dates, &slots, 5).len(), 2);
    }
}
