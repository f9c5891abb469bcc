use super::types::{ScoringMode, SlotAggregate, Weights};
use super::windows::slots_per_window;

/// Meetings longer than this many minutes lean harder on the average
pub const LONG_EVENT_MINUTES: i64 = 300;

const LONG_EVENT_WEIGHTS: Weights = Weights { avg: 0.60, min: 0.25, maybe: 0.15 };
const SHORT_EVENT_WEIGHTS: Weights = Weights { avg: 0.50, min: 0.35, maybe: 0.15 };

/// Headcount-equivalent of a "maybe" vote in fallback mode
const FALLBACK_MAYBE_WEIGHT: f64 = 0.5;

/// Composite score weights for a meeting of `duration_minutes`
pub fn weights_for(duration_minutes: i64) -> Weights {
    if duration_minutes > LONG_EVENT_MINUTES {
        LONG_EVENT_WEIGHTS
    } else {
        SHORT_EVENT_WEIGHTS
    }
}

impl ScoringMode {
    pub fn from_duration(duration_minutes: Option<i64>) -> Self {
        match duration_minutes {
            Some(minutes) if minutes > 0 => ScoringMode::Duration {
                minutes,
                slots_per_window: slots_per_window(Some(minutes)),
                weights: weights_for(minutes),
            },
            _ => ScoringMode::Fallback,
        }
    }

    pub fn slots_per_window(&self) -> usize {
        match self {
            ScoringMode::Fallback => 1,
            ScoringMode::Duration { slots_per_window, .. } => *slots_per_window,
        }
    }
}

/// Score components of one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetrics {
    pub min_available: usize,
    pub avg_available: f64,
    pub avg_maybe: f64,
    pub composite_score: f64,
}

/// Folds a window's per-slot counts into one composite score
///
/// The score is an un-normalized headcount; divide by the respondent count for a
/// percentage. An empty breakdown scores zero.
pub fn score_window(mode: &ScoringMode, breakdown: &[SlotAggregate]) -> WindowMetrics {
    if breakdown.is_empty() {
        return WindowMetrics {
            min_available: 0,
            avg_available: 0.0,
            avg_maybe: 0.0,
            composite_score: 0.0,
        };
    }

    match mode {
        ScoringMode::Fallback => {
            // single slot: the first breakdown entry is the window
            let slot = &breakdown[0];
            let available = slot.available_count as f64;
            WindowMetrics {
                min_available: slot.available_count,
                avg_available: available,
                avg_maybe: slot.maybe_count as f64,
                composite_score: available + FALLBACK_MAYBE_WEIGHT * slot.maybe_count as f64,
            }
        }
        ScoringMode::Duration { weights, .. } => {
            let len = breakdown.len() as f64;
            let min_available = breakdown
                .iter()
                .map(|s| s.available_count)
                .min()
                .unwrap_or(0);
            let avg_available = breakdown.iter().map(|s| s.available_count as f64).sum::<f64>() / len;
            let avg_maybe = breakdown.iter().map(|s| s.maybe_count as f64).sum::<f64>() / len;

            WindowMetrics {
                min_available,
                avg_available,
                avg_maybe,
                composite_score: weights.avg * avg_available
                    + weights.min * min_available as f64
                    + weights.maybe * avg_maybe,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, available: usize, maybe: usize, unavailable: usize) -> SlotAggregate {
        SlotAggregate {
            time: time.to_string(),
            available_count: available,
            maybe_count: maybe,
            unavailable_count: unavailable,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_weights_switch_above_five_hours() {
        assert_eq!(weights_for(300), SHORT_EVENT_WEIGHTS);
        assert_eq!(weights_for(301), LONG_EVENT_WEIGHTS);
        assert_eq!(weights_for(60), SHORT_EVENT_WEIGHTS);
    }

    #[test]
    fn test_mode_from_duration() {
        assert_eq!(ScoringMode::from_duration(None), ScoringMode::Fallback);
        assert_eq!(ScoringMode::from_duration(Some(0)), ScoringMode::Fallback);

        let mode = ScoringMode::from_duration(Some(150));
        assert_eq!(mode.slots_per_window(), 3);
        assert_eq!(
            mode,
            ScoringMode::Duration { minutes: 150, slots_per_window: 3, weights: SHORT_EVENT_WEIGHTS }
        );
    }

    #[test]
    fn test_fallback_score_counts_maybe_as_half() {
        let metrics = score_window(&ScoringMode::Fallback, &[slot("09:00", 2, 1, 0)]);

        assert_close(metrics.composite_score, 2.5);
        assert_eq!(metrics.min_available, 2);
        assert_close(metrics.avg_available, 2.0);
    }

    #[test]
    fn test_duration_score_short_event() {
        let mode = ScoringMode::from_duration(Some(120));
        let metrics = score_window(&mode, &[slot("09:00", 4, 0, 0), slot("10:00", 2, 2, 0)]);

        assert_eq!(metrics.min_available, 2);
        assert_close(metrics.avg_available, 3.0);
        assert_close(metrics.avg_maybe, 1.0);
        // 0.50 * 3 + 0.35 * 2 + 0.15 * 1
        assert_close(metrics.composite_score, 2.35);
    }

    #[test]
    fn test_duration_score_long_event() {
        let mode = ScoringMode::from_duration(Some(360));
        let breakdown: Vec<SlotAggregate> =
            (0..6).map(|i| slot(&format!("{:02}:00", 9 + i), if i == 0 { 1 } else { 3 }, 0, 0)).collect();

        let metrics = score_window(&mode, &breakdown);

        assert_eq!(metrics.min_available, 1);
        // avg = 16 / 6; 0.60 * avg + 0.25 * 1
        assert_close(metrics.composite_score, 0.60 * (16.0 / 6.0) + 0.25);
    }

    #[test]
    fn test_empty_breakdown_scores_zero() {
        let metrics = score_window(&ScoringMode::from_duration(Some(60)), &[]);
        assert_eq!(metrics.min_available, 0);
        assert_close(metrics.composite_score, 0.0);
    }
}
