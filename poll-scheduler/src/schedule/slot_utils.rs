use chrono::NaiveDate;

use super::types::WindowScore;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A slot start as written by the poll or by a person
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTime {
    /// "HH:MM"
    TwentyFourHour { hour: u32, minute: u32 },
    /// "H[:MM] AM/PM"
    TwelveHour { hour: u32, minute: u32, meridiem: Meridiem },
}

impl SlotTime {
    /// Parses either "HH:MM" or "H[:MM] AM/PM" (meridiem case-insensitive, space optional)
    pub fn parse(time_str: &str) -> Option<SlotTime> {
        let trimmed = time_str.trim();
        let upper = trimmed.to_ascii_uppercase();

        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(Meridiem::Am))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(Meridiem::Pm))
        } else {
            (upper.as_str(), None)
        };

        match meridiem {
            Some(meridiem) => {
                let (hour, minute) = match clock.split_once(':') {
                    Some((h, m)) => (parse_digits(h, 1)?, parse_digits(m, 2)?),
                    None => (parse_digits(clock, 1)?, 0),
                };
                if !(1..=12).contains(&hour) || minute >= 60 {
                    return None;
                }
                Some(SlotTime::TwelveHour { hour, minute, meridiem })
            }
            None => {
                let (h, m) = clock.split_once(':')?;
                let hour = parse_digits(h, 1)?;
                let minute = parse_digits(m, 2)?;
                if hour >= 24 || minute >= 60 {
                    return None;
                }
                Some(SlotTime::TwentyFourHour { hour, minute })
            }
        }
    }

    /// Minutes since midnight
    pub fn to_minutes(self) -> u32 {
        match self {
            SlotTime::TwentyFourHour { hour, minute } => hour * 60 + minute,
            SlotTime::TwelveHour { hour, minute, meridiem } => {
                let hour24 = match (meridiem, hour) {
                    (Meridiem::Am, 12) => 0,
                    (Meridiem::Am, h) => h,
                    (Meridiem::Pm, 12) => 12,
                    (Meridiem::Pm, h) => h + 12,
                };
                hour24 * 60 + minute
            }
        }
    }
}

/// Accepts 1-2 digits for hours (`min_len` 1) or exactly 2 for minutes (`min_len` 2)
fn parse_digits(s: &str, min_len: usize) -> Option<u32> {
    let s = s.trim();
    if s.len() < min_len || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses a time string (24-hour or 12-hour) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    SlotTime::parse(time_str).map(SlotTime::to_minutes)
}

/// Formats minutes since midnight as a 12-hour label: "9 AM", "2:30 PM", "12 AM"
///
/// Values past midnight wrap around.
pub fn minutes_to_label(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hour24 = minutes / 60;
    let mins = minutes % 60;
    let meridiem = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    if mins == 0 {
        format!("{} {}", hour12, meridiem)
    } else {
        format!("{}:{:02} {}", hour12, mins, meridiem)
    }
}

/// Formats minutes since midnight as "HH:MM", wrapping past midnight
pub fn minutes_to_time_string(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Label for a slot's start; unparseable input is returned unchanged
pub fn slot_start_label(time_str: &str) -> String {
    match parse_time_to_minutes(time_str) {
        Some(minutes) => minutes_to_label(minutes),
        None => time_str.to_string(),
    }
}

/// Label for the end of the hour-long slot starting at `time_str`
///
/// "23:00" ends at "12 AM", "11:00 AM" at "12 PM". Unparseable input is
/// returned unchanged since it only affects display.
pub fn slot_end_time(time_str: &str) -> String {
    match parse_time_to_minutes(time_str) {
        Some(minutes) => minutes_to_label(minutes + 60),
        None => time_str.to_string(),
    }
}

/// "Jan 10" for "2026-01-10"; the raw string when it is not a calendar date
pub fn date_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Renders a window as "Jan 10 from 9 AM to 11 AM"
pub fn window_display(window: &WindowScore) -> String {
    format!(
        "{} from {} to {}",
        date_label(&window.date),
        slot_start_label(&window.start_time),
        slot_end_time(&window.end_time)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(
            SlotTime::parse("09:00"),
            Some(SlotTime::TwentyFourHour { hour: 9, minute: 0 })
        );
        assert_eq!(parse_time_to_minutes("23:30"), Some(23 * 60 + 30));
        assert_eq!(parse_time_to_minutes("9:05"), Some(9 * 60 + 5));
    }

    #[test]
    fn test_parse_12_hour() {
        assert_eq!(
            SlotTime::parse("11:00 AM"),
            Some(SlotTime::TwelveHour { hour: 11, minute: 0, meridiem: Meridiem::Am })
        );
        assert_eq!(parse_time_to_minutes("12 AM"), Some(0));
        assert_eq!(parse_time_to_minutes("12:30 PM"), Some(12 * 60 + 30));
        assert_eq!(parse_time_to_minutes("3pm"), Some(15 * 60));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "24:00", "9", "09:60", "13 PM", "0 AM", "noon", "09:0", "ab:cd"] {
            assert_eq!(SlotTime::parse(bad), None, "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_slot_end_time_wraps_midnight() {
        assert_eq!(slot_end_time("23:00"), "12 AM");
        assert_eq!(slot_end_time("11:00 AM"), "12 PM");
        assert_eq!(slot_end_time("11:00"), "12 PM");
        assert_eq!(slot_end_time("12:00"), "1 PM");
        assert_eq!(slot_end_time("00:00"), "1 AM");
        assert_eq!(slot_end_time("09:30"), "10:30 AM");
    }

    #[test]
    fn test_slot_end_time_keeps_malformed_input() {
        assert_eq!(slot_end_time("late evening"), "late evening");
    }

    #[test]
    fn test_minutes_to_time_string_wraps() {
        assert_eq!(minutes_to_time_string(0), "00:00");
        assert_eq!(minutes_to_time_string(24 * 60 + 75), "01:15");
    }

    #[test]
    fn test_window_display() {
        let window = WindowScore {
            date: "2026-01-10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            start_slot_index: 0,
            min_available: 1,
            avg_available: 1.0,
            avg_maybe: 0.0,
            composite_score: 1.0,
            per_slot_breakdown: Vec::new(),
            guaranteed_users: Vec::new(),
            likely_users: Vec::new(),
            unlikely_users: Vec::new(),
        };
        assert_eq!(window_display(&window), "Jan 10 from 9 AM to 11 AM");
    }

    #[test]
    fn test_date_label_falls_back_to_raw() {
        assert_eq!(date_label("2026-12-01"), "Dec 1");
        assert_eq!(date_label("someday"), "someday");
    }
}
