use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::parser::PollSnapshot;
use crate::schedule::{cell_key, Availability, PollGrid, Response, TimeSlot};
use crate::schedule::slot_utils::minutes_to_time_string;

/// Builds a random poll for trying the ranking out, reproducible per seed
///
/// Five dates from 2026-01-10, slots 09:00-17:00, a two hour meeting and eight
/// respondents who each favour a part of the day.
pub fn sample_snapshot(seed: u64) -> PollSnapshot {
    let mut rng = StdRng::seed_from_u64(seed);

    let date_options: Vec<String> = (10..15)
        .filter_map(|day| NaiveDate::from_ymd_opt(2026, 1, day))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();
    let time_slots: Vec<TimeSlot> = (9..17)
        .enumerate()
        .map(|(i, hour)| TimeSlot::new(format!("slot-{}", i + 1), minutes_to_time_string(hour * 60)))
        .collect();

    let poll = PollGrid {
        date_options,
        time_slots,
        event_duration_minutes: Some(120),
    };

    let responses: Vec<Response> = (1..=8)
        .map(|n| {
            let mut response = Response::new(format!("user{}", n));
            // Morning people lean early, the rest lean late
            let preferred_half = rng.gen_bool(0.5);
            for date in &poll.date_options {
                for (i, slot) in poll.time_slots.iter().enumerate() {
                    let in_preferred = (i < poll.time_slots.len() / 2) == preferred_half;
                    let roll: f64 = rng.gen();
                    let status = match (in_preferred, roll) {
                        (true, r) if r < 0.70 => Availability::Available,
                        (true, r) if r < 0.85 => Availability::Maybe,
                        (false, r) if r < 0.25 => Availability::Available,
                        (false, r) if r < 0.40 => Availability::Maybe,
                        // skipped cells count as unavailable
                        _ => continue,
                    };
                    response.availability.insert(cell_key(date, &slot.time), status);
                }
            }
            response
        })
        .collect();

    PollSnapshot { poll, responses }
}
