use super::cell::status_of;
use super::types::{Availability, Response, SlotAggregate, TimeSlot};

/// Counts available / maybe / unavailable votes for one cell
///
/// Every response lands in exactly one bucket, so the counts sum to `responses.len()`.
pub fn aggregate_slot(date: &str, slot: &TimeSlot, responses: &[Response]) -> SlotAggregate {
    let mut aggregate = SlotAggregate {
        time: slot.time.clone(),
        ..SlotAggregate::default()
    };

    for response in responses {
        match status_of(response, date, &slot.time) {
            Availability::Available => aggregate.available_count += 1,
            Availability::Maybe => aggregate.maybe_count += 1,
            Availability::Unavailable => aggregate.unavailable_count += 1,
        }
    }

    aggregate
}
