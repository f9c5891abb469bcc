use super::cell::status_of;
use super::types::{Availability, Category, Response, TimeSlot};

/// Number of unavailable (or maybe) slots at which a respondent becomes unlikely
///
/// 1-3 slots: 1; 4-6 slots: floor(L / 4); 7+ slots: ceil(L / 4).
pub fn unlikely_threshold(window_len: usize) -> usize {
    match window_len {
        0..=3 => 1,
        4..=6 => (window_len as f64 * 0.25).floor() as usize,
        _ => (window_len as f64 * 0.25).ceil() as usize,
    }
}

/// Classifies one respondent's fitness for the slots of a window on `date`
pub fn categorize_user(response: &Response, date: &str, slots: &[TimeSlot]) -> Category {
    let mut available_slots = 0;
    let mut maybe_slots = 0;
    let mut unavailable_slots = 0;

    for slot in slots {
        match status_of(response, date, &slot.time) {
            Availability::Available => available_slots += 1,
            Availability::Maybe => maybe_slots += 1,
            Availability::Unavailable => unavailable_slots += 1,
        }
    }

    let threshold = unlikely_threshold(slots.len());
    if available_slots == slots.len() {
        Category::Guaranteed
    } else if unavailable_slots >= threshold || unavailable_slots + maybe_slots >= threshold {
        Category::Unlikely
    } else {
        Category::Likely
    }
}

/// Respondents split into the three categories, each in response order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedUsers {
    pub guaranteed: Vec<String>,
    pub likely: Vec<String>,
    pub unlikely: Vec<String>,
}

/// Puts every respondent into exactly one category for the window
pub fn categorize_users(responses: &[Response], date: &str, slots: &[TimeSlot]) -> CategorizedUsers {
    let mut users = CategorizedUsers::default();
    for response in responses {
        let bucket = match categorize_user(response, date, slots) {
            Category::Guaranteed => &mut users.guaranteed,
            Category::Likely => &mut users.likely,
            Category::Unlikely => &mut users.unlikely,
        };
        bucket.push(response.user_id.clone());
    }
    users
}
