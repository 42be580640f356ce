use crate::{
    model::event::EventFormDto,
    server::{
        data::event::EventParams,
        error::validation::ValidationError,
        util::{text::slugify, time::parse_hhmm},
    },
};

const NAME_MAX_LENGTH: usize = 200;
const LOCATION_MAX_LENGTH: usize = 200;

/// Fallback slug for names without any ASCII letters or digits
const DEFAULT_SLUG: &str = "event";

/// Checks an event form and converts it into repository input
///
/// The returned slug is the base slug derived from the name; callers make it unique.
pub fn validate_event_form(form: &EventFormDto) -> Result<EventParams, ValidationError> {
    let mut errors = ValidationError::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.add("name", "This field is required.");
    } else if name.chars().count() > NAME_MAX_LENGTH {
        errors.add(
            "name",
            format!("Ensure this value has at most {NAME_MAX_LENGTH} characters."),
        );
    }

    let description = form.description.trim();
    if description.is_empty() {
        errors.add("description", "This field is required.");
    }

    let location = form.location.trim();
    if location.is_empty() {
        errors.add("location", "This field is required.");
    } else if location.chars().count() > LOCATION_MAX_LENGTH {
        errors.add(
            "location",
            format!("Ensure this value has at most {LOCATION_MAX_LENGTH} characters."),
        );
    }

    let start_time = parse_hhmm(&form.start_time);
    if start_time.is_none() {
        errors.add("start_time", "Enter a valid time.");
    }
    let end_time = parse_hhmm(&form.end_time);
    if end_time.is_none() {
        errors.add("end_time", "Enter a valid time.");
    }
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end <= start {
            errors.add("end_time", "End time must be after start time.");
        }
    }

    if form.registration_fee < 0 {
        errors.add(
            "registration_fee",
            "Ensure this value is greater than or equal to 0.",
        );
    }

    if form.max_participants.is_some_and(|max| max < 1) {
        errors.add(
            "max_participants",
            "Ensure this value is greater than or equal to 1.",
        );
    }

    let Some((start_time, end_time)) = start_time.zip(end_time).filter(|_| errors.is_empty())
    else {
        return Err(errors);
    };

    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = DEFAULT_SLUG.to_string();
    }

    Ok(EventParams {
        slug,
        name: name.to_string(),
        description: description.to_string(),
        category: form.category.into(),
        level: form.level.into(),
        date: form.date,
        start_time,
        end_time,
        location: location.to_string(),
        registration_fee: form.registration_fee,
        max_participants: form.max_participants,
    })
}
