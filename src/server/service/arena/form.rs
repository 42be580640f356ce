use std::collections::BTreeMap;

use chrono::NaiveTime;

use crate::{
    model::arena::{ArenaFormDto, OpeningHoursDto},
    server::{
        data::arena::{ArenaParams, DayRule},
        error::validation::ValidationError,
        util::{
            text::{is_http_url, non_blank},
            time::parse_hhmm,
        },
    },
};

const NAME_MAX_LENGTH: usize = 100;
const LOCATION_MAX_LENGTH: usize = 200;

/// Checks an arena form and converts it into repository input
///
/// The returned rules always cover days 0 through 6, ordered by day.
pub fn validate_arena_form(
    form: &ArenaFormDto,
) -> Result<(ArenaParams, Vec<DayRule>), ValidationError> {
    let mut errors = ValidationError::new();

    let name = required_text(&mut errors, "name", &form.name, NAME_MAX_LENGTH);
    let location = required_text(&mut errors, "location", &form.location, LOCATION_MAX_LENGTH);

    if form.capacity < 0 {
        errors.add(
            "capacity",
            "Ensure this value is greater than or equal to 0.",
        );
    }

    let img_url = optional_url(&mut errors, "img_url", form.img_url.as_deref());
    let google_maps_url =
        optional_url(&mut errors, "google_maps_url", form.google_maps_url.as_deref());

    let mut rules: BTreeMap<i32, DayRule> = BTreeMap::new();
    for (index, rule) in form.opening_hours.iter().enumerate() {
        if let Some(rule) = validate_rule(&mut errors, index, rule) {
            if rules.contains_key(&rule.day) {
                errors.add(
                    &format!("opening_hours[{index}].day"),
                    "Opening hours for this day are already set.",
                );
                continue;
            }
            rules.insert(rule.day, rule);
        }
    }

    errors.into_result()?;

    let rules = (0..7)
        .map(|day| {
            rules.remove(&day).unwrap_or(DayRule {
                day,
                open_time: None,
                close_time: None,
            })
        })
        .collect();

    Ok((
        ArenaParams {
            name,
            description: form.description.trim().to_string(),
            capacity: form.capacity,
            location,
            img_url,
            opening_hours_text: non_blank(form.opening_hours_text.as_deref()),
            google_maps_url,
        },
        rules,
    ))
}

fn required_text(
    errors: &mut ValidationError,
    field: &str,
    value: &str,
    max_length: usize,
) -> String {
    let value = value.trim();

    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > max_length {
        errors.add(
            field,
            format!("Ensure this value has at most {max_length} characters."),
        );
    }

    value.to_string()
}

fn optional_url(errors: &mut ValidationError, field: &str, value: Option<&str>) -> Option<String> {
    let value = non_blank(value)?;

    if !is_http_url(&value) {
        errors.add(field, "Enter a valid URL.");
    }

    Some(value)
}

fn validate_rule(
    errors: &mut ValidationError,
    index: usize,
    rule: &OpeningHoursDto,
) -> Option<DayRule> {
    let field = |name: &str| format!("opening_hours[{index}].{name}");
    let mut valid = true;

    if !(0..=6).contains(&rule.day) {
        errors.add(&field("day"), "Select a valid day.");
        valid = false;
    }

    let mut parse_time = |name: &str, value: Option<&str>| -> Option<NaiveTime> {
        let value = non_blank(value)?;
        let parsed = parse_hhmm(&value);
        if parsed.is_none() {
            errors.add(&field(name), "Enter a valid time.");
            valid = false;
        }
        parsed
    };

    let open_time = parse_time("open_time", rule.open_time.as_deref());
    let close_time = parse_time("close_time", rule.close_time.as_deref());

    if !valid {
        return None;
    }

    match (open_time, close_time) {
        (Some(open), Some(close)) if open >= close => {
            errors.add(
                &field("close_time"),
                "Closing time must be after opening time.",
            );
            None
        }
        (Some(_), None) | (None, Some(_)) => {
            errors.add(
                &field("open_time"),
                "Provide both opening and closing times, or leave both empty.",
            );
            None
        }
        _ => Some(DayRule {
            day: rule.day,
            open_time,
            close_time,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::model::arena::{ArenaFormDto, OpeningHoursDto};

    use super::validate_arena_form;

    fn form() -> ArenaFormDto {
        ArenaFormDto {
            name: "North Rink".to_string(),
            description: String::new(),
            capacity: 50,
            location: "Main Street 1".to_string(),
            img_url: None,
            opening_hours_text: None,
            google_maps_url: None,
            opening_hours: Vec::new(),
        }
    }

    fn rule(day: i32, open: &str, close: &str) -> OpeningHoursDto {
        OpeningHoursDto {
            day,
            open_time: Some(open.to_string()),
            close_time: Some(close.to_string()),
        }
    }

    #[test]
    fn fills_missing_days_as_closed() {
        let mut form = form();
        form.opening_hours = vec![rule(2, "08:00", "22:00")];

        let (_, rules) = validate_arena_form(&form).unwrap();

        assert_eq!(rules.len(), 7);
        assert!(rules[2].open_time.is_some());
        assert!(rules
            .iter()
            .filter(|r| r.day != 2)
            .all(|r| r.open_time.is_none() && r.close_time.is_none()));
    }

    #[test]
    fn treats_empty_times_as_closed() {
        let mut form = form();
        form.opening_hours = vec![rule(0, "", "")];

        let (_, rules) = validate_arena_form(&form).unwrap();

        assert_eq!(rules[0].open_time, None);
    }

    #[test]
    fn rejects_required_fields_and_negative_capacity() {
        let mut form = form();
        form.name = "  ".to_string();
        form.location = "x".repeat(201);
        form.capacity = -1;

        let errors = validate_arena_form(&form).unwrap_err();

        assert!(errors.errors().contains_key("name"));
        assert!(errors.errors().contains_key("location"));
        assert!(errors.errors().contains_key("capacity"));
    }

    #[test]
    fn rejects_non_http_urls() {
        let mut form = form();
        form.img_url = Some("ftp://example.com/rink.png".to_string());
        form.google_maps_url = Some("".to_string());

        let errors = validate_arena_form(&form).unwrap_err();

        assert!(errors.errors().contains_key("img_url"));
        assert!(!errors.errors().contains_key("google_maps_url"));
    }

    #[test]
    fn rejects_urls_without_valid_host() {
        let mut form = form();
        form.img_url = Some("http://[".to_string());
        form.google_maps_url = Some("https://@".to_string());

        let errors = validate_arena_form(&form).unwrap_err();

        assert!(errors.errors().contains_key("img_url"));
        assert!(errors.errors().contains_key("google_maps_url"));
    }

    #[test]
    fn rejects_bad_rules() {
        let mut form = form();
        form.opening_hours = vec![
            rule(7, "08:00", "10:00"),
            rule(1, "10:00", "09:00"),
            rule(2, "8am", "10:00"),
            OpeningHoursDto {
                day: 3,
                open_time: Some("08:00".to_string()),
                close_time: None,
            },
            rule(4, "08:00", "10:00"),
            rule(4, "09:00", "11:00"),
        ];

        let errors = validate_arena_form(&form).unwrap_err();
        let fields = errors.errors();

        assert!(fields.contains_key("opening_hours[0].day"));
        assert!(fields.contains_key("opening_hours[1].close_time"));
        assert!(fields.contains_key("opening_hours[2].open_time"));
        assert!(fields.contains_key("opening_hours[3].open_time"));
        assert!(fields.contains_key("opening_hours[5].day"));
        assert!(!fields.contains_key("opening_hours[4].day"));
    }
}
