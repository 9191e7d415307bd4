use super::*;

fn filled() -> MeetingForm {
    MeetingForm {
        title: " Morning run ".to_owned(),
        description: "5k loop".to_owned(),
        category: "sports".to_owned(),
        address: "River park".to_owned(),
        region: "east".to_owned(),
        latitude: "37.5".to_owned(),
        longitude: "127.1".to_owned(),
        starts_at: "2026-11-02T07:00".to_owned(),
        capacity: "10".to_owned(),
        image_urls: "https://cdn.example.com/run.png\n".to_owned(),
    }
}

#[test]
fn validate_meeting_form_builds_draft() {
    let draft = validate_meeting_form(&filled()).expect("draft");
    assert_eq!(draft.title, "Morning run");
    assert_eq!(draft.capacity, 10);
    assert_eq!(draft.image_urls, vec!["https://cdn.example.com/run.png".to_owned()]);
    let place = draft.place.expect("place");
    assert_eq!(place.region.as_deref(), Some("east"));
    assert!((place.latitude - 37.5).abs() < f64::EPSILON);
}

#[test]
fn validate_meeting_form_requires_core_fields() {
    let form = MeetingForm { title: "  ".to_owned(), ..filled() };
    assert_eq!(validate_meeting_form(&form), Err("Give the meeting a title."));
    let form = MeetingForm { category: String::new(), ..filled() };
    assert_eq!(validate_meeting_form(&form), Err("Choose a category."));
    let form = MeetingForm { address: String::new(), ..filled() };
    assert_eq!(validate_meeting_form(&form), Err("Enter where the meeting happens."));
}

#[test]
fn validate_meeting_form_checks_capacity_range() {
    for capacity in ["1", "101", "lots", ""] {
        let form = MeetingForm { capacity: capacity.to_owned(), ..filled() };
        assert_eq!(validate_meeting_form(&form), Err("Capacity must be between 2 and 100."));
    }
}

#[test]
fn coordinates_are_optional_but_validated() {
    let form = MeetingForm { latitude: String::new(), longitude: String::new(), ..filled() };
    assert!(validate_meeting_form(&form).is_ok());
    let form = MeetingForm { latitude: "95".to_owned(), ..filled() };
    assert_eq!(validate_meeting_form(&form), Err("Coordinates must be valid latitude and longitude."));
}

#[test]
fn form_round_trips_existing_draft() {
    let draft = validate_meeting_form(&filled()).expect("draft");
    let form = MeetingForm::from(&draft);
    assert_eq!(validate_meeting_form(&form), Ok(draft));
}
