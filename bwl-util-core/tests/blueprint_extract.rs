use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use bwl_util_core::blueprint::{ArchivedState, Blueprint, ExtractError, PublishedState};
use bwl_util_core::contract::Clock;

struct FixedClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedClock {
    fn at(today: &str, now: &str) -> Self {
        Self {
            today: today.parse().expect("valid date"),
            now: now.parse().expect("valid timestamp"),
        }
    }
}

impl Clock for FixedClock {
    fn local_today(&self) -> NaiveDate {
        self.today
    }

    fn utc_now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn decode(value: serde_json::Value) -> Blueprint {
    serde_json::from_value(value).expect("blueprint should decode")
}

fn published_blueprint(published_date: &str) -> Blueprint {
    decode(json!({
        "name": "Order to Cash",
        "space-names": ["Finance", "Shared"],
        "last-modified-date": "2023-12-01T09:15:00.000000+0000",
        "published-state": "published",
        "published-date": published_date,
        "archived-state": "active",
    }))
}

fn draft_blueprint(last_modified: &str) -> Blueprint {
    decode(json!({
        "name": "Onboarding Draft",
        "space-names": ["HR"],
        "last-modified-date": last_modified,
        "published-state": "draft",
        "archived-state": "active",
    }))
}

#[test]
fn decodes_wire_field_names_and_states() {
    let blueprint = published_blueprint("2024-01-01T00:00:00.000000+0000");
    assert_eq!(blueprint.name(), "Order to Cash");
    assert_eq!(blueprint.published_state, PublishedState::Published);
    assert_eq!(blueprint.archived_state, ArchivedState::Active);
    assert_eq!(blueprint.space_name().expect("has spaces"), "Finance");
    assert_eq!(
        blueprint.last_modified(),
        "2023-12-01T09:15:00.000000+0000"
    );
}

#[test]
fn unknown_states_decode_to_other() {
    let blueprint = decode(json!({
        "name": "Odd",
        "space-names": ["X"],
        "last-modified-date": "2024-01-01T00:00:00.000000+0000",
        "published-state": "withdrawn",
        "archived-state": "retired",
    }));
    assert_eq!(blueprint.published_state, PublishedState::Other);
    assert_eq!(blueprint.archived_state, ArchivedState::Other);
}

#[test]
fn age_of_published_blueprint_counts_from_published_date() {
    let clock = FixedClock::at("2024-02-01", "2024-02-01T00:00:00Z");
    let blueprint = published_blueprint("2024-01-01T00:00:00.000000+0000");
    assert_eq!(blueprint.age_in_days(&clock).expect("age computable"), 31);
}

#[test]
fn age_ignores_time_of_day_in_reference() {
    let clock = FixedClock::at("2024-02-01", "2024-02-01T00:00:00Z");
    let blueprint = published_blueprint("2024-01-01T23:59:59.999999+0000");
    assert_eq!(blueprint.age_in_days(&clock).expect("age computable"), 31);
}

#[test]
fn age_of_unpublished_blueprint_counts_from_last_modified() {
    let clock = FixedClock::at("2024-01-20", "2024-01-20T00:00:00Z");
    let blueprint = draft_blueprint("2024-01-15T08:30:00.000000+0000");
    assert_eq!(blueprint.age_in_days(&clock).expect("age computable"), 5);
}

#[test]
fn age_of_future_dated_blueprint_is_absolute() {
    let clock = FixedClock::at("2024-02-01", "2024-02-01T00:00:00Z");
    let blueprint = draft_blueprint("2024-03-01T00:00:00.000000+0000");
    assert_eq!(blueprint.age_in_days(&clock).expect("age computable"), 29);
}

#[test]
fn age_fails_on_published_blueprint_without_published_date() {
    let clock = FixedClock::at("2024-02-01", "2024-02-01T00:00:00Z");
    let blueprint = decode(json!({
        "name": "Broken",
        "space-names": ["X"],
        "last-modified-date": "2024-01-01T00:00:00.000000+0000",
        "published-state": "published",
        "archived-state": "active",
    }));
    assert!(matches!(
        blueprint.age_in_days(&clock),
        Err(ExtractError::MissingPublishedDate)
    ));
}

#[test]
fn age_fails_on_malformed_timestamp() {
    let clock = FixedClock::at("2024-02-01", "2024-02-01T00:00:00Z");
    let blueprint = draft_blueprint("not-a-date");
    assert!(matches!(
        blueprint.age_in_days(&clock),
        Err(ExtractError::InvalidDate { .. })
    ));
}

#[test]
fn days_since_published_uses_full_utc_timestamps() {
    // 30 days and 12 hours elapsed; whole days only.
    let clock = FixedClock::at("2024-01-31", "2024-01-31T12:00:00Z");
    let blueprint = published_blueprint("2024-01-01T00:00:00.000000+0000");
    assert_eq!(
        blueprint.days_since_published(&clock).expect("computable"),
        Some(30)
    );
}

#[test]
fn days_since_published_respects_the_offset() {
    // Published 2024-01-01T12:00+0100 == 11:00Z; 25 hours before `now`.
    let clock = FixedClock::at("2024-01-02", "2024-01-02T12:00:00Z");
    let blueprint = published_blueprint("2024-01-01T12:00:00.000000+0100");
    assert_eq!(
        blueprint.days_since_published(&clock).expect("computable"),
        Some(1)
    );
}

#[test]
fn days_since_published_is_not_applicable_for_drafts() {
    let clock = FixedClock::at("2024-01-20", "2024-01-20T00:00:00Z");
    let blueprint = draft_blueprint("2024-01-15T08:30:00.000000+0000");
    assert_eq!(
        blueprint.days_since_published(&clock).expect("computable"),
        None
    );
}

#[test]
fn published_date_is_not_applicable_for_drafts() {
    let blueprint = draft_blueprint("2024-01-15T08:30:00.000000+0000");
    assert_eq!(blueprint.published_date(), None);

    let published = published_blueprint("2024-01-01T00:00:00.000000+0000");
    assert_eq!(
        published.published_date(),
        Some("2024-01-01T00:00:00.000000+0000")
    );
}

#[test]
fn space_name_fails_on_empty_space_list() {
    let blueprint = decode(json!({
        "name": "Orphan",
        "space-names": [],
        "last-modified-date": "2024-01-01T00:00:00.000000+0000",
        "published-state": "draft",
        "archived-state": "active",
    }));
    assert!(matches!(
        blueprint.space_name(),
        Err(ExtractError::NoSpaces)
    ));
}
