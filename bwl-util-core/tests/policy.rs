use bwl_util_core::blueprint::{ArchivedState, Blueprint, PublishedState};
use bwl_util_core::policy::ArchivePolicy;

fn blueprint(archived_state: ArchivedState) -> Blueprint {
    Blueprint {
        name: "Claims Intake".to_owned(),
        space_names: vec!["Operations".to_owned()],
        last_modified_date: "2024-01-01T00:00:00.000000+0000".to_owned(),
        published_state: PublishedState::Draft,
        published_date: None,
        archived_state,
    }
}

#[test]
fn blueprint_exactly_at_threshold_is_not_archived() {
    let policy = ArchivePolicy::new(30);
    assert!(!policy.qualifies(&blueprint(ArchivedState::Active), 30));
}

#[test]
fn blueprint_strictly_older_than_threshold_is_archived() {
    let policy = ArchivePolicy::new(30);
    assert!(policy.qualifies(&blueprint(ArchivedState::Active), 31));
}

#[test]
fn archived_blueprint_is_never_rearchived() {
    let policy = ArchivePolicy::new(30);
    assert!(!policy.qualifies(&blueprint(ArchivedState::Archived), 31));
    assert!(!policy.qualifies(&blueprint(ArchivedState::Archived), 10_000));
}

#[test]
fn unknown_archived_state_does_not_qualify() {
    let policy = ArchivePolicy::new(30);
    assert!(!policy.qualifies(&blueprint(ArchivedState::Other), 31));
}
