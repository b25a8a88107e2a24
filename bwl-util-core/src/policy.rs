//! Decides which blueprints qualify for archiving.

use crate::blueprint::{ArchivedState, Blueprint};

/// Age-based archive policy. A blueprint qualifies when it is strictly older
/// than the threshold and still active; blueprints exactly at the threshold
/// are left alone, and an already-archived blueprint is never re-archived.
#[derive(Debug, Clone, Copy)]
pub struct ArchivePolicy {
    pub threshold_days: i64,
}

impl ArchivePolicy {
    pub fn new(threshold_days: i64) -> Self {
        Self { threshold_days }
    }

    pub fn qualifies(&self, blueprint: &Blueprint, age_days: i64) -> bool {
        age_days > self.threshold_days && blueprint.archived_state == ArchivedState::Active
    }
}
