//! Blueprint record as decoded from the catalog API, plus the derived
//! metadata used by the report and the archive policy.
//!
//! The extractors are pure over a decoded [`Blueprint`]; anything the wire
//! format does not guarantee (a published date on a published blueprint, a
//! parseable timestamp, a non-empty space list) surfaces as an
//! [`ExtractError`], which the batch task maps into a per-item failure.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::contract::Clock;

/// Timestamp layout of `published-date`: ISO 8601 with fractional seconds
/// and a numeric offset, e.g. `2024-01-01T00:00:00.000000+0000`.
const PUBLISHED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishedState {
    Published,
    Draft,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchivedState {
    Active,
    Archived,
    #[serde(other)]
    Other,
}

/// A blueprint as returned by `GET /bwl/blueprints/{id}`. Field names follow
/// the wire contract; timestamps are kept verbatim and parsed on demand so
/// the report can echo them unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct Blueprint {
    pub name: String,
    #[serde(rename = "space-names")]
    pub space_names: Vec<String>,
    #[serde(rename = "last-modified-date")]
    pub last_modified_date: String,
    #[serde(rename = "published-state")]
    pub published_state: PublishedState,
    /// Present only when the blueprint is published.
    #[serde(rename = "published-date", default)]
    pub published_date: Option<String>,
    #[serde(rename = "archived-state")]
    pub archived_state: ArchivedState,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("blueprint has no spaces")]
    NoSpaces,
    #[error("published blueprint has no published-date")]
    MissingPublishedDate,
    #[error("invalid date {value:?}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Blueprint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_modified(&self) -> &str {
        &self.last_modified_date
    }

    /// First of the blueprint's space names. An empty list violates the
    /// upstream API contract and is reported as a failure for this item.
    pub fn space_name(&self) -> Result<&str, ExtractError> {
        self.space_names
            .first()
            .map(String::as_str)
            .ok_or(ExtractError::NoSpaces)
    }

    pub fn is_published(&self) -> bool {
        self.published_state == PublishedState::Published
    }

    /// Published timestamp, verbatim; `None` when not published.
    pub fn published_date(&self) -> Option<&str> {
        if self.is_published() {
            self.published_date.as_deref()
        } else {
            None
        }
    }

    /// Age in whole days: `abs(today - reference)`, where the reference is
    /// the published date when published, else the last-modified date, both
    /// truncated to their date portion (the first ten characters of the
    /// timestamp, i.e. the calendar date in the timestamp's own offset).
    /// Uses the local clock, naive — distinct on purpose from
    /// [`days_since_published`](Self::days_since_published).
    pub fn age_in_days(&self, clock: &dyn Clock) -> Result<i64, ExtractError> {
        let raw = if self.is_published() {
            self.published_date
                .as_deref()
                .ok_or(ExtractError::MissingPublishedDate)?
        } else {
            self.last_modified_date.as_str()
        };
        let reference = parse_date_portion(raw)?;
        Ok((clock.local_today() - reference).num_days().abs())
    }

    /// Whole days since publication, computed from full UTC-aware timestamps
    /// with no truncation. `None` when the blueprint is not published.
    pub fn days_since_published(&self, clock: &dyn Clock) -> Result<Option<i64>, ExtractError> {
        if !self.is_published() {
            return Ok(None);
        }
        let raw = self
            .published_date
            .as_deref()
            .ok_or(ExtractError::MissingPublishedDate)?;
        let published =
            DateTime::parse_from_str(raw, PUBLISHED_DATE_FORMAT).map_err(|source| {
                ExtractError::InvalidDate {
                    value: raw.to_owned(),
                    source,
                }
            })?;
        Ok(Some(
            (clock.utc_now() - published.with_timezone(&Utc)).num_days(),
        ))
    }
}

/// Parse the `YYYY-MM-DD` prefix of an ISO timestamp.
fn parse_date_portion(raw: &str) -> Result<NaiveDate, ExtractError> {
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|source| ExtractError::InvalidDate {
        value: raw.to_owned(),
        source,
    })
}
