//! Target - Someone a mission has to deal with
//!
//! Targets belong to exactly one mission. Once completed, a target is
//! frozen: no notes edits, no deletion, no second completion.

use chrono::{DateTime, Utc};

use super::mission::{MissionId, RuleViolation};

/// Unique identifier for a Target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(i64);

impl TargetId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for TargetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A target as supplied by the caller, before it gets an identity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    pub notes: String,
}

impl NewTarget {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            notes: String::new(),
        }
    }

    /// Builder: set initial notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Target - An entity owned by a Mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    id: TargetId,
    mission_id: MissionId,
    name: String,
    country: String,
    notes: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Target {
    /// Rebuild a Target from its persisted parts
    pub fn new(
        id: TargetId,
        mission_id: MissionId,
        details: NewTarget,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            mission_id,
            name: details.name,
            country: details.country,
            notes: details.notes,
            completed,
            created_at,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn mission_id(&self) -> MissionId {
        self.mission_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ========== Lifecycle Checks ==========

    /// A completed target accepts no further mutation
    pub fn ensure_open(&self) -> Result<(), RuleViolation> {
        if self.completed {
            return Err(RuleViolation::TargetCompleted { target: self.id });
        }
        Ok(())
    }
}
