//! Agent - A spy cat on the agency's payroll
//!
//! Agent is an Entity (has identity).
//! Salary is the only attribute that may change after hiring.

use chrono::{DateTime, Utc};

/// Unique identifier for an Agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(i64);

impl AgentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The profile of a cat about to be hired
///
/// Transport-level validation (alphabetic name, known breed, positive
/// salary) has already happened by the time this reaches the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

/// Agent - A hired spy cat
#[derive(Debug, Clone)]
pub struct Agent {
    /// Unique identifier (Entity identity)
    id: AgentId,
    name: String,
    years_of_experience: u32,
    breed: String,
    salary: f64,
    created_at: DateTime<Utc>,
}

impl Agent {
    /// Rebuild an Agent from its persisted parts
    pub fn new(id: AgentId, profile: NewAgent, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: profile.name,
            years_of_experience: profile.years_of_experience,
            breed: profile.breed,
            salary: profile.salary,
            created_at,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn years_of_experience(&self) -> u32 {
        self.years_of_experience
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for Agent {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for Agent {}
