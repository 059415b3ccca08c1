//! Mission - One to three targets and, eventually, a cat to handle them
//!
//! A Mission is an Entity (has identity that persists through changes).
//! Its lifecycle is small but strict:
//!
//! ```text
//!   created (unassigned, open) ──assign──▶ assigned, open
//!        │                                    │
//!        │ complete / last target done        │ complete / last target done
//!        ▼                                    ▼
//!   completed (frozen)                  completed (frozen, never deletable)
//! ```
//!
//! The checks below are pure. Sequencing them against the repositories is
//! the use case layer's job.

use chrono::{DateTime, Utc};

use super::agent::AgentId;
use super::target::{NewTarget, Target, TargetId};

/// Fewest targets a mission may ever hold
pub const MIN_TARGETS: usize = 1;
/// Most targets a mission may ever hold
pub const MAX_TARGETS: usize = 3;

/// Unique identifier for a Mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissionId(i64);

impl MissionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for MissionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mission as supplied by the caller, created together with its targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub name: String,
    /// Optional initial assignment
    pub agent_id: Option<AgentId>,
    pub targets: Vec<NewTarget>,
}

impl NewMission {
    pub fn new(name: impl Into<String>, targets: Vec<NewTarget>) -> Self {
        Self {
            name: name.into(),
            agent_id: None,
            targets,
        }
    }

    /// Builder: assign a cat right away
    pub fn with_agent(mut self, agent_id: AgentId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Target count must fall within [MIN_TARGETS, MAX_TARGETS]
    pub fn validate(&self) -> Result<(), RuleViolation> {
        let count = self.targets.len();
        if !(MIN_TARGETS..=MAX_TARGETS).contains(&count) {
            return Err(RuleViolation::TargetCount { count });
        }
        Ok(())
    }
}

/// Mission - The central entity of the agency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    /// Unique identifier (Entity identity)
    id: MissionId,
    name: String,
    /// Who is on it; `None` until assigned
    agent_id: Option<AgentId>,
    /// Ordered by creation
    targets: Vec<Target>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Mission {
    /// Rebuild a Mission from its persisted parts
    pub fn new(
        id: MissionId,
        name: impl Into<String>,
        agent_id: Option<AgentId>,
        targets: Vec<Target>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            agent_id,
            targets,
            completed,
            created_at,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> MissionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agent_id(&self) -> Option<AgentId> {
        self.agent_id
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ========== Lifecycle Checks ==========

    /// Completed missions are frozen
    pub fn ensure_open(&self) -> Result<(), RuleViolation> {
        if self.completed {
            return Err(RuleViolation::MissionCompleted { mission: self.id });
        }
        Ok(())
    }

    /// A mission takes exactly one cat, once
    pub fn ensure_unassigned(&self) -> Result<(), RuleViolation> {
        match self.agent_id {
            Some(agent) => Err(RuleViolation::MissionAssigned {
                mission: self.id,
                agent,
            }),
            None => Ok(()),
        }
    }

    pub fn ensure_room_for_target(&self) -> Result<(), RuleViolation> {
        if self.targets.len() >= MAX_TARGETS {
            return Err(RuleViolation::TargetLimitReached { mission: self.id });
        }
        Ok(())
    }

    pub fn ensure_target_removable(&self) -> Result<(), RuleViolation> {
        if self.targets.len() <= MIN_TARGETS {
            return Err(RuleViolation::LastTarget { mission: self.id });
        }
        Ok(())
    }

    /// Would completing `just_completed` finish this mission?
    ///
    /// `self` is the snapshot loaded before the target was marked, so the
    /// target is skipped by id rather than trusting its stale flag.
    pub fn completes_with(&self, just_completed: TargetId) -> bool {
        self.targets
            .iter()
            .filter(|t| t.id() != just_completed)
            .all(Target::is_completed)
    }
}

/// Lifecycle rules a caller tried to break
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// Mission created with too few or too many targets
    TargetCount { count: usize },
    MissionCompleted { mission: MissionId },
    MissionAssigned { mission: MissionId, agent: AgentId },
    /// The cat already holds another mission
    AgentOnMission { agent: AgentId, mission: MissionId },
    TargetCompleted { target: TargetId },
    TargetLimitReached { mission: MissionId },
    LastTarget { mission: MissionId },
}

impl core::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuleViolation::TargetCount { count } => write!(
                f,
                "mission can only have from {} to {} targets, got {}",
                MIN_TARGETS, MAX_TARGETS, count
            ),
            RuleViolation::MissionCompleted { mission } => {
                write!(f, "mission {} is already completed", mission)
            }
            RuleViolation::MissionAssigned { mission, agent } => {
                write!(f, "mission {} is already assigned to cat {}", mission, agent)
            }
            RuleViolation::AgentOnMission { agent, mission } => {
                write!(f, "cat {} is already assigned to mission {}", agent, mission)
            }
            RuleViolation::TargetCompleted { target } => {
                write!(f, "target {} is already completed", target)
            }
            RuleViolation::TargetLimitReached { mission } => {
                write!(f, "mission {} already has {} targets", mission, MAX_TARGETS)
            }
            RuleViolation::LastTarget { mission } => {
                write!(f, "target is the last one of mission {}", mission)
            }
        }
    }
}
