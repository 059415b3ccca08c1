//! Domain Models - The vocabulary of the agency
//!
//! These types represent the "Ubiquitous Language" of the agency.
//! Cats are agents, missions carry one to three targets.

pub mod agent;
pub mod mission;
pub mod target;
