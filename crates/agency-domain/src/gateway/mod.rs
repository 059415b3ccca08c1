//! Gateway Traits - Ports to systems the agency does not own

pub mod breed_catalog;
