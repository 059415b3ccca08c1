//! Outbound gateways to systems the agency does not own

pub mod breed_api;
