//! Core use-case services.
//!
//! # Responsibility
//! - `catalog_service`: producer-facing imports.
//! - `report_service`: consumer-facing analytical queries with the
//!   log-and-default failure policy.
//!
//! # Invariants
//! - Services delegate all SQL to repository implementations.

pub mod catalog_service;
pub mod report_service;
