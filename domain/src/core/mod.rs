//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: typed entity identifiers
//! - [`validation::ValidationErrors`]: field-level validation results
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
pub mod validation;
