//! Progress display for CI runs

pub mod reporter;
