//! EOR Quote Engine
//!
//! This crate simulates quotes from several Employer-of-Record providers,
//! reconciles them into a single recommendation, and gates risky or
//! low-margin quotes behind manual review.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod telemetry;
