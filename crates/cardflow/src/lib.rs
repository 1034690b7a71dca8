//! Credit-card application screening service building blocks.
//!
//! The `workflows` tree hosts the screening core (decision engine, validator
//! contract, service facade, HTTP router) and CSV batch intake; `config`,
//! `telemetry`, and `error` carry the ambient plumbing shared with the host
//! binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
