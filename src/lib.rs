//! Vessel arrival time estimation
//!
//! Great-circle distance, projected arrival time and voyage progress for a
//! vessel on a single-leg route, plus the CSV route loader and console
//! rendering used by the `vessel-eta` binary.

pub mod config;
pub mod display;
pub mod distance;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod routes;
