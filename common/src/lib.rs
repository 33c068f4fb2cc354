// Common library: sequence resolution, remote sessions and shared infrastructure

pub mod config;
pub mod errors;
pub mod models;
pub mod remote;
pub mod resolver;
pub mod sequence;
pub mod snapshot;
pub mod telemetry;
