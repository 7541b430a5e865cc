//! Poisson scoreline prediction for football matches.
//!
//! [`engine`] holds the pure probability code; [`forecast`] runs one
//! prediction end to end; [`render`] and [`dashboard`] present the result.

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod forecast;
pub mod render;
