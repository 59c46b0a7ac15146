#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal client for recording vehicle safety inspections.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod submission;
pub mod tasks;
pub mod tui;
