//! Weekly planner library
//!
//! This library exposes the core functionality of the planner for the
//! command line front end and for testing.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod services;
pub mod storage;
pub mod timer;
