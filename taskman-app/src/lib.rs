//! # Taskman Application Library
//!
//! Process bootstrap for the Taskman desktop task manager: configuration,
//! logging, and preparing the data file before the front end takes over.
//!
//! ## Modules
//!
//! - `config`: Configuration loaded from the environment
//! - `bootstrap`: Schema setup and startup summary

pub mod bootstrap;
pub mod config;
