//! ui
//!
//! Console utilities for hosts.
//!
//! # Modules
//!
//! - [`output`] - Verbosity, message printing, error and suggestion formatting
//!
//! # Design
//!
//! The core never prints. Hosts route what reaches the terminal through
//! this module so quiet mode and formatting stay consistent.

pub mod output;
