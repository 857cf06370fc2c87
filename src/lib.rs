#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! Cross-system retention investigation for departed users.
//!
//! Given an alias, [`core::EvidenceCollector`] asks the identity directory,
//! the mailbox service and every configured storage tenant what they still
//! hold, reconciles the answers into one [`core::Investigation`] and derives a
//! Retain/Purge [`core::Recommendation`]. [`report`] renders the outcome.

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod ui;

pub use config::Config;
