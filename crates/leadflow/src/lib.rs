//! Backend workflows for a web-development agency: lead intake,
//! qualification scoring, follow-up automation, and marketing analytics
//! event logging.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
