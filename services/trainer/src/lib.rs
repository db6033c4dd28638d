//! PhishDrill trainer service
//!
//! Serves the social-engineering training scenarios and records, per
//! browser session, which simulated attack steps the user triggered.

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod scenarios;
pub mod session;
pub mod state;
pub mod templates;
