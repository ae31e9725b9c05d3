//! Managed bookmarks for Chrome, built from spreadsheet rows.
//!
//! Rows of `path,name,url` become a nested folder tree
//! ([`domain::TreeBuilder`]), wrapped in the policy envelope
//! ([`domain::build_envelope`]) and pushed to an org unit through the
//! Chrome Policy API ([`application::services::PolicyService`]).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
