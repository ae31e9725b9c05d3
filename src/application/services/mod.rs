//! Application services

pub mod bookmarks;
pub mod policy;

pub use bookmarks::{BookmarkService, BuiltBookmarks};
pub use policy::{PolicyService, PreparedRequest, SubmitOutcome};
