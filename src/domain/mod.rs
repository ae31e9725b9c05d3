//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod org_unit;
pub mod render;

pub use builder::{build_tree, BuildOutput, BuildStats, TreeBuilder};
pub use entities::*;
pub use envelope::{build_envelope, Envelope};
pub use error::{DomainError, DomainResult};
pub use org_unit::OrgUnit;
pub use render::render_tree;
