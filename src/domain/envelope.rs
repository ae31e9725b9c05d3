//! Managed bookmarks policy envelope.
//!
//! The policy value is a two-element JSON array, not a single object:
//! `[{"toplevel_name": "..."}, {"top": [...]}]`.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Tree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToplevelName {
    pub toplevel_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Top {
    pub top: Tree,
}

/// Serializes as a JSON array of its two fields, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope(pub ToplevelName, pub Top);

impl Envelope {
    pub fn toplevel_name(&self) -> &str {
        &self.0.toplevel_name
    }

    pub fn tree(&self) -> &Tree {
        &self.1.top
    }
}

/// Wrap a tree under the display name of the managed bookmarks folder.
pub fn build_envelope(tree: Tree, toplevel_name: impl Into<String>) -> Envelope {
    Envelope(
        ToplevelName {
            toplevel_name: toplevel_name.into(),
        },
        Top { top: tree },
    )
}
