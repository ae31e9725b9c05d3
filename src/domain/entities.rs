//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// One input row: folder path, bookmark name and URL.
///
/// Cells are kept as read; trimming and validity checks happen in the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub path: String,
    pub name: String,
    pub url: String,
}

impl Row {
    pub fn new(path: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Entry of the managed bookmarks tree.
///
/// Serialized untagged: folders as `{"name", "children"}`, bookmarks as `{"name", "url"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Folder { name: String, children: Vec<Node> },
    Bookmark { name: String, url: String },
}

impl Node {
    pub fn folder(name: impl Into<String>) -> Self {
        Node::Folder {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn bookmark(name: impl Into<String>, url: impl Into<String>) -> Self {
        Node::Bookmark {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::Bookmark { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    /// True only for a folder with exactly this name; bookmarks never match.
    pub fn is_folder_named(&self, wanted: &str) -> bool {
        matches!(self, Node::Folder { name, .. } if name == wanted)
    }

    /// Children of a folder, `None` for bookmarks.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Bookmark { .. } => None,
        }
    }
}

/// Top-level entries directly under the implicit root.
pub type Tree = Vec<Node>;
