//! Tree builder: turns path/name/url rows into a nested bookmark tree.

use tracing::{debug, instrument, trace};

use crate::domain::entities::{Node, Row, Tree};
use crate::domain::error::{DomainError, DomainResult};

/// Counters collected while building a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows handed to the builder
    pub rows: usize,
    /// Rows dropped because name or url was empty
    pub skipped: usize,
    /// Bookmarks placed in the tree
    pub bookmarks: usize,
    /// Folders created
    pub folders: usize,
    /// Deepest folder nesting seen (0 = everything at root)
    pub max_depth: usize,
}

/// Result of a build: the tree plus its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub tree: Tree,
    pub stats: BuildStats,
}

/// Constructs a bookmark tree from rows, splitting folder paths on a separator.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    separator: String,
}

impl TreeBuilder {
    pub fn new(separator: impl Into<String>) -> DomainResult<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(DomainError::EmptySeparator);
        }
        Ok(Self { separator })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Build a fresh tree from rows in input order.
    ///
    /// Rows with an empty name or url (after trimming) are skipped without error.
    /// Folders are reused by name within the same parent, first occurrence wins;
    /// a bookmark with a segment's name never counts as that folder.
    /// Empty segments (e.g. from consecutive separators) become folders named `""`.
    #[instrument(level = "debug", skip(self, rows), fields(rows = rows.len()))]
    pub fn build(&self, rows: &[Row]) -> BuildOutput {
        let mut root: Tree = Vec::new();
        let mut stats = BuildStats {
            rows: rows.len(),
            ..BuildStats::default()
        };

        for row in rows {
            let path = row.path.trim();
            let name = row.name.trim();
            let url = row.url.trim();

            if name.is_empty() || url.is_empty() {
                trace!("skip row: path={:?} name={:?} url={:?}", path, name, url);
                stats.skipped += 1;
                continue;
            }

            let bookmark = Node::bookmark(name, url);
            stats.bookmarks += 1;

            if path.is_empty() {
                root.push(bookmark);
                continue;
            }

            let segments: Vec<&str> = path.split(self.separator.as_str()).collect();
            stats.max_depth = stats.max_depth.max(segments.len());
            stats.folders += insert(&mut root, &segments, bookmark);
        }

        debug!(
            "built tree: {} bookmarks, {} folders, {} skipped, depth {}",
            stats.bookmarks, stats.folders, stats.skipped, stats.max_depth
        );
        BuildOutput { tree: root, stats }
    }
}

/// Place `bookmark` under the folder chain `segments`, descending into the first
/// folder with a matching name at each level and appending missing ones.
///
/// Returns the number of folders created.
fn insert(level: &mut Vec<Node>, segments: &[&str], bookmark: Node) -> usize {
    let Some((first, rest)) = segments.split_first() else {
        level.push(bookmark);
        return 0;
    };

    for node in level.iter_mut() {
        if let Node::Folder { name, children } = node {
            if name.as_str() == *first {
                return insert(children, rest, bookmark);
            }
        }
    }

    // no match: the rest of the chain is new, build it bottom-up
    let mut node = bookmark;
    for segment in rest.iter().rev() {
        node = Node::Folder {
            name: segment.to_string(),
            children: vec![node],
        };
    }
    level.push(Node::Folder {
        name: first.to_string(),
        children: vec![node],
    });
    segments.len()
}

/// Build a tree with the given separator.
pub fn build_tree(rows: &[Row], separator: &str) -> DomainResult<Tree> {
    Ok(TreeBuilder::new(separator)?.build(rows).tree)
}
