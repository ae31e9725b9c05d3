//! Bookmark building service
//!
//! Reads rows from a source and produces the managed bookmarks envelope.

use tracing::{debug, info};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{build_envelope, BuildStats, Envelope, TreeBuilder};
use crate::infrastructure::traits::RowSource;

/// Envelope ready for preview or upload.
#[derive(Debug, Clone)]
pub struct BuiltBookmarks {
    pub envelope: Envelope,
    pub stats: BuildStats,
}

impl BuiltBookmarks {
    pub fn to_json_pretty(&self) -> ApplicationResult<String> {
        Ok(serde_json::to_string_pretty(&self.envelope)?)
    }
}

/// Service turning spreadsheet rows into the policy envelope.
pub struct BookmarkService {
    builder: TreeBuilder,
    toplevel_name: String,
}

impl BookmarkService {
    pub fn new(separator: &str, toplevel_name: impl Into<String>) -> ApplicationResult<Self> {
        Ok(Self {
            builder: TreeBuilder::new(separator)?,
            toplevel_name: toplevel_name.into(),
        })
    }

    /// Read all rows and build a fresh envelope.
    pub fn build(&self, source: &dyn RowSource) -> ApplicationResult<BuiltBookmarks> {
        let rows = source.read_rows().with_context("read input rows")?;
        debug!("build: {} rows read", rows.len());

        let output = self.builder.build(&rows);
        if output.stats.skipped > 0 {
            info!(
                "skipped {} rows without name or url",
                output.stats.skipped
            );
        }

        let envelope = build_envelope(output.tree, self.toplevel_name.as_str());
        Ok(BuiltBookmarks {
            envelope,
            stats: output.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, Row};
    use std::io;

    struct VecSource(Vec<Row>);

    impl RowSource for VecSource {
        fn read_rows(&self) -> io::Result<Vec<Row>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl RowSource for BrokenSource {
        fn read_rows(&self) -> io::Result<Vec<Row>> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad csv"))
        }
    }

    #[test]
    fn given_rows_when_building_then_envelope_wraps_tree() {
        let service = BookmarkService::new(" > ", "Company Bookmarks").unwrap();
        let source = VecSource(vec![
            Row::new("", "Google", "http://google.com"),
            Row::new("Tools", "", "http://missing-name"),
        ]);

        let built = service.build(&source).unwrap();

        assert_eq!(built.envelope.toplevel_name(), "Company Bookmarks");
        assert_eq!(
            built.envelope.tree(),
            &vec![Node::bookmark("Google", "http://google.com")]
        );
        assert_eq!(built.stats.skipped, 1);
    }

    #[test]
    fn given_failing_source_when_building_then_operation_failed() {
        let service = BookmarkService::new(" > ", "X").unwrap();
        let err = service.build(&BrokenSource).unwrap_err();
        assert!(err.to_string().contains("read input rows"));
    }
}
