//! Text rendering of a bookmark tree for previews.

use termtree::Tree as TermTree;

use crate::domain::entities::Node;
use crate::domain::envelope::Envelope;

fn to_term_tree(node: &Node) -> TermTree<String> {
    match node {
        Node::Folder { name, children } => {
            TermTree::new(format!("{name}/")).with_leaves(children.iter().map(to_term_tree))
        }
        Node::Bookmark { name, url } => TermTree::new(format!("{name} <{url}>")),
    }
}

/// Render the envelope as an indented tree rooted at the top-level name.
pub fn render_tree(envelope: &Envelope) -> TermTree<String> {
    TermTree::new(envelope.toplevel_name().to_string())
        .with_leaves(envelope.tree().iter().map(to_term_tree))
}
