//! Renderer boundary.
//!
//! Renderers only read [`MergedNode`]s; classification never happens here.
//! [`OutlineRenderer`] is a plain-text renderer with one line per entry:
//!
//! ```text
//!   countries:
//!     0:
//! ~     capital: "Buenos Aires" -> "Rawson"
//! <   1: (moved from _3)
//! >   _3: => 1
//! + spanishName: "Sudamérica"
//! - surface: 17840000
//! ```

use crate::classify::ChangeKind;
use crate::merged::MergedNode;
use crate::value::Value;

/// Anything that turns a merged tree into output.
pub trait Renderer {
    type Output;

    fn render(&self, nodes: &[MergedNode<'_>]) -> Self::Output;
}

/// Plain-text outline with a one-character change marker per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRenderer {
    indent: usize,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces added per nesting level.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn write_nodes(&self, out: &mut String, nodes: &[MergedNode<'_>], depth: usize) {
        for node in nodes {
            let pad = " ".repeat(depth * self.indent);
            let text = match node.kind {
                ChangeKind::Node => {
                    out.push_str(&format!("{} {}{}:\n", marker(node.kind), pad, node.key));
                    self.write_nodes(out, &node.children, depth + 1);
                    continue;
                }
                ChangeKind::Added => show(node.added_value()),
                ChangeKind::Deleted => show(node.deleted_value()),
                ChangeKind::Modified => match node.modified_values() {
                    Some((old, new)) => format!("{old} -> {new}"),
                    None => show(None),
                },
                ChangeKind::Moved => format!("=> {}", node.move_destination().unwrap_or("?")),
                ChangeKind::MoveDestination => match node.moved_from {
                    Some(origin) => format!("(moved from {origin})"),
                    None => "(moved)".to_string(),
                },
                // Patch text spans lines; keep it on one.
                ChangeKind::TextDiff => serde_json::Value::from(node.text_patch().unwrap_or_default()).to_string(),
                ChangeKind::Unchanged => show(node.base_value),
            };
            out.push_str(&format!("{} {}{}: {}\n", marker(node.kind), pad, node.key, text));
        }
    }
}

impl Renderer for OutlineRenderer {
    type Output = String;

    fn render(&self, nodes: &[MergedNode<'_>]) -> String {
        let mut out = String::new();
        self.write_nodes(&mut out, nodes, 0);
        out
    }
}

/// Line marker for a change kind.
pub fn marker(kind: ChangeKind) -> char {
    match kind {
        ChangeKind::Added => '+',
        ChangeKind::Deleted => '-',
        ChangeKind::Modified => '~',
        ChangeKind::Moved => '>',
        ChangeKind::MoveDestination => '<',
        ChangeKind::TextDiff => '*',
        ChangeKind::Node | ChangeKind::Unchanged => ' ',
    }
}

fn show(value: Option<&Value>) -> String {
    value.map_or_else(|| "(none)".to_string(), Value::to_string)
}
