//! BODYSTRUCTURE part trees and body part resolution
//!
//! A message's BODYSTRUCTURE describes its MIME part tree without
//! fetching any content. The resolver walks that tree and picks the
//! part(s) that carry the message's displayable text, producing the
//! part-number paths a subsequent partial fetch needs.
//!
//! Part numbering follows the protocol: children are numbered from 1
//! by sibling position, nested paths are dot-separated (`1.2`), and
//! the empty path means the whole body of a non-multipart message.

use serde::Serialize;

/// One node of a message's MIME part tree.
///
/// Multipart containers have `mime_type == "multipart"` and carry
/// their parts in `children`; leaves have no children. Type and
/// subtype casing is preserved as received; all comparisons are
/// case-insensitive since servers respond with arbitrary casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureNode {
    pub mime_type: String,
    pub subtype: String,
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    /// A leaf (non-multipart) part.
    pub fn leaf(mime_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            subtype: subtype.into(),
            children: Vec::new(),
        }
    }

    /// A multipart container with the given subtype and parts.
    pub fn multipart(subtype: impl Into<String>, children: Vec<StructureNode>) -> Self {
        Self {
            mime_type: "multipart".to_string(),
            subtype: subtype.into(),
            children,
        }
    }

    fn is_multipart(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("multipart")
    }

    fn is_text(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("text")
    }

    fn subtype_is(&self, subtype: &str) -> bool {
        self.subtype.eq_ignore_ascii_case(subtype)
    }
}

/// A resolved body part: where to fetch it and what it claims to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyPartDescriptor {
    /// Dot-separated part-number path. Empty means the whole body.
    pub part_id: String,
    pub mime_type: String,
    pub subtype: String,
}

impl BodyPartDescriptor {
    fn for_node(node: &StructureNode, path: &str) -> Self {
        Self {
            part_id: path.to_string(),
            mime_type: node.mime_type.to_lowercase(),
            subtype: node.subtype.to_lowercase(),
        }
    }

    /// Whether this part holds the HTML representation.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.subtype.eq_ignore_ascii_case("html")
    }
}

/// Locate the part(s) carrying the message's displayable text.
///
/// Returns an empty sequence when the message has no textual
/// representation at all; surfacing that as a "no renderable body"
/// condition is the caller's concern.
#[must_use]
pub fn resolve(root: &StructureNode) -> Vec<BodyPartDescriptor> {
    resolve_at(root, "", false)
}

/// Preference order among alternative representations.
fn text_rank(node: &StructureNode) -> u8 {
    if !node.is_text() {
        return 0;
    }
    if node.subtype_is("html") {
        3
    } else if node.subtype_is("plain") {
        2
    } else {
        1
    }
}

fn child_path(prefix: &str, index: usize) -> String {
    if prefix.is_empty() {
        (index + 1).to_string()
    } else {
        format!("{prefix}.{}", index + 1)
    }
}

/// `any_text` widens the leaf rule: inside `multipart/alternative`
/// any `text/*` child is an acceptable last resort, while elsewhere
/// only `plain` and `html` leaves resolve.
fn resolve_at(node: &StructureNode, path: &str, any_text: bool) -> Vec<BodyPartDescriptor> {
    if !node.is_multipart() {
        let accepted = if any_text {
            node.is_text()
        } else {
            node.is_text() && (node.subtype_is("plain") || node.subtype_is("html"))
        };
        if accepted {
            return vec![BodyPartDescriptor::for_node(node, path)];
        }
        return Vec::new();
    }

    if node.subtype_is("alternative") {
        return resolve_alternative(node, path);
    }

    // mixed, related, and friends: depth-first, left-to-right, first
    // non-empty result wins. Non-text children are skipped, not fatal.
    for (index, child) in node.children.iter().enumerate() {
        let found = resolve_at(child, &child_path(path, index), false);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Pick one representation among alternative siblings, by priority
/// html > plain > any other text. A multipart sibling is ranked by
/// what it resolves to, so `multipart/related(text/html, ...)` still
/// outranks a plain-text sibling.
fn resolve_alternative(node: &StructureNode, path: &str) -> Vec<BodyPartDescriptor> {
    let mut best_rank = 0u8;
    let mut best: Vec<BodyPartDescriptor> = Vec::new();

    for (index, child) in node.children.iter().enumerate() {
        let candidate_path = child_path(path, index);
        let (rank, descriptors) = if child.is_multipart() {
            let resolved = resolve_at(child, &candidate_path, false);
            let rank = resolved
                .iter()
                .map(|d| {
                    if d.is_html() {
                        3
                    } else if d.subtype == "plain" {
                        2
                    } else {
                        1
                    }
                })
                .max()
                .unwrap_or(0);
            (rank, resolved)
        } else {
            let rank = text_rank(child);
            if rank > 0 {
                (rank, resolve_at(child, &candidate_path, true))
            } else {
                (0, Vec::new())
            }
        };

        // Strict comparison keeps the earlier sibling on ties.
        if rank > best_rank {
            best_rank = rank;
            best = descriptors;
        }
    }

    best
}
