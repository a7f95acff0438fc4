// Accessibility tree snapshot
//
// Projects the element tree the way an accessibility inspector would:
// implicit roles from tag names, names from contents for the roles that
// take one, hidden subtrees and non-rendered tags pruned. The snapshot is
// serializable so suites can diff it or dump it for inspection.

use serde::{Deserialize, Serialize};

use crate::dom::Node;

/// One node of an accessibility tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxNode {
    /// Computed role, e.g. "button", "heading", "document".
    pub role: String,

    /// Accessible name, for roles that take their name from contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the element is currently disabled.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,

    /// Child accessibility nodes, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AxNode>,
}

impl AxNode {
    /// Depth-first search for the first node with the given role.
    pub fn find_role(&self, role: &str) -> Option<&AxNode> {
        if self.role == role {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_role(role))
    }
}

/// Implicit role for a tag, or None for tags that never render content
/// (their whole subtree is pruned from the snapshot).
fn implicit_role(tag: &str) -> Option<&'static str> {
    match tag {
        "html" => Some("document"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some("heading"),
        "p" => Some("paragraph"),
        "button" => Some("button"),
        "a" => Some("link"),
        "ul" | "ol" => Some("list"),
        "li" => Some("listitem"),
        "head" | "title" | "meta" | "script" | "style" => None,
        _ => Some("generic"),
    }
}

fn names_from_contents(role: &str) -> bool {
    matches!(role, "button" | "heading" | "link" | "listitem")
}

pub(crate) fn ax_snapshot(node: &Node) -> Option<AxNode> {
    if !node.visible {
        return None;
    }
    let role = implicit_role(&node.tag)?;

    let name = if names_from_contents(role) {
        let text = node.subtree_text();
        (!text.is_empty()).then_some(text)
    } else {
        None
    };

    Some(AxNode {
        role: role.to_string(),
        name,
        disabled: node.disabled,
        children: node.children.iter().filter_map(ax_snapshot).collect(),
    })
}
