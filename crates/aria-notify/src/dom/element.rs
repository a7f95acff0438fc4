// Element - Builder for the headless element tree
//
// Element is the public, by-value builder used to describe a page. When a
// Page ingests the tree each element becomes a Node with a stable NodeId;
// Nodes are internal and only reachable through Page, Locator, and
// ElementRef handles.

/// Stable identity of a node within one page.
///
/// Ids are assigned in document order when the page ingests its element
/// tree and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

/// Describes one element of a page under construction.
///
/// # Example
///
/// ```ignore
/// let root = Element::new("html")
///     .attr("lang", "en")
///     .child(
///         Element::new("body")
///             .child(Element::new("h1").text("Demo"))
///             .child(Element::new("button").id("go").text("Go")),
///     );
/// let page = Page::new(root);
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    disabled: bool,
    visible: bool,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given tag name (normalized to lowercase).
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            dom_id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: String::new(),
            disabled: false,
            visible: true,
            children: Vec::new(),
        }
    }

    /// Sets the element's id (the `#id` selector target).
    pub fn id(mut self, id: &str) -> Self {
        self.dom_id = Some(id.to_string());
        self
    }

    /// Adds a class (the `.class` selector target).
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute. `id` and `class` have dedicated builders and are
    /// exposed through `get_attribute` either way.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the element's own text content.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Marks the element disabled from the start.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Marks the element hidden from the start.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn into_node(self, next_id: &mut u64) -> Node {
        let id = NodeId(*next_id);
        *next_id += 1;
        Node {
            id,
            tag: self.tag,
            dom_id: self.dom_id,
            classes: self.classes,
            attributes: self.attributes,
            text: self.text,
            disabled: self.disabled,
            visible: self.visible,
            handler: None,
            children: self
                .children
                .into_iter()
                .map(|child| child.into_node(next_id))
                .collect(),
        }
    }
}

/// One element of an ingested page tree. Internal; mutated only under the
/// page's document lock.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) tag: String,
    pub(crate) dom_id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: String,
    pub(crate) disabled: bool,
    pub(crate) visible: bool,
    pub(crate) handler: Option<u64>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Text of this node and all descendants, in document order.
    pub(crate) fn subtree_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    /// Attribute lookup with the DOM's synthesized attributes: `id`,
    /// `class`, and the boolean `disabled` (present as an empty string).
    pub(crate) fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.dom_id.clone(),
            "class" => {
                if self.classes.is_empty() {
                    None
                } else {
                    Some(self.classes.join(" "))
                }
            }
            "disabled" => self.disabled.then(String::new),
            _ => self
                .attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.clone()),
        }
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub(crate) fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub(crate) fn remove_class(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
    }
}
