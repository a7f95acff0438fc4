// Page - Headless page handle
//
// A Page owns the ingested element tree plus the click handlers wired onto
// it. Handles (Page, Locator, ElementRef) are cheap clones sharing one
// inner state; all tree access goes through the document lock and handlers
// are invoked only after that lock is released.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::dom::{AxNode, Element, Node, NodeId, Selector, ax_snapshot};
use crate::error::{Error, Result};
use crate::locator::Locator;

type ClickHandler = Arc<dyn Fn() + Send + Sync>;

pub(crate) struct Document {
    root: Node,
    focused: Option<NodeId>,
}

fn find_node(node: &Node, id: NodeId) -> Option<&Node> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, id))
}

fn find_node_mut(node: &mut Node, id: NodeId) -> Option<&mut Node> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find_map(|child| find_node_mut(child, id))
}

fn collect_matches<'a>(node: &'a Node, selector: &Selector, out: &mut Vec<&'a Node>) {
    if selector.matches(node) {
        out.push(node);
    }
    for child in &node.children {
        collect_matches(child, selector, out);
    }
}

fn strict_match<'a>(root: &'a Node, selector: &Selector) -> Result<&'a Node> {
    let mut matches = Vec::new();
    collect_matches(root, selector, &mut matches);
    match matches.as_slice() {
        [] => Err(Error::ElementNotFound(selector.raw().to_string())),
        [node] => Ok(node),
        _ => Err(Error::StrictModeViolation {
            selector: selector.raw().to_string(),
            count: matches.len(),
        }),
    }
}

pub(crate) struct PageInner {
    document: Mutex<Document>,
    handlers: Mutex<HashMap<u64, ClickHandler>>,
    next_handler: AtomicU64,
}

impl PageInner {
    /// Strict-mode read: resolves the selector to exactly one node and
    /// applies `read` to it under the document lock.
    pub(crate) fn query<R>(
        &self,
        selector: &Selector,
        read: impl FnOnce(&Node) -> R,
    ) -> Result<R> {
        let doc = self.document.lock();
        strict_match(&doc.root, selector).map(read)
    }

    pub(crate) fn count_matches(&self, selector: &Selector) -> usize {
        let doc = self.document.lock();
        let mut matches = Vec::new();
        collect_matches(&doc.root, selector, &mut matches);
        matches.len()
    }

    pub(crate) fn is_focused(&self, selector: &Selector) -> Result<bool> {
        let doc = self.document.lock();
        let node = strict_match(&doc.root, selector)?;
        Ok(doc.focused == Some(node.id))
    }

    pub(crate) fn with_node<R>(
        &self,
        id: NodeId,
        read: impl FnOnce(&Node) -> R,
    ) -> Option<R> {
        let doc = self.document.lock();
        find_node(&doc.root, id).map(read)
    }

    pub(crate) fn with_node_mut<R>(
        &self,
        id: NodeId,
        mutate: impl FnOnce(&mut Node) -> R,
    ) -> Option<R> {
        let mut doc = self.document.lock();
        find_node_mut(&mut doc.root, id).map(mutate)
    }

    /// Moves keyboard focus to the node. Disabled and hidden elements are
    /// not focusable; the call is then a no-op, matching browser behavior.
    pub(crate) fn focus(&self, id: NodeId) -> bool {
        let mut doc = self.document.lock();
        let focusable = find_node(&doc.root, id)
            .map(|node| node.visible && !node.disabled)
            .unwrap_or(false);
        if focusable {
            doc.focused = Some(id);
        }
        focusable
    }

    /// Delivers a click to the node's handler.
    ///
    /// A disabled element swallows the event unless `force` is set; force
    /// bypasses the gate and leaves rejection to the handler itself.
    /// Returns whether a handler ran. The handler is invoked with no page
    /// locks held, so it is free to mutate the tree.
    pub(crate) fn dispatch_click(&self, id: NodeId, force: bool) -> bool {
        let handler_id = {
            let doc = self.document.lock();
            let Some(node) = find_node(&doc.root, id) else {
                return false;
            };
            if node.disabled && !force {
                tracing::debug!(tag = %node.tag, "click suppressed: element is disabled");
                return false;
            }
            node.handler
        };
        let handler = handler_id.and_then(|handler_id| self.handlers.lock().get(&handler_id).cloned());
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

/// Handle to a headless page.
///
/// Cloning is cheap and shares the underlying page. Elements are addressed
/// through [`locator`](Page::locator); mutation of a specific element goes
/// through an [`ElementRef`] obtained at wiring time.
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl Page {
    /// Builds a page from an element tree. Node ids are assigned in
    /// document order during ingestion.
    pub fn new(root: Element) -> Self {
        let mut next_id = 0;
        let root = root.into_node(&mut next_id);
        Self {
            inner: Arc::new(PageInner {
                document: Mutex::new(Document {
                    root,
                    focused: None,
                }),
                handlers: Mutex::new(HashMap::new()),
                next_handler: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a lazy locator for the selector.
    ///
    /// The selector is not parsed or resolved here; errors surface when an
    /// action or assertion first uses the locator.
    pub fn locator(&self, selector: &str) -> Locator {
        Locator::new(Arc::clone(&self.inner), selector.to_string())
    }

    /// Resolves the selector now (strict mode) and returns a direct handle
    /// to the matched element, for wiring state projections onto it.
    pub fn element_ref(&self, selector: &str) -> Result<ElementRef> {
        let selector = Selector::parse(selector)?;
        let id = self.inner.query(&selector, |node| node.id)?;
        Ok(ElementRef {
            page: Arc::downgrade(&self.inner),
            id,
        })
    }

    /// Registers a click handler on the element the selector resolves to
    /// (strict mode). A previously registered handler is replaced.
    pub fn on_click(
        &self,
        selector: &str,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Result<()> {
        let selector = Selector::parse(selector)?;
        let id = self.inner.query(&selector, |node| node.id)?;
        let handler_id = self.inner.next_handler.fetch_add(1, Ordering::Relaxed);
        self.inner.handlers.lock().insert(handler_id, Arc::new(handler));
        let previous = self
            .inner
            .with_node_mut(id, |node| node.handler.replace(handler_id))
            .flatten();
        if let Some(previous) = previous {
            self.inner.handlers.lock().remove(&previous);
        }
        Ok(())
    }

    /// Accessibility tree snapshot of the current page state, or None if
    /// the root element itself is not rendered.
    pub fn accessibility_snapshot(&self) -> Option<AxNode> {
        let doc = self.inner.document.lock();
        ax_snapshot(&doc.root)
    }

    /// The snapshot as pretty-printed JSON, for dumping and diffing.
    pub fn accessibility_snapshot_json(&self) -> Result<String> {
        let snapshot = self.accessibility_snapshot();
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.inner.document.lock();
        f.debug_struct("Page")
            .field("root", &doc.root.tag)
            .field("focused", &doc.focused)
            .finish()
    }
}

/// Direct handle to one element of a page, used by controllers to project
/// state (enabled/disabled, style classes) onto the control they own.
///
/// Holds a weak reference: once the page is gone, mutations become no-ops
/// and reads report the inert defaults.
#[derive(Clone)]
pub struct ElementRef {
    page: Weak<PageInner>,
    id: NodeId,
}

impl ElementRef {
    pub fn set_disabled(&self, disabled: bool) {
        if let Some(page) = self.page.upgrade() {
            page.with_node_mut(self.id, |node| node.disabled = disabled);
        }
    }

    pub fn add_class(&self, class: &str) {
        if let Some(page) = self.page.upgrade() {
            page.with_node_mut(self.id, |node| node.add_class(class));
        }
    }

    pub fn remove_class(&self, class: &str) {
        if let Some(page) = self.page.upgrade() {
            page.with_node_mut(self.id, |node| node.remove_class(class));
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.page
            .upgrade()
            .and_then(|page| page.with_node(self.id, |node| node.disabled))
            .unwrap_or(false)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.page
            .upgrade()
            .and_then(|page| page.with_node(self.id, |node| node.has_class(class)))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef").field("id", &self.id).finish()
    }
}
