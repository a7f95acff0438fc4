// Locator - Lazy element selector with actionability waiting
//
// Locators are lightweight handles: a selector string plus a reference to
// the page. Nothing resolves until an action or read is performed, and
// every resolution runs in strict mode (exactly one match). Actions wait
// for the element to become actionable (visible and enabled) before
// dispatching, so a control that re-enables after an operation can be
// clicked again without explicit synchronization in the test.

use std::sync::Arc;
use std::time::Duration;

use crate::dom::Selector;
use crate::error::{Error, Result};
use crate::options::{ClickOptions, PressOptions};
use crate::page::PageInner;

/// Interval between actionability re-checks.
const ACTIONABILITY_POLL: Duration = Duration::from_millis(25);

/// Keys that activate a button, per the WAI-ARIA button interaction
/// pattern. A bare space is accepted as an alias for "Space".
fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | "Space" | " ")
}

/// Locator represents a way to find one element on the page at any given
/// moment.
///
/// # Examples
///
/// ```ignore
/// let button = page.locator(r#"button:has-text("Add to cart")"#);
/// button.click(None).await?;
/// assert!(button.get_attribute("disabled").await?.is_some());
/// ```
#[derive(Clone)]
pub struct Locator {
    page: Arc<PageInner>,
    selector: String,
}

impl Locator {
    /// Creates a new Locator (internal use only)
    ///
    /// Use `page.locator()` to create locators in application code.
    pub(crate) fn new(page: Arc<PageInner>, selector: String) -> Self {
        Self { page, selector }
    }

    /// Returns the selector string for this locator
    pub fn selector(&self) -> &str {
        &self.selector
    }

    fn parsed(&self) -> Result<Selector> {
        Selector::parse(&self.selector)
    }

    /// Returns the number of elements matching this locator.
    pub async fn count(&self) -> Result<usize> {
        let selector = self.parsed()?;
        Ok(self.page.count_matches(&selector))
    }

    /// Returns the text content of the element's subtree, or None when it
    /// has no text at all.
    pub async fn text_content(&self) -> Result<Option<String>> {
        let selector = self.parsed()?;
        self.page.query(&selector, |node| {
            let text = node.subtree_text();
            (!text.is_empty()).then_some(text)
        })
    }

    /// Returns the inner text of the element.
    pub async fn inner_text(&self) -> Result<String> {
        let selector = self.parsed()?;
        self.page.query(&selector, |node| node.subtree_text())
    }

    /// Returns the value of the specified attribute.
    ///
    /// `id`, `class`, and the boolean `disabled` attribute are synthesized
    /// from element state the way the DOM exposes them.
    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        let selector = self.parsed()?;
        self.page.query(&selector, |node| node.attribute(name))
    }

    /// Returns whether the element is visible.
    pub async fn is_visible(&self) -> Result<bool> {
        let selector = self.parsed()?;
        self.page.query(&selector, |node| node.visible)
    }

    /// Returns whether the element is enabled.
    pub async fn is_enabled(&self) -> Result<bool> {
        let selector = self.parsed()?;
        self.page.query(&selector, |node| !node.disabled)
    }

    /// Returns whether the element currently has keyboard focus.
    pub async fn is_focused(&self) -> Result<bool> {
        let selector = self.parsed()?;
        self.page.is_focused(&selector)
    }

    // Action methods

    /// Clicks the element.
    ///
    /// Waits for the element to be actionable unless `force` is set. A
    /// forced click on a disabled element is delivered to its handler;
    /// rejection is then the handler's business, which is exactly the
    /// contract double-activation tests need to probe.
    pub async fn click(&self, options: Option<ClickOptions>) -> Result<()> {
        let options = options.unwrap_or_default();
        let target = self.wait_actionable(options.force, options.timeout, "click").await?;
        if options.trial.unwrap_or(false) {
            return Ok(());
        }
        tracing::debug!(selector = %self.selector, "click");
        self.page
            .dispatch_click(target.id, options.force.unwrap_or(false));
        Ok(())
    }

    /// Double clicks the element.
    ///
    /// The second click of the pair is subject to the same disabled gate as
    /// any click: if the first click disables the control, the second is
    /// swallowed.
    pub async fn dblclick(&self, options: Option<ClickOptions>) -> Result<()> {
        let options = options.unwrap_or_default();
        let target = self
            .wait_actionable(options.force, options.timeout, "dblclick")
            .await?;
        if options.trial.unwrap_or(false) {
            return Ok(());
        }
        let force = options.force.unwrap_or(false);
        tracing::debug!(selector = %self.selector, "dblclick");
        self.page.dispatch_click(target.id, force);
        self.page.dispatch_click(target.id, force);
        Ok(())
    }

    /// Focuses the element, then presses a key on it.
    ///
    /// `Enter` and `Space` activate a button exactly like a click; other
    /// keys are delivered but have no default action here.
    pub async fn press(&self, key: &str, options: Option<PressOptions>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidArgument(
                "press: key must not be empty".to_string(),
            ));
        }
        let options = options.unwrap_or_default();
        let target = self.wait_actionable(None, options.timeout, "press").await?;
        self.page.focus(target.id);
        if is_activation_key(key) && target.is_button {
            tracing::debug!(selector = %self.selector, key, "keyboard activation");
            self.page.dispatch_click(target.id, false);
        } else {
            tracing::debug!(selector = %self.selector, key, "key press without default action");
        }
        Ok(())
    }

    /// Moves keyboard focus to the element. No-op on a disabled element,
    /// which is not focusable.
    pub async fn focus(&self) -> Result<()> {
        let selector = self.parsed()?;
        let id = self.page.query(&selector, |node| node.id)?;
        self.page.focus(id);
        Ok(())
    }

    /// Waits until the element is visible and enabled (or until `force`
    /// short-circuits the checks), polling the page at a fixed interval.
    async fn wait_actionable(
        &self,
        force: Option<bool>,
        timeout_ms: Option<f64>,
        action: &str,
    ) -> Result<Target> {
        let selector = self.parsed()?;
        let force = force.unwrap_or(false);
        let timeout = Duration::from_millis(timeout_ms.unwrap_or(crate::DEFAULT_TIMEOUT_MS) as u64);
        let start = std::time::Instant::now();
        loop {
            let (target, actionable) = self.page.query(&selector, |node| {
                (
                    Target {
                        id: node.id,
                        is_button: node.tag == "button",
                    },
                    node.visible && !node.disabled,
                )
            })?;
            if force || actionable {
                return Ok(target);
            }
            if start.elapsed() >= timeout {
                return Err(Error::Timeout(format!(
                    "{}: element '{}' was not actionable after {:?}",
                    action,
                    selector.raw(),
                    timeout
                )));
            }
            tokio::time::sleep(ACTIONABILITY_POLL).await;
        }
    }
}

#[derive(Clone, Copy)]
struct Target {
    id: crate::dom::NodeId,
    is_button: bool,
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("selector", &self.selector)
            .finish()
    }
}
