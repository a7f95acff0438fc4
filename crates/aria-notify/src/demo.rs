// Demo page fixture - The add-to-cart demo wired for driving
//
// Builds the demo page the announcement suite runs against: an English
// document with a heading, an informational box, and the "Add to cart"
// button, with an AddToCartController registered as the button's click
// handler. The markup mirrors the demo page this harness verifies; only
// its observable structure is modeled.

use std::sync::Arc;
use std::time::Duration;

use crate::announce::{Announcer, TracingAnnouncer};
use crate::cart::{AddToCartController, DEFAULT_ADD_DELAY};
use crate::clock::{Clock, TokioClock};
use crate::dom::Element;
use crate::error::Result;
use crate::locator::Locator;
use crate::page::Page;

/// Title shown in the demo page's heading.
pub const DEMO_TITLE: &str = "ARIA Notify API Demo";

const BUTTON_SELECTOR: &str = "#add-to-cart";

/// The wired demo page: the page handle plus the controller driving its
/// button.
pub struct DemoPage {
    page: Page,
    controller: Arc<AddToCartController>,
}

impl DemoPage {
    /// Starts building a demo page. Defaults: tracing announcer, Tokio
    /// clock, 2000ms add delay.
    pub fn builder() -> DemoPageBuilder {
        DemoPageBuilder::default()
    }

    /// The underlying page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The controller wired to the add-to-cart button.
    pub fn controller(&self) -> &Arc<AddToCartController> {
        &self.controller
    }

    /// Locator for the add-to-cart button, addressed by its accessible
    /// text the way a user (or a screen reader) would find it.
    pub fn add_to_cart_button(&self) -> Locator {
        self.page.locator(r#"button:has-text("Add to cart")"#)
    }
}

impl std::fmt::Debug for DemoPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoPage")
            .field("controller", &self.controller)
            .finish()
    }
}

/// Builder for [`DemoPage`].
///
/// # Example
///
/// ```ignore
/// let announcer = RecordingAnnouncer::new();
/// let clock = TestClock::new();
/// let demo = DemoPage::builder()
///     .announcer(Arc::new(announcer.clone()))
///     .clock(Arc::new(clock.clone()))
///     .build()?;
///
/// demo.add_to_cart_button().click(None).await?;
/// clock.advance(Duration::from_millis(2000)).await;
/// assert_eq!(announcer.call_count(), 2);
/// ```
#[derive(Default)]
pub struct DemoPageBuilder {
    announcer: Option<Arc<dyn Announcer>>,
    clock: Option<Arc<dyn Clock>>,
    delay: Option<Duration>,
}

impl DemoPageBuilder {
    /// Substitutes the announcement sink.
    pub fn announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    /// Substitutes the clock the controller schedules on.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the simulated operation delay.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Builds the page and wires the controller to the button.
    pub fn build(self) -> Result<DemoPage> {
        let page = Page::new(demo_tree());
        let controller = AddToCartController::new(
            page.element_ref(BUTTON_SELECTOR)?,
            self.announcer
                .unwrap_or_else(|| Arc::new(TracingAnnouncer)),
            self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            self.delay.unwrap_or(DEFAULT_ADD_DELAY),
        );
        let handler = Arc::clone(&controller);
        page.on_click(BUTTON_SELECTOR, move || handler.activate())?;
        Ok(DemoPage { page, controller })
    }
}

fn demo_tree() -> Element {
    Element::new("html")
        .attr("lang", "en")
        .child(Element::new("head").child(Element::new("title").text(DEMO_TITLE)))
        .child(
            Element::new("body")
                .child(Element::new("h1").text(DEMO_TITLE))
                .child(
                    Element::new("div").class("info-box").child(
                        Element::new("p").text(
                            "Click the button below to add an item to your cart. \
                             Status updates are announced to screen readers while \
                             the request is processed.",
                        ),
                    ),
                )
                .child(
                    Element::new("button")
                        .id("add-to-cart")
                        .text("Add to cart"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_page_starts_idle() {
        let demo = DemoPage::builder().build().expect("demo page builds");
        let state = demo.controller().state();
        assert!(!state.busy);
        assert!(!state.disabled);
        assert!(!state.loading_style_active);
    }

    #[tokio::test]
    async fn button_is_reachable_by_text_and_by_id() {
        let demo = DemoPage::builder().build().expect("demo page builds");
        assert_eq!(demo.add_to_cart_button().count().await.unwrap(), 1);
        assert_eq!(demo.page().locator("#add-to-cart").count().await.unwrap(), 1);
    }
}
