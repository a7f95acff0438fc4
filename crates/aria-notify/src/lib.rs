//! aria-notify-rs: Headless harness for verifying accessibility announcements
//!
//! This crate models the notify-on-add demo control and the machinery needed
//! to verify its accessibility contract without a browser: a small headless
//! page, lazy strict-mode locators with actionability waiting, an `expect()`
//! assertion API with auto-retry, and the add-to-cart controller itself with
//! its clock and announcement sink injected at construction time.
//!
//! # Examples
//!
//! ## Driving the demo control deterministically
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use aria_notify_rs::{DemoPage, RecordingAnnouncer, TestClock, expect};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let announcer = RecordingAnnouncer::new();
//!     let clock = TestClock::new();
//!     let demo = DemoPage::builder()
//!         .announcer(Arc::new(announcer.clone()))
//!         .clock(Arc::new(clock.clone()))
//!         .build()?;
//!
//!     let button = demo.add_to_cart_button();
//!     button.click(None).await?;
//!
//!     // The start announcement is synchronous; the control locks up
//!     // for the duration of the simulated operation.
//!     assert!(announcer.was_called_with("Adding item to cart..."));
//!     expect(button.clone()).to_be_disabled().await?;
//!     expect(button.clone()).to_have_class("loading").await?;
//!
//!     // Fast-forward through the operation without real waiting.
//!     clock.advance(Duration::from_millis(2000)).await;
//!     assert!(announcer.was_called_with("Added item to cart"));
//!     expect(button).to_be_enabled().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Building a custom page
//!
//! ```ignore
//! use aria_notify_rs::{Element, Page, expect};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let page = Page::new(
//!     Element::new("html").attr("lang", "en").child(
//!         Element::new("body")
//!             .child(Element::new("h1").text("Welcome"))
//!             .child(Element::new("button").id("go").text("Go")),
//!     ),
//! );
//!
//! expect(page.locator("h1")).to_have_text("Welcome").await?;
//! expect(page.locator("html")).to_have_attribute("lang", "en").await?;
//! # Ok(())
//! # }
//! ```

mod announce;
mod assertions;
mod cart;
mod clock;
mod demo;
mod dom;
mod error;
mod locator;
mod options;
mod page;

/// Default timeout in milliseconds for actionability waits.
///
/// Actions on a control that stays disabled give up after this long unless
/// an explicit timeout (or `force`) is passed.
pub const DEFAULT_TIMEOUT_MS: f64 = 5000.0;

// Re-export error types
pub use error::{Error, Result};

// Re-export assertions API
pub use assertions::{Expectation, expect};

// Re-export page, element, and locator APIs
pub use dom::{AxNode, Element, NodeId};
pub use locator::Locator;
pub use page::{ElementRef, Page};

// Re-export action options
pub use options::{ClickOptions, ClickOptionsBuilder, PressOptions, PressOptionsBuilder};

// Re-export the announcement sinks
pub use announce::{Announcer, NullAnnouncer, RecordingAnnouncer, TracingAnnouncer};

// Re-export clock control
pub use clock::{Clock, TestClock, TimerFuture, TokioClock};

// Re-export the controller and demo fixture
pub use cart::{
    ADDED_TO_CART_MESSAGE, ADDING_TO_CART_MESSAGE, AddToCartController, ButtonState,
    DEFAULT_ADD_DELAY, LOADING_CLASS,
};
pub use demo::{DEMO_TITLE, DemoPage, DemoPageBuilder};
