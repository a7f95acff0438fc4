// Add-to-cart controller - The notify-on-add interaction state machine
//
// Owns a single busy flag and projects it onto the control it manages:
// while an add operation is in flight the button is disabled and carries
// the loading class, and assistive technology is told about both edges of
// the operation. Activation while busy is silently dropped; there is no
// queuing of rejected activations.
//
// State machine:
//   IDLE --activate()--> BUSY      (announce "Adding item to cart...")
//   BUSY --delay elapses--> IDLE   (announce "Added item to cart")
//   BUSY --activate()--> BUSY      (no-op)

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::announce::Announcer;
use crate::clock::Clock;
use crate::page::ElementRef;

/// Announcement emitted synchronously when an add operation starts.
pub const ADDING_TO_CART_MESSAGE: &str = "Adding item to cart...";

/// Announcement emitted when an add operation completes.
pub const ADDED_TO_CART_MESSAGE: &str = "Added item to cart";

/// Style class applied to the control while an operation is in flight.
pub const LOADING_CLASS: &str = "loading";

/// Delay between the start and completion of the simulated add operation.
pub const DEFAULT_ADD_DELAY: Duration = Duration::from_millis(2000);

/// Observable state of the control, as a consistent snapshot.
///
/// `disabled` and `loading_style_active` mirror `busy` at all times; the
/// three never disagree between event-loop turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// True while a simulated add-to-cart operation is in flight.
    pub busy: bool,
    /// True while user interaction is blocked.
    pub disabled: bool,
    /// True while the loading style class is applied.
    pub loading_style_active: bool,
}

impl ButtonState {
    /// The idle state a freshly loaded control starts in.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Controller for the notify-on-add button.
///
/// Constructed with the element it projects state onto, the announcement
/// sink, and the clock that schedules the completion callback. All three
/// are injected so tests can substitute a recording sink and a manual
/// clock without touching the controller.
pub struct AddToCartController {
    busy: Mutex<bool>,
    button: ElementRef,
    announcer: Arc<dyn Announcer>,
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl AddToCartController {
    /// Creates an idle controller driving `button`.
    pub fn new(
        button: ElementRef,
        announcer: Arc<dyn Announcer>,
        clock: Arc<dyn Clock>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            busy: Mutex::new(false),
            button,
            announcer,
            clock,
            delay,
        })
    }

    /// Handles a user activation (click or keyboard).
    ///
    /// While busy the activation has no effect at all: no announcement, no
    /// state change, nothing queued. The busy check and the flip to busy
    /// happen under one lock acquisition, so two activations in the same
    /// turn cannot both pass the gate.
    pub fn activate(self: &Arc<Self>) {
        {
            let mut busy = self.busy.lock();
            if *busy {
                tracing::debug!("activation ignored: operation already in flight");
                return;
            }
            *busy = true;
        }
        self.button.set_disabled(true);
        self.button.add_class(LOADING_CLASS);
        self.announcer.announce(ADDING_TO_CART_MESSAGE);
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "add-to-cart started");

        // Fix the completion deadline now, inside the activation turn; the
        // spawned task only awaits it. Dropping the timer would cancel it,
        // but nothing here does: a scheduled completion always fires.
        let timer = self.clock.start_timer(self.delay);
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            timer.await;
            controller.complete();
        });
    }

    /// Completion callback: fires once, `delay` after a valid activation.
    fn complete(&self) {
        *self.busy.lock() = false;
        self.button.set_disabled(false);
        self.button.remove_class(LOADING_CLASS);
        self.announcer.announce(ADDED_TO_CART_MESSAGE);
        tracing::debug!("add-to-cart completed");
    }

    /// Consistent snapshot of the control's observable state.
    pub fn state(&self) -> ButtonState {
        let busy = *self.busy.lock();
        ButtonState {
            busy,
            disabled: self.button.is_disabled(),
            loading_style_active: self.button.has_class(LOADING_CLASS),
        }
    }
}

impl std::fmt::Debug for AddToCartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddToCartController")
            .field("busy", &*self.busy.lock())
            .field("delay", &self.delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::{NullAnnouncer, RecordingAnnouncer};
    use crate::clock::{TestClock, TokioClock};
    use crate::dom::Element;
    use crate::page::Page;

    struct Fixture {
        controller: Arc<AddToCartController>,
        announcer: RecordingAnnouncer,
        clock: TestClock,
        // The page must outlive the controller's weak element handle.
        _page: Page,
    }

    fn fixture() -> Fixture {
        let page = Page::new(Element::new("button").id("add").text("Add to cart"));
        let announcer = RecordingAnnouncer::new();
        let clock = TestClock::new();
        let controller = AddToCartController::new(
            page.element_ref("#add").expect("button exists"),
            Arc::new(announcer.clone()),
            Arc::new(clock.clone()),
            DEFAULT_ADD_DELAY,
        );
        Fixture {
            controller,
            announcer,
            clock,
            _page: page,
        }
    }

    #[tokio::test]
    async fn fresh_controller_is_idle_and_silent() {
        let fixture = fixture();
        assert_eq!(fixture.controller.state(), ButtonState::idle());
        assert_eq!(fixture.announcer.call_count(), 0);
    }

    #[tokio::test]
    async fn activation_announces_start_then_completion_in_order() {
        let fixture = fixture();
        fixture.controller.activate();

        assert_eq!(
            fixture.announcer.calls(),
            vec![ADDING_TO_CART_MESSAGE.to_string()]
        );
        fixture.clock.advance(DEFAULT_ADD_DELAY).await;
        assert_eq!(
            fixture.announcer.calls(),
            vec![
                ADDING_TO_CART_MESSAGE.to_string(),
                ADDED_TO_CART_MESSAGE.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn busy_state_mirrors_into_disabled_and_loading() {
        let fixture = fixture();
        fixture.controller.activate();

        let state = fixture.controller.state();
        assert!(state.busy);
        assert!(state.disabled);
        assert!(state.loading_style_active);
    }

    #[tokio::test]
    async fn activation_while_busy_is_silently_dropped() {
        let fixture = fixture();
        fixture.controller.activate();
        let before = fixture.controller.state();

        fixture.controller.activate();
        fixture.controller.activate();

        assert_eq!(fixture.announcer.call_count(), 1);
        assert_eq!(fixture.controller.state(), before);

        // A dropped activation is not deferred either: after completion
        // only the one operation's announcements exist.
        fixture.clock.advance(DEFAULT_ADD_DELAY).await;
        assert_eq!(fixture.announcer.call_count(), 2);
    }

    #[tokio::test]
    async fn completion_restores_the_exact_idle_state() {
        let fixture = fixture();
        fixture.controller.activate();
        fixture.clock.advance(DEFAULT_ADD_DELAY).await;

        assert_eq!(fixture.controller.state(), ButtonState::idle());
    }

    #[tokio::test]
    async fn completion_fires_at_exactly_the_configured_delay() {
        let fixture = fixture();
        fixture.controller.activate();

        // Not early: one unit short of the deadline, nothing has fired.
        fixture.clock.advance(Duration::from_millis(1999)).await;
        assert_eq!(fixture.announcer.call_count(), 1);
        assert!(fixture.controller.state().busy);

        // Not late: the completion lands on the deadline edge itself.
        fixture.clock.advance(Duration::from_millis(1)).await;
        assert_eq!(fixture.announcer.call_count(), 2);
        assert!(!fixture.controller.state().busy);
    }

    #[tokio::test]
    async fn sequential_activations_alternate_start_and_completion() {
        let fixture = fixture();
        let rounds = 3;
        for _ in 0..rounds {
            fixture.controller.activate();
            fixture.clock.advance(DEFAULT_ADD_DELAY).await;
        }

        let calls = fixture.announcer.calls();
        assert_eq!(calls.len(), rounds * 2);
        for pair in calls.chunks(2) {
            assert_eq!(pair, [ADDING_TO_CART_MESSAGE, ADDED_TO_CART_MESSAGE]);
        }
    }

    #[tokio::test]
    async fn state_machine_runs_unaffected_without_an_announcement_channel() {
        let page = Page::new(Element::new("button").id("add").text("Add to cart"));
        let clock = TestClock::new();
        let controller = AddToCartController::new(
            page.element_ref("#add").expect("button exists"),
            Arc::new(NullAnnouncer),
            Arc::new(clock.clone()),
            DEFAULT_ADD_DELAY,
        );

        controller.activate();
        assert!(controller.state().busy);
        clock.advance(DEFAULT_ADD_DELAY).await;
        assert_eq!(controller.state(), ButtonState::idle());
    }

    #[tokio::test(start_paused = true)]
    async fn production_clock_wiring_completes_under_virtual_time() {
        let page = Page::new(Element::new("button").id("add").text("Add to cart"));
        let announcer = RecordingAnnouncer::new();
        let controller = AddToCartController::new(
            page.element_ref("#add").expect("button exists"),
            Arc::new(announcer.clone()),
            Arc::new(TokioClock),
            DEFAULT_ADD_DELAY,
        );

        controller.activate();
        assert!(controller.state().disabled);

        // Paused tokio time auto-advances past the controller's timer.
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(
            announcer.calls(),
            vec![
                ADDING_TO_CART_MESSAGE.to_string(),
                ADDED_TO_CART_MESSAGE.to_string()
            ]
        );
        assert_eq!(controller.state(), ButtonState::idle());
    }
}
