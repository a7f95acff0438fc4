// Integration tests for keyboard activation
//
// Space and Enter on the focused button must behave exactly like a mouse
// click: same announcements, same state transitions, same gating while an
// operation is in flight. No behavior is specific to the input modality.

mod harness;

use std::time::Duration;

use aria_notify_rs::{
    ADDED_TO_CART_MESSAGE, ADDING_TO_CART_MESSAGE, Error, PressOptions, expect,
};
use harness::demo_page;

const ADD_DELAY: Duration = Duration::from_millis(2000);

#[tokio::test]
async fn space_key_activates_the_button() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    button.press("Space", None).await.expect("press Space");

    assert!(h.announcer.was_called_with(ADDING_TO_CART_MESSAGE));
    expect(button.clone())
        .to_be_disabled()
        .await
        .expect("disabled during processing");

    h.clock.advance(ADD_DELAY).await;

    assert!(h.announcer.was_called_with(ADDED_TO_CART_MESSAGE));
    expect(button)
        .to_be_enabled()
        .await
        .expect("re-enabled after processing");
}

#[tokio::test]
async fn enter_key_activates_the_button() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    button.press("Enter", None).await.expect("press Enter");

    assert_eq!(h.announcer.call_count(), 1);
    h.clock.advance(ADD_DELAY).await;
    assert_eq!(h.announcer.call_count(), 2);
}

#[tokio::test]
async fn bare_space_is_accepted_as_a_key_alias() {
    let h = demo_page();
    h.demo
        .add_to_cart_button()
        .press(" ", None)
        .await
        .expect("press space alias");
    assert_eq!(h.announcer.call_count(), 1);
}

#[tokio::test]
async fn pressing_a_key_focuses_the_button() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    button.press("Tab", None).await.expect("press non-activating key");

    expect(button).to_be_focused().await.expect("button focused");
    assert_eq!(h.announcer.call_count(), 0);
}

#[tokio::test]
async fn non_activation_keys_do_not_trigger_the_operation() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    for key in ["a", "Escape", "ArrowDown"] {
        button.press(key, None).await.expect("press inert key");
    }

    assert_eq!(h.announcer.call_count(), 0);
    expect(button).to_be_enabled().await.expect("still enabled");
}

#[tokio::test]
async fn keyboard_activation_is_gated_while_busy() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    button.click(None).await.expect("click");
    assert_eq!(h.announcer.call_count(), 1);

    // While disabled the button is not actionable for the keyboard either;
    // the press gives up instead of activating.
    let err = button
        .press("Space", Some(PressOptions::builder().timeout(100.0).build()))
        .await
        .expect_err("press while busy times out");
    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
    assert_eq!(h.announcer.call_count(), 1);

    // After completion the keyboard works again.
    h.clock.advance(ADD_DELAY).await;
    button.press("Space", None).await.expect("press after completion");
    assert_eq!(h.announcer.call_count(), 3);
}

#[tokio::test]
async fn keyboard_and_mouse_activations_are_interchangeable() {
    let h = demo_page();
    let button = h.demo.add_to_cart_button();

    button.click(None).await.expect("mouse activation");
    h.clock.advance(ADD_DELAY).await;
    button.press("Space", None).await.expect("keyboard activation");
    h.clock.advance(ADD_DELAY).await;

    assert_eq!(
        h.announcer.calls(),
        vec![
            ADDING_TO_CART_MESSAGE,
            ADDED_TO_CART_MESSAGE,
            ADDING_TO_CART_MESSAGE,
            ADDED_TO_CART_MESSAGE,
        ]
    );
}

#[tokio::test]
async fn empty_key_is_rejected() {
    let h = demo_page();
    let err = h
        .demo
        .add_to_cart_button()
        .press("", None)
        .await
        .expect_err("empty key");
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
}
