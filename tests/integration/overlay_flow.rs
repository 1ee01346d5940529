// =====
// TESTS: 17
// =====
//
// Floating session flows: tap/drag/long-press intents, popup actions,
// teardown, host failures, and store convergence.

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use stepcopy::overlay::{FloatLabel, PointerEvent, PopupAction, PopupPhase, ViewId};

use crate::helpers::{run_local, seed_lines, test_service, HostCall};

const LONG_PRESS: Duration = Duration::from_millis(500);

async fn tap(service: &mut crate::helpers::TestService, x: f32, y: f32, at: Instant) {
    service.handle_pointer(PointerEvent::Down { x, y }, at).await;
    service
        .handle_pointer(PointerEvent::Up { x, y }, at + Duration::from_millis(80))
        .await;
}

#[tokio::test]
async fn tap_copies_current_line_then_advances() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b", "c"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;
        assert_eq!(fx.service.label(), FloatLabel::Number(1));

        tap(&mut fx.service, 110.0, 310.0, t0).await;

        assert_eq!(fx.clipboard.borrow().as_slice(), ["a"]);
        assert_eq!(fx.service.label(), FloatLabel::Number(2));
        fx.service.poll().await; // flushes the queued index write
        assert_eq!(fx.prefs.current_index().await, 1);
    })
    .await;
}

#[tokio::test]
async fn tap_at_last_line_latches_done() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b", "c"], 2, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        tap(&mut fx.service, 110.0, 310.0, t0).await;

        assert_eq!(fx.clipboard.borrow().as_slice(), ["c"]);
        assert_eq!(fx.service.label(), FloatLabel::Done);
        // index stays clamped at the last line
        assert_eq!(fx.prefs.current_index().await, 2);

        // the latch survives polls that observe the same state...
        fx.service.poll().await;
        assert_eq!(fx.service.label(), FloatLabel::Done);

        // ...and clears when the main screen moves the cursor
        fx.prefs.save_index(0).await.unwrap();
        fx.service.poll().await;
        assert_eq!(fx.service.label(), FloatLabel::Number(1));
    })
    .await;
}

#[tokio::test]
async fn tap_with_no_lines_shows_empty() {
    run_local(async {
        let mut fx = test_service();
        fx.prefs.save_floating_enabled(true).await.unwrap();
        let t0 = Instant::now();
        fx.service.start().await;

        tap(&mut fx.service, 110.0, 310.0, t0).await;

        assert!(fx.clipboard.borrow().is_empty());
        assert_eq!(fx.service.label(), FloatLabel::Empty);
        assert_eq!(fx.service.notice(), Some("no lines loaded"));
    })
    .await;
}

#[tokio::test]
async fn long_press_opens_popup_and_pulses_haptic() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        assert_eq!(fx.service.long_press_deadline(), Some(t0 + LONG_PRESS));
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;

        assert_eq!(fx.service.popup_phase(), PopupPhase::Opening);
        assert_eq!(*fx.haptic_pulses.borrow(), 1);
        // popup attaches below the anchor: (100, 300 + 48 + 10)
        let frame = fx.service.popup_frame().unwrap();
        assert_eq!((frame.x, frame.y), (100, 358));

        fx.service.tick(t0 + LONG_PRESS + Duration::from_millis(300));
        assert_eq!(fx.service.popup_phase(), PopupPhase::Open);
    })
    .await;
}

#[tokio::test]
async fn up_after_long_press_does_not_tap() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;
        fx.service
            .handle_pointer(PointerEvent::Up { x: 110.0, y: 310.0 }, t0 + LONG_PRESS)
            .await;

        assert!(fx.clipboard.borrow().is_empty(), "no copy without a tap");
        assert_eq!(fx.prefs.current_index().await, 0);
    })
    .await;
}

#[tokio::test]
async fn long_press_while_open_closes_popup() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;
        fx.service.handle_pointer(PointerEvent::Up { x: 110.0, y: 310.0 }, t0 + LONG_PRESS).await;
        fx.service.tick(t0 + LONG_PRESS + Duration::from_millis(300));
        assert_eq!(fx.service.popup_phase(), PopupPhase::Open);

        let t1 = t0 + Duration::from_secs(2);
        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t1).await;
        fx.service.handle_long_press_due(t1 + LONG_PRESS).await;
        assert_eq!(fx.service.popup_phase(), PopupPhase::Closing);

        fx.service.tick(t1 + LONG_PRESS + Duration::from_millis(200));
        assert_eq!(fx.service.popup_phase(), PopupPhase::Closed);
        assert!(fx.host.borrow().calls.contains(&HostCall::Detach(ViewId::Popup)));
    })
    .await;
}

#[tokio::test]
async fn drag_moves_anchor_and_tracks_popup() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        // open the popup first
        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;
        fx.service.handle_pointer(PointerEvent::Up { x: 110.0, y: 310.0 }, t0 + LONG_PRESS).await;

        // drag the anchor 30 right, 20 up
        let t1 = t0 + Duration::from_secs(1);
        fx.service.handle_pointer(PointerEvent::Down { x: 120.0, y: 320.0 }, t1).await;
        fx.service
            .handle_pointer(PointerEvent::Move { x: 150.0, y: 300.0 }, t1)
            .await;

        let anchor = fx.service.anchor_frame();
        assert_eq!((anchor.x, anchor.y), (130, 280));

        let popup = fx.service.popup_frame().unwrap();
        assert_eq!((popup.x, popup.y), (130, 280 + 48 + 10));

        // long-press can no longer fire for this session
        assert_eq!(fx.service.long_press_deadline(), None);

        // drag end is silent: no copy, no extra index write
        fx.service.handle_pointer(PointerEvent::Up { x: 150.0, y: 300.0 }, t1).await;
        assert!(fx.clipboard.borrow().is_empty());
    })
    .await;
}

#[tokio::test]
async fn popup_previous_retreats_and_copies() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b", "c"], 2, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_popup_action(PopupAction::Previous, t0).await;

        assert_eq!(fx.clipboard.borrow().as_slice(), ["b"]);
        assert_eq!(fx.service.label(), FloatLabel::Number(2));
        assert_eq!(fx.service.notice(), Some("copied line 2"));
        fx.service.poll().await;
        assert_eq!(fx.prefs.current_index().await, 1);
    })
    .await;
}

#[tokio::test]
async fn popup_previous_rejected_at_start() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_popup_action(PopupAction::Previous, t0).await;

        assert!(fx.clipboard.borrow().is_empty());
        assert_eq!(fx.service.notice(), Some("at the start of the list"));
        assert_eq!(fx.prefs.current_index().await, 0);
    })
    .await;
}

#[tokio::test]
async fn popup_hide_closes_menu() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;
        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;

        fx.service.handle_popup_action(PopupAction::HideMenu, t0 + LONG_PRESS).await;
        assert_eq!(fx.service.popup_phase(), PopupPhase::Closing);
        assert!(!fx.service.stop_requested());
    })
    .await;
}

#[tokio::test]
async fn disable_action_requests_stop() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_popup_action(PopupAction::DisableFloating, t0).await;
        assert!(fx.service.stop_requested());
    })
    .await;
}

#[tokio::test]
async fn stop_detaches_views_and_persists_disabled_flag() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;
        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;

        fx.service.stop().await;

        let log = fx.host.borrow();
        assert!(log.calls.contains(&HostCall::Detach(ViewId::Popup)));
        assert!(log.calls.contains(&HostCall::Detach(ViewId::Anchor)));
        drop(log);
        assert!(!fx.prefs.floating_enabled().await);
    })
    .await;
}

#[tokio::test]
async fn poll_adopts_foreign_index() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b", "c"], 0, true).await;
        fx.service.start().await;
        assert_eq!(fx.service.label(), FloatLabel::Number(1));

        // the main screen jumped to line 3; the overlay eventually observes it
        fx.prefs.save_index(2).await.unwrap();
        fx.service.poll().await;
        assert_eq!(fx.service.label(), FloatLabel::Number(3));
    })
    .await;
}

#[tokio::test]
async fn poll_detects_disabled_flag() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        fx.service.start().await;
        assert!(!fx.service.stop_requested());

        fx.prefs.save_floating_enabled(false).await.unwrap();
        fx.service.poll().await;
        assert!(fx.service.stop_requested());
    })
    .await;
}

#[tokio::test]
async fn poll_right_after_tap_does_not_regress_label() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b", "c"], 0, true).await;
        let t0 = Instant::now();
        fx.service.start().await;

        tap(&mut fx.service, 110.0, 310.0, t0).await;
        assert_eq!(fx.service.label(), FloatLabel::Number(2));

        // the index write may still be queued; the poll must not read the
        // pre-tap value and show line 1 again
        fx.service.poll().await;
        assert_eq!(fx.service.label(), FloatLabel::Number(2));
    })
    .await;
}

#[tokio::test]
async fn broken_host_leaves_popup_closed() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a"], 0, true).await;
        fx.host.borrow_mut().broken = true;
        let t0 = Instant::now();
        fx.service.start().await;

        fx.service.handle_pointer(PointerEvent::Down { x: 110.0, y: 310.0 }, t0).await;
        fx.service.handle_long_press_due(t0 + LONG_PRESS).await;

        assert_eq!(fx.service.popup_phase(), PopupPhase::Closed);
        assert_eq!(fx.service.popup_frame(), None);
    })
    .await;
}

#[tokio::test]
async fn anchor_attach_failure_is_nonfatal() {
    run_local(async {
        let mut fx = test_service();
        seed_lines(&fx.prefs, &["a", "b"], 0, true).await;
        fx.host.borrow_mut().broken = true;
        let t0 = Instant::now();
        fx.service.start().await;

        // taps still copy even though nothing is drawn
        tap(&mut fx.service, 110.0, 310.0, t0).await;
        assert_eq!(fx.clipboard.borrow().as_slice(), ["a"]);

        // teardown does not panic against the broken surface
        fx.service.stop().await;
        assert!(!fx.prefs.floating_enabled().await);
    })
    .await;
}
