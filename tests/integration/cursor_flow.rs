// =====
// TESTS: 16
// =====
//
// Main-surface flows: confirm, navigate, jump, reset, restore, and
// convergence with the persisted store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use stepcopy::app::{self, Screen};

use crate::helpers::{run_local, test_app};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test]
async fn confirm_valid_input_copies_first_line_and_persists() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("  alpha  \n\nbeta\ngamma");
        app::confirm(&mut fx.app);

        assert_eq!(fx.app.screen, Screen::Stepping);
        assert_eq!(fx.clipboard.borrow().as_slice(), ["alpha"]);

        fx.app.writer.flush().await;
        assert_eq!(fx.prefs.raw_input().await, "  alpha  \n\nbeta\ngamma");
        assert_eq!(fx.prefs.saved_lines().await, ["alpha", "beta", "gamma"]);
        assert_eq!(fx.prefs.current_index().await, 0);
    })
    .await;
}

#[tokio::test]
async fn confirm_blank_input_is_ignored() {
    run_local(async {
        let mut fx = test_app();
        app::confirm(&mut fx.app);
        assert_eq!(fx.app.screen, Screen::Compose);
        assert!(fx.app.flash.is_none());
    })
    .await;
}

#[tokio::test]
async fn confirm_whitespace_only_input_keeps_composing() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("   \n\t  \n");
        app::confirm(&mut fx.app);

        assert_eq!(fx.app.screen, Screen::Compose);
        assert!(fx.clipboard.borrow().is_empty());
        fx.app.writer.flush().await;
        assert!(fx.prefs.saved_lines().await.is_empty(), "nothing persisted");

        // actual content confirms fine afterwards
        fx.app.input.insert_text("real line");
        app::confirm(&mut fx.app);
        assert_eq!(fx.app.screen, Screen::Stepping);
    })
    .await;
}

#[tokio::test]
async fn navigation_copies_and_persists_in_order() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);
        app::next_line(&mut fx.app);
        app::next_line(&mut fx.app);
        app::previous_line(&mut fx.app);

        assert_eq!(fx.clipboard.borrow().as_slice(), ["a", "b", "c", "b"]);
        assert_eq!(fx.app.cursor.index(), 1);

        fx.app.writer.flush().await;
        assert_eq!(fx.prefs.current_index().await, 1);
    })
    .await;
}

#[tokio::test]
async fn next_at_last_line_recopies_without_moving() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb");
        app::confirm(&mut fx.app);
        app::next_line(&mut fx.app);
        app::next_line(&mut fx.app);

        assert_eq!(fx.app.cursor.index(), 1);
        assert_eq!(fx.clipboard.borrow().as_slice(), ["a", "b", "b"]);
    })
    .await;
}

#[tokio::test]
async fn previous_at_first_line_recopies_without_moving() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb");
        app::confirm(&mut fx.app);
        app::previous_line(&mut fx.app);

        assert_eq!(fx.app.cursor.index(), 0);
        assert_eq!(fx.clipboard.borrow().as_slice(), ["a", "a"]);
    })
    .await;
}

#[tokio::test]
async fn copy_all_joins_lines() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);
        app::copy_all(&mut fx.app);

        assert_eq!(fx.clipboard.borrow().last().map(String::as_str), Some("a\nb\nc"));
        assert_eq!(fx.app.flash.as_ref().map(|f| f.text.as_str()), Some("copied all 3 lines"));
    })
    .await;
}

#[tokio::test]
async fn jump_dialog_copies_selected_line() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);

        app::handle_key(&mut fx.app, &key(KeyCode::Char('j')));
        assert!(fx.app.jump.is_some());
        app::handle_key(&mut fx.app, &key(KeyCode::Char('2')));
        app::handle_key(&mut fx.app, &key(KeyCode::Enter));

        assert!(fx.app.jump.is_none());
        assert_eq!(fx.app.cursor.index(), 1);
        assert_eq!(fx.clipboard.borrow().last().map(String::as_str), Some("b"));

        fx.app.writer.flush().await;
        assert_eq!(fx.prefs.current_index().await, 1);
    })
    .await;
}

#[tokio::test]
async fn jump_dialog_rejects_out_of_range() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);

        app::handle_key(&mut fx.app, &key(KeyCode::Char('j')));
        app::handle_key(&mut fx.app, &key(KeyCode::Char('9')));
        app::handle_key(&mut fx.app, &key(KeyCode::Enter));

        // dialog stays open, cursor untouched, rejection flashed
        assert!(fx.app.jump.is_some());
        assert_eq!(fx.app.cursor.index(), 0);
        assert_eq!(fx.app.flash.as_ref().map(|f| f.text.as_str()), Some("invalid line number"));
        assert_eq!(fx.clipboard.borrow().len(), 1, "only the confirm copy happened");
    })
    .await;
}

#[tokio::test]
async fn reset_clears_snapshot_and_disables_floating() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb");
        app::confirm(&mut fx.app);
        app::toggle_floating(&mut fx.app);
        app::reset(&mut fx.app);

        assert_eq!(fx.app.screen, Screen::Compose);
        assert!(fx.app.cursor.is_empty());
        assert!(fx.app.input.is_blank());
        assert!(!fx.app.floating_enabled);

        fx.app.writer.flush().await;
        assert_eq!(fx.prefs.raw_input().await, "");
        assert!(fx.prefs.saved_lines().await.is_empty());
        assert!(!fx.prefs.floating_enabled().await);
    })
    .await;
}

#[tokio::test]
async fn restore_resumes_previous_session() {
    run_local(async {
        let mut fx = test_app();
        crate::helpers::seed_lines(&fx.prefs, &["a", "b", "c"], 2, false).await;
        fx.app.restore().await;

        assert_eq!(fx.app.screen, Screen::Stepping);
        assert_eq!(fx.app.cursor.lines(), ["a", "b", "c"]);
        assert_eq!(fx.app.cursor.index(), 2);
    })
    .await;
}

#[tokio::test]
async fn restore_with_empty_store_stays_on_compose() {
    run_local(async {
        let mut fx = test_app();
        fx.app.restore().await;
        assert_eq!(fx.app.screen, Screen::Compose);
        assert!(fx.app.cursor.is_empty());
    })
    .await;
}

#[tokio::test]
async fn sync_adopts_overlay_navigation() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);
        fx.app.writer.flush().await;

        // the overlay process advanced the shared index
        fx.prefs.save_index(2).await.unwrap();
        fx.app.sync_from_store().await;
        assert_eq!(fx.app.cursor.index(), 2);
    })
    .await;
}

#[tokio::test]
async fn sync_never_rolls_back_pending_local_writes() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);
        app::next_line(&mut fx.app);

        // the index write may still be queued; a sync must not read the
        // stale store value and move the cursor back
        fx.app.sync_from_store().await;
        assert_eq!(fx.app.cursor.index(), 1);
    })
    .await;
}

#[tokio::test]
async fn toggle_floating_persists_flag() {
    run_local(async {
        let mut fx = test_app();
        fx.app.input.insert_text("a");
        app::confirm(&mut fx.app);
        app::toggle_floating(&mut fx.app);
        assert!(fx.app.floating_enabled);

        fx.app.writer.flush().await;
        assert!(fx.prefs.floating_enabled().await);

        app::toggle_floating(&mut fx.app);
        fx.app.writer.flush().await;
        assert!(!fx.prefs.floating_enabled().await);
    })
    .await;
}

#[tokio::test]
async fn confirm_adopts_saved_index_from_previous_run() {
    run_local(async {
        let mut fx = test_app();
        fx.app.saved_index_at_start = Some(2);
        fx.app.input.insert_text("a\nb\nc");
        app::confirm(&mut fx.app);

        assert_eq!(fx.app.cursor.index(), 2);
        assert_eq!(fx.clipboard.borrow().as_slice(), ["c"]);
    })
    .await;
}
