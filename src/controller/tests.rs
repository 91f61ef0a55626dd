use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::download::{download_path, free_download_path};
use super::*;
use crate::audio::fake::FakeFactory;
use crate::error::StoreError;
use crate::model::{CatalogEntry, PlayerStatus};
use crate::storage::memory::MemoryStore;

const KEYS: &[&str] = &[
    "albums/a.mp3",
    "albums/b.mp3",
    "albums/rock/x.mp3",
    "intro.mp3",
    "notes.txt",
];

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.storage.bucket = "music".to_string();
    settings
}

fn controller_with(store: MemoryStore) -> AppController<MemoryStore, FakeFactory> {
    let settings = settings();
    let resolver = CatalogResolver::new(store, &settings.catalog);
    let factory = FakeFactory {
        duration: 120.0,
        ..FakeFactory::default()
    };
    AppController::new(resolver, factory, reqwest::Client::new(), &settings)
}

fn controller() -> AppController<MemoryStore, FakeFactory> {
    controller_with(MemoryStore::with_keys(KEYS.iter().copied()))
}

/// Let spawned listing tasks run, then fold their results into the model.
async fn settle(app: &mut AppController<MemoryStore, FakeFactory>) {
    for _ in 0..10 {
        tokio::task::yield_now().await;
        app.process_background();
    }
}

fn press(app: &mut AppController<MemoryStore, FakeFactory>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn keys(app: &AppController<MemoryStore, FakeFactory>) -> Vec<String> {
    app.model().entries().iter().map(|e| e.key.clone()).collect()
}

fn select_key(app: &mut AppController<MemoryStore, FakeFactory>, key: &str) {
    app.model_mut().select_first();
    while app.model().selected_entry().is_some_and(|e| e.key != key) {
        let before = app.model().ui_state.selected;
        app.model_mut().move_selection_down();
        assert_ne!(before, app.model().ui_state.selected, "{key} not listed");
    }
}

#[tokio::test]
async fn opening_root_lists_folders_then_audio_files() {
    let mut app = controller();
    app.open_prefix("");
    assert!(app.model().ui_state.is_loading);

    settle(&mut app).await;

    assert!(!app.model().ui_state.is_loading);
    assert_eq!(app.model().prefix(), "");
    assert_eq!(keys(&app), vec!["albums/", "intro.mp3"]);
}

#[tokio::test]
async fn enter_on_folder_navigates_into_it() {
    let mut app = controller();
    app.open_prefix("");
    settle(&mut app).await;

    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;

    assert_eq!(app.model().prefix(), "albums/");
    assert_eq!(keys(&app), vec!["albums/rock/", "albums/a.mp3", "albums/b.mp3"]);
    assert_eq!(app.player.state().status, PlayerStatus::Idle);
}

#[tokio::test]
async fn go_back_returns_to_parent_and_is_noop_at_root() {
    let mut app = controller();
    app.open_prefix("albums/rock/");
    settle(&mut app).await;
    assert_eq!(keys(&app), vec!["albums/rock/x.mp3"]);

    press(&mut app, KeyCode::Backspace);
    settle(&mut app).await;
    assert_eq!(app.model().prefix(), "albums/");

    press(&mut app, KeyCode::Left);
    settle(&mut app).await;
    assert_eq!(app.model().prefix(), "");

    press(&mut app, KeyCode::Backspace);
    assert!(!app.model().ui_state.is_loading);
}

#[tokio::test]
async fn stale_listing_result_is_discarded() {
    let mut app = controller();
    let stale = app.model.begin_listing();
    let current = app.model.begin_listing();

    app.apply_listing(ListingResult {
        seq: stale,
        prefix: "old/".to_string(),
        result: Ok(Listing {
            prefix: "old/".to_string(),
            entries: vec![CatalogEntry::folder("old/x/", "x")],
            signing_failures: Vec::new(),
        }),
    });
    assert_eq!(app.model().prefix(), "");
    assert!(app.model().entries().is_empty());
    assert!(app.model().ui_state.is_loading);

    app.apply_listing(ListingResult {
        seq: current,
        prefix: "new/".to_string(),
        result: Ok(Listing {
            prefix: "new/".to_string(),
            entries: vec![CatalogEntry::folder("new/y/", "y")],
            signing_failures: Vec::new(),
        }),
    });
    assert_eq!(app.model().prefix(), "new/");
    assert!(!app.model().ui_state.is_loading);
}

#[tokio::test]
async fn failed_listing_keeps_previous_entries_and_reports_error() {
    let mut app = controller();
    app.open_prefix("");
    settle(&mut app).await;

    let seq = app.model.begin_listing();
    app.apply_listing(ListingResult {
        seq,
        prefix: "albums/".to_string(),
        result: Err(CatalogError::ListingFailed(StoreError::List {
            prefix: "albums/".to_string(),
            message: "connection refused".to_string(),
        })),
    });

    assert_eq!(app.model().prefix(), "");
    assert_eq!(keys(&app), vec!["albums/", "intro.mp3"]);
    assert!(app.model().has_error());
    assert!(!app.model().ui_state.is_loading);
}

#[tokio::test]
async fn unreachable_store_surfaces_as_error() {
    let mut app = controller_with(MemoryStore::failing());
    app.open_prefix("");
    settle(&mut app).await;

    assert!(app.model().has_error());
    let message = &app.model().ui_state.notification.as_ref().unwrap().message;
    assert_eq!(message, "Could not reach the storage endpoint.");
}

#[tokio::test]
async fn unsigned_files_are_hidden_and_reported() {
    let mut app = controller_with(MemoryStore::with_keys(KEYS.iter().copied()).refuse_to_sign("intro.mp3"));
    app.open_prefix("");
    settle(&mut app).await;

    assert_eq!(keys(&app), vec!["albums/"]);
    assert_eq!(app.model().content_state.omitted, 1);
    assert!(app.model().has_error());
}

#[tokio::test]
async fn enter_on_file_plays_and_n_skips_to_next_file() {
    let mut app = controller();
    app.open_prefix("albums/");
    settle(&mut app).await;

    select_key(&mut app, "albums/a.mp3");
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;

    assert_eq!(app.model().playback().status, PlayerStatus::Playing);
    assert_eq!(
        app.model().playback().current_track.as_ref().map(|t| t.key.as_str()),
        Some("albums/a.mp3")
    );

    press(&mut app, KeyCode::Char('n'));
    settle(&mut app).await;
    assert_eq!(
        app.model().playback().current_track.as_ref().map(|t| t.key.as_str()),
        Some("albums/b.mp3")
    );

    press(&mut app, KeyCode::Char(' '));
    settle(&mut app).await;
    assert_eq!(app.model().playback().status, PlayerStatus::Paused);

    press(&mut app, KeyCode::Char('s'));
    settle(&mut app).await;
    assert_eq!(app.model().playback().status, PlayerStatus::Stopped);
}

#[tokio::test]
async fn digit_keys_seek_to_tenths_of_the_track() {
    let mut app = controller();
    app.open_prefix("albums/");
    settle(&mut app).await;
    select_key(&mut app, "albums/a.mp3");
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('5'));
    settle(&mut app).await;
    assert_eq!(app.model().playback().position, 0.0);
    assert!(app.model().ui_state.notification.is_some());

    app.model_mut().clear_notification();
    app.player.sample_progress();
    press(&mut app, KeyCode::Char('5'));
    settle(&mut app).await;
    assert_eq!(app.model().playback().position, 60.0);
}

#[tokio::test]
async fn volume_and_mute_keys_update_playback_state() {
    let mut app = controller();

    press(&mut app, KeyCode::Char('-'));
    settle(&mut app).await;
    assert!((app.model().playback().volume - 0.95).abs() < 1e-6);

    press(&mut app, KeyCode::Char('m'));
    settle(&mut app).await;
    assert!(app.model().playback().is_muted);

    press(&mut app, KeyCode::Char('m'));
    settle(&mut app).await;
    assert!(!app.model().playback().is_muted);
}

#[tokio::test]
async fn error_notification_blocks_keys_until_dismissed() {
    let mut app = controller();
    app.model_mut().set_error("boom");

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.model().should_quit());

    press(&mut app, KeyCode::Esc);
    assert!(!app.model().has_error());

    press(&mut app, KeyCode::Char('q'));
    assert!(app.model().should_quit());
}

#[tokio::test]
async fn ctrl_c_quits_even_with_error_shown() {
    let mut app = controller();
    app.model_mut().set_error("boom");
    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.model().should_quit());
}

#[tokio::test]
async fn help_popup_toggles_and_swallows_other_keys() {
    let mut app = controller();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.model().ui_state.show_help_popup);

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.model().should_quit());

    press(&mut app, KeyCode::Esc);
    assert!(!app.model().ui_state.show_help_popup);
}

#[tokio::test]
async fn downloading_a_folder_is_refused() {
    let mut app = controller();
    app.open_prefix("");
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('d'));
    let notification = app.model().ui_state.notification.as_ref().unwrap();
    assert_eq!(notification.message, "Folders cannot be downloaded");
}

#[tokio::test]
async fn shutdown_releases_the_engine() {
    let mut app = controller();
    app.open_prefix("");
    settle(&mut app).await;
    select_key(&mut app, "intro.mp3");
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;
    assert!(app.player.sampler_running());

    app.shutdown();
    assert!(!app.player.sampler_running());
    assert!(!app.player.state().is_playing);
}

#[test]
fn download_path_keeps_files_inside_the_directory() {
    let dir = Path::new("downloads");
    assert_eq!(download_path(dir, "song.mp3"), dir.join("song.mp3"));
    assert_eq!(download_path(dir, "../etc/passwd"), dir.join(".._etc_passwd"));
    assert_eq!(download_path(dir, ".."), dir.join("download"));
    assert_eq!(download_path(dir, "  "), dir.join("download"));
}

#[tokio::test]
async fn download_never_overwrites_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        free_download_path(dir.path(), "song.mp3").await.unwrap(),
        dir.path().join("song.mp3")
    );

    std::fs::write(dir.path().join("song.mp3"), b"first").unwrap();
    assert_eq!(
        free_download_path(dir.path(), "song.mp3").await.unwrap(),
        dir.path().join("song (1).mp3")
    );

    std::fs::write(dir.path().join("song (1).mp3"), b"second").unwrap();
    assert_eq!(
        free_download_path(dir.path(), "song.mp3").await.unwrap(),
        dir.path().join("song (2).mp3")
    );
    assert_eq!(std::fs::read(dir.path().join("song.mp3")).unwrap(), b"first");
}

#[test]
fn format_error_maps_common_store_failures() {
    let denied = CatalogError::ListingFailed(StoreError::List {
        prefix: String::new(),
        message: "service error: AccessDenied".to_string(),
    });
    assert_eq!(format_error(&denied), "Access denied. Check the storage credentials.");

    let missing = CatalogError::ListingFailed(StoreError::List {
        prefix: String::new(),
        message: "NoSuchBucket".to_string(),
    });
    assert_eq!(format_error(&missing), "Bucket not found. Check storage.bucket.");

    let other = CatalogError::InvalidPrefix {
        prefix: "%zz".to_string(),
        reason: "bad escape".to_string(),
    };
    assert_eq!(format_error(&other), "Error: invalid prefix \"%zz\": bad escape");
}
