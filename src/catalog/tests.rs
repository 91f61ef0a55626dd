use super::*;
use crate::config::CatalogSettings;
use crate::model::EntryKind;
use crate::storage::memory::MemoryStore;

fn resolver(store: MemoryStore) -> CatalogResolver<MemoryStore> {
    CatalogResolver::new(store, &CatalogSettings::default())
}

fn resolver_with_policy(store: MemoryStore, policy: SigningPolicy) -> CatalogResolver<MemoryStore> {
    let settings = CatalogSettings {
        signing_policy: policy,
        ..CatalogSettings::default()
    };
    CatalogResolver::new(store, &settings)
}

#[tokio::test]
async fn albums_prefix_yields_one_folder_and_one_track() {
    let store = MemoryStore::with_keys([
        "albums/rock/song.mp3",
        "albums/track1.mp3",
        "albums/readme.txt",
    ]);
    let listing = resolver(store).list_entries("albums/").await.unwrap();

    assert_eq!(listing.entries.len(), 2);
    assert_eq!(listing.entries[0], CatalogEntry::folder("albums/rock/", "rock"));

    let file = &listing.entries[1];
    assert_eq!(file.key, "albums/track1.mp3");
    assert_eq!(file.title, "track1.mp3");
    assert_eq!(file.url(), Some("https://signed.test/albums/track1.mp3?expires=3600"));
    assert!(listing.signing_failures.is_empty());
}

#[tokio::test]
async fn folders_come_before_files_in_store_order() {
    let store = MemoryStore::with_keys([
        "b.mp3",
        "zeta/x.mp3",
        "a.mp3",
        "alpha/y.mp3",
    ]);
    let listing = resolver(store).list_entries("").await.unwrap();

    let keys: Vec<&str> = listing.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["zeta/", "alpha/", "b.mp3", "a.mp3"]);
}

#[tokio::test]
async fn folder_keys_extend_prefix_by_exactly_one_segment() {
    let store = MemoryStore::with_keys([
        "music/jazz/cool/a.mp3",
        "music/rock/b.mp3",
        "music/c.mp3",
    ]);
    let listing = resolver(store).list_entries("music/").await.unwrap();

    for folder in listing.folders() {
        let rest = folder.key.strip_prefix("music/").unwrap();
        assert!(!rest.is_empty());
        assert_eq!(rest.matches('/').count(), 1);
        assert!(rest.ends_with('/'));
        assert_eq!(folder.url(), None);
    }
    assert_eq!(listing.folders().count(), 2);
}

#[tokio::test]
async fn placeholder_object_for_the_folder_is_skipped() {
    let store = MemoryStore::with_keys(["live.mp3", "live.mp3/encore.mp3"]);
    let listing = resolver(store).list_entries("live.mp3").await.unwrap();

    assert_eq!(listing.entries, vec![CatalogEntry::folder("live.mp3/", "live.mp3")]);
    assert!(listing.files().all(|e| e.key != "live.mp3"));
}

#[tokio::test]
async fn extension_match_ignores_case() {
    let store = MemoryStore::with_keys(["LOUD.MP3", "quiet.Mp3", "cover.jpg"]);
    let listing = resolver(store).list_entries("").await.unwrap();

    let titles: Vec<&str> = listing.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["LOUD.MP3", "quiet.Mp3"]);
}

#[tokio::test]
async fn every_file_has_a_url_and_no_folder_does() {
    let store = MemoryStore::with_keys(["x/1.mp3", "2.mp3", "y/3.mp3", "4.mp3"]);
    let listing = resolver(store).list_entries("").await.unwrap();

    for entry in &listing.entries {
        match &entry.kind {
            EntryKind::Folder => assert!(entry.url().is_none()),
            EntryKind::File { url } => assert!(!url.is_empty()),
        }
    }
}

#[tokio::test]
async fn percent_encoded_prefix_is_decoded_before_listing() {
    let store = MemoryStore::with_keys(["My Albums/intro.mp3"]);
    let listing = resolver(store).list_entries("My%20Albums%2F").await.unwrap();

    assert_eq!(listing.prefix, "My Albums/");
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].key, "My Albums/intro.mp3");
}

#[tokio::test]
async fn store_failure_fails_the_whole_listing() {
    let err = resolver(MemoryStore::failing()).list_entries("albums/").await.unwrap_err();
    assert!(matches!(err, CatalogError::ListingFailed(_)));
}

#[tokio::test]
async fn omit_policy_drops_unsignable_file_and_reports_it() {
    let store = MemoryStore::with_keys(["a.mp3", "b.mp3", "c.mp3"]).refuse_to_sign("b.mp3");
    let listing = resolver_with_policy(store, SigningPolicy::Omit)
        .list_entries("")
        .await
        .unwrap();

    let keys: Vec<&str> = listing.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["a.mp3", "c.mp3"]);
    assert_eq!(listing.signing_failures.len(), 1);
    assert_eq!(listing.signing_failures[0].key, "b.mp3");
}

#[tokio::test]
async fn abort_policy_fails_listing_on_first_unsignable_file() {
    let store = MemoryStore::with_keys(["a.mp3", "b.mp3"]).refuse_to_sign("b.mp3");
    let err = resolver_with_policy(store, SigningPolicy::Abort)
        .list_entries("")
        .await
        .unwrap_err();

    match err {
        CatalogError::SigningFailed { key, .. } => assert_eq!(key, "b.mp3"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn each_call_signs_fresh_urls() {
    let resolver = resolver(MemoryStore::with_keys(["a.mp3"]));
    resolver.list_entries("").await.unwrap();
    resolver.list_entries("").await.unwrap();

    assert_eq!(resolver.store.list_calls(), 2);
    assert_eq!(resolver.store.signed_keys(), vec!["a.mp3", "a.mp3"]);
}

#[tokio::test]
async fn only_audio_files_are_signed() {
    let resolver = resolver(MemoryStore::with_keys(["a.mp3", "notes.txt"]));
    resolver.list_entries("").await.unwrap();
    assert_eq!(resolver.store.signed_keys(), vec!["a.mp3"]);
}

#[test]
fn folder_title_is_last_non_empty_segment() {
    assert_eq!(folder_title("albums/rock/"), "rock");
    assert_eq!(folder_title("top/"), "top");
    assert_eq!(folder_title(""), "");
}

#[test]
fn file_title_is_last_segment() {
    assert_eq!(file_title("albums/track1.mp3"), "track1.mp3");
    assert_eq!(file_title("root.mp3"), "root.mp3");
}

#[test]
fn parent_prefix_walks_up_one_level() {
    assert_eq!(parent_prefix("albums/rock/"), "albums/");
    assert_eq!(parent_prefix("albums/"), "");
    assert_eq!(parent_prefix(""), "");
}
