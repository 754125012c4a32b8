//! Property-based tests for the bookmark store's import-merge algorithm.
//!
//! These tests verify the merge laws for arbitrary collections: merging is
//! idempotent, incoming records win on id collision, and the result is
//! always ordered newest-first.

use bookvault::stores::BookmarkStore;
use bookvault::types::Bookmark;
use proptest::prelude::*;

/// Strategy for generating valid URL strings.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net"), Just(".io")],
    )
        .prop_map(|(scheme, host, tld)| format!("{}://{}{}", scheme, host, tld))
}

/// Strategy for a collection with unique ids, as the store maintains them.
/// Ids are drawn from a small alphabet so that two generated collections
/// frequently collide with each other.
fn arb_collection(max: usize) -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::hash_map(
        "[a-d][0-9]",
        (
            "[a-zA-Z][a-zA-Z0-9 ]{0,20}",
            arb_url(),
            0i64..2_000_000_000_000,
            proptest::option::of("[a-z0-9]{1,6}"),
        ),
        0..max,
    )
    .prop_map(|by_id| {
        by_id
            .into_iter()
            .map(|(id, (title, url, created_at, folder_id))| Bookmark {
                id,
                title,
                url,
                created_at,
                folder_id,
            })
            .collect()
    })
}

// Merging the same batch twice yields the same collection as merging once.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn import_merge_is_idempotent(
        existing in arb_collection(12),
        incoming in arb_collection(12),
    ) {
        let mut store = BookmarkStore::new();
        store.replace_all(existing);

        store.import_merge(incoming.clone());
        let once: Vec<Bookmark> = store.all().to_vec();

        store.import_merge(incoming);
        prop_assert_eq!(store.all(), once.as_slice());
    }
}

// After any merge, adjacent records never violate newest-first order.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn merged_collection_is_ordered_newest_first(
        existing in arb_collection(12),
        incoming in arb_collection(12),
    ) {
        let mut store = BookmarkStore::new();
        store.replace_all(existing);
        store.import_merge(incoming);

        for pair in store.all().windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
}

// On an id collision the incoming record replaces the existing one, and ids
// stay unique afterwards.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn incoming_record_wins_and_ids_stay_unique(
        existing in arb_collection(12),
        incoming in arb_collection(12),
    ) {
        let mut store = BookmarkStore::new();
        store.replace_all(existing);
        store.import_merge(incoming.clone());

        // Every incoming record is the surviving one for its id.
        for record in &incoming {
            let stored = store.all().iter().find(|b| b.id == record.id);
            prop_assert_eq!(stored.map(|b| &b.title), Some(&record.title));
            prop_assert_eq!(stored.map(|b| b.created_at), Some(record.created_at));
        }

        let mut ids: Vec<&str> = store.all().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), store.len());
    }
}

// Adding a bookmark grows the collection by exactly one and always yields a
// url carrying an explicit scheme.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn add_grows_by_one_with_normalized_url(
        existing in arb_collection(12),
        title in "[a-zA-Z][a-zA-Z0-9 ]{0,20}",
        host in "[a-z][a-z0-9]{2,15}\\.com",
    ) {
        let mut store = BookmarkStore::new();
        store.replace_all(existing);
        let before = store.len();

        let id = store.add(&title, &host, None);

        prop_assert_eq!(store.len(), before + 1);
        let added = store.get(&id).unwrap();
        prop_assert!(added.url.starts_with("http://") || added.url.starts_with("https://"));
    }
}
