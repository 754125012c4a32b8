//! Property-based tests for pagination and the cross-page selection set.
//!
//! These tests verify that the selection is invariant under arbitrary page
//! navigation, that toggling twice is the identity, and that page-level
//! select/deselect never touches off-page ids.

use bookvault::types::Bookmark;
use bookvault::view::BookmarkView;
use proptest::prelude::*;

fn collection(count: usize) -> Vec<Bookmark> {
    (0..count)
        .map(|i| Bookmark {
            id: format!("b{}", i),
            title: format!("Bookmark {}", i),
            url: format!("https://example.com/{}", i),
            created_at: (count - i) as i64,
            folder_id: None,
        })
        .collect()
}

// Navigating between pages, in any order, never changes the selection.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn selection_is_invariant_under_navigation(
        count in 0usize..40,
        picks in proptest::collection::vec(0usize..40, 0..10),
        pages in proptest::collection::vec(0usize..10, 0..12),
    ) {
        let items = collection(count);
        let mut view = BookmarkView::new(6);

        for pick in &picks {
            if *pick < count {
                view.toggle(&format!("b{}", pick));
            }
        }
        let before = view.selected().clone();

        for page in pages {
            view.go_to_page(page, items.len());
            prop_assert!(view.current_page() >= 1);
            prop_assert!(view.current_page() <= view.total_pages(items.len()));
        }

        prop_assert_eq!(view.selected(), &before);
    }
}

// Toggling the same id twice restores the original selection.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn double_toggle_is_the_identity(
        count in 1usize..40,
        pre in proptest::collection::vec(0usize..40, 0..10),
        target in 0usize..40,
    ) {
        let target = target % count;
        let mut view = BookmarkView::new(6);
        for pick in &pre {
            if *pick < count {
                view.toggle(&format!("b{}", pick));
            }
        }
        let before = view.selected().clone();

        let id = format!("b{}", target);
        view.toggle(&id);
        view.toggle(&id);

        prop_assert_eq!(view.selected(), &before);
    }
}

// Selecting a whole page and then deselecting it leaves exactly the ids that
// were selected on other pages.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn page_toggle_round_trip_preserves_off_page_selection(
        count in 7usize..40,
        page in 1usize..8,
        off_page_picks in proptest::collection::vec(0usize..40, 0..8),
    ) {
        let items = collection(count);
        let mut view = BookmarkView::new(6);
        view.go_to_page(page, items.len());

        let on_page: Vec<String> =
            view.page_slice(&items).iter().map(|b| b.id.clone()).collect();

        // Pre-select some ids that are not on the current page.
        for pick in &off_page_picks {
            let id = format!("b{}", pick);
            if *pick < count && !on_page.contains(&id) {
                view.toggle(&id);
            }
        }
        let off_page = view.selected().clone();

        view.toggle_select_page(&items);
        prop_assert!(view.all_on_page_selected(&items));
        for id in &off_page {
            prop_assert!(view.is_selected(id));
        }

        view.toggle_select_page(&items);
        prop_assert_eq!(view.selected(), &off_page);
    }
}

// After a shrink, clamping always lands on a valid page and the page slice
// is never empty while the collection is non-empty.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn clamp_always_lands_on_a_valid_page(
        count in 0usize..40,
        remaining in 0usize..40,
        page in 1usize..8,
    ) {
        let mut view = BookmarkView::new(6);
        view.go_to_page(page, count);

        let remaining = remaining.min(count);
        let items = collection(remaining);
        view.clamp_page(items.len());

        prop_assert!(view.current_page() >= 1);
        prop_assert!(view.current_page() <= view.total_pages(items.len()));
        if !items.is_empty() {
            prop_assert!(!view.page_slice(&items).is_empty());
        }
    }
}
