use log::debug;

use super::{Layout, Slide, SlidePatch};

/// Destination of user-facing feedback from deck operations. The editor
/// backs this with its toast overlay; tests back it with a recorder.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The editable deck: an ordered slide sequence plus the active-slide
/// cursor. Never empty; `0 <= active < slides.len()` at all times.
pub struct DeckStore {
    slides: Vec<Slide>,
    active: usize,
}

impl DeckStore {
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::new(Layout::Title)],
            active: 0,
        }
    }

    /// Build a store from pre-made slides (the demo deck). Falls back to
    /// a fresh single-slide deck rather than ever being empty.
    pub fn from_slides(slides: Vec<Slide>) -> Self {
        if slides.is_empty() {
            return Self::new();
        }
        Self { slides, active: 0 }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active]
    }

    /// Immutable copy of the deck handed to playback at slideshow start.
    pub fn snapshot(&self) -> Vec<Slide> {
        self.slides.clone()
    }

    /// Insert a new slide right after the active one and navigate to it.
    pub fn add_slide(&mut self, layout: Layout, notifier: &mut dyn Notifier) {
        let slide = Slide::new(layout);
        debug!("add slide {:?} after index {}", slide.id, self.active);
        self.slides.insert(self.active + 1, slide);
        self.active += 1;
        notifier.success("Slide added");
    }

    /// Clone the active slide under a new id, inserted right after the
    /// original, and navigate to the clone.
    pub fn duplicate_active(&mut self, notifier: &mut dyn Notifier) {
        let copy = self.slides[self.active].duplicated();
        self.slides.insert(self.active + 1, copy);
        self.active += 1;
        notifier.success("Slide duplicated");
    }

    /// Remove the active slide. Refuses to empty the deck.
    pub fn delete_active(&mut self, notifier: &mut dyn Notifier) {
        if self.slides.len() == 1 {
            notifier.error("Cannot delete the only slide");
            return;
        }
        self.slides.remove(self.active);
        self.active = self.active.saturating_sub(1);
        notifier.success("Slide deleted");
    }

    /// Swap the active slide with its neighbor. Silent no-op at the
    /// boundary; the cursor follows the moved slide.
    pub fn move_active(&mut self, direction: MoveDirection, notifier: &mut dyn Notifier) {
        match direction {
            MoveDirection::Up => {
                if self.active == 0 {
                    return;
                }
                self.slides.swap(self.active, self.active - 1);
                self.active -= 1;
                notifier.success("Slide moved up");
            }
            MoveDirection::Down => {
                if self.active + 1 >= self.slides.len() {
                    return;
                }
                self.slides.swap(self.active, self.active + 1);
                self.active += 1;
                notifier.success("Slide moved down");
            }
        }
    }

    /// Merge the patch into the active slide only.
    pub fn update_active(&mut self, patch: SlidePatch) {
        patch.apply(&mut self.slides[self.active]);
    }

    /// Merge the patch into the slide with the given id, wherever it now
    /// sits. Returns false if the slide is gone. Used by deferred work
    /// (image decode) that must not chase the moving cursor.
    pub fn update_by_id(&mut self, id: super::SlideId, patch: SlidePatch) -> bool {
        match self.slides.iter_mut().find(|s| s.id == id) {
            Some(slide) => {
                patch.apply(slide);
                true
            }
            None => false,
        }
    }

    /// Set the cursor directly. Callers pass a valid index.
    pub fn select(&mut self, index: usize) {
        debug_assert!(index < self.slides.len());
        self.active = index;
    }

    /// Cursor movement by one, absorbed at the boundaries.
    pub fn select_next(&mut self) {
        if self.active + 1 < self.slides.len() {
            self.active += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

impl Default for DeckStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{SlideImage, Template};

    #[derive(Default)]
    struct Recorder {
        successes: Vec<String>,
        errors: Vec<String>,
    }

    impl Notifier for Recorder {
        fn success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }

        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn deck_of(n: usize) -> DeckStore {
        let mut store = DeckStore::new();
        let mut notifier = Recorder::default();
        for _ in 1..n {
            store.add_slide(Layout::Content, &mut notifier);
        }
        store.select(0);
        store
    }

    fn ids(store: &DeckStore) -> Vec<crate::deck::SlideId> {
        store.slides().iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_new_deck_has_one_title_slide() {
        let store = DeckStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active_slide().layout, Layout::Title);
    }

    #[test]
    fn test_add_inserts_after_active_and_navigates() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        let before = ids(&store);

        store.add_slide(Layout::Content, &mut notifier);

        assert_eq!(store.len(), 4);
        assert_eq!(store.active_index(), 1);
        // [A, NEW, B, C]
        assert_eq!(store.slides()[0].id, before[0]);
        assert_eq!(store.slides()[2].id, before[1]);
        assert_eq!(store.slides()[3].id, before[2]);
        assert_eq!(notifier.successes, vec!["Slide added"]);
    }

    #[test]
    fn test_add_then_delete_restores_deck() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        let before = ids(&store);

        store.add_slide(Layout::Content, &mut notifier);
        store.delete_active(&mut notifier);

        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 0);
        assert!(notifier.errors.is_empty());
    }

    #[test]
    fn test_delete_only_slide_refused() {
        let mut store = DeckStore::new();
        let mut notifier = Recorder::default();
        let before = ids(&store);

        store.delete_active(&mut notifier);

        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 0);
        assert_eq!(notifier.errors, vec!["Cannot delete the only slide"]);
        assert!(notifier.successes.is_empty());
    }

    #[test]
    fn test_delete_moves_cursor_back() {
        let mut store = deck_of(4);
        let mut notifier = Recorder::default();
        store.select(2);

        store.delete_active(&mut notifier);

        assert_eq!(store.len(), 3);
        assert_eq!(store.active_index(), 1);
    }

    #[test]
    fn test_duplicate_copies_fields_under_new_id() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        store.select(1);
        store.update_active(SlidePatch {
            title: Some("Original".to_string()),
            template: Some(Template::Orange),
            ..Default::default()
        });
        let original_id = store.active_slide().id;

        store.duplicate_active(&mut notifier);

        assert_eq!(store.len(), 4);
        assert_eq!(store.active_index(), 2);
        let copy = &store.slides()[2];
        assert_ne!(copy.id, original_id);
        assert_eq!(copy.title, "Original");
        assert_eq!(copy.template, Template::Orange);
        assert_eq!(store.slides()[1].id, original_id);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        let before = ids(&store);

        store.move_active(MoveDirection::Up, &mut notifier);

        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 0);
        // Boundary no-ops stay silent.
        assert!(notifier.successes.is_empty());
        assert!(notifier.errors.is_empty());
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        store.select(2);
        let before = ids(&store);

        store.move_active(MoveDirection::Down, &mut notifier);

        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 2);
        assert!(notifier.successes.is_empty());
    }

    #[test]
    fn test_move_follows_slide() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        let before = ids(&store);
        store.select(1);

        store.move_active(MoveDirection::Down, &mut notifier);

        assert_eq!(store.active_index(), 2);
        assert_eq!(store.slides()[2].id, before[1]);
        assert_eq!(store.slides()[1].id, before[2]);

        store.move_active(MoveDirection::Up, &mut notifier);
        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 1);
        assert_eq!(notifier.successes, vec!["Slide moved down", "Slide moved up"]);
    }

    #[test]
    fn test_select_active_is_idempotent() {
        let mut store = deck_of(3);
        store.select(1);
        let before = ids(&store);

        store.select(1);

        assert_eq!(ids(&store), before);
        assert_eq!(store.active_index(), 1);
    }

    #[test]
    fn test_select_prev_next_absorb_boundaries() {
        let mut store = deck_of(2);
        store.select_prev();
        assert_eq!(store.active_index(), 0);
        store.select_next();
        assert_eq!(store.active_index(), 1);
        store.select_next();
        assert_eq!(store.active_index(), 1);
    }

    #[test]
    fn test_update_active_touches_one_slide() {
        let mut store = deck_of(3);
        store.select(1);

        store.update_active(SlidePatch {
            content: Some("edited".to_string()),
            ..Default::default()
        });

        assert_eq!(store.slides()[1].content, "edited");
        assert!(store.slides()[0].content.is_empty());
        assert!(store.slides()[2].content.is_empty());
    }

    #[test]
    fn test_update_by_id_survives_navigation() {
        let mut store = deck_of(3);
        store.select(1);
        let target = store.active_slide().id;
        store.select(2);

        let applied = store.update_by_id(
            target,
            SlidePatch {
                image: Some(Some(SlideImage::new([1, 1], vec![0, 0, 0, 255]))),
                ..Default::default()
            },
        );

        assert!(applied);
        assert!(store.slides()[1].image.is_some());
        assert!(store.slides()[2].image.is_none());
    }

    #[test]
    fn test_update_by_id_missing_slide() {
        let mut store = deck_of(2);
        let mut notifier = Recorder::default();
        store.select(1);
        let gone = store.active_slide().id;
        store.delete_active(&mut notifier);

        let applied = store.update_by_id(gone, SlidePatch::default());
        assert!(!applied);
    }

    #[test]
    fn test_snapshot_isolated_from_edits() {
        let mut store = deck_of(3);
        let mut notifier = Recorder::default();
        let snapshot = store.snapshot();
        let snapshot_ids: Vec<_> = snapshot.iter().map(|s| s.id).collect();

        store.update_active(SlidePatch {
            title: Some("changed after snapshot".to_string()),
            ..Default::default()
        });
        store.add_slide(Layout::Content, &mut notifier);
        store.delete_active(&mut notifier);
        store.delete_active(&mut notifier);

        assert_eq!(snapshot.len(), 3);
        let ids_now: Vec<_> = snapshot.iter().map(|s| s.id).collect();
        assert_eq!(ids_now, snapshot_ids);
        assert!(snapshot[0].title.is_empty());
    }

    #[test]
    fn test_deck_never_empty_under_random_ops() {
        let mut store = DeckStore::new();
        let mut notifier = Recorder::default();
        // A fixed gauntlet of operations; the invariants must hold after
        // every step.
        for step in 0..200 {
            match step % 7 {
                0 => store.add_slide(Layout::Content, &mut notifier),
                1 => store.delete_active(&mut notifier),
                2 => store.duplicate_active(&mut notifier),
                3 => store.move_active(MoveDirection::Up, &mut notifier),
                4 => store.move_active(MoveDirection::Down, &mut notifier),
                5 => store.delete_active(&mut notifier),
                _ => store.select_next(),
            }
            assert!(store.len() >= 1);
            assert!(store.active_index() < store.len());
            let mut seen = std::collections::HashSet::new();
            for slide in store.slides() {
                assert!(seen.insert(slide.id), "duplicate slide id");
            }
        }
    }
}
