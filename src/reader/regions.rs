//! Region Index
//!
//! Ordered text regions of the current image plus the selection over them.

use thiserror::Error;

use crate::vision::TextRegion;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("region {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Where the reader is in its selection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    NoSelection,
    RegionSelected(usize),
    PhraseOpen(usize, usize),
}

/// Selection before and after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub before: Option<usize>,
    pub after: Option<usize>,
}

impl SelectionChange {
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }
}

#[derive(Debug, Default)]
pub struct RegionIndex {
    regions: Vec<TextRegion>,
    selected: Option<usize>,
    open_phrase: Option<usize>,
}

impl RegionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_region(&self) -> Option<&TextRegion> {
        self.selected.and_then(|i| self.regions.get(i))
    }

    pub fn open_phrase(&self) -> Option<usize> {
        self.open_phrase
    }

    pub fn state(&self) -> ReaderState {
        match (self.selected, self.open_phrase) {
            (None, _) => ReaderState::NoSelection,
            (Some(i), None) => ReaderState::RegionSelected(i),
            (Some(i), Some(w)) => ReaderState::PhraseOpen(i, w),
        }
    }

    fn change_to(&mut self, after: Option<usize>) -> SelectionChange {
        let before = self.selected;
        self.selected = after;
        if before != after || after.is_none() {
            self.open_phrase = None;
        }
        SelectionChange { before, after }
    }

    /// Replace every region; the selection and any open phrase are dropped
    pub fn set_regions(&mut self, regions: Vec<TextRegion>) -> SelectionChange {
        self.regions = regions;
        self.change_to(None)
    }

    /// Select region `index`, or clear the selection if it is already selected
    pub fn select(&mut self, index: usize) -> Result<SelectionChange, SelectionError> {
        if index >= self.regions.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: self.regions.len(),
            });
        }
        let after = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.change_to(after))
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        self.change_to(None)
    }

    /// Move to the following region; no-op at the end or with nothing selected
    pub fn next(&mut self) -> SelectionChange {
        match self.selected {
            Some(i) if i + 1 < self.regions.len() => self.change_to(Some(i + 1)),
            current => SelectionChange {
                before: current,
                after: current,
            },
        }
    }

    /// Move to the preceding region; no-op at the start or with nothing selected
    pub fn previous(&mut self) -> SelectionChange {
        match self.selected {
            Some(i) if i > 0 => self.change_to(Some(i - 1)),
            current => SelectionChange {
                before: current,
                after: current,
            },
        }
    }

    /// Open word `word`'s gloss, or close it if it is the one already open
    ///
    /// Ignored when no region is selected.
    pub fn toggle_phrase(&mut self, word: usize) {
        if self.selected.is_none() {
            return;
        }
        self.open_phrase = if self.open_phrase == Some(word) {
            None
        } else {
            Some(word)
        };
    }

    pub fn close_phrase(&mut self) {
        self.open_phrase = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::ImageRect;

    fn regions(n: usize) -> Vec<TextRegion> {
        (0..n)
            .map(|i| TextRegion {
                frame: ImageRect::new(i as f32 * 20.0, 0.0, 100.0, 15.0),
                text: format!("第{i}段"),
            })
            .collect()
    }

    fn index_with(n: usize) -> RegionIndex {
        let mut index = RegionIndex::new();
        index.set_regions(regions(n));
        index
    }

    #[test]
    fn test_select_same_index_twice_clears() {
        let mut index = index_with(3);

        index.select(2).unwrap();
        assert_eq!(index.selected(), Some(2));
        let change = index.select(2).unwrap();

        assert_eq!(index.selected(), None);
        assert_eq!(change, SelectionChange { before: Some(2), after: None });
    }

    #[test]
    fn test_select_out_of_range() {
        let mut index = index_with(3);

        assert_eq!(
            index.select(3),
            Err(SelectionError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(index.selected(), None);
    }

    #[test]
    fn test_select_on_empty_index() {
        let mut index = RegionIndex::new();
        assert!(index.select(0).is_err());
    }

    #[test]
    fn test_next_stops_at_last() {
        let mut index = index_with(3);
        index.select(2).unwrap();

        let change = index.next();

        assert!(!change.is_changed());
        assert_eq!(index.selected(), Some(2));
    }

    #[test]
    fn test_previous_stops_at_first() {
        let mut index = index_with(3);
        index.select(0).unwrap();

        assert!(!index.previous().is_changed());
        assert_eq!(index.selected(), Some(0));
    }

    #[test]
    fn test_navigation_without_selection_is_noop() {
        let mut index = index_with(3);

        assert!(!index.next().is_changed());
        assert!(!index.previous().is_changed());
        assert_eq!(index.state(), ReaderState::NoSelection);
    }

    #[test]
    fn test_navigation_closes_open_phrase() {
        let mut index = index_with(3);
        index.select(1).unwrap();
        index.toggle_phrase(0);
        assert_eq!(index.state(), ReaderState::PhraseOpen(1, 0));

        index.next();

        assert_eq!(index.state(), ReaderState::RegionSelected(2));
    }

    #[test]
    fn test_boundary_noop_keeps_open_phrase() {
        let mut index = index_with(2);
        index.select(1).unwrap();
        index.toggle_phrase(3);

        index.next();

        assert_eq!(index.state(), ReaderState::PhraseOpen(1, 3));
    }

    #[test]
    fn test_set_regions_resets_everything() {
        let mut index = index_with(3);
        index.select(1).unwrap();
        index.toggle_phrase(2);

        let change = index.set_regions(regions(5));

        assert_eq!(change.before, Some(1));
        assert_eq!(index.state(), ReaderState::NoSelection);
        assert_eq!(index.open_phrase(), None);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_toggle_phrase() {
        let mut index = index_with(2);

        index.toggle_phrase(0);
        assert_eq!(index.state(), ReaderState::NoSelection);

        index.select(0).unwrap();
        index.toggle_phrase(1);
        assert_eq!(index.state(), ReaderState::PhraseOpen(0, 1));
        index.toggle_phrase(0);
        assert_eq!(index.state(), ReaderState::PhraseOpen(0, 0));
        index.toggle_phrase(0);
        assert_eq!(index.state(), ReaderState::RegionSelected(0));
    }

    #[test]
    fn test_selecting_other_region_discards_phrase() {
        let mut index = index_with(3);
        index.select(0).unwrap();
        index.toggle_phrase(1);

        index.select(2).unwrap();

        assert_eq!(index.state(), ReaderState::RegionSelected(2));
        assert_eq!(index.selected_region().map(|r| r.text.as_str()), Some("第2段"));
    }
}
