use std::collections::HashSet;
use std::hash::Hash;

/// Checked rows of the rendered page
///
/// Selection never reaches beyond the rows currently on screen: ids that are
/// not rendered are ignored, and replacing the rendered rows clears it.
#[derive(Debug, Clone)]
pub struct SelectionController<Id> {
    rendered: Vec<Id>,
    selected: HashSet<Id>,
}

impl<Id> Default for SelectionController<Id> {
    fn default() -> Self {
        Self {
            rendered: Vec::new(),
            selected: HashSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> SelectionController<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rendered rows and clears the selection.
    pub fn reset(&mut self, rendered: Vec<Id>) {
        self.rendered = rendered;
        self.selected.clear();
    }

    pub fn toggle_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.rendered.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn toggle_row(&mut self, id: &Id, checked: bool) {
        if !self.rendered.contains(id) {
            return;
        }
        if checked {
            self.selected.insert(id.clone());
        } else {
            self.selected.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// Every rendered row is checked (false for an empty page)
    pub fn is_all_selected(&self) -> bool {
        !self.rendered.is_empty() && self.selected.len() == self.rendered.len()
    }

    /// Some, but not all, rendered rows are checked
    pub fn is_partially_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() < self.rendered.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in rendered order
    pub fn selected_ids(&self) -> Vec<Id> {
        self.rendered
            .iter()
            .filter(|id| self.selected.contains(id))
            .cloned()
            .collect()
    }

    pub fn selected_set(&self) -> &HashSet<Id> {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(ids: &[i64]) -> SelectionController<i64> {
        let mut s = SelectionController::new();
        s.reset(ids.to_vec());
        s
    }

    #[test]
    fn test_toggle_all_covers_rendered_rows_only() {
        let mut s = on_page(&[1, 2, 3]);
        s.toggle_all(true);
        assert!(s.is_all_selected());
        assert!(!s.is_partially_selected());
        assert_eq!(s.selected_ids(), vec![1, 2, 3]);

        s.toggle_all(false);
        assert_eq!(s.selected_count(), 0);
        assert!(!s.is_all_selected());
    }

    #[test]
    fn test_partial_selection() {
        let mut s = on_page(&[10, 20, 30]);
        s.toggle_row(&30, true);
        s.toggle_row(&10, true);
        assert!(s.is_partially_selected());
        assert_eq!(s.selected_ids(), vec![10, 30]);

        s.toggle_row(&20, true);
        assert!(s.is_all_selected());
        s.toggle_row(&20, false);
        assert!(s.is_partially_selected());
    }

    #[test]
    fn test_rows_off_page_are_ignored() {
        let mut s = on_page(&[1, 2]);
        s.toggle_row(&99, true);
        assert_eq!(s.selected_count(), 0);
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut s = on_page(&[1, 2]);
        s.toggle_all(true);
        s.reset(vec![3, 4]);
        assert_eq!(s.selected_count(), 0);
        assert!(!s.is_selected(&1));
    }

    #[test]
    fn test_empty_page_is_never_all_selected() {
        let mut s = on_page(&[]);
        s.toggle_all(true);
        assert!(!s.is_all_selected());
        assert!(!s.is_partially_selected());
    }
}
