use crate::filter::{FilterState, LetterFilter};

use super::ui_helpers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum WorkFocus {
    Search,
    Letters,
    Grid,
}

#[derive(Debug)]
pub(super) struct WorkBrowser {
    pub(super) focus: WorkFocus,
    pub(super) filter: FilterState,
    letters: Vec<LetterFilter>,
    letter_cursor: usize,
    pub(super) grid_cursor: usize,
    pub(super) columns: usize,
}

impl Default for WorkBrowser {
    fn default() -> Self {
        Self {
            focus: WorkFocus::Grid,
            filter: FilterState::default(),
            letters: LetterFilter::strip(),
            letter_cursor: 0,
            grid_cursor: 0,
            columns: 1,
        }
    }
}

impl WorkBrowser {
    pub(super) fn letters(&self) -> &[LetterFilter] {
        &self.letters
    }

    pub(super) fn letter_cursor(&self) -> usize {
        self.letter_cursor
    }

    pub(super) fn is_typing(&self) -> bool {
        self.focus == WorkFocus::Search
    }

    pub(super) fn step_letter(&mut self, forward: bool) {
        let len = self.letters.len();
        self.letter_cursor = if forward {
            ui_helpers::wrap_next_index(self.letter_cursor, len)
        } else {
            ui_helpers::wrap_prev_index(self.letter_cursor, len)
        };
        self.filter.letter = self
            .letters
            .get(self.letter_cursor)
            .copied()
            .unwrap_or(LetterFilter::All);
        self.grid_cursor = 0;
    }

    pub(super) fn push_search(&mut self, c: char) {
        self.filter.search_text.push(c);
        self.grid_cursor = 0;
    }

    pub(super) fn pop_search(&mut self) {
        self.filter.search_text.pop();
        self.grid_cursor = 0;
    }

    pub(super) fn clear_filters(&mut self) {
        self.filter.clear();
        self.letter_cursor = 0;
        self.grid_cursor = 0;
    }

    /// Moves the tile cursor; returns `false` when the move leaves the grid upwards.
    pub(super) fn move_grid(&mut self, d_row: isize, d_col: isize, len: usize) -> bool {
        if len == 0 {
            return d_row >= 0;
        }
        let columns = self.columns.max(1);
        let cursor = self.grid_cursor.min(len - 1);

        if d_col != 0 {
            self.grid_cursor = if d_col > 0 {
                ui_helpers::wrap_next_index(cursor, len)
            } else {
                ui_helpers::wrap_prev_index(cursor, len)
            };
            return true;
        }

        if d_row < 0 {
            if cursor < columns {
                return false;
            }
            self.grid_cursor = cursor - columns;
        } else if d_row > 0 && cursor + columns < len {
            self.grid_cursor = cursor + columns;
        }
        true
    }

    pub(super) fn clamp_cursor(&mut self, len: usize) {
        self.grid_cursor = self.grid_cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_strip_drives_filter() {
        let mut browser = WorkBrowser::default();
        assert_eq!(browser.filter.letter, LetterFilter::All);

        browser.step_letter(true);
        assert_eq!(browser.filter.letter, LetterFilter::Letter('A'));
        browser.step_letter(false);
        browser.step_letter(false);
        assert_eq!(browser.filter.letter, LetterFilter::Letter('Z'));
    }

    #[test]
    fn test_search_edits_reset_cursor() {
        let mut browser = WorkBrowser {
            grid_cursor: 4,
            ..WorkBrowser::default()
        };
        browser.push_search('s');
        assert_eq!(browser.filter.search_text, "s");
        assert_eq!(browser.grid_cursor, 0);
        browser.pop_search();
        assert!(!browser.filter.is_active());
    }

    #[test]
    fn test_clear_filters_resets_strip() {
        let mut browser = WorkBrowser::default();
        browser.step_letter(true);
        browser.push_search('x');
        browser.clear_filters();
        assert!(!browser.filter.is_active());
        assert_eq!(browser.letter_cursor(), 0);
    }

    #[test]
    fn test_grid_moves_by_rows_and_columns() {
        let mut browser = WorkBrowser {
            columns: 3,
            ..WorkBrowser::default()
        };

        assert!(browser.move_grid(1, 0, 7));
        assert_eq!(browser.grid_cursor, 3);
        assert!(browser.move_grid(1, 0, 7));
        assert_eq!(browser.grid_cursor, 6);
        // no tile below the last row
        assert!(browser.move_grid(1, 0, 7));
        assert_eq!(browser.grid_cursor, 6);

        assert!(browser.move_grid(0, 1, 7));
        assert_eq!(browser.grid_cursor, 0);
        assert!(!browser.move_grid(-1, 0, 7));
        assert_eq!(browser.grid_cursor, 0);
    }

    #[test]
    fn test_clamp_cursor() {
        let mut browser = WorkBrowser {
            grid_cursor: 9,
            ..WorkBrowser::default()
        };
        browser.clamp_cursor(3);
        assert_eq!(browser.grid_cursor, 2);
        browser.clamp_cursor(0);
        assert_eq!(browser.grid_cursor, 0);
    }
}
