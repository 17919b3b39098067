//! Tracks which rows of a scrolling menu are on screen.

use serde::{Deserialize, Serialize};

/// How the visible window follows the selection once it leaves the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollPolicy {
    /// Shift the window by exactly as far as the selection moved.
    #[default]
    MinimalShift,
    /// Snap to the ends of the list at the first and last item, otherwise move
    /// the nearest edge onto the selection.
    Anchored,
}

/// Inclusive range of item indices currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    pub first: usize,
    pub last: usize,
}

impl ScrollWindow {
    pub fn new(selected: usize, visible: usize, count: usize) -> Self {
        let span = visible.clamp(1, count.max(1));
        let first = selected.min(count.saturating_sub(span));
        Self {
            first,
            last: first + span - 1,
        }
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }

    /// Brings `selected` back inside the window after a move of `delta` rows.
    pub fn follow(&mut self, selected: usize, delta: isize, count: usize, policy: ScrollPolicy) {
        if self.contains(selected) {
            return;
        }

        match policy {
            ScrollPolicy::MinimalShift => {
                let first = self.first.saturating_add_signed(delta);
                self.place(first, count);
                if !self.contains(selected) {
                    self.nudge(selected, count);
                }
            }
            ScrollPolicy::Anchored => {
                if selected == 0 {
                    self.place(0, count);
                } else if selected + 1 >= count {
                    self.place(count, count);
                } else {
                    self.nudge(selected, count);
                }
            }
        }
    }

    fn nudge(&mut self, selected: usize, count: usize) {
        let len = self.len();
        if selected < self.first {
            self.place(selected, count);
        } else if selected > self.last {
            self.place((selected + 1).saturating_sub(len), count);
        }
    }

    /// Moves the window to start at `first`, kept within `0..count`.
    fn place(&mut self, first: usize, count: usize) {
        let len = self.len();
        let first = first.min(count.saturating_sub(len));
        self.first = first;
        self.last = first + len - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_selection() {
        let window = ScrollWindow::new(2, 9, 20);
        assert_eq!(window, ScrollWindow { first: 2, last: 10 });
        assert_eq!(window.len(), 9);
    }

    #[test]
    fn test_new_pulls_back_near_end() {
        let window = ScrollWindow::new(18, 9, 20);
        assert_eq!(window, ScrollWindow { first: 11, last: 19 });
    }

    #[test]
    fn test_new_with_fewer_items_than_rows() {
        let window = ScrollWindow::new(0, 9, 4);
        assert_eq!(window, ScrollWindow { first: 0, last: 3 });
    }

    #[test]
    fn test_follow_is_noop_inside_window() {
        let mut window = ScrollWindow::new(0, 9, 20);
        window.follow(5, 1, 20, ScrollPolicy::MinimalShift);
        assert_eq!(window, ScrollWindow { first: 0, last: 8 });
    }

    #[test]
    fn test_minimal_shift_moves_by_delta() {
        let mut window = ScrollWindow::new(0, 9, 20);
        window.follow(11, 3, 20, ScrollPolicy::MinimalShift);
        assert_eq!(window, ScrollWindow { first: 3, last: 11 });
    }

    #[test]
    fn test_minimal_shift_clamps_to_end() {
        let mut window = ScrollWindow { first: 0, last: 8 };
        window.follow(11, 4, 12, ScrollPolicy::MinimalShift);
        assert_eq!(window, ScrollWindow { first: 3, last: 11 });
    }

    #[test]
    fn test_minimal_shift_without_delta_snaps_edge() {
        let mut window = ScrollWindow { first: 0, last: 8 };
        window.follow(15, 0, 20, ScrollPolicy::MinimalShift);
        assert_eq!(window, ScrollWindow { first: 7, last: 15 });
    }

    #[test]
    fn test_anchored_snaps_to_ends() {
        let mut window = ScrollWindow { first: 5, last: 13 };
        window.follow(19, 6, 20, ScrollPolicy::Anchored);
        assert_eq!(window, ScrollWindow { first: 11, last: 19 });

        window.follow(0, -19, 20, ScrollPolicy::Anchored);
        assert_eq!(window, ScrollWindow { first: 0, last: 8 });
    }

    #[test]
    fn test_anchored_nudges_one_row() {
        let mut window = ScrollWindow { first: 0, last: 8 };
        window.follow(9, 1, 20, ScrollPolicy::Anchored);
        assert_eq!(window, ScrollWindow { first: 1, last: 9 });

        let mut window = ScrollWindow { first: 4, last: 12 };
        window.follow(3, -1, 20, ScrollPolicy::Anchored);
        assert_eq!(window, ScrollWindow { first: 3, last: 11 });
    }

    #[test]
    fn test_containment_over_move_sequence() {
        use crate::navigator::{move_down, move_up};
        use std::collections::BTreeSet;

        let count = 20;
        let disabled: BTreeSet<usize> = [3, 4, 9, 10, 11, 17].into_iter().collect();

        for policy in [ScrollPolicy::MinimalShift, ScrollPolicy::Anchored] {
            let mut selected = 0;
            let mut window = ScrollWindow::new(selected, 9, count);
            let steps = std::iter::repeat_n(true, 25).chain(std::iter::repeat_n(false, 25));
            for down in steps {
                let m = if down {
                    move_down(selected, count, &disabled)
                } else {
                    move_up(selected, count, &disabled)
                };
                selected = m.index;
                window.follow(selected, m.delta, count, policy);
                assert!(window.contains(selected), "{policy:?}: {window:?} lost {selected}");
                assert_eq!(window.len(), 9);
                assert!(window.last < count);
            }
        }
    }

    #[test]
    fn test_selecting_last_item_reaches_end() {
        let mut window = ScrollWindow::new(0, 9, 20);
        for selected in 1..20 {
            window.follow(selected, 1, 20, ScrollPolicy::MinimalShift);
        }
        assert_eq!(window.last, 19);
        assert_eq!(window.first, 11);
    }
}
