//! Selection arithmetic over a fixed item count and a set of disabled rows.

use std::collections::BTreeSet;

/// Outcome of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub index: usize,
    /// Signed distance travelled; 0 when the move was clamped or reverted.
    pub delta: isize,
}

impl Move {
    fn between(from: usize, to: usize) -> Self {
        let delta = if to >= from {
            (to - from) as isize
        } else {
            -((from - to) as isize)
        };
        Self { index: to, delta }
    }
}

/// First index navigation may rest on, or `None` when every row is disabled.
pub fn first_enabled(count: usize, disabled: &BTreeSet<usize>) -> Option<usize> {
    (0..count).find(|i| !disabled.contains(i))
}

pub fn move_down(selected: usize, count: usize, disabled: &BTreeSet<usize>) -> Move {
    if count == 0 {
        return Move::between(selected, selected);
    }

    let mut next = selected + 1;
    if next >= count {
        return Move::between(selected, count - 1);
    }

    while disabled.contains(&next) {
        next += 1;
        if next == count {
            return Move::between(selected, selected);
        }
    }

    Move::between(selected, next)
}

pub fn move_up(selected: usize, count: usize, disabled: &BTreeSet<usize>) -> Move {
    if count == 0 {
        return Move::between(selected, selected);
    }
    if selected == 0 {
        return Move::between(selected, 0);
    }

    let mut next = selected.min(count) - 1;
    while disabled.contains(&next) {
        if next == 0 {
            return Move::between(selected, selected);
        }
        next -= 1;
    }

    Move::between(selected, next)
}
