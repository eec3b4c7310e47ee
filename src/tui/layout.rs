use std::ops::Range;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Slice of `total` weeks, at most `capacity` wide, that keeps `selected`
/// visible and hugs the most recent weeks when possible.
pub fn visible_weeks(selected: usize, total: usize, capacity: usize) -> Range<usize> {
    if total <= capacity {
        return 0..total;
    }
    let start = selected
        .saturating_sub(capacity / 2)
        .min(total.saturating_sub(capacity));
    start..start + capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_fits() {
        assert_eq!(visible_weeks(3, 10, 20), 0..10);
    }

    #[test]
    fn latest_selection_shows_tail() {
        assert_eq!(visible_weeks(51, 52, 20), 32..52);
    }

    #[test]
    fn early_selection_shows_head() {
        assert_eq!(visible_weeks(0, 52, 20), 0..20);
    }

    #[test]
    fn window_always_contains_selection() {
        for selected in 0..52 {
            let window = visible_weeks(selected, 52, 13);
            assert!(window.contains(&selected), "{selected} not in {window:?}");
            assert_eq!(window.len(), 13);
        }
    }
}
