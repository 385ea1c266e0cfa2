//! Layout calculations and text utilities for the TUI.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Calculate a centered popup rectangle within a container.
pub fn popup_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    r: Rect,
) -> Rect {
    let max_width = r.width.saturating_sub(2).max(1);
    let max_height = r.height.saturating_sub(2).max(1);

    let target_width = (r.width.saturating_mul(percent_x) / 100).max(min_width);
    let target_height = (r.height.saturating_mul(percent_y) / 100).max(min_height);

    let width = target_width.min(max_width);
    let height = target_height.min(max_height);

    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Top-right anchored rectangle for the notification toast.
pub fn toast_rect(content_width: usize, r: Rect) -> Rect {
    let width = (content_width as u16 + 4).min(r.width.saturating_sub(2)).max(10);
    let x = r.x + r.width.saturating_sub(width + 1);
    Rect {
        x,
        y: r.y + 1,
        width,
        height: 3.min(r.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_bounded() {
        let outer = Rect::new(0, 0, 100, 40);
        let popup = popup_rect(50, 50, 10, 5, outer);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn popup_respects_minimums_on_small_terminals() {
        let outer = Rect::new(0, 0, 30, 10);
        let popup = popup_rect(50, 50, 20, 7, outer);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 7);
    }

    #[test]
    fn toast_hugs_the_top_right() {
        let outer = Rect::new(0, 0, 80, 24);
        let toast = toast_rect(20, outer);
        assert_eq!(toast.y, 1);
        assert_eq!(toast.x + toast.width + 1, 80);
    }
}
