use ratatui::layout::Rect;

pub mod confirm_modal;
pub mod input_bar;
pub mod keybindings_modal;
pub mod logs;
pub mod notices;
pub mod pagination_bar;
pub mod record_table;
pub mod stats_bar;
pub mod status_bar;

/// A `width` x `height` rect centred in `area`, clamped to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(area, 50, 50), area);
    }
}
