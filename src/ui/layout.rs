use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest a flashcard gets, in columns.
pub const CARD_MAX_WIDTH: u16 = 80;

pub struct HomeLayout {
    pub header_area: Rect,
    pub modes_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct ListLayout {
    pub search_area: Rect,
    pub items_area: Rect,
}

pub struct CardLayout {
    pub card_area: Rect,
    pub prev_area: Rect,
    pub counter_area: Rect,
    pub next_area: Rect,
}

pub fn calculate_home_chunks(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    HomeLayout {
        header_area: chunks[0],
        modes_area: chunks[1],
        body_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_list_chunks(area: Rect) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    ListLayout {
        search_area: chunks[0],
        items_area: chunks[1],
    }
}

pub fn calculate_card_chunks(area: Rect) -> CardLayout {
    let width = area.width.min(CARD_MAX_WIDTH);
    let column = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(column);

    let nav = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(8),
            Constraint::Length(16),
        ])
        .split(rows[1]);

    CardLayout {
        card_area: rows[0],
        prev_area: nav[0],
        counter_area: nav[1],
        next_area: nav[2],
    }
}

/// Centre a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_layout() {
        let layout = calculate_home_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.modes_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        // Margin 1 leaves 38 rows; fixed parts take 9.
        assert_eq!(layout.body_area.height, 29);
    }

    #[test]
    fn test_list_layout() {
        let layout = calculate_list_chunks(Rect::new(0, 0, 80, 20));
        assert_eq!(layout.search_area.height, 3);
        assert_eq!(layout.items_area.height, 17);
    }

    #[test]
    fn test_card_layout_is_capped_and_centered() {
        let layout = calculate_card_chunks(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.card_area.width, CARD_MAX_WIDTH);
        assert_eq!(layout.card_area.x, 20);
        assert_eq!(layout.card_area.height, 27);
        assert_eq!(layout.prev_area.width, 16);
        assert_eq!(layout.next_area.width, 16);
        assert_eq!(layout.counter_area.width, CARD_MAX_WIDTH - 32);
    }

    #[test]
    fn test_centered_box_shrinks_to_area() {
        let area = Rect::new(0, 0, 50, 20);
        assert_eq!(centered_box(20, 10, area), Rect::new(15, 5, 20, 10));
        assert_eq!(centered_box(80, 40, area), area);
    }
}
