use crate::app::App;
use crate::ui::layout::centered_box;
use crate::ui::key_hints;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const RETRY_BUTTON: &str = "[ Retry ]";

pub fn draw_loading(f: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading questions...")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

pub fn draw_load_error(f: &mut Frame, app: &mut App, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("Could not load questions");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Error:",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(message.to_string()));
    text.push_line(Line::from(""));
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    let text_height = (paragraph.line_count(inner.width) as u16).min(inner.height);
    f.render_widget(paragraph, Rect { height: text_height, ..inner });

    if inner.height > text_height {
        let button_width = (RETRY_BUTTON.len() as u16).min(inner.width);
        let button = Rect::new(
            inner.x + (inner.width - button_width) / 2,
            inner.y + text_height,
            button_width,
            1,
        );
        f.render_widget(
            Paragraph::new(RETRY_BUTTON).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            button,
        );
        app.hits.retry = Some(button);
    }
}

/// Full-screen fallback shown after a caught fault.
pub fn draw_fault(f: &mut Frame, message: &str) {
    let area = centered_box(70, 12, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Something went wrong.",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(message.to_string()));
    text.push_line(Line::from(""));
    text.push_line(key_hints(&[("r / Enter", "Reset"), ("Ctrl+Q", "Quit")]));

    let fault = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        );
    f.render_widget(fault, area);
}
