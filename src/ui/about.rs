use crate::app::App;
use crate::ui::key_hints;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const BACK_LINK: &str = "[ Back ]";

pub fn draw_about(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("About")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let back_width = BACK_LINK.len() as u16;
    if chunks[0].width > back_width + 2 {
        let back = Rect::new(
            chunks[0].x + chunks[0].width - back_width - 1,
            chunks[0].y + 1,
            back_width,
            1,
        );
        f.render_widget(
            Paragraph::new(BACK_LINK).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            back,
        );
        app.hits.about_link = Some(back);
    }

    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled("Exam Prep Cards", heading)));
    text.push_line(Line::from(""));
    text.push_line(Line::from(
        "A study tool for a fixed set of exam questions. Browse every question \
         with its answer in list mode, or drill yourself with shuffled \
         flashcards that hide the answer until you flip them.",
    ));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("List mode", heading)));
    text.push_line(Line::from(
        "Type to search question text (any case) or question ids. More \
         questions load as you scroll to the end of the list.",
    ));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("Card mode", heading)));
    text.push_line(Line::from(
        "Every visit deals a fresh random order. Flip with Space or a click, \
         move with the arrow keys or the Previous/Next buttons.",
    ));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("Images", heading)));
    text.push_line(Line::from(
        "Questions with a figure show a \"View image\" line. Open it for an \
         enlarged view; Esc or a click outside closes it.",
    ));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "Assets are read from {}",
        app.settings.assets_root.display()
    )));

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let help = Paragraph::new(key_hints(&[("Esc/F1", "Back"), ("Ctrl+Q", "Quit")]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
