use crate::app::App;
use crate::ui::image_link_line;
use crate::ui::layout::{calculate_card_chunks, CardLayout};
use crate::utils::{render_answer, render_markup, truncate_string};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_cards(f: &mut Frame, app: &mut App, area: Rect) {
    let layout = calculate_card_chunks(area);

    let Some(question) = app.current_card().cloned() else {
        let empty = Paragraph::new("The deck is empty: there are no questions to study.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Flashcards"));
        f.render_widget(empty, layout.card_area);
        draw_nav(f, app, &layout);
        return;
    };

    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let flipped = app.deck.is_flipped();

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut image_row = None;
    let border_color = if flipped {
        lines.push(Line::from(Span::styled(
            "Answer",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.extend(render_answer(&question.answer_body()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Space or click to see the question",
            hint_style,
        )));
        Color::Green
    } else {
        lines.extend(render_markup(&question.question));
        if question.image_path().is_some() {
            let inner_width = layout.card_area.width.saturating_sub(2).max(1);
            let body_rows = Paragraph::new(lines.clone())
                .wrap(Wrap { trim: false })
                .line_count(inner_width) as u16;
            lines.push(Line::from(""));
            lines.push(image_link_line());
            image_row = Some(body_rows + 1);
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Space or click to reveal the answer",
            hint_style,
        )));
        Color::Cyan
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            truncate_string(
                &format!("Question {} · Space flips · ←/→ navigate", question.id),
                usize::from(layout.card_area.width.saturating_sub(4)),
            ),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(layout.card_area);
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(card, layout.card_area);

    app.hits.card = Some(layout.card_area);
    app.hits.card_image = image_row
        .map(|offset| inner.y + offset)
        .filter(|row| *row < inner.y + inner.height)
        .map(|row| Rect::new(inner.x, row, inner.width, 1));

    draw_nav(f, app, &layout);
}

fn draw_nav(f: &mut Frame, app: &mut App, layout: &CardLayout) {
    let button_style = |enabled: bool| {
        if enabled {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let has_prev = app.deck.has_prev();
    let prev = Paragraph::new("◀ Previous")
        .alignment(Alignment::Center)
        .style(button_style(has_prev))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(button_style(has_prev)),
        );
    f.render_widget(prev, layout.prev_area);

    let counter = if app.deck.is_empty() {
        "0 of 0".to_string()
    } else {
        format!("{} of {}", app.deck.cursor() + 1, app.deck.len())
    };
    let counter = Paragraph::new(counter)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(counter, layout.counter_area);

    let has_next = app.deck.has_next();
    let next = Paragraph::new("Next ▶")
        .alignment(Alignment::Center)
        .style(button_style(has_next))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(button_style(has_next)),
        );
    f.render_widget(next, layout.next_area);

    app.hits.prev = Some(layout.prev_area);
    app.hits.next = Some(layout.next_area);
}
