use crate::app::App;
use crate::loader::LoadState;
use crate::models::Question;
use crate::ui::image_link_line;
use crate::ui::layout::calculate_list_chunks;
use crate::utils::{render_answer, render_markup};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// One question laid out for a given width.
struct ItemView {
    lines: Vec<Line<'static>>,
    /// Wrapped rows taken by the question markup.
    body_rows: u16,
    has_image: bool,
    /// Total rows including borders.
    height: u16,
}

fn item_view(question: &Question, inner_width: u16) -> ItemView {
    let body = render_markup(&question.question);
    let body_rows = Paragraph::new(body.clone())
        .wrap(Wrap { trim: false })
        .line_count(inner_width) as u16;

    let has_image = question.image_path().is_some();
    let mut lines = body;
    if has_image {
        lines.push(image_link_line());
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Answer:",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    lines.extend(render_answer(&question.answer_body()));

    let rows = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(inner_width) as u16;

    ItemView {
        lines,
        body_rows,
        has_image,
        height: rows.saturating_add(2),
    }
}

pub fn draw_list(f: &mut Frame, app: &mut App, area: Rect) {
    let questions = match &app.dataset {
        LoadState::Ready(questions) => Arc::clone(questions),
        _ => return,
    };
    let layout = calculate_list_chunks(area);
    draw_search(f, app, questions.len(), layout.search_area);

    let items_area = layout.items_area;
    let displayed = app.list.displayed().to_vec();
    if displayed.is_empty() {
        let empty = Paragraph::new(format!(
            "No questions match \"{}\"",
            app.list.search()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, items_area);
        app.list.report_sentinel(true);
        return;
    }

    let inner_width = items_area.width.saturating_sub(2).max(1);
    let selected = app.list.selected().min(displayed.len() - 1);

    // Lay out from the current scroll through the selection, then scroll
    // down until the selected item fits. On the last item the sentinel row
    // below it has to fit too.
    let start = app.list.scroll().min(selected);
    let views: Vec<ItemView> = (start..=selected)
        .map(|position| item_view(&questions[displayed[position]], inner_width))
        .collect();
    let sentinel_row = u32::from(selected + 1 == displayed.len());
    let mut scroll = start;
    let mut total: u32 = views.iter().map(|view| u32::from(view.height)).sum();
    while scroll < selected && total + sentinel_row > u32::from(items_area.height) {
        total -= u32::from(views[scroll - start].height);
        scroll += 1;
    }
    app.list.set_scroll(scroll);

    let mut cached = views.into_iter().skip(scroll - start);
    let bottom = items_area.y + items_area.height;
    let mut y = items_area.y;
    let mut position = scroll;
    let mut all_fit = true;

    while position < displayed.len() {
        if y >= bottom {
            all_fit = false;
            break;
        }
        let question = &questions[displayed[position]];
        let view = match cached.next() {
            Some(view) => view,
            None => item_view(question, inner_width),
        };

        let available = bottom - y;
        if view.height > available {
            all_fit = false;
        }
        let rect = Rect::new(items_area.x, y, items_area.width, view.height.min(available));

        let is_selected = position == selected;
        let (border_style, title_style) = if is_selected {
            (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().add_modifier(Modifier::BOLD),
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!("Question {}", question.id), title_style));
        let inner = block.inner(rect);

        let image_rect = if view.has_image {
            let row = inner.y + view.body_rows;
            (row < inner.y + inner.height).then(|| Rect::new(inner.x, row, inner.width, 1))
        } else {
            None
        };

        let paragraph = Paragraph::new(view.lines)
            .wrap(Wrap { trim: false })
            .block(block);
        f.render_widget(paragraph, rect);

        app.hits.list_items.push((position, rect, image_rect));
        y += rect.height;
        position += 1;
    }

    // The sentinel is the row right after the last loaded item. A last item
    // taller than the list counts as reaching it once scrolled to the top.
    let sentinel_in_view =
        (all_fit && position == displayed.len() && y < bottom) || scroll + 1 == displayed.len();
    app.list.report_sentinel(sentinel_in_view);
}

fn draw_search(f: &mut Frame, app: &App, total: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            "Search ({} of {})",
            app.list.filtered().len(),
            total
        ));
    let inner = block.inner(area);

    let search = app.list.search();
    let content = if search.is_empty() {
        Line::from(Span::styled(
            "Search by question text or id",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(search.to_string())
    };

    // Keep the end of a long search visible.
    let text_width = search.width() as u16;
    let offset = text_width.saturating_sub(inner.width.saturating_sub(1));
    let input = Paragraph::new(content).scroll((0, offset)).block(block);
    f.render_widget(input, area);

    if !app.modal.is_open() && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + text_width - offset, inner.y));
    }
}
