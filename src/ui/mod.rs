pub mod about;
pub mod card;
pub mod layout;
pub mod list;
pub mod modal;
pub mod status;

pub use layout::{calculate_card_chunks, calculate_home_chunks, calculate_list_chunks};
pub use status::draw_fault;

use crate::app::App;
use crate::loader::LoadState;
use crate::models::{Screen, ViewMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const ABOUT_LINK: &str = "[ About ]";

/// Draws one frame and records the clickable regions in `app.hits`.
pub fn draw(f: &mut Frame, app: &mut App) {
    app.hits.clear();
    match app.screen {
        Screen::About => about::draw_about(f, app),
        Screen::Home => draw_home(f, app),
    }
    if app.modal.is_open() {
        modal::draw_modal(f, app);
    }
}

fn draw_home(f: &mut Frame, app: &mut App) {
    let layout = calculate_home_chunks(f.area());

    draw_header(f, app, layout.header_area);

    if app.is_ready() {
        draw_mode_selector(f, app, layout.modes_area);
    }

    match &app.dataset {
        LoadState::Pending => status::draw_loading(f, layout.body_area),
        LoadState::Failed(error) => {
            let message = error.to_string();
            status::draw_load_error(f, app, &message, layout.body_area);
        }
        LoadState::Ready(_) => match app.mode {
            ViewMode::List => list::draw_list(f, app, layout.body_area),
            ViewMode::Cards => card::draw_cards(f, app, layout.body_area),
        },
    }

    draw_help(f, app, layout.help_area);
}

fn draw_header(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new("Exam Prep Cards")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, inner);

    let link_width = ABOUT_LINK.len() as u16;
    if inner.width > link_width {
        let link_area = Rect::new(
            inner.x + inner.width - link_width,
            inner.y,
            link_width,
            1,
        );
        f.render_widget(
            Paragraph::new(ABOUT_LINK).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            link_area,
        );
        app.hits.about_link = Some(link_area);
    }
}

fn draw_mode_selector(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let list_button = Paragraph::new("List (Ctrl+L)")
        .alignment(Alignment::Center)
        .style(mode_style(app.mode == ViewMode::List))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(mode_style(app.mode == ViewMode::List)),
        );
    f.render_widget(list_button, chunks[0]);

    let shuffle_button = Paragraph::new("Shuffle flashcards (Ctrl+S)")
        .alignment(Alignment::Center)
        .style(mode_style(app.mode == ViewMode::Cards))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(mode_style(app.mode == ViewMode::Cards)),
        );
    f.render_widget(shuffle_button, chunks[1]);

    app.hits.list_mode = Some(chunks[0]);
    app.hits.shuffle = Some(chunks[1]);
}

fn mode_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let bindings: &[(&str, &str)] = match (&app.dataset, app.mode) {
        (LoadState::Pending, _) => &[("F1", "About"), ("Ctrl+Q", "Quit")],
        (LoadState::Failed(_), _) => &[("r", "Retry"), ("F1", "About"), ("Ctrl+Q", "Quit")],
        (LoadState::Ready(_), ViewMode::List) => &[
            ("Type", "Search"),
            ("↑/↓", "Select"),
            ("Enter", "Image"),
            ("Ctrl+S", "Shuffle"),
            ("F1", "About"),
            ("Ctrl+Q", "Quit"),
        ],
        (LoadState::Ready(_), ViewMode::Cards) => &[
            ("Space", "Flip"),
            ("←/→", "Navigate"),
            ("i", "Image"),
            ("Esc", "List"),
            ("Ctrl+S", "Reshuffle"),
            ("Ctrl+Q", "Quit"),
        ],
    };

    let help = Paragraph::new(key_hints(bindings))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

/// A help line of highlighted keys followed by their labels.
pub fn key_hints(bindings: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(bindings.len() * 2);
    for (key, label) in bindings {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    Line::from(spans)
}

/// The clickable line under a question that has an image.
pub fn image_link_line() -> Line<'static> {
    Line::from(Span::styled(
        "▣ View image (Enter)",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    ))
}
