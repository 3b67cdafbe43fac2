use crate::app::App;
use crate::loader::LoadState;
use crate::modal::ModalClick;
use crate::models::{Command, Screen, ViewMode};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

const PAGE_STEP: usize = 5;

fn hit(rect: Option<Rect>, position: Position) -> bool {
    rect.is_some_and(|rect| rect.contains(position))
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return None;
    }

    // The modal captures the keyboard while open.
    if app.modal.is_open() {
        if key.code == KeyCode::Esc {
            app.close_modal();
        }
        return None;
    }

    if key.code == KeyCode::F(1) || (ctrl && key.code == KeyCode::Char('a')) {
        app.toggle_about();
        return None;
    }

    if app.screen == Screen::About {
        if key.code == KeyCode::Esc {
            app.show_home();
        }
        return None;
    }

    if !app.is_ready() {
        let retry = matches!(key.code, KeyCode::Char('r') | KeyCode::Enter);
        if retry && matches!(app.dataset, LoadState::Failed(_)) {
            return Some(app.begin_reload());
        }
        return None;
    }

    match key.code {
        KeyCode::Char('s') if ctrl => {
            app.enter_cards();
            return None;
        }
        KeyCode::F(3) => {
            app.enter_cards();
            return None;
        }
        KeyCode::Char('l') if ctrl => {
            app.enter_list();
            return None;
        }
        KeyCode::F(2) => {
            app.enter_list();
            return None;
        }
        _ => {}
    }

    match app.mode {
        ViewMode::List => handle_list_key(app, key, ctrl),
        ViewMode::Cards => handle_card_key(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent, ctrl: bool) -> Option<Command> {
    match key.code {
        KeyCode::Enter => return app.open_selected_image(),
        KeyCode::Esc => app.set_search(""),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Up => app.list.select_prev(1),
        KeyCode::Down => app.list.select_next(1),
        KeyCode::PageUp => app.list.select_prev(PAGE_STEP),
        KeyCode::PageDown => app.list.select_next(PAGE_STEP),
        KeyCode::Home => app.list.select_first(),
        KeyCode::End => app.list.select_last(),
        KeyCode::Char(c) if !ctrl => app.push_search_char(c),
        _ => {}
    }
    None
}

fn handle_card_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char(' ') => app.flip_card(),
        KeyCode::Left => {
            app.prev_card();
        }
        KeyCode::Right => {
            app.next_card();
        }
        KeyCode::Enter | KeyCode::Char('i') => return app.open_card_image(),
        KeyCode::Esc => {
            app.enter_list();
        }
        _ => {}
    }
    None
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Option<Command> {
    let position = Position::new(mouse.column, mouse.row);

    if app.modal.is_open() {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            let target =
                ModalClick::classify(position, app.hits.modal_content, app.hits.modal_close);
            app.modal.click(target);
        }
        return None;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, position),
        MouseEventKind::ScrollDown if list_active(app) => {
            app.list.select_next(1);
            None
        }
        MouseEventKind::ScrollUp if list_active(app) => {
            app.list.select_prev(1);
            None
        }
        _ => None,
    }
}

fn list_active(app: &App) -> bool {
    app.screen == Screen::Home && app.mode == ViewMode::List && app.is_ready()
}

fn handle_click(app: &mut App, position: Position) -> Option<Command> {
    if hit(app.hits.about_link, position) {
        app.toggle_about();
        return None;
    }
    if app.screen == Screen::About {
        return None;
    }
    if hit(app.hits.retry, position) && matches!(app.dataset, LoadState::Failed(_)) {
        return Some(app.begin_reload());
    }
    if !app.is_ready() {
        return None;
    }
    if hit(app.hits.list_mode, position) {
        app.enter_list();
        return None;
    }
    if hit(app.hits.shuffle, position) {
        app.enter_cards();
        return None;
    }

    match app.mode {
        ViewMode::List => {
            let clicked = app
                .hits
                .list_items
                .iter()
                .find(|(_, item, _)| item.contains(position))
                .map(|(slot, _, image)| (*slot, hit(*image, position)));
            if let Some((slot, on_image)) = clicked {
                app.list.select(slot);
                if on_image {
                    return app.open_selected_image();
                }
            }
            None
        }
        ViewMode::Cards => {
            if hit(app.hits.prev, position) {
                app.prev_card();
            } else if hit(app.hits.next, position) {
                app.next_card();
            } else if hit(app.hits.card_image, position) {
                return app.open_card_image();
            } else if hit(app.hits.card, position) {
                app.flip_card();
            }
            None
        }
    }
}
