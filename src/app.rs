use crate::config::Settings;
use crate::deck::Deck;
use crate::listing::ListView;
use crate::loader::{LoadError, LoadState};
use crate::logger;
use crate::modal::{ImageRequest, ModalState, Viewport};
use crate::models::{Command, HitMap, Question, Screen, ViewMode};
use std::sync::Arc;

/// All view state of the study tool. The UI task is its only writer.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub screen: Screen,
    pub dataset: LoadState,
    pub mode: ViewMode,
    pub list: ListView,
    pub deck: Deck,
    pub modal: ModalState,
    pub hits: HitMap,
    pub viewport: Viewport,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let viewport = Viewport::from_cells(80, 24, settings.cell_size);
        let mut list = ListView::default();
        list.mount();
        Self {
            settings,
            screen: Screen::Home,
            dataset: LoadState::Pending,
            mode: ViewMode::List,
            list,
            deck: Deck::default(),
            modal: ModalState::default(),
            hits: HitMap::default(),
            viewport,
            should_quit: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        self.dataset.questions()
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.is_ready()
    }

    /// Marks the dataset pending and asks the loop to issue a new load.
    pub fn begin_reload(&mut self) -> Command {
        logger::log("Retrying dataset load");
        self.dataset = LoadState::Pending;
        Command::Reload
    }

    pub fn dataset_loaded(&mut self, result: Result<Vec<Question>, LoadError>) {
        match result {
            Ok(questions) => {
                self.dataset = LoadState::Ready(Arc::new(questions));
                self.list.refresh(self.dataset.questions());
                self.deck = Deck::default();
                if self.mode == ViewMode::Cards {
                    self.enter_cards();
                }
            }
            Err(e) => {
                self.dataset = LoadState::Failed(e);
            }
        }
    }

    /// Reshuffles on every entry, also when already in card mode.
    pub fn enter_cards(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.deck = Deck::shuffled(self.dataset.questions().len());
        self.mode = ViewMode::Cards;
        self.list.unmount();
        logger::log(&format!("Card mode: shuffled {} cards", self.deck.len()));
        true
    }

    pub fn enter_list(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.mode = ViewMode::List;
        self.list.reset_pagination();
        if self.screen == Screen::Home {
            self.list.mount();
        }
        logger::log("List mode");
        true
    }

    pub fn show_about(&mut self) {
        self.screen = Screen::About;
        self.list.unmount();
    }

    pub fn show_home(&mut self) {
        self.screen = Screen::Home;
        if self.mode == ViewMode::List {
            self.list.mount();
        }
    }

    pub fn toggle_about(&mut self) {
        match self.screen {
            Screen::Home => self.show_about(),
            Screen::About => self.show_home(),
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.list.set_search(search, self.dataset.questions());
    }

    pub fn push_search_char(&mut self, c: char) {
        self.list.push_search_char(c, self.dataset.questions());
    }

    pub fn pop_search_char(&mut self) {
        self.list.pop_search_char(self.dataset.questions());
    }

    pub fn next_card(&mut self) -> bool {
        self.deck.next()
    }

    pub fn prev_card(&mut self) -> bool {
        self.deck.prev()
    }

    pub fn flip_card(&mut self) {
        self.deck.flip();
    }

    pub fn current_card(&self) -> Option<&Question> {
        self.deck
            .current()
            .and_then(|index| self.dataset.questions().get(index))
    }

    /// Opens the modal for a question's image. Questions without a usable
    /// image path open nothing.
    pub fn open_image(&mut self, question_index: usize) -> Option<Command> {
        let question = self.dataset.questions().get(question_index)?;
        let image_path = question.image_path()?;
        let src = self.settings.resolve_image(image_path);
        let request = ImageRequest {
            src: src.clone(),
            alt: question.image_alt(),
            caption: question.question.clone(),
        };
        let request_id = self.modal.open(request);
        Some(Command::LoadImage {
            request_id,
            path: src,
        })
    }

    pub fn open_selected_image(&mut self) -> Option<Command> {
        let index = self.list.selected_question()?;
        self.open_image(index)
    }

    pub fn open_card_image(&mut self) -> Option<Command> {
        let index = self.deck.current()?;
        self.open_image(index)
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.close()
    }

    pub fn image_loaded(&mut self, request_id: u64, result: Result<image::RgbaImage, String>) {
        self.modal.image_loaded(request_id, result);
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.viewport = Viewport::from_terminal(columns, rows, self.settings.cell_size);
    }

    /// Delivers post-draw callbacks. Returns whether state changed and the
    /// frame should be redrawn right away.
    pub fn after_draw(&mut self) -> bool {
        self.list.deliver_sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::PAGE_SIZE;
    use std::path::PathBuf;

    fn sample_questions(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| Question {
                id: i.to_string(),
                question: format!("Question body {}", i),
                answer: format!("first {}; second {}", i, i),
                has_image: i % 2 == 0,
                image_path: (i % 2 == 0).then(|| format!("/images/q{}.png", i)),
            })
            .collect()
    }

    fn ready_app(n: usize) -> App {
        let mut app = App::new(Settings {
            assets_root: PathBuf::from("public"),
            ..Settings::default()
        });
        app.dataset_loaded(Ok(sample_questions(n)));
        app
    }

    #[test]
    fn test_initial_state() {
        let app = App::new(Settings::default());
        assert_eq!(app.mode, ViewMode::List);
        assert_eq!(app.screen, Screen::Home);
        assert!(matches!(app.dataset, LoadState::Pending));
        assert!(app.list.is_mounted());
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_mode_switch_requires_ready_dataset() {
        let mut app = App::new(Settings::default());
        assert!(!app.enter_cards());
        assert_eq!(app.mode, ViewMode::List);
    }

    #[test]
    fn test_entering_cards_resets_deck() {
        let mut app = ready_app(10);
        assert!(app.enter_cards());
        app.next_card();
        app.next_card();
        app.flip_card();
        assert_eq!(app.deck.cursor(), 2);

        assert!(app.enter_cards());
        assert_eq!(app.deck.cursor(), 0);
        assert!(!app.deck.is_flipped());
        assert_eq!(app.deck.len(), 10);
        assert!(!app.list.is_mounted());
    }

    #[test]
    fn test_returning_to_list_resets_pagination() {
        let mut app = ready_app(60);
        app.list.grow();
        assert_eq!(app.list.loaded_count(), 40);
        app.enter_cards();
        app.enter_list();
        assert_eq!(app.mode, ViewMode::List);
        assert_eq!(app.list.loaded_count(), PAGE_SIZE);
        assert!(app.list.is_mounted());
    }

    #[test]
    fn test_sentinel_after_switching_to_cards_is_ignored() {
        let mut app = ready_app(60);
        app.list.report_sentinel(true);
        app.enter_cards();
        assert!(!app.after_draw());
        assert_eq!(app.list.loaded_count(), PAGE_SIZE);
    }

    #[test]
    fn test_after_draw_grows_list() {
        let mut app = ready_app(45);
        app.list.report_sentinel(true);
        assert!(app.after_draw());
        assert_eq!(app.list.loaded_count(), 40);
        assert!(!app.after_draw());
    }

    #[test]
    fn test_about_screen_detaches_sentinel() {
        let mut app = ready_app(5);
        app.show_about();
        assert!(!app.list.is_mounted());
        app.show_home();
        assert!(app.list.is_mounted());

        app.enter_cards();
        app.toggle_about();
        app.toggle_about();
        assert!(!app.list.is_mounted());
    }

    #[test]
    fn test_open_image_resolves_against_assets() {
        let mut app = ready_app(4);
        let command = app.open_image(1).unwrap();
        match command {
            Command::LoadImage { path, .. } => {
                assert_eq!(path, PathBuf::from("public/images/q2.png"))
            }
            other => panic!("unexpected command: {:?}", other),
        }
        let modal = app.modal.current().unwrap();
        assert_eq!(modal.request.alt, "Image for question 2");
        assert_eq!(modal.request.caption, "Question body 2");
    }

    #[test]
    fn test_reset_app_drops_image_from_previous_app() {
        let mut faulted = ready_app(4);
        let stale_id = match faulted.open_image(1) {
            Some(Command::LoadImage { request_id, .. }) => request_id,
            other => panic!("unexpected command: {:?}", other),
        };

        let mut app = ready_app(4);
        app.open_image(1).unwrap();
        app.image_loaded(stale_id, Ok(image::RgbaImage::new(8, 8)));
        assert_eq!(app.modal.current().unwrap().natural_size(), None);
    }

    #[test]
    fn test_question_without_image_opens_nothing() {
        let mut app = ready_app(4);
        assert!(app.open_image(0).is_none());
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_failed_load_then_retry() {
        let mut app = App::new(Settings::default());
        app.dataset_loaded(Err(LoadError::Schema(
            serde_json::from_str::<Vec<Question>>("{").unwrap_err(),
        )));
        assert!(matches!(app.dataset, LoadState::Failed(_)));
        assert_eq!(app.begin_reload(), Command::Reload);
        assert!(matches!(app.dataset, LoadState::Pending));
    }

    #[test]
    fn test_search_filters_loaded_questions() {
        let mut app = ready_app(30);
        app.set_search("body 7");
        assert_eq!(app.list.filtered(), &[6]);
        app.pop_search_char();
        app.push_search_char('8');
        assert_eq!(app.list.filtered(), &[7]);
    }
}
