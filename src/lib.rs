pub mod app;
pub mod boundary;
pub mod config;
pub mod deck;
pub mod input;
pub mod listing;
pub mod loader;
pub mod logger;
pub mod modal;
pub mod models;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::App;
pub use config::{Config, Settings};
pub use deck::{shuffle, shuffle_with, Deck};
pub use listing::{filter_questions, ListView, PAGE_SIZE};
pub use loader::{load_questions, parse_questions, LoadError, LoadState, QuestionLoader};
pub use modal::{fit_to_viewport, ModalState, Viewport};
pub use models::{AnswerBody, AppEvent, Command, Question, Screen, ViewMode};
pub use utils::{render_answer, render_markup};
