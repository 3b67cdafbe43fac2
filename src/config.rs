use clap::Parser;
use std::path::{Path, PathBuf};

/// Launch options for the study tool.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "exam-prep-cards",
    version,
    about = "Browse exam questions as a searchable list or a shuffled flashcard deck"
)]
pub struct Config {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "EXAM_CARDS_QUESTIONS",
        default_value = "questions.json",
        help = "Question dataset (JSON array)"
    )]
    pub questions: PathBuf,
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "EXAM_CARDS_ASSETS",
        help = "Directory image paths resolve against (default: the dataset's directory)"
    )]
    pub assets: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        env = "EXAM_CARDS_LOG",
        default_value = "exam_cards.log"
    )]
    pub log_file: PathBuf,
    #[arg(
        long,
        value_name = "PX",
        default_value_t = 8,
        help = "Cell width used when the terminal does not report its pixel size"
    )]
    pub cell_width: u16,
    #[arg(
        long,
        value_name = "PX",
        default_value_t = 16,
        help = "Cell height used when the terminal does not report its pixel size"
    )]
    pub cell_height: u16,
}

impl Config {
    pub fn assets_root(&self) -> PathBuf {
        match &self.assets {
            Some(dir) => dir.clone(),
            None => self
                .questions
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            assets_root: self.assets_root(),
            cell_size: (
                f64::from(self.cell_width.max(1)),
                f64::from(self.cell_height.max(1)),
            ),
        }
    }
}

/// The part of the configuration the view state needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub assets_root: PathBuf,
    pub cell_size: (f64, f64),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::new(),
            cell_size: (8.0, 16.0),
        }
    }
}

impl Settings {
    /// Dataset image paths are web-root absolute (`/images/q1.png`) or
    /// relative; both live under the assets root.
    pub fn resolve_image(&self, image_path: &str) -> PathBuf {
        self.assets_root.join(image_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["exam-prep-cards"]);
        assert_eq!(config.questions, PathBuf::from("questions.json"));
        assert_eq!(config.cell_width, 8);
        assert_eq!(config.cell_height, 16);
        assert_eq!(config.settings().cell_size, (8.0, 16.0));
    }

    #[test]
    fn test_assets_default_to_dataset_directory() {
        let config = Config::parse_from(["exam-prep-cards", "--questions", "data/questions.json"]);
        assert_eq!(config.assets_root(), PathBuf::from("data"));

        let config = Config::parse_from([
            "exam-prep-cards",
            "--questions",
            "data/questions.json",
            "--assets",
            "public",
        ]);
        assert_eq!(config.assets_root(), PathBuf::from("public"));
    }

    #[test]
    fn test_resolve_web_root_image_path() {
        let settings = Settings {
            assets_root: PathBuf::from("public"),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve_image("/images/q1.png"),
            PathBuf::from("public/images/q1.png")
        );
        assert_eq!(
            settings.resolve_image("images/q1.png"),
            PathBuf::from("public/images/q1.png")
        );
    }
}
