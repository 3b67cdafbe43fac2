use crate::loader::LoadError;
use ratatui::layout::Rect;
use serde::{Deserialize, Deserializer, Serialize};

/// One exam question as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default, deserialize_with = "bool_or_absent")]
    pub has_image: bool,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub image_path: Option<String>,
}

impl Question {
    /// The image path, if one is actually present. A record may claim
    /// `hasImage` without a usable path; that counts as no image.
    pub fn image_path(&self) -> Option<&str> {
        self.image_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    pub fn image_alt(&self) -> String {
        format!("Image for question {}", self.id)
    }

    pub fn answer_body(&self) -> AnswerBody {
        AnswerBody::parse(&self.answer)
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

// Optional fields of the wrong type are treated as missing rather than
// failing the whole dataset.
fn bool_or_absent<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?
        .as_bool()
        .unwrap_or(false))
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_string))
}

/// How an answer is laid out: `;` separates list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerBody {
    Items(Vec<String>),
    Text(String),
}

impl AnswerBody {
    pub fn parse(answer: &str) -> Self {
        if answer.contains(';') {
            AnswerBody::Items(answer.split(';').map(|item| item.trim().to_string()).collect())
        } else {
            AnswerBody::Text(answer.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Cards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    About,
}

/// Messages delivered to the UI task by background work.
#[derive(Debug)]
pub enum AppEvent {
    DatasetLoaded {
        generation: u64,
        result: Result<Vec<Question>, LoadError>,
    },
    ImageLoaded {
        request_id: u64,
        result: Result<image::RgbaImage, String>,
    },
}

/// Side effects requested by input handling, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    LoadImage {
        request_id: u64,
        path: std::path::PathBuf,
    },
}

/// Clickable regions recorded while drawing the last frame.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub list_mode: Option<Rect>,
    pub shuffle: Option<Rect>,
    pub about_link: Option<Rect>,
    pub retry: Option<Rect>,
    /// (position in the displayed slice, item area, image line area)
    pub list_items: Vec<(usize, Rect, Option<Rect>)>,
    pub card: Option<Rect>,
    pub card_image: Option<Rect>,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    pub modal_content: Option<Rect>,
    pub modal_close: Option<Rect>,
}

impl HitMap {
    pub fn clear(&mut self) {
        *self = HitMap::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_with_camel_case_fields() {
        let json = r#"{"id":"7","question":"What is a DFA?","answer":"A machine","hasImage":true,"imagePath":"/images/q7.png"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, "7");
        assert!(question.has_image);
        assert_eq!(question.image_path(), Some("/images/q7.png"));
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let json = r#"{"id":12,"question":"Q","answer":"A","hasImage":false}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, "12");
    }

    #[test]
    fn test_missing_image_path_means_no_image() {
        let json = r#"{"id":"1","question":"Q","answer":"A","hasImage":true}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.has_image);
        assert_eq!(question.image_path(), None);

        let blank = r#"{"id":"1","question":"Q","answer":"A","hasImage":true,"imagePath":"  "}"#;
        let question: Question = serde_json::from_str(blank).unwrap();
        assert_eq!(question.image_path(), None);
    }

    #[test]
    fn test_mistyped_optional_fields_are_absent() {
        let json = r#"{"id":"3","question":"Q","answer":"A","hasImage":"yes","imagePath":17}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(!question.has_image);
        assert_eq!(question.image_path(), None);

        let null_path = r#"{"id":"3","question":"Q","answer":"A","imagePath":null}"#;
        let question: Question = serde_json::from_str(null_path).unwrap();
        assert_eq!(question.image_path(), None);
    }

    #[test]
    fn test_missing_answer_is_rejected() {
        let json = r#"{"id":"1","question":"Q","hasImage":false}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_answer_with_semicolons_splits_and_trims() {
        let body = AnswerBody::parse(" states ;alphabet;  transitions ");
        assert_eq!(
            body,
            AnswerBody::Items(vec![
                "states".to_string(),
                "alphabet".to_string(),
                "transitions".to_string()
            ])
        );
    }

    #[test]
    fn test_answer_without_semicolon_is_single_block() {
        let body = AnswerBody::parse("A finite automaton accepts regular languages.");
        assert_eq!(
            body,
            AnswerBody::Text("A finite automaton accepts regular languages.".to_string())
        );
    }

    #[test]
    fn test_image_alt_names_question() {
        let question = Question {
            id: "42".to_string(),
            question: String::new(),
            answer: String::new(),
            has_image: false,
            image_path: None,
        };
        assert_eq!(question.image_alt(), "Image for question 42");
    }
}
