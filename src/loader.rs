use crate::logger;
use crate::models::{AppEvent, Question};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read question dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question dataset is malformed: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Lifecycle of the question dataset. The dataset is all-or-nothing.
#[derive(Debug)]
pub enum LoadState {
    Pending,
    Ready(Arc<Vec<Question>>),
    Failed(LoadError),
}

impl LoadState {
    pub fn questions(&self) -> &[Question] {
        match self {
            LoadState::Ready(questions) => questions.as_slice(),
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

pub async fn load_questions(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_questions(&content)
}

/// Issues dataset loads on the tokio runtime. A new request aborts the one
/// still in flight, and results from older generations are discarded.
pub struct QuestionLoader {
    path: PathBuf,
    tx: UnboundedSender<AppEvent>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl QuestionLoader {
    pub fn new(path: PathBuf, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            path,
            tx,
            generation: 0,
            in_flight: None,
        }
    }

    /// Must be called from within the tokio runtime.
    pub fn request(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take()
            && !handle.is_finished()
        {
            logger::log(&format!(
                "Aborting superseded dataset load (generation {})",
                self.generation
            ));
            handle.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let path = self.path.clone();
        let tx = self.tx.clone();
        logger::log(&format!(
            "Loading questions from {} (generation {})",
            path.display(),
            generation
        ));

        self.in_flight = Some(tokio::spawn(async move {
            let result = load_questions(&path).await;
            match &result {
                Ok(questions) => logger::log(&format!("Loaded {} questions", questions.len())),
                Err(e) => logger::log(&format!("Dataset load failed: {}", e)),
            }
            let _ = tx.send(AppEvent::DatasetLoaded { generation, result });
        }));

        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// Decodes an image off the UI task and reports it under `request_id`.
pub fn spawn_image_load(request_id: u64, path: PathBuf, tx: UnboundedSender<AppEvent>) {
    logger::log(&format!("Decoding image {}", path.display()));
    tokio::task::spawn_blocking(move || {
        let result = image::open(&path)
            .map(|img| img.to_rgba8())
            .map_err(|e| format!("{}: {}", path.display(), e));
        if let Err(e) = &result {
            logger::log(&format!("Image decode failed: {}", e));
        }
        let _ = tx.send(AppEvent::ImageLoaded { request_id, result });
    });
}
