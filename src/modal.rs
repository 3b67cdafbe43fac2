use crate::logger;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use ratatui::layout::{Position, Rect};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Width cap for the enlarged image, in pixels.
pub const MAX_IMAGE_WIDTH_PX: f64 = 896.0;
pub const VIEWPORT_WIDTH_FRACTION: f64 = 0.9;
pub const VIEWPORT_HEIGHT_FRACTION: f64 = 0.8;

/// Terminal window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Viewport {
    /// Uses the pixel size the terminal reports, falling back to
    /// `fallback_cell` per cell when it reports none.
    pub fn from_terminal(columns: u16, rows: u16, fallback_cell: (f64, f64)) -> Self {
        let reported = crossterm::terminal::window_size()
            .ok()
            .filter(|size| size.width > 0 && size.height > 0 && size.columns > 0 && size.rows > 0);
        match reported {
            Some(size) => Self {
                width_px: f64::from(size.width),
                height_px: f64::from(size.height),
                cell_width_px: f64::from(size.width) / f64::from(size.columns),
                cell_height_px: f64::from(size.height) / f64::from(size.rows),
            },
            None => Self::from_cells(columns, rows, fallback_cell),
        }
    }

    pub fn from_cells(columns: u16, rows: u16, cell: (f64, f64)) -> Self {
        Self {
            width_px: f64::from(columns) * cell.0,
            height_px: f64::from(rows) * cell.1,
            cell_width_px: cell.0,
            cell_height_px: cell.1,
        }
    }
}

/// Scales an image of intrinsic size `natural` to fit the viewport bounds,
/// uniformly. Scaling up is allowed.
pub fn fit_to_viewport(natural: (u32, u32), viewport: &Viewport) -> (f64, f64) {
    let (width, height) = (f64::from(natural.0.max(1)), f64::from(natural.1.max(1)));
    let target_width = MAX_IMAGE_WIDTH_PX.min(viewport.width_px * VIEWPORT_WIDTH_FRACTION);
    let target_height = viewport.height_px * VIEWPORT_HEIGHT_FRACTION;
    let scale = (target_width / width).min(target_height / height);
    (width * scale, height * scale)
}

/// Converts a pixel size to whole terminal cells, at least one each way.
pub fn pixels_to_cells(size_px: (f64, f64), viewport: &Viewport) -> (u16, u16) {
    let columns = (size_px.0 / viewport.cell_width_px).round().max(1.0);
    let rows = (size_px.1 / viewport.cell_height_px).round().max(1.0);
    (
        columns.min(f64::from(u16::MAX)) as u16,
        rows.min(f64::from(u16::MAX)) as u16,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub src: PathBuf,
    pub alt: String,
    /// Question markup shown under the image.
    pub caption: String,
}

#[derive(Debug)]
pub enum ImageStatus {
    Loading,
    Ready(RgbaImage),
    Failed(String),
}

#[derive(Debug)]
pub struct OpenModal {
    pub request_id: u64,
    pub request: ImageRequest,
    pub status: ImageStatus,
    preview: Option<((u32, u32), RgbaImage)>,
}

impl OpenModal {
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        match &self.status {
            ImageStatus::Ready(image) => Some(image.dimensions()),
            _ => None,
        }
    }

    /// The image resampled to one pixel per column and two per row, as the
    /// half-block renderer draws it. Kept until the cell size changes.
    pub fn preview(&mut self, columns: u16, rows: u16) -> Option<&RgbaImage> {
        let ImageStatus::Ready(image) = &self.status else {
            return None;
        };
        let size = (u32::from(columns.max(1)), u32::from(rows.max(1)) * 2);
        let stale = self
            .preview
            .as_ref()
            .is_none_or(|(cached, _)| *cached != size);
        if stale {
            let resized = imageops::resize(image, size.0, size.1, FilterType::Triangle);
            self.preview = Some((size, resized));
        }
        self.preview.as_ref().map(|(_, resized)| resized)
    }
}

/// Where a click landed relative to the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    Content,
    CloseButton,
}

impl ModalClick {
    pub fn classify(position: Position, content: Option<Rect>, close: Option<Rect>) -> Self {
        if close.is_some_and(|rect| rect.contains(position)) {
            ModalClick::CloseButton
        } else if content.is_some_and(|rect| rect.contains(position)) {
            ModalClick::Content
        } else {
            ModalClick::Backdrop
        }
    }
}

/// Request ids are unique per process, including across app resets.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// The single modal slot at the view root.
#[derive(Debug, Default)]
pub struct ModalState {
    current: Option<OpenModal>,
}

impl ModalState {
    pub fn current(&self) -> Option<&OpenModal> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenModal> {
        self.current.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces whatever is shown. Returns the id the image load must
    /// report back with.
    pub fn open(&mut self, request: ImageRequest) -> u64 {
        let request_id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        logger::log(&format!("Opening image {}", request.src.display()));
        self.current = Some(OpenModal {
            request_id,
            request,
            status: ImageStatus::Loading,
            preview: None,
        });
        request_id
    }

    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Applies a finished image load. Loads for a replaced or closed modal
    /// are dropped.
    pub fn image_loaded(&mut self, request_id: u64, result: Result<RgbaImage, String>) -> bool {
        match self.current.as_mut() {
            Some(modal) if modal.request_id == request_id => {
                modal.status = match result {
                    Ok(image) => {
                        logger::log(&format!(
                            "Decoded image {} ({}x{})",
                            modal.request.src.display(),
                            image.width(),
                            image.height()
                        ));
                        ImageStatus::Ready(image)
                    }
                    Err(reason) => {
                        logger::log(&format!(
                            "Image {} unavailable: {}",
                            modal.request.src.display(),
                            reason
                        ));
                        ImageStatus::Failed(reason)
                    }
                };
                modal.preview = None;
                true
            }
            _ => false,
        }
    }

    /// Returns whether the click closed the modal.
    pub fn click(&mut self, target: ModalClick) -> bool {
        match target {
            ModalClick::Backdrop | ModalClick::CloseButton => self.close(),
            ModalClick::Content => false,
        }
    }
}
