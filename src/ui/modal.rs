use crate::app::App;
use crate::modal::{fit_to_viewport, pixels_to_cells, ImageStatus};
use crate::ui::layout::centered_box;
use crate::utils::{plain_text, render_markup, truncate_string};
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

const CLOSE_BUTTON: &str = "[x]";
const MIN_CONTENT_WIDTH: u16 = 36;
const PLACEHOLDER_ROWS: u16 = 5;

/// Draws an RGBA image with upper-half blocks: the glyph takes the top
/// pixel, the cell background the bottom one.
pub struct HalfBlockImage<'a> {
    image: &'a RgbaImage,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }
}

fn pixel_color(image: &RgbaImage, x: u32, y: u32) -> Color {
    if x >= image.width() || y >= image.height() {
        return Color::Reset;
    }
    let [r, g, b, a] = image.get_pixel(x, y).0;
    let blend = |channel: u8| (u16::from(channel) * u16::from(a) / 255) as u8;
    Color::Rgb(blend(r), blend(g), blend(b))
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for column in 0..area.width {
                let x = u32::from(column);
                let y = u32::from(row) * 2;
                buf[(area.x + column, area.y + row)]
                    .set_symbol("▀")
                    .set_fg(pixel_color(self.image, x, y))
                    .set_bg(pixel_color(self.image, x, y + 1));
            }
        }
    }
}

pub fn draw_modal(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let viewport = app.viewport;
    let Some(modal) = app.modal.current_mut() else {
        return;
    };

    let mut text = render_markup(&modal.request.caption);
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        modal.request.alt.clone(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    text.push(Line::from(Span::styled(
        "Esc or click outside the image to close",
        Style::default().fg(Color::DarkGray),
    )));

    let max_inner_width = area.width.saturating_sub(4).max(1);
    let max_inner_height = area.height.saturating_sub(4).max(1);

    // Image size in cells, shrunk uniformly if the screen is too small.
    let image_cells = modal.natural_size().map(|natural| {
        let (columns, rows) = pixels_to_cells(fit_to_viewport(natural, &viewport), &viewport);
        let scale = (f64::from(max_inner_width) / f64::from(columns))
            .min(f64::from(max_inner_height.saturating_sub(3).max(1)) / f64::from(rows))
            .min(1.0);
        (
            ((f64::from(columns) * scale).floor() as u16).max(1),
            ((f64::from(rows) * scale).floor() as u16).max(1),
        )
    });

    let inner_width = image_cells
        .map_or(MIN_CONTENT_WIDTH, |(columns, _)| columns.max(MIN_CONTENT_WIDTH))
        .min(max_inner_width);
    let image_rows = image_cells.map_or(PLACEHOLDER_ROWS, |(_, rows)| rows);
    let caption = Paragraph::new(text).wrap(Wrap { trim: true });
    let caption_rows = caption.line_count(inner_width) as u16;
    let inner_height = image_rows
        .saturating_add(1)
        .saturating_add(caption_rows)
        .min(max_inner_height);

    // Dim everything behind the content box.
    f.buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));

    let content = centered_box(inner_width + 2, inner_height + 2, area);
    f.render_widget(Clear, content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(truncate_string(
            &plain_text(&modal.request.caption),
            usize::from(inner_width.saturating_sub(6)),
        ));
    let inner = block.inner(content);
    f.render_widget(block, content);

    let close = Rect::new(
        content.x + content.width.saturating_sub(CLOSE_BUTTON.len() as u16 + 1),
        content.y,
        (CLOSE_BUTTON.len() as u16).min(content.width),
        1,
    );
    f.render_widget(
        Paragraph::new(CLOSE_BUTTON)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        close,
    );

    let image_area = Rect {
        height: image_rows.min(inner.height),
        ..inner
    };
    let failed = matches!(modal.status, ImageStatus::Failed(_));
    match image_cells {
        Some((columns, rows)) => {
            let target = centered_box(columns, rows, image_area);
            if let Some(preview) = modal.preview(target.width, target.height) {
                f.render_widget(HalfBlockImage::new(preview), target);
            }
        }
        None if failed => {
            let notice = Paragraph::new("Image unavailable")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(notice, image_area);
        }
        None => {
            let placeholder = Paragraph::new("Loading image...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(placeholder, image_area);
        }
    }

    let caption_top = image_area.y + image_area.height + 1;
    if caption_top < inner.y + inner.height {
        let caption_area = Rect::new(
            inner.x,
            caption_top,
            inner.width,
            inner.y + inner.height - caption_top,
        );
        f.render_widget(caption, caption_area);
    }

    app.hits.modal_content = Some(content);
    app.hits.modal_close = Some(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_half_blocks_take_two_pixel_rows_per_cell() {
        let mut image = RgbaImage::new(2, 4);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 2, Rgba([0, 255, 0, 255]));

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        HalfBlockImage::new(&image).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_transparent_pixels_blend_to_black() {
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba([200, 100, 50, 0]));
        assert_eq!(pixel_color(&image, 0, 0), Color::Rgb(0, 0, 0));
        assert_eq!(pixel_color(&image, 0, 5), Color::Reset);
    }
}
