pub mod markup;

pub use markup::{plain_text, render_answer, render_markup};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `s` to at most `max_width` terminal columns, ending in "...".
/// Counts display width, so wide and Cyrillic text is cut on a char
/// boundary.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_TITLE: &str = "Question 12 · Space flips · ←/→ navigate";

    #[test]
    fn test_card_title_fits_wide_card() {
        assert_eq!(truncate_string(CARD_TITLE, 76), CARD_TITLE);
    }

    #[test]
    fn test_card_title_cut_for_narrow_card() {
        let title = truncate_string(CARD_TITLE, 20);
        assert_eq!(title, "Question 12 · Spa...");
        assert_eq!(title.width(), 20);
    }

    #[test]
    fn test_modal_caption_from_markup() {
        let caption = plain_text("Which <b>DFA</b> accepts the empty language?");
        assert_eq!(truncate_string(&caption, 15), "Which DFA ac...");
    }

    #[test]
    fn test_alt_text_at_exact_width_is_kept() {
        assert_eq!(truncate_string("Image for question 2", 20), "Image for question 2");
        assert_eq!(truncate_string("Image for question 2", 3), "...");
    }

    #[test]
    fn test_truncate_multibyte_on_char_boundary() {
        let result = truncate_string("Изображение для вопроса 12", 10);
        assert_eq!(result, "Изображ...");
    }

    #[test]
    fn test_truncate_wide_chars_by_width() {
        // Each CJK char is two columns wide.
        let result = truncate_string("漢字漢字漢字", 7);
        assert_eq!(result, "漢字...");
    }
}
