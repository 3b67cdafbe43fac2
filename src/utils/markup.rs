use crate::models::AnswerBody;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::{Captures, Regex};

lazy_static::lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap();
    static ref ENTITY_RE: Regex = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap();
    static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Default)]
struct InlineStyle {
    bold: usize,
    italic: usize,
    code: usize,
}

impl InlineStyle {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.code > 0 {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }

    fn adjust(counter: &mut usize, closing: bool) {
        if closing {
            *counter = counter.saturating_sub(1);
        } else {
            *counter += 1;
        }
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
}

impl LineBuilder {
    /// Markup text between tags. Whitespace runs, newlines included, collapse
    /// to one space and are dropped at the start of a line.
    fn push_text(&mut self, raw: &str, style: Style) {
        let collapsed = SPACE_RE.replace_all(raw, " ");
        let after_space = self
            .spans
            .last()
            .is_none_or(|span| span.content.ends_with(' '));
        let trimmed = if after_space {
            collapsed.trim_start()
        } else {
            collapsed.as_ref()
        };
        let text = decode_entities(trimmed);
        if !text.is_empty() {
            self.spans.push(Span::styled(text, style));
        }
    }

    fn push_bullet(&mut self) {
        self.spans.push(Span::raw("  • "));
    }

    fn break_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn end_block(&mut self) {
        if !self.spans.is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.end_block();
        self.lines
    }
}

/// Render the HTML-ish question markup to lines for ratatui.
/// Supports: <br>, block tags (<p>, <div>, lists, headings), <li> bullets,
/// <b>/<strong>, <i>/<em>, <code>. Anything else is stripped.
pub fn render_markup(markup: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    let mut inline = InlineStyle::default();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        builder.push_text(&markup[last..whole.start()], inline.style());
        last = whole.end();

        let closing = !caps[1].is_empty();
        match caps[2].to_ascii_lowercase().as_str() {
            "br" => builder.break_line(),
            "li" => {
                builder.end_block();
                if !closing {
                    builder.push_bullet();
                }
            }
            "p" | "div" | "ul" | "ol" | "tr" | "table" | "blockquote" => builder.end_block(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                builder.end_block();
                InlineStyle::adjust(&mut inline.bold, closing);
            }
            "b" | "strong" => InlineStyle::adjust(&mut inline.bold, closing),
            "i" | "em" => InlineStyle::adjust(&mut inline.italic, closing),
            "code" | "tt" | "pre" => InlineStyle::adjust(&mut inline.code, closing),
            _ => {}
        }
    }
    builder.push_text(&markup[last..], inline.style());

    builder.finish()
}

/// Markup flattened to a single plain string.
pub fn plain_text(markup: &str) -> String {
    render_markup(markup)
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "laquo" => '«',
        "raquo" => '»',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "times" => '×',
        "rarr" => '→',
        "larr" => '←',
        "harr" => '↔',
        "epsilon" => 'ε',
        "lambda" => 'λ',
        "delta" => 'δ',
        "Delta" => 'Δ',
        "sigma" => 'σ',
        "Sigma" => 'Σ',
        "empty" => '∅',
        "isin" => '∈',
        "cup" => '∪',
        "cap" => '∩',
        _ => return None,
    })
}

/// Answers are plain text: a `;`-separated answer becomes a bullet list.
pub fn render_answer(body: &AnswerBody) -> Vec<Line<'static>> {
    match body {
        AnswerBody::Items(items) => items
            .iter()
            .map(|item| Line::from(format!("• {}", item)))
            .collect(),
        AnswerBody::Text(text) => text.lines().map(|line| Line::from(line.to_string())).collect(),
    }
}
