//! Line-oriented markdown for backend answers: headings, bullet and numbered
//! lists, paragraphs, and inline `**bold**` / `` `code` `` spans.

use eframe::egui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Bullet(Vec<Span>),
    Numbered { marker: String, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    /// One or more blank lines.
    Gap,
}

pub fn parse_markdown(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        let block = if trimmed.is_empty() {
            if matches!(blocks.last(), None | Some(Block::Gap)) {
                continue;
            }
            Block::Gap
        } else if let Some((level, rest)) = heading(trimmed) {
            Block::Heading {
                level,
                spans: parse_inline(rest),
            }
        } else if let Some(rest) = ["- ", "* ", "+ "]
            .iter()
            .find_map(|bullet| trimmed.strip_prefix(bullet))
        {
            Block::Bullet(parse_inline(rest.trim()))
        } else if let Some((marker, rest)) = numbered(trimmed) {
            Block::Numbered {
                marker: marker.to_string(),
                spans: parse_inline(rest),
            }
        } else {
            Block::Paragraph(parse_inline(trimmed))
        };
        blocks.push(block);
    }
    if blocks.last() == Some(&Block::Gap) {
        blocks.pop();
    }
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = line[level..].strip_prefix(' ')?;
    Some((level as u8, rest.trim()))
}

fn numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    Some((&line[..=digits], rest.trim()))
}

/// Splits on `**` and backticks. An unmatched marker is kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;
    let mut plain = String::new();

    while !rest.is_empty() {
        let (marker, code) = if rest.starts_with("**") {
            ("**", false)
        } else if rest.starts_with('`') {
            ("`", true)
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                plain.push(c);
            }
            rest = chars.as_str();
            continue;
        };

        let after = &rest[marker.len()..];
        match after.find(marker) {
            Some(end) if end > 0 => {
                flush(&mut spans, &mut plain);
                spans.push(Span {
                    text: after[..end].to_string(),
                    strong: !code,
                    code,
                });
                rest = &after[end + marker.len()..];
            }
            _ => {
                plain.push_str(marker);
                rest = after;
            }
        }
    }
    flush(&mut spans, &mut plain);
    spans
}

fn flush(spans: &mut Vec<Span>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span {
            text: std::mem::take(plain),
            strong: false,
            code: false,
        });
    }
}

pub fn render_markdown(ui: &mut egui::Ui, text: &str) {
    for block in parse_markdown(text) {
        match block {
            Block::Heading { level, spans } => {
                let size = match level {
                    1 => 20.0,
                    2 => 17.0,
                    _ => 15.0,
                };
                ui.add_space(4.0);
                spans_row(ui, &spans, Some(size));
            }
            Block::Bullet(spans) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    spans_inline(ui, &spans, None);
                });
            }
            Block::Numbered { marker, spans } => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(marker);
                    spans_inline(ui, &spans, None);
                });
            }
            Block::Paragraph(spans) => spans_row(ui, &spans, None),
            Block::Gap => ui.add_space(6.0),
        }
    }
}

fn spans_row(ui: &mut egui::Ui, spans: &[Span], heading_size: Option<f32>) {
    ui.horizontal_wrapped(|ui| spans_inline(ui, spans, heading_size));
}

fn spans_inline(ui: &mut egui::Ui, spans: &[Span], heading_size: Option<f32>) {
    ui.spacing_mut().item_spacing.x = 0.0;
    for span in spans {
        let mut text = egui::RichText::new(&span.text);
        if let Some(size) = heading_size {
            text = text.size(size).strong();
        }
        if span.strong {
            text = text.strong();
        }
        if span.code {
            text = text.code();
        }
        ui.label(text);
    }
}
