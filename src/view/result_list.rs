//! Result list widget.
//!
//! Purely presentational: renders entities in the order given, two lines
//! each (name with kind/platform, then the description).

use crate::model::Entity;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `text` to at most `max_width` display columns, adding `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Two-line entries for the current page of entities.
pub struct ResultList<'a> {
    entities: &'a [Entity],
}

impl<'a> ResultList<'a> {
    /// List over `entities`.
    pub fn new(entities: &'a [Entity]) -> Self {
        Self { entities }
    }

    fn entity_lines(entity: &'a Entity, width: usize) -> [Line<'a>; 2] {
        let mut kind = entity.entity_type.clone();
        if let Some(platform) = &entity.platform {
            kind.push_str(" · ");
            kind.push_str(platform);
        }

        let title = Line::from(vec![
            Span::styled(
                entity.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(kind, Style::default().fg(Color::Cyan)),
        ]);

        let description = entity.description.as_deref().unwrap_or("");
        let detail = Line::from(Span::styled(
            format!("  {}", truncate_to_width(description, width.saturating_sub(2))),
            Style::default().add_modifier(Modifier::DIM),
        ));

        [title, detail]
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let lines: Vec<Line> = self
            .entities
            .iter()
            .flat_map(|entity| Self::entity_lines(entity, width))
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}
