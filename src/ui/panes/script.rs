//! Script pane rendering with the current statement highlighted

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Command keywords recognized by the script language
const KEYWORDS: [&str; 3] = ["free", "dump", "compress"];

/// Word-level highlighting for a script line
fn highlight_script_line(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut word = String::new();

    for ch in line.chars() {
        if ch.is_ascii_alphanumeric() {
            word.push(ch);
            continue;
        }

        if !word.is_empty() {
            spans.push(styled_word(std::mem::take(&mut word)));
        }

        let style = match ch {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            '=' | ';' => Style::default().fg(DEFAULT_THEME.fg),
            _ => Style::default(),
        };
        spans.push(Span::styled(ch.to_string(), style));
    }

    if !word.is_empty() {
        spans.push(styled_word(word));
    }

    spans
}

fn styled_word(word: String) -> Span<'static> {
    let style = if KEYWORDS.contains(&word.as_str()) {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Span::styled(word, style)
}

/// Render the script pane
pub fn render_script_pane(
    frame: &mut Frame,
    area: Rect,
    script: &str,
    current_line: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Script ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = script.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the current statement's line in view
    if current_line > 0 {
        let row = current_line - 1;
        if row < *scroll_offset {
            *scroll_offset = row;
        } else if row >= *scroll_offset + visible_height {
            *scroll_offset = row + 1 - visible_height;
        }
    }
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let number_width = lines.len().to_string().len().max(2);

    let rendered: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, text)| {
            let is_current = i + 1 == current_line;
            let marker = if is_current { "→ " } else { "  " };

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![
                Span::styled(
                    format!("{:>width$} ", i + 1, width = number_width),
                    num_style,
                ),
                Span::styled(
                    marker.to_string(),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
            ];

            let mut content = highlight_script_line(text);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content {
                    span.style = span.style.patch(bg);
                }
            }
            spans.extend(content);

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(rendered).block(block);
    frame.render_widget(paragraph, area);
}
