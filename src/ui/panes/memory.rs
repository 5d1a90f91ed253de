//! Memory pane rendering
//!
//! Shows the whole simulated address space in block order: every
//! allocated range with the names bound to it, every free range, and a
//! proportional one-line usage bar at the top.

use crate::memory::heap::{Block, Heap};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block as UiBlock, Borders, List, ListItem, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// One range of the address space: allocated (with its owners) or free
struct Segment {
    block: Block,
    owners: Option<String>,
}

/// All blocks, free and allocated, in address order
fn segments(heap: &Heap) -> Vec<Segment> {
    let mut owners: FxHashMap<u64, Vec<&str>> = FxHashMap::default();
    for (name, block) in heap.bindings() {
        owners.entry(block.address).or_default().push(name);
    }

    let mut segments: Vec<Segment> = heap
        .allocated_blocks()
        .into_iter()
        .map(|block| Segment {
            owners: Some(
                owners
                    .get(&block.address)
                    .map(|names| names.join(", "))
                    .unwrap_or_default(),
            ),
            block,
        })
        .collect();

    segments.extend(heap.free_list().iter().map(|block| Segment {
        block: *block,
        owners: None,
    }));

    segments.sort_by_key(|s| s.block.address);
    segments
}

/// Proportional usage bar: one column per character of pane width
fn usage_bar(segments: &[Segment], heap_size: u64, width: usize) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    if heap_size == 0 || width == 0 {
        return Line::from(spans);
    }

    let mut run: Option<(bool, usize)> = None; // (allocated, column count)
    for col in 0..width {
        let address = col as u64 * heap_size / width as u64;
        let allocated = segments.iter().any(|s| {
            s.owners.is_some() && s.block.address <= address && address < s.block.end()
        });

        run = match run {
            Some((state, count)) if state == allocated => Some((state, count + 1)),
            Some((state, count)) => {
                spans.push(run_span(state, count));
                Some((allocated, 1))
            }
            None => Some((allocated, 1)),
        };
    }
    if let Some((state, count)) = run {
        spans.push(run_span(state, count));
    }

    Line::from(spans)
}

fn run_span(allocated: bool, count: usize) -> Span<'static> {
    if allocated {
        Span::styled(
            "█".repeat(count),
            Style::default().fg(DEFAULT_THEME.success),
        )
    } else {
        Span::styled(
            "░".repeat(count),
            Style::default().fg(DEFAULT_THEME.comment),
        )
    }
}

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    heap: &Heap,
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

    let title = format!(" Memory ({} units) ", heap.heap_size());
    let block = UiBlock::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let segments = segments(heap);

    if segments.is_empty() {
        let paragraph = Paragraph::new("(empty address space)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize;

    let mut all_items: Vec<ListItem> = Vec::with_capacity(segments.len() + 2);
    all_items.push(ListItem::new(usage_bar(
        &segments,
        heap.heap_size(),
        content_width,
    )));
    all_items.push(ListItem::new(""));

    for segment in &segments {
        let range = format!(
            "{:>7}..{:<7}",
            segment.block.address,
            segment.block.end()
        );
        let size = format!("{:>7} ", segment.block.size);

        let line = match &segment.owners {
            Some(names) => Line::from(vec![
                Span::styled(range, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(size, Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled(
                    names.clone(),
                    Style::default().fg(DEFAULT_THEME.success),
                ),
                Span::styled(
                    format!(" [{}]", segment.block.ref_count),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
            ]),
            None => Line::from(vec![
                Span::styled(range, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(size, Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled("free", Style::default().fg(DEFAULT_THEME.comment)),
            ]),
        };
        all_items.push(ListItem::new(line));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
