//! Heap pane rendering with region headers and hex dumps
//!
//! This module renders the heap pane, showing both regions of the simulated
//! heap block in allocation order with their raw bytes.
//!
//! # Features
//!
//! - Region headers with address, capacity and displayed string value
//! - Hex dump rows with full addresses
//! - Guard bytes that differ from the sentinel highlighted as corrupted
//! - Bytes written by the last overflowing write marked in the primary color
//! - Scroll support for narrow terminals

use crate::memory::{HeapModel, RegionId, WriteReport};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the heap pane
#[derive(Debug, Default)]
pub struct HeapScrollState {
    pub offset: usize,
}

/// Data needed to render the heap pane
pub struct HeapRenderData<'a> {
    pub heap: &'a HeapModel,
    pub last_write: Option<&'a WriteReport>,
}

/// Style for a single byte cell in the dump
fn byte_style(heap: &HeapModel, offset: usize, corrupted: &[usize], spill_end: usize) -> Style {
    match heap.owner_of(offset) {
        Some(RegionId::Guard) => {
            let guard_offset = offset - heap.guard().region().offset();
            if corrupted.contains(&guard_offset) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if offset < spill_end {
                // Overwritten with the sentinel's own byte
                Style::default().fg(DEFAULT_THEME.primary)
            } else {
                Style::default().fg(DEFAULT_THEME.success)
            }
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Build the list rows for one region
fn region_items(
    data: &HeapRenderData<'_>,
    id: RegionId,
    bytes_per_line: usize,
    corrupted: &[usize],
) -> Vec<ListItem<'static>> {
    let heap = data.heap;
    let view = heap.region(id);
    let region = view.region();
    let spill_end = data.last_write.map_or(0, |w| w.written);
    let mut items = Vec::new();

    let status = match id {
        RegionId::Primary => Span::raw(""),
        RegionId::Guard if corrupted.is_empty() => {
            Span::styled("  intact", Style::default().fg(DEFAULT_THEME.success))
        }
        RegionId::Guard => Span::styled(
            format!("  {} byte(s) corrupted", corrupted.len()),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ),
    };

    items.push(ListItem::new(Line::from(vec![
        Span::styled(
            format!("0x{:08x}", view.address_tag()),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("{} bytes", region.capacity()),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
        Span::raw(" | "),
        Span::styled(
            region.name().to_string(),
            Style::default().fg(DEFAULT_THEME.region_name),
        ),
        status,
    ])));

    for line_start in (region.offset()..region.end()).step_by(bytes_per_line) {
        let line_end = (line_start + bytes_per_line).min(region.end());
        let mut spans = vec![Span::styled(
            format!("  0x{:08x}: ", heap.address_of(line_start)),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        for offset in line_start..line_end {
            spans.push(Span::styled(
                format!("{:02x} ", heap.bytes()[offset]),
                byte_style(heap, offset, corrupted, spill_end),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let value_style = if id == RegionId::Guard && !corrupted.is_empty() {
        Style::default().fg(DEFAULT_THEME.error)
    } else {
        Style::default().fg(DEFAULT_THEME.secondary)
    };
    items.push(ListItem::new(Line::from(vec![
        Span::styled("  => ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(format!("\"{}\"", view.read()), value_style),
    ])));

    items
}

/// Render the heap pane
pub fn render_heap_pane(
    frame: &mut Frame,
    area: Rect,
    data: HeapRenderData,
    is_focused: bool,
    scroll_state: &mut HeapScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Heap Memory ")
        .borders(Borders::ALL)
        .border_style(border_style);

    // "  0xADDR: " is 14 chars, each byte "XX " is 3
    let available_width = area.width.saturating_sub(2 + 14) as usize;
    let bytes_per_line = 8.min((available_width / 3).max(1));

    let corrupted = data.heap.corrupted_offsets();
    let mut all_items = Vec::new();
    for (i, id) in RegionId::ALL.iter().enumerate() {
        if i > 0 {
            all_items.push(ListItem::new(""));
        }
        all_items.extend(region_items(&data, *id, bytes_per_line, &corrupted));
    }

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
