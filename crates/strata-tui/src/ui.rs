//! Frame drawing: the listing pane plus a two-line status area.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use strata_core::{AudioServer, EntryKind, NavigationController};

use crate::theme::{
    C_BG, C_DIRECTORY, C_ERROR, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG,
};

pub fn draw<S: AudioServer>(frame: &mut Frame, c: &NavigationController<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(75), Constraint::Min(2)])
        .split(area);

    draw_listing(frame, chunks[0], c);
    draw_status(frame, chunks[1], c);
}

fn draw_listing<S: AudioServer>(frame: &mut Frame, area: Rect, c: &NavigationController<S>) {
    let Some(listing) = c.listing() else {
        return;
    };
    if listing.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  empty directory",
                Style::default().fg(C_MUTED),
            )),
            area,
        );
        return;
    }

    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let selected = c.selected().min(listing.len() - 1);

    // Scroll just enough to keep the selection on screen, bottom-anchored.
    let offset = (selected + 1).saturating_sub(height);
    let end = (offset + height).min(listing.len());
    let max_name = (area.width as usize).saturating_sub(4).max(1);

    let items: Vec<ListItem> = listing.entries()[offset..end]
        .iter()
        .map(|entry| {
            let is_selected = entry.index == selected;
            let is_playing = c.playing_path() == Some(entry.path.as_path());

            let marker = if is_playing { "▶ " } else { "  " };
            let name_color = if is_playing {
                C_PLAYING
            } else if entry.kind == EntryKind::Directory {
                C_DIRECTORY
            } else if is_selected {
                C_PRIMARY
            } else {
                C_SECONDARY
            };
            let mut name_style = Style::default().fg(name_color);
            if is_selected {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(C_PLAYING)),
                Span::styled(ellipsize(&entry.name, max_name), name_style),
            ];
            if entry.kind == EntryKind::Directory {
                spans.push(Span::styled("/", Style::default().fg(C_DIRECTORY)));
            }

            let item = ListItem::new(Line::from(spans));
            if is_selected {
                item.style(Style::default().bg(C_SELECTION_BG))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items), area);
}

fn draw_status<S: AudioServer>(frame: &mut Frame, area: Rect, c: &NavigationController<S>) {
    let mut spans: Vec<Span> = Vec::new();

    if let Some(listing) = c.listing() {
        let position = if listing.is_empty() {
            0
        } else {
            c.selected() + 1
        };
        spans.push(Span::styled(
            format!(" {}/{}", position, listing.len()),
            Style::default().fg(C_PRIMARY),
        ));
        if let Some(entry) = c.selected_entry() {
            spans.push(Span::styled(
                format!("  {}", entry.kind.label()),
                Style::default().fg(C_SECONDARY),
            ));
        }
        if !listing.is_complete() {
            spans.push(Span::styled(
                "  partial listing",
                Style::default().fg(C_ERROR),
            ));
        }
    }

    if let Some(path) = c.playing_path() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        spans.push(Span::styled(
            format!("  ▶ {name}"),
            Style::default().fg(C_PLAYING),
        ));
    }

    let status = Line::from(spans);
    let help = Line::from(Span::styled(
        " q quit · ↑↓ select · space open/play · ←→ levels · s stop",
        Style::default().fg(C_MUTED),
    ));

    frame.render_widget(Paragraph::new(vec![status, help]), area);
}

/// Trim `name` to `max` display columns, marking the cut with a trailing `~`.
fn ellipsize(name: &str, max: usize) -> String {
    if name.width() <= max {
        return name.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in name.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('~');
    out
}
