//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Wide
//! terminals get a two-pane layout (list context plus a detail panel);
//! narrow ones render one page at a time.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};
use std::time::Duration;

use crate::app::{App, Screen};
use crate::config::{ControlsSettings, TimeField, TrackDisplayField, UiSettings};
use crate::playlist::Track;

pub fn draw(f: &mut Frame, app: &App, ui: &UiSettings, controls: &ControlsSettings) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, outer[0], ui);
    draw_body(f, outer[1], app, ui);
    draw_status_line(f, outer[2], app, ui);
    draw_controls(f, outer[3], app, controls);
}

fn draw_header(f: &mut Frame, area: Rect, ui: &UiSettings) {
    let header = Paragraph::new(ui.header_text.clone())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_body(f: &mut Frame, area: Rect, app: &App, ui: &UiSettings) {
    let wide = area.width >= ui.two_pane_min_width;

    match (app.screen, wide) {
        (Screen::Playlists, true) => {
            let panes = split_panes(area);
            draw_playlist_list(f, panes[0], app);
            draw_recently_played(f, panes[1], app);
        }
        (Screen::Playlists, false) => draw_playlist_list(f, area, app),
        (Screen::Songs, true) => {
            let panes = split_panes(area);
            draw_song_list(f, panes[0], app);
            draw_player_panel(f, panes[1], app, ui);
        }
        (Screen::Songs, false) => draw_song_list(f, area, app),
        (Screen::Player, true) => {
            let panes = split_panes(area);
            draw_song_list(f, panes[0], app);
            draw_player_panel(f, panes[1], app, ui);
        }
        (Screen::Player, false) => draw_player_panel(f, area, app, ui),
    }
}

fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area)
}

fn draw_playlist_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .playlists
        .iter()
        .map(|p| ListItem::new(format!("{} ({} songs)", p.name, p.len())))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Playlists"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if app.has_playlists() {
        state.select(Some(app.selected_playlist));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_song_list(f: &mut Frame, area: Rect, app: &App) {
    let playing_source = app.now_playing.as_ref().map(|t| t.source.as_path());

    let mut items: Vec<ListItem> = Vec::with_capacity(app.cursor.len());
    for i in 0..app.cursor.len() {
        if let Some(track) = app.cursor.track_at(i) {
            let marker = if Some(track.source.as_path()) == playing_source {
                "♪ "
            } else {
                "  "
            };
            items.push(ListItem::new(format!("{marker}{}", track.display)));
        }
    }

    let title = match app.current_playlist() {
        Some(p) => format!("Songs: {}", p.name),
        None => "Songs".to_string(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.cursor.is_empty() {
        state.select(Some(app.selected_track));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_recently_played(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Recently Played ({})", app.recently.len()));

    if app.recently.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("Nothing played yet").alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .recently
        .iter()
        .map(|t| ListItem::new(t.display.clone()))
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_player_panel(f: &mut Frame, area: Rect, app: &App, ui: &UiSettings) {
    let block = Block::default().borders(Borders::ALL).title("Now Playing");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(track) = app.now_playing.as_ref() else {
        f.render_widget(
            Paragraph::new("Nothing playing").alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(2)])
        .split(inner);

    let mut lines = vec![Line::from(Span::styled(
        now_playing_track_text(track, ui),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some((pos, len)) = app.playing_position() {
        lines.push(Line::from(format!("Song {pos} of {len}")));
    }
    if let Some(art) = track
        .artwork
        .as_deref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
    {
        lines.push(Line::from(format!("artwork: {art}")));
    }

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rows[0],
    );

    let duration = app.status.duration;
    let ratio = if duration > Duration::ZERO {
        (app.status.position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let label = now_playing_time_text(
        app.status.position,
        (duration > Duration::ZERO).then_some(duration),
        ui,
    )
    .unwrap_or_default();

    f.render_widget(Gauge::default().ratio(ratio).label(label), rows[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App, ui: &UiSettings) {
    let text = match app.now_playing.as_ref() {
        None => match &app.library_root {
            Some(root) => format!("stopped | dir: {root}"),
            None => "stopped".to_string(),
        },
        Some(track) => {
            let indicator = if app.status.playing { "playing" } else { "paused" };
            let time = now_playing_time_text(
                app.status.position,
                (app.status.duration > Duration::ZERO).then_some(app.status.duration),
                ui,
            );
            match time {
                Some(t) => format!("{indicator}: {}  [{t}]", now_playing_track_text(track, ui)),
                None => format!("{indicator}: {}", now_playing_track_text(track, ui)),
            }
        }
    };

    let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &App, controls: &ControlsSettings) {
    let text = match app.screen {
        Screen::Playlists => {
            "[j/k] move | [enter/l] open | [space/p] play/pause | [q] quit".to_string()
        }
        Screen::Songs => {
            "[j/k] move | [gg/G] top/bottom | [enter] play | [h/esc] back | [q] quit".to_string()
        }
        Screen::Player => format!(
            "[space/p] play/pause | [h/l] prev/next | [H/L] scrub -/+{}s | [esc] back | [q] quit",
            controls.seek_seconds
        ),
    };
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Display => {
                if !track.display.trim().is_empty() {
                    parts.push(track.display.clone());
                }
            }
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.clone());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = track
                    .artist
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track.source.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.source.display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.display.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    parts.push(format!("-{}", format_mmss(t.saturating_sub(elapsed))));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}
