use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::playlist::{Playlist, Track};

use super::display::display_from_fields;

/// Artwork files recognized inside a playlist directory, in preference order.
const COVER_NAMES: &[&str] = &[
    "cover.jpg",
    "cover.jpeg",
    "cover.png",
    "folder.jpg",
    "folder.png",
];

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn find_cover(dir: &Path) -> Option<PathBuf> {
    COVER_NAMES.iter().map(|n| dir.join(n)).find(|p| p.is_file())
}

/// The directory whose playlist a scanned file belongs to: the first path
/// component under `root`, or `root` itself for loose files.
fn group_dir_for(root: &Path, path: &Path) -> PathBuf {
    let rel = match path.strip_prefix(root) {
        Ok(r) => r,
        Err(_) => return root.to_path_buf(),
    };
    let mut comps = rel.components();
    match (comps.next(), comps.next()) {
        (Some(first), Some(_)) => root.join(first.as_os_str()),
        _ => root.to_path_buf(),
    }
}

fn playlist_name(root: &Path, dir: &Path) -> String {
    let named = if dir == root { root } else { dir };
    named
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Library")
        .to_string()
}

fn read_track(path: &Path, settings: &LibrarySettings) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.artist() {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
        }
    }

    let display = display_from_fields(
        path,
        &title,
        artist.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );

    Track {
        // Assigned once the playlist ordering is known.
        id: 0,
        title,
        artist,
        source: path.to_path_buf(),
        artwork: None,
        duration,
        display,
    }
}

/// Scan `root` into playlists: one per immediate subdirectory, plus one for
/// loose files in the root itself. Tracks are ordered by display string and
/// numbered from 1 within their playlist; a cover image in the playlist
/// directory becomes every track's artwork reference.
pub fn scan_playlists(root: &Path, settings: &LibrarySettings) -> Vec<Playlist> {
    let mut groups: BTreeMap<PathBuf, Vec<Track>> = BTreeMap::new();

    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            groups
                .entry(group_dir_for(root, path))
                .or_default()
                .push(read_track(path, settings));
        }
    }

    let mut playlists: Vec<Playlist> = Vec::with_capacity(groups.len());
    for (dir, mut tracks) in groups {
        tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));

        let artwork = find_cover(&dir);
        for (i, track) in tracks.iter_mut().enumerate() {
            track.id = (i + 1) as u32;
            track.artwork = artwork.clone();
        }

        playlists.push(Playlist {
            id: playlists.len() as u32 + 1,
            name: playlist_name(root, &dir),
            tracks,
        });
    }
    playlists
}
