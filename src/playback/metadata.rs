use crate::data::song::Song;
use anyhow::Result;
use lofty::{Accessor, AudioFile, TaggedFileExt};
use std::path::Path;

pub fn read_song(path: &Path) -> Result<Song> {
    let tagged = lofty::read_from_path(path)?;

    // some containers report zero when the length is unknown
    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

    let mut title = None;
    let mut artist = None;
    if let Some(tag) = tagged.primary_tag() {
        title = tag.title().map(|t| t.to_string());
        artist = tag.artist().map(|a| a.to_string());
    }

    Ok(Song {
        id: media_id(path),
        title: title.unwrap_or_else(|| fallback_title(path)),
        artist,
        duration,
        liked_at: None,
    })
}

/// Song for a file whose tags could not be read.
pub fn untagged_song(path: &Path) -> Song {
    Song::new(media_id(path), fallback_title(path))
}

pub fn media_id(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string()
}
