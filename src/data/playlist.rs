use crate::data::song::Song;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PlaylistItem {
    pub path: PathBuf,
    pub song: Song,
}

/// Play queue. `current` is only `None` while the queue is empty.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    pub items: Vec<PlaylistItem>,
    pub current: Option<usize>,
}

impl Playlist {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        let current = if items.is_empty() { None } else { Some(0) };
        Self { items, current }
    }

    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn next_index_no_wrap(&self) -> Option<usize> {
        let cur = self.current?;
        let next = cur + 1;
        (next < self.items.len()).then_some(next)
    }

    pub fn next_index_sequence(&self) -> Option<usize> {
        let cur = self.current?;
        if self.items.is_empty() {
            None
        } else {
            Some((cur + 1) % self.items.len())
        }
    }

    pub fn prev_index_sequence(&self) -> Option<usize> {
        let cur = self.current?;
        if self.items.is_empty() {
            None
        } else {
            Some((cur + self.items.len() - 1) % self.items.len())
        }
    }
}
