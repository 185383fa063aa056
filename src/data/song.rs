use std::time::Duration;

/// A playable item as the rest of the app sees it. `id` is the media id; for
/// local files it is the path the track was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub liked_at: Option<i64>,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            duration: None,
            liked_at: None,
        }
    }

    #[cfg(test)]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[cfg(test)]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Flip the like flag, stamping `now` when the song becomes liked.
    pub fn toggle_like(mut self, now: i64) -> Self {
        self.liked_at = match self.liked_at {
            Some(_) => None,
            None => Some(now),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_like_flips_between_none_and_now() {
        let song = Song::new("a.flac", "A");
        let liked = song.toggle_like(42);
        assert_eq!(liked.liked_at, Some(42));
        assert_eq!(liked.toggle_like(99).liked_at, None);
    }
}
