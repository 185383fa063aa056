use crate::data::song::Song;
use crate::playback::error::PlayerError;
use crate::utils::feed::Subscription;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing decoded yet; `prepare` must run before `play`.
    Idle,
    Paused,
    Playing,
    Ended,
}

/// Live position of the current item. `duration` is `None` while unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub position: Duration,
    pub duration: Option<Duration>,
}

pub trait Player {
    fn playback_state(&self) -> PlaybackState;

    fn is_playing(&self) -> bool {
        self.playback_state() == PlaybackState::Playing
    }

    fn prepare(&mut self) -> Result<(), PlayerError>;
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError>;

    /// Skip to the next item, wrapping to the first one at the end.
    fn force_seek_to_next(&mut self) -> Result<(), PlayerError>;
    /// Skip to the previous item, wrapping to the last one at the start.
    fn force_seek_to_previous(&mut self) -> Result<(), PlayerError>;

    fn current_media_item(&self) -> Option<Song>;
    fn subscribe_progress(&mut self) -> Subscription<Progress>;
}
