use crate::data::song::Song;
use crate::playback::error::PlayerError;
use crate::playback::player::{PlaybackState, Player, Progress};
use crate::utils::feed::{Feed, Subscription};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Prepare,
    Play,
    Pause,
    SeekTo(Duration),
    Next,
    Previous,
}

/// Scriptable stand-in for a real player that records every command.
pub struct FakePlayer {
    pub state: PlaybackState,
    pub item: Option<Song>,
    pub progress: Progress,
    pub calls: Vec<Call>,
    feed: Feed<Progress>,
}

impl FakePlayer {
    pub fn new(item: Option<Song>, progress: Progress) -> Self {
        Self {
            state: PlaybackState::Paused,
            item,
            progress,
            calls: Vec::new(),
            feed: Feed::new(),
        }
    }

    pub fn emit(&mut self, progress: Progress) {
        self.progress = progress;
        self.feed.publish(progress);
    }

    pub fn seeks(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SeekTo(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn progress_subscribers(&self) -> usize {
        self.feed.subscriber_count()
    }
}

impl Player for FakePlayer {
    fn playback_state(&self) -> PlaybackState {
        self.state
    }

    fn prepare(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Prepare);
        self.state = PlaybackState::Paused;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Play);
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Pause);
        self.state = PlaybackState::Paused;
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.calls.push(Call::SeekTo(position));
        let progress = Progress {
            position,
            duration: self.progress.duration,
        };
        self.emit(progress);
        Ok(())
    }

    fn force_seek_to_next(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Next);
        Ok(())
    }

    fn force_seek_to_previous(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Previous);
        Ok(())
    }

    fn current_media_item(&self) -> Option<Song> {
        self.item.clone()
    }

    fn subscribe_progress(&mut self) -> Subscription<Progress> {
        self.feed.subscribe_with(self.progress)
    }
}
