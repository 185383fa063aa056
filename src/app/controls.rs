//! The now-playing controls: title/artist, transport buttons, like toggle and
//! a draggable seek bar.
//!
//! The component holds no reference to the player or the like store. Both are
//! handed in on every call that needs them, and the two live feeds it
//! listens to are explicit subscriptions owned here.

use crate::app::scrub::Scrub;
use crate::data::likes::LikeStore;
use crate::playback::player::{PlaybackState, Player, Progress};
use crate::utils::feed::Subscription;
use crate::utils::timefmt;
use anyhow::Result;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsProps {
    pub media_id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub should_be_playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    PlayPause,
    Previous,
    Next,
    ToggleLike,
    DragStart,
    Drag { delta_ms: i64 },
    DragEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayGlyph {
    Play,
    Pause,
}

/// Everything the panel needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub title: String,
    pub artist: String,
    pub play_glyph: PlayGlyph,
    pub liked: bool,
    pub seek_value: Duration,
    pub seek_max: Option<Duration>,
    pub scrubbing: bool,
    pub elapsed_label: String,
    pub duration_label: Option<String>,
}

pub struct Controls {
    props: ControlsProps,
    progress: Progress,
    scrub: Scrub,
    liked_at: Option<i64>,

    progress_sub: Option<Subscription<Progress>>,
    like_sub: Option<Subscription<Option<i64>>>,
}

impl Controls {
    pub fn new(props: ControlsProps) -> Self {
        let progress = Progress {
            position: props.position,
            duration: props.duration,
        };
        Self {
            props,
            progress,
            scrub: Scrub::default(),
            liked_at: None,
            progress_sub: None,
            like_sub: None,
        }
    }

    pub fn attach(&mut self, player: &mut dyn Player, likes: &LikeStore) -> Result<()> {
        self.progress_sub = Some(player.subscribe_progress());
        self.like_sub = Some(likes.subscribe(&self.props.media_id)?);
        log::debug!("controls attached for {}", self.props.media_id);
        self.sync();
        Ok(())
    }

    pub fn detach(&mut self) {
        if let Some(sub) = self.progress_sub.take() {
            sub.unsubscribe();
        }
        if let Some(sub) = self.like_sub.take() {
            sub.unsubscribe();
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.progress_sub.is_some()
    }

    pub fn props(&self) -> &ControlsProps {
        &self.props
    }

    pub fn set_props(&mut self, props: ControlsProps, likes: &LikeStore) -> Result<()> {
        let track_changed = props.media_id != self.props.media_id;

        if props.position != self.props.position || props.duration != self.props.duration {
            self.progress = Progress {
                position: props.position,
                duration: props.duration,
            };
        }
        self.props = props;

        if track_changed {
            log::debug!("controls now showing {}", self.props.media_id);
            self.scrub.reset();
            if let Some(old) = self.like_sub.take() {
                old.unsubscribe();
                self.like_sub = Some(likes.subscribe(&self.props.media_id)?);
            }
            self.sync();
        }
        Ok(())
    }

    /// Apply whatever the live feeds delivered since the last call.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        if let Some(p) = self.progress_sub.as_mut().and_then(|s| s.poll()) {
            changed |= p != self.progress;
            self.progress = p;
        }
        if let Some(v) = self.like_sub.as_mut().and_then(|s| s.poll()) {
            changed |= v != self.liked_at;
            self.liked_at = v;
        }
        changed
    }

    pub fn handle(&mut self, event: ControlEvent, player: &mut dyn Player, likes: &LikeStore) -> Result<()> {
        match event {
            ControlEvent::PlayPause => {
                if self.props.should_be_playing {
                    player.pause()?;
                } else {
                    if player.playback_state() == PlaybackState::Idle {
                        player.prepare()?;
                    }
                    player.play()?;
                }
            }
            ControlEvent::Previous => player.force_seek_to_previous()?,
            ControlEvent::Next => player.force_seek_to_next()?,
            ControlEvent::ToggleLike => {
                let current = player
                    .current_media_item()
                    .filter(|item| item.id == self.props.media_id);
                likes.toggle(&self.props.media_id, current)?;
            }
            ControlEvent::DragStart => self.scrub.start(self.displayed_position()),
            ControlEvent::Drag { delta_ms } => self.scrub.drag(delta_ms, self.progress.duration),
            ControlEvent::DragEnd => {
                if let Some(target) = self.scrub.position() {
                    player.seek_to(target)?;
                }
                self.scrub.reset();
            }
        }
        Ok(())
    }

    pub fn displayed_position(&self) -> Duration {
        self.scrub.position().unwrap_or(self.progress.position)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.progress.duration
    }

    #[cfg(test)]
    pub fn scrub_position(&self) -> Option<Duration> {
        self.scrub.position()
    }

    #[cfg(test)]
    pub fn liked_at(&self) -> Option<i64> {
        self.liked_at
    }

    pub fn view(&self) -> ControlsView {
        let shown = self.displayed_position();
        ControlsView {
            title: self.props.title.clone().unwrap_or_default(),
            artist: self.props.artist.clone().unwrap_or_default(),
            play_glyph: if self.props.should_be_playing {
                PlayGlyph::Pause
            } else {
                PlayGlyph::Play
            },
            liked: self.liked_at.is_some(),
            seek_value: shown,
            seek_max: self.progress.duration,
            scrubbing: self.scrub.is_scrubbing(),
            elapsed_label: timefmt::mmss(shown),
            duration_label: self.progress.duration.map(timefmt::mmss),
        }
    }
}

impl Drop for Controls {
    fn drop(&mut self) {
        self.detach();
    }
}
