use crate::data::playlist::{Playlist, PlaylistItem};
use crate::data::song::Song;
use crate::playback::error::PlayerError;
use crate::playback::metadata::{read_song, untagged_song};
use crate::playback::player::{PlaybackState, Player, Progress};
use crate::utils::feed::{Feed, Subscription};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub struct LocalPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,

    queue: Playlist,
    state: PlaybackState,
    duration: Option<Duration>,

    // position tracking
    base_seek: Duration,
    started_at: Option<Instant>,
    paused_acc: Duration,

    progress_feed: Feed<Progress>,
}

impl LocalPlayer {
    pub fn new() -> Result<Self, PlayerError> {
        let (_stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        Ok(Self {
            _stream,
            handle,
            sink,
            queue: Playlist::default(),
            state: PlaybackState::Idle,
            duration: None,
            base_seek: Duration::ZERO,
            started_at: None,
            paused_acc: Duration::ZERO,
            progress_feed: Feed::new(),
        })
    }

    /// Replace the queue with the audio files in `folder`. Playback stays
    /// idle until the first `prepare`/`play`.
    pub fn load_folder(&mut self, folder: &Path) -> anyhow::Result<usize> {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(folder)? {
            let path = entry?.path();
            if path.is_file() && is_audio(&path) {
                files.push(path);
            }
        }
        files.sort();

        let items: Vec<PlaylistItem> = files
            .into_iter()
            .map(|path| {
                let song = read_song(&path).unwrap_or_else(|e| {
                    log::debug!("no tags for {}: {e}", path.display());
                    untagged_song(&path)
                });
                PlaylistItem { path, song }
            })
            .collect();

        let n = items.len();

        self.sink.stop();
        self.sink = Sink::try_new(&self.handle)?;
        self.queue = Playlist::new(items);
        self.state = PlaybackState::Idle;
        self.duration = self.queue.current_item().and_then(|it| it.song.duration);
        self.reset_position(Duration::ZERO, false);
        self.publish();
        Ok(n)
    }

    pub fn position(&self) -> Duration {
        match self.started_at {
            Some(start) => self.base_seek + self.paused_acc + start.elapsed(),
            None => self.base_seek + self.paused_acc,
        }
    }

    /// Called once per frame: advance past finished items and publish the
    /// current position to progress subscribers.
    pub fn tick(&mut self) -> Result<(), PlayerError> {
        if self.state == PlaybackState::Playing && self.sink.empty() {
            match self.queue.next_index_no_wrap() {
                Some(i) => self.load_index(i, true)?,
                None => {
                    self.paused_acc = self.duration.unwrap_or_else(|| self.position());
                    self.base_seek = Duration::ZERO;
                    self.started_at = None;
                    self.state = PlaybackState::Ended;
                    log::debug!("end of queue");
                }
            }
        }
        self.publish();
        Ok(())
    }

    /// Position clamped to the item's duration, as subscribers see it.
    pub fn progress(&self) -> Progress {
        let mut position = self.position();
        if let Some(d) = self.duration {
            position = position.min(d);
        }
        Progress {
            position,
            duration: self.duration,
        }
    }

    fn publish(&mut self) {
        let p = self.progress();
        self.progress_feed.publish(p);
    }

    fn reset_position(&mut self, base: Duration, running: bool) {
        self.base_seek = base;
        self.paused_acc = Duration::ZERO;
        self.started_at = running.then(Instant::now);
    }

    fn current_path(&self) -> Result<PathBuf, PlayerError> {
        self.queue
            .current_item()
            .map(|it| it.path.clone())
            .ok_or(PlayerError::EmptyQueue)
    }

    /// Decode the current item into a fresh sink, skipping to `start`.
    fn open_current(&mut self, start: Duration, autoplay: bool) -> Result<(), PlayerError> {
        let path = self.current_path()?;
        let file = File::open(&path)?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        if self.duration.is_none() {
            self.duration = decoder.total_duration().filter(|d| !d.is_zero());
        }

        self.sink.stop();
        self.sink = Sink::try_new(&self.handle)?;
        if !autoplay {
            self.sink.pause();
        }
        self.sink
            .append(decoder.convert_samples::<f32>().skip_duration(start));

        self.reset_position(start, autoplay);
        self.state = if autoplay {
            self.sink.play();
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        Ok(())
    }

    fn load_index(&mut self, index: usize, autoplay: bool) -> Result<(), PlayerError> {
        self.queue.current = Some(index);
        self.duration = self.queue.current_item().and_then(|it| it.song.duration);
        self.open_current(Duration::ZERO, autoplay)?;
        self.publish();
        Ok(())
    }

    fn skip_to(&mut self, index: Option<usize>) -> Result<(), PlayerError> {
        let index = index.ok_or(PlayerError::EmptyQueue)?;
        let autoplay = self.state == PlaybackState::Playing;
        self.load_index(index, autoplay)
    }
}

impl Player for LocalPlayer {
    fn playback_state(&self) -> PlaybackState {
        self.state
    }

    fn prepare(&mut self) -> Result<(), PlayerError> {
        self.open_current(Duration::ZERO, false)?;
        self.publish();
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Idle => self.prepare()?,
            PlaybackState::Ended => self.load_index(0, false)?,
            _ => {}
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        self.sink.play();
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        if self.started_at.is_some() {
            self.paused_acc = self.position() - self.base_seek;
            self.started_at = None;
        }
        self.sink.pause();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError> {
        let autoplay = self.state == PlaybackState::Playing;
        log::debug!("seek to {:?}", position);
        self.open_current(position, autoplay)?;
        self.publish();
        Ok(())
    }

    fn force_seek_to_next(&mut self) -> Result<(), PlayerError> {
        self.skip_to(self.queue.next_index_sequence())
    }

    fn force_seek_to_previous(&mut self) -> Result<(), PlayerError> {
        self.skip_to(self.queue.prev_index_sequence())
    }

    fn current_media_item(&self) -> Option<Song> {
        self.queue.current_item().map(|it| it.song.clone())
    }

    fn subscribe_progress(&mut self) -> Subscription<Progress> {
        let current = self.progress();
        self.progress_feed.subscribe_with(current)
    }
}

fn is_audio(p: &Path) -> bool {
    let Some(ext) = p.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    matches!(
        ext.to_lowercase().as_str(),
        "mp3" | "flac" | "wav" | "ogg" | "aac" | "m4a"
    )
}
