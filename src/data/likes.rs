use crate::data::database::Database;
use crate::data::song::Song;
use crate::utils::feed::{Feed, Subscription};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};

type Watchers = Arc<Mutex<HashMap<String, Feed<Option<i64>>>>>;

#[derive(Debug)]
struct ToggleRequest {
    media_id: String,
    current_item: Option<Song>,
    now: i64,
}

/// Like state backed by the database, with a live feed per media id.
///
/// Toggles are queued to a writer thread so the UI loop never waits on
/// SQLite; every committed toggle is published to that id's subscribers.
pub struct LikeStore {
    db: Arc<Mutex<Database>>,
    watchers: Watchers,
    toggle_tx: Option<Sender<ToggleRequest>>,
    writer: Option<JoinHandle<()>>,
}

impl LikeStore {
    pub fn new(db: Database) -> Self {
        let db = Arc::new(Mutex::new(db));
        let watchers: Watchers = Arc::new(Mutex::new(HashMap::new()));
        let (toggle_tx, toggle_rx) = mpsc::channel::<ToggleRequest>();

        let worker_db = Arc::clone(&db);
        let worker_watchers = Arc::clone(&watchers);
        let writer = std::thread::spawn(move || {
            while let Ok(req) = toggle_rx.recv() {
                if let Err(e) = apply_toggle(&worker_db, &worker_watchers, &req) {
                    log::error!("like toggle for {} failed: {e:#}", req.media_id);
                }
            }
        });

        Self {
            db,
            watchers,
            toggle_tx: Some(toggle_tx),
            writer: Some(writer),
        }
    }

    /// Live like timestamp for `media_id`, primed with the stored value.
    pub fn subscribe(&self, media_id: &str) -> Result<Subscription<Option<i64>>> {
        // read under the watchers lock so a concurrent toggle can't slip
        // between the initial value and registration
        let mut watchers = lock(&self.watchers)?;
        let current = lock(&self.db)?.liked_at(media_id)?;
        watchers.retain(|_, feed| !feed.is_empty());
        let sub = watchers
            .entry(media_id.to_string())
            .or_default()
            .subscribe_with(current);
        log::debug!("subscribed to likes for {media_id}");
        Ok(sub)
    }

    /// Queue a like toggle. `current_item` is what the player is on right now
    /// and is only used when `media_id` has no row yet.
    pub fn toggle(&self, media_id: &str, current_item: Option<Song>) -> Result<()> {
        let tx = self.toggle_tx.as_ref().ok_or_else(|| anyhow!("like writer has stopped"))?;
        tx.send(ToggleRequest {
            media_id: media_id.to_string(),
            current_item,
            now: now_millis()?,
        })
        .map_err(|_| anyhow!("like writer has stopped"))
    }

    /// Same as [`toggle`](Self::toggle) but runs on the calling thread.
    #[cfg(test)]
    pub fn toggle_now(&self, media_id: &str, current_item: Option<Song>) -> Result<Option<i64>> {
        let req = ToggleRequest {
            media_id: media_id.to_string(),
            current_item,
            now: now_millis()?,
        };
        apply_toggle(&self.db, &self.watchers, &req)
    }

    #[cfg(test)]
    pub fn liked_at(&self, media_id: &str) -> Result<Option<i64>> {
        lock(&self.db)?.liked_at(media_id)
    }
}

/// Closes the queue and waits for toggles already sent to be committed.
impl Drop for LikeStore {
    fn drop(&mut self) {
        drop(self.toggle_tx.take());
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                log::error!("like writer panicked");
            }
        }
    }
}

fn apply_toggle(db: &Mutex<Database>, watchers: &Watchers, req: &ToggleRequest) -> Result<Option<i64>> {
    let value = lock(db)?.toggle_like(&req.media_id, req.current_item.as_ref(), req.now)?;
    log::debug!("{} liked_at -> {:?}", req.media_id, value);

    if let Some(feed) = lock(watchers)?.get_mut(&req.media_id) {
        feed.publish(value);
    }
    Ok(value)
}

fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    m.lock().map_err(|_| anyhow!("lock poisoned"))
}

fn now_millis() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i64)
}
