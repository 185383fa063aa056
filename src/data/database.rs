use crate::data::queries::{CREATE_TABLES, GET_LIKED_AT, SET_LIKED_AT, UPSERT_SONG};
use crate::data::song::Song;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::Path;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let mut db = Database { conn };
        db.create_tables()?;
        log::debug!("opened library at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let mut db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(CREATE_TABLES)?;
        tx.commit()?;

        Ok(())
    }

    /// `None` both when the song is unknown and when it is not liked.
    pub fn liked_at(&self, id: &str) -> Result<Option<i64>> {
        let value = self
            .conn
            .query_row(GET_LIKED_AT, params![id], |row| row.get::<_, Option<i64>>(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Flip the like state of `id` as a single read-decide-write unit.
    ///
    /// When the song has no row yet it is inserted from `current_item`, but
    /// only if that item really is `id`. Returns the value stored afterwards.
    pub fn toggle_like(&mut self, id: &str, current_item: Option<&Song>, now: i64) -> Result<Option<i64>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<i64> = tx
            .query_row(GET_LIKED_AT, params![id], |row| row.get::<_, Option<i64>>(0))
            .optional()?
            .flatten();
        let next = match stored {
            Some(_) => None,
            None => Some(now),
        };

        let mut result = next;
        if tx.execute(SET_LIKED_AT, params![next, id])? == 0 {
            match current_item.filter(|item| item.id == id) {
                Some(item) => {
                    let song = Song {
                        liked_at: None,
                        ..item.clone()
                    }
                    .toggle_like(now);
                    upsert(&tx, &song)?;
                    result = song.liked_at;
                }
                None => result = stored,
            }
        }

        tx.commit()?;
        Ok(result)
    }
}

fn upsert(conn: &Connection, song: &Song) -> rusqlite::Result<usize> {
    conn.execute(
        UPSERT_SONG,
        params![
            song.id,
            song.title,
            song.artist,
            song.duration.map(|d| d.as_millis() as i64),
            song.liked_at,
        ],
    )
}

// direct row access for tests
#[cfg(test)]
impl Database {
    /// Returns the number of rows touched; zero means the song has no row yet.
    pub fn like(&self, id: &str, liked_at: Option<i64>) -> Result<usize> {
        Ok(self.conn.execute(SET_LIKED_AT, params![liked_at, id])?)
    }

    pub fn upsert_song(&self, song: &Song) -> Result<()> {
        upsert(&self.conn, song)?;
        Ok(())
    }

    pub fn song(&self, id: &str) -> Result<Option<Song>> {
        Ok(self
            .conn
            .query_row(crate::data::queries::GET_SONG, params![id], song_from_row)
            .optional()?)
    }
}

#[cfg(test)]
fn song_from_row(row: &rusqlite::Row) -> rusqlite::Result<Song> {
    let duration_ms: Option<i64> = row.get("duration_ms")?;
    Ok(Song {
        id: row.get("id")?,
        title: row.get("title")?,
        artist: row.get("artist")?,
        duration: duration_ms.map(|ms| std::time::Duration::from_millis(ms.max(0) as u64)),
        liked_at: row.get("liked_at")?,
    })
}

#[cfg(test)]
mod tests;
