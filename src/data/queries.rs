pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS songs(
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        artist TEXT,
        duration_ms INTEGER,
        liked_at INTEGER
    );
";

pub const GET_LIKED_AT: &str = "
    SELECT liked_at FROM songs
    WHERE id = ?
";

pub const SET_LIKED_AT: &str = "
    UPDATE songs SET liked_at = ?1
    WHERE id = ?2
";

#[cfg(test)]
pub const GET_SONG: &str = "
    SELECT id, title, artist, duration_ms, liked_at
    FROM songs
    WHERE id = ?
";

pub const UPSERT_SONG: &str = "
    INSERT INTO songs (id, title, artist, duration_ms, liked_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        artist = excluded.artist,
        duration_ms = excluded.duration_ms,
        liked_at = excluded.liked_at
";
