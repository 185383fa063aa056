use super::*;
use std::time::Duration;

fn freddie() -> Song {
    Song::new("/music/02 Freddie Freeloader.flac", "Freddie Freeloader")
        .with_artist("Miles Davis")
        .with_duration(Duration::from_millis(589_000))
}

#[test]
fn unknown_song_is_not_liked() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.liked_at("nope").unwrap(), None);
    assert_eq!(db.song("nope").unwrap(), None);
}

#[test]
fn like_reports_zero_rows_for_missing_song() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.like("missing", Some(10)).unwrap(), 0);

    db.upsert_song(&freddie()).unwrap();
    assert_eq!(db.like(&freddie().id, Some(10)).unwrap(), 1);
    assert_eq!(db.liked_at(&freddie().id).unwrap(), Some(10));
}

#[test]
fn upsert_round_trips_metadata() {
    let db = Database::open_in_memory().unwrap();
    let song = freddie();
    db.upsert_song(&song).unwrap();
    assert_eq!(db.song(&song.id).unwrap(), Some(song.clone()));

    let renamed = Song {
        title: "Freddie Freeloader (Take 2)".into(),
        ..song.clone()
    };
    db.upsert_song(&renamed).unwrap();
    assert_eq!(db.song(&song.id).unwrap().unwrap().title, "Freddie Freeloader (Take 2)");
}

#[test]
fn toggle_inserts_missing_song_when_it_is_the_current_item() {
    let mut db = Database::open_in_memory().unwrap();
    let song = freddie();

    let v = db.toggle_like(&song.id, Some(&song), 1_000).unwrap();
    assert_eq!(v, Some(1_000));

    let stored = db.song(&song.id).unwrap().unwrap();
    assert_eq!(stored.title, "Freddie Freeloader");
    assert_eq!(stored.liked_at, Some(1_000));
}

#[test]
fn toggle_flips_back_to_none() {
    let mut db = Database::open_in_memory().unwrap();
    let song = freddie();

    assert_eq!(db.toggle_like(&song.id, Some(&song), 1_000).unwrap(), Some(1_000));
    assert_eq!(db.toggle_like(&song.id, Some(&song), 2_000).unwrap(), None);
    assert_eq!(db.liked_at(&song.id).unwrap(), None);
    assert_eq!(db.toggle_like(&song.id, None, 3_000).unwrap(), Some(3_000));
}

#[test]
fn toggle_skips_insert_when_player_moved_on() {
    let mut db = Database::open_in_memory().unwrap();
    let other = Song::new("/music/03 Blue in Green.flac", "Blue in Green");

    let v = db.toggle_like(&freddie().id, Some(&other), 1_000).unwrap();
    assert_eq!(v, None);
    assert_eq!(db.song(&freddie().id).unwrap(), None);
    assert_eq!(db.song(&other.id).unwrap(), None);
}

#[test]
fn open_creates_parent_dirs_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("library.db");

    {
        let mut db = Database::open(&path).unwrap();
        db.toggle_like(&freddie().id, Some(&freddie()), 5).unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.liked_at(&freddie().id).unwrap(), Some(5));
}
