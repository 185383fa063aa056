use super::*;
use crate::data::config::Config;
use crate::data::database::Database;
use crate::data::song::Song;
use crate::playback::testing::{Call, FakePlayer};
use crate::ui::panels::controls_panel;
use crate::ui::theme::Theme;
use ratatui::layout::Rect;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn fixture(position: u64, duration: Option<u64>) -> (AppState, FakePlayer, LikeStore) {
    let mut song = Song::new("waltz-for-debby", "Waltz for Debby").with_artist("Bill Evans");
    if let Some(d) = duration {
        song = song.with_duration(ms(d));
    }
    let progress = Progress {
        position: ms(position),
        duration: duration.map(ms),
    };
    let mut player = FakePlayer::new(Some(song), progress);
    let likes = LikeStore::new(Database::open_in_memory().unwrap());
    let mut app = AppState::new(Config::default(), Theme::load("system"));
    apply_props(&mut app, Some((&mut player as &mut dyn Player, progress)), &likes).unwrap();
    (app, player, likes)
}

fn layout() -> UiLayout {
    let full = Rect::new(0, 0, 64, 11);
    UiLayout {
        full,
        controls: controls_panel::layout(full),
    }
}

fn act(app: &mut AppState, player: &mut FakePlayer, likes: &LikeStore, action: Action) {
    handle_action(app, Some(player), likes, action, &layout()).unwrap();
}

#[test]
fn controls_follow_the_loaded_item() {
    let (mut app, mut player, likes) = fixture(0, Some(200_000));
    assert!(app.controls.as_ref().is_some_and(|c| c.is_attached()));
    assert_eq!(player.progress_subscribers(), 1);

    player.item = None;
    let progress = player.progress;
    apply_props(&mut app, Some((&mut player as &mut dyn Player, progress)), &likes).unwrap();
    assert!(app.controls.is_none());
    assert_eq!(player.progress_subscribers(), 0);
}

#[test]
fn no_player_unmounts_controls() {
    let (mut app, _player, likes) = fixture(0, Some(200_000));
    apply_props(&mut app, None, &likes).unwrap();
    assert!(app.controls.is_none());

    handle_action(&mut app, None, &likes, Action::TogglePlayPause, &layout()).unwrap();
}

#[test]
fn props_prefer_live_duration() {
    let song = Song::new("a", "A").with_duration(ms(90_000));
    let player = FakePlayer::new(
        Some(song),
        Progress {
            position: ms(1_000),
            duration: Some(ms(91_000)),
        },
    );
    let props = props_for(&player, player.progress).unwrap();
    assert_eq!(props.duration, Some(ms(91_000)));
    assert_eq!(props.title.as_deref(), Some("A"));
    assert_eq!(props.artist, None);
    assert!(!props.should_be_playing);
}

#[test]
fn seek_key_commits_one_seek() {
    let (mut app, mut player, likes) = fixture(30_000, Some(200_000));
    act(&mut app, &mut player, &likes, Action::SeekBy(5_000));
    assert_eq!(player.seeks(), vec![ms(35_000)]);

    act(&mut app, &mut player, &likes, Action::SeekBy(-60_000));
    assert_eq!(player.seeks(), vec![ms(35_000), Duration::ZERO]);
}

#[test]
fn seek_key_without_duration_is_ignored() {
    let (mut app, mut player, likes) = fixture(30_000, None);
    act(&mut app, &mut player, &likes, Action::SeekBy(5_000));
    assert!(player.seeks().is_empty());
}

#[test]
fn mouse_drag_on_seek_bar_seeks_on_release() {
    let (mut app, mut player, likes) = fixture(30_000, Some(200_000));
    let bar = layout().controls.seek_bar;
    let row = bar.y;

    act(&mut app, &mut player, &likes, Action::MouseDown { col: bar.x + 10, row });
    act(&mut app, &mut player, &likes, Action::MouseDrag { col: bar.x + 14 });
    act(&mut app, &mut player, &likes, Action::MouseDrag { col: bar.x + 20 });
    assert!(player.seeks().is_empty());
    assert!(app.controls.as_ref().unwrap().scrub_position().is_some());

    act(&mut app, &mut player, &likes, Action::MouseUp);

    let expected = 30_000
        + progress_bar::drag_delta_ms(4, bar.width, Some(ms(200_000)))
        + progress_bar::drag_delta_ms(6, bar.width, Some(ms(200_000)));
    assert_eq!(player.seeks(), vec![ms(expected as u64)]);
    assert_eq!(app.drag, None);
    assert_eq!(app.controls.as_ref().unwrap().scrub_position(), None);
}

#[test]
fn mouse_drag_without_duration_never_seeks() {
    let (mut app, mut player, likes) = fixture(30_000, None);
    let bar = layout().controls.seek_bar;

    act(&mut app, &mut player, &likes, Action::MouseDown { col: bar.x + 5, row: bar.y });
    act(&mut app, &mut player, &likes, Action::MouseDrag { col: bar.x + 15 });
    assert_eq!(app.controls.as_ref().unwrap().scrub_position(), None);

    act(&mut app, &mut player, &likes, Action::MouseDrag { col: bar.x + 20 });
    act(&mut app, &mut player, &likes, Action::MouseUp);
    assert!(player.seeks().is_empty());
    assert_eq!(app.drag, None);
}

#[test]
fn bare_click_on_seek_bar_does_not_seek() {
    let (mut app, mut player, likes) = fixture(30_000, Some(200_000));
    let bar = layout().controls.seek_bar;

    act(&mut app, &mut player, &likes, Action::MouseDown { col: bar.x + 5, row: bar.y });
    assert_eq!(app.controls.as_ref().unwrap().scrub_position(), None);
    act(&mut app, &mut player, &likes, Action::MouseUp);

    assert!(player.calls.is_empty());
    assert_eq!(app.drag, None);
}

#[test]
fn track_change_mid_drag_drops_the_seek() {
    let (mut app, mut player, likes) = fixture(30_000, Some(200_000));
    let bar = layout().controls.seek_bar;

    act(&mut app, &mut player, &likes, Action::MouseDown { col: bar.x + 5, row: bar.y });
    act(&mut app, &mut player, &likes, Action::MouseDrag { col: bar.x + 12 });
    assert!(app.controls.as_ref().unwrap().scrub_position().is_some());

    player.item = Some(Song::new("blue-in-green", "Blue in Green").with_duration(ms(337_000)));
    let progress = player.progress;
    apply_props(&mut app, Some((&mut player as &mut dyn Player, progress)), &likes).unwrap();
    assert_eq!(app.controls.as_ref().unwrap().props().media_id, "blue-in-green");
    assert_eq!(app.controls.as_ref().unwrap().scrub_position(), None);

    act(&mut app, &mut player, &likes, Action::MouseUp);
    assert!(player.seeks().is_empty());
}

#[test]
fn stray_mouse_events_do_nothing() {
    let (mut app, mut player, likes) = fixture(30_000, Some(200_000));
    act(&mut app, &mut player, &likes, Action::MouseDrag { col: 12 });
    act(&mut app, &mut player, &likes, Action::MouseUp);
    act(&mut app, &mut player, &likes, Action::MouseDown { col: 0, row: 0 });
    assert!(player.calls.is_empty());
}

#[test]
fn clicking_play_starts_playback() {
    let (mut app, mut player, likes) = fixture(0, Some(200_000));
    let play = layout().controls.buttons.play;
    act(&mut app, &mut player, &likes, Action::MouseDown { col: play.x, row: play.y });
    assert_eq!(player.calls, vec![Call::Play]);
}

#[test]
fn skip_keys_reach_the_player() {
    let (mut app, mut player, likes) = fixture(0, Some(200_000));
    act(&mut app, &mut player, &likes, Action::Next);
    act(&mut app, &mut player, &likes, Action::Prev);
    assert_eq!(player.calls, vec![Call::Next, Call::Previous]);
}

#[test]
fn quit_stops_the_loop() {
    let (mut app, mut player, likes) = fixture(0, None);
    act(&mut app, &mut player, &likes, Action::Quit);
    assert!(app.should_quit);
}

#[test]
fn frame_rate_is_clamped() {
    assert_eq!(fps_to_dt(240), ms(16));
    assert_eq!(fps_to_dt(1), ms(33));
}
