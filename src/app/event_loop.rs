use crate::app::controls::{ControlEvent, Controls, ControlsProps};
use crate::app::state::{AppState, SeekDrag};
use crate::data::likes::LikeStore;
use crate::playback::local_player::LocalPlayer;
use crate::playback::player::{Player, Progress};
use crate::ui::components::progress_bar;
use crate::ui::tui::{hit_test, Tui, UiLayout};
use crate::utils::input::{map_key, map_mouse, Action};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};

pub fn run(app: &mut AppState, mut player: Option<LocalPlayer>, likes: &LikeStore) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.enter()?;

    let res = run_loop(app, &mut tui, &mut player, likes);

    // drop subscriptions before the player goes away
    app.controls = None;
    tui.exit()?;
    res
}

fn run_loop(app: &mut AppState, tui: &mut Tui, player: &mut Option<LocalPlayer>, likes: &LikeStore) -> Result<()> {
    let mut last_layout = UiLayout::default();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            let action = match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => map_key(k, app.config.seek_step_ms),
                Event::Mouse(m) => map_mouse(m),
                _ => Action::None,
            };
            let p = player.as_mut().map(|p| p as &mut dyn Player);
            if let Err(e) = handle_action(app, p, likes, action, &last_layout) {
                log::warn!("{action:?} failed: {e:#}");
                app.set_toast(format!("{e}"));
            }
        }

        if let Err(e) = refresh(app, player.as_mut(), likes) {
            log::warn!("refreshing controls: {e:#}");
            app.set_toast(format!("{e}"));
        }

        app.tick(frame_start);

        last_layout = tui.draw(app)?;

        // frame pacing
        let frame_dt = fps_to_dt(app.config.ui_fps);
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn refresh(app: &mut AppState, player: Option<&mut LocalPlayer>, likes: &LikeStore) -> Result<()> {
    let Some(player) = player else {
        app.notice = Some("No audio output device".to_string());
        return apply_props(app, None, likes);
    };

    player.tick()?;
    let progress = player.progress();
    app.notice = Some("Nothing queued. Pass a music folder to play".to_string());
    apply_props(app, Some((player as &mut dyn Player, progress)), likes)
}

pub(crate) fn props_for(player: &dyn Player, progress: Progress) -> Option<ControlsProps> {
    let item = player.current_media_item()?;
    Some(ControlsProps {
        media_id: item.id,
        title: Some(item.title),
        artist: item.artist,
        should_be_playing: player.is_playing(),
        position: progress.position,
        duration: progress.duration.or(item.duration),
    })
}

/// Mount, update or unmount the controls to match what the player has loaded.
pub(crate) fn apply_props(
    app: &mut AppState,
    player: Option<(&mut dyn Player, Progress)>,
    likes: &LikeStore,
) -> Result<()> {
    let Some((player, progress)) = player else {
        app.controls = None;
        return Ok(());
    };
    let Some(props) = props_for(&*player, progress) else {
        app.controls = None;
        return Ok(());
    };

    match app.controls.as_mut() {
        Some(controls) => {
            if controls.props() != &props {
                controls.set_props(props, likes)?;
            }
            controls.sync();
        }
        None => {
            let mut controls = Controls::new(props);
            controls.attach(player, likes)?;
            app.controls = Some(controls);
        }
    }
    Ok(())
}

pub(crate) fn handle_action(
    app: &mut AppState,
    player: Option<&mut dyn Player>,
    likes: &LikeStore,
    action: Action,
    layout: &UiLayout,
) -> Result<()> {
    match action {
        Action::None => {}
        Action::Quit => app.should_quit = true,
        Action::TogglePlayPause => dispatch(app, player, likes, &[ControlEvent::PlayPause])?,
        Action::Prev => dispatch(app, player, likes, &[ControlEvent::Previous])?,
        Action::Next => dispatch(app, player, likes, &[ControlEvent::Next])?,
        Action::ToggleLike => dispatch(app, player, likes, &[ControlEvent::ToggleLike])?,
        Action::SeekBy(delta_ms) => dispatch(
            app,
            player,
            likes,
            &[
                ControlEvent::DragStart,
                ControlEvent::Drag { delta_ms },
                ControlEvent::DragEnd,
            ],
        )?,
        Action::MouseDown { col, row } => {
            if let Some(hit) = hit_test(layout, col, row) {
                return handle_action(app, player, likes, hit, layout);
            }
        }
        Action::SeekPress { col } => {
            if app.controls.is_some() {
                app.drag = Some(SeekDrag {
                    last_col: col,
                    started: false,
                });
            }
        }
        Action::MouseDrag { col } => {
            let Some(drag) = app.drag else {
                return Ok(());
            };
            let duration = app.controls.as_ref().and_then(|c| c.duration());
            let delta_ms = progress_bar::drag_delta_ms(
                i32::from(col) - i32::from(drag.last_col),
                layout.controls.seek_bar.width,
                duration,
            );
            app.drag = Some(SeekDrag {
                last_col: col,
                started: true,
            });

            // always forwarded, even when zero: an unknown duration has to
            // reach the scrub so the drag is abandoned
            let drag_event = ControlEvent::Drag { delta_ms };
            if drag.started {
                dispatch(app, player, likes, &[drag_event])?;
            } else {
                dispatch(app, player, likes, &[ControlEvent::DragStart, drag_event])?;
            }
        }
        Action::MouseUp => {
            if app.drag.take().is_some_and(|d| d.started) {
                dispatch(app, player, likes, &[ControlEvent::DragEnd])?;
            }
        }
    }
    Ok(())
}

fn dispatch(app: &mut AppState, player: Option<&mut dyn Player>, likes: &LikeStore, events: &[ControlEvent]) -> Result<()> {
    let (Some(controls), Some(player)) = (app.controls.as_mut(), player) else {
        return Ok(());
    };
    for ev in events {
        controls.handle(*ev, &mut *player, likes)?;
    }
    Ok(())
}

fn fps_to_dt(fps: u32) -> Duration {
    let fps = fps.clamp(30, 60);
    Duration::from_millis((1000 / fps) as u64)
}

#[cfg(test)]
mod tests;
