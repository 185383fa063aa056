pub mod controls;
pub mod event_loop;
pub mod scrub;
pub mod state;
