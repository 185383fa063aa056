use std::time::Duration;

/// Seek-bar drag state. While `Scrubbing`, `value` is what the bar shows in
/// place of the live position; it is always within `[0, duration]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scrub {
    #[default]
    Idle,
    Scrubbing {
        anchor_ms: i64,
        offset_ms: i64,
        value: Duration,
    },
}

impl Scrub {
    pub fn start(&mut self, displayed: Duration) {
        *self = Scrub::Scrubbing {
            anchor_ms: as_millis(displayed),
            offset_ms: 0,
            value: displayed,
        };
    }

    /// Move the drag by `delta_ms`. Without a known duration there is nothing
    /// to clamp against, so the drag is abandoned instead.
    pub fn drag(&mut self, delta_ms: i64, duration: Option<Duration>) {
        let Scrub::Scrubbing {
            anchor_ms,
            offset_ms,
            ..
        } = *self
        else {
            return;
        };
        let Some(duration) = duration else {
            *self = Scrub::Idle;
            return;
        };

        let offset_ms = offset_ms.saturating_add(delta_ms);
        let target = anchor_ms.saturating_add(offset_ms).clamp(0, as_millis(duration));
        *self = Scrub::Scrubbing {
            anchor_ms,
            offset_ms,
            value: Duration::from_millis(target as u64),
        };
    }

    pub fn position(&self) -> Option<Duration> {
        match self {
            Scrub::Idle => None,
            Scrub::Scrubbing { value, .. } => Some(*value),
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        matches!(self, Scrub::Scrubbing { .. })
    }

    pub fn reset(&mut self) {
        *self = Scrub::Idle;
    }
}

fn as_millis(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}
