use crate::domain::model::{EventStatus, EventWindow, StatusView};
use chrono::{DateTime, Utc};

pub const LIVE_LABEL: &str = "Live Now";

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Classifies `now` against the event window. Pure; re-evaluated once per
/// second by the engine loop, so every invocation must be fully determined
/// by its inputs.
pub fn event_status(now: DateTime<Utc>, window: &EventWindow) -> EventStatus {
    if now < window.start {
        let time_left = (window.start - now).num_milliseconds();
        EventStatus::Pending {
            days: time_left / MS_PER_DAY,
            hours: time_left % MS_PER_DAY / MS_PER_HOUR,
            minutes: time_left % MS_PER_HOUR / MS_PER_MINUTE,
            seconds: time_left % MS_PER_MINUTE / MS_PER_SECOND,
        }
    } else if now < window.end {
        EventStatus::Live
    } else {
        EventStatus::Ended
    }
}

/// Renders a status into its display view. Units above the largest
/// populated one are dropped; minutes and seconds are always shown below
/// the hour threshold.
pub fn render_status(status: &EventStatus) -> StatusView {
    match *status {
        EventStatus::Pending {
            days,
            hours,
            minutes,
            seconds,
        } => {
            let text = if days > 0 {
                format!("{}d {}h {}m {}s until live event", days, hours, minutes, seconds)
            } else if hours > 0 {
                format!("{}h {}m {}s until live event", hours, minutes, seconds)
            } else {
                format!("{}m {}s until live event", minutes, seconds)
            };
            StatusView {
                text,
                emphasis: false,
            }
        }
        EventStatus::Live => StatusView {
            text: LIVE_LABEL.to_string(),
            emphasis: true,
        },
        EventStatus::Ended => StatusView {
            text: String::new(),
            emphasis: false,
        },
    }
}
