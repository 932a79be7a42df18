use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use time::OffsetDateTime;

use crate::AppState;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub finished: bool,
}

impl Countdown {
    pub fn between(now: OffsetDateTime, target: OffsetDateTime) -> Countdown {
        let remaining = (target - now).whole_seconds();
        if remaining <= 0 {
            return Countdown { days: 0, hours: 0, minutes: 0, seconds: 0, finished: true };
        }

        Countdown {
            days: remaining / DAY,
            hours: remaining % DAY / HOUR,
            minutes: remaining % HOUR / MINUTE,
            seconds: remaining % MINUTE,
            finished: false,
        }
    }

    pub fn until(target: OffsetDateTime) -> Countdown {
        Self::between(OffsetDateTime::now_utc(), target)
    }
}

#[debug_handler(state = AppState)]
pub async fn countdown(State(state): State<AppState>) -> Json<Countdown> {
    Json(Countdown::until(state.config.wedding_date))
}
