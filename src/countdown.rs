//! Live countdown to the wedding date.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::time::{interval, MissedTickBehavior};

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub finished: bool,
}

impl CountdownParts {
    pub const FINISHED: CountdownParts = CountdownParts {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        finished: true,
    };
}

/// Whole units left until `target`, floored. Holds at zero once it passes.
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownParts {
    let total = (target - now).num_seconds();
    if total <= 0 {
        return CountdownParts::FINISHED;
    }

    CountdownParts {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
        finished: false,
    }
}

/// Recompute the countdown once per `period`. The first value is produced
/// immediately; after the target passes the zero value is yielded once and
/// the stream ends. Dropping the stream stops the timer.
pub fn ticks(
    target: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    period: Duration,
) -> impl Stream<Item = CountdownParts> {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    stream::unfold(Some(timer), move |state| {
        let clock = clock.clone();
        async move {
            let mut timer = state?;
            timer.tick().await;
            let parts = remaining(target, clock.now());
            let next = if parts.finished { None } else { Some(timer) };
            Some((parts, next))
        }
    })
}
