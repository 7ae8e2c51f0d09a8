use std::time::{Duration, Instant};

use log::debug;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_COUNTDOWN: Duration = Duration::from_millis(5000);

/// Identifies one run of the timer. Every `start` hands out a fresh token, so events
/// from a cancelled or replaced run can be recognised and dropped.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TimerToken(u64);

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TimerEvent {
    Tick {
        token: TimerToken,
        remaining_secs: u64,
    },
    Complete {
        token: TimerToken,
    },
}

impl TimerEvent {
    pub fn token(&self) -> TimerToken {
        match self {
            TimerEvent::Tick { token, .. } => *token,
            TimerEvent::Complete { token } => *token,
        }
    }
}

#[derive(Debug)]
struct Run {
    token: TimerToken,
    started: Instant,
    ticks_sent: u32,
    fired: bool,
}

/// One-shot countdown polled from the event thread. Ticks are due at every
/// `TICK_INTERVAL` boundary from the start, completion once `total` has elapsed.
///
/// A run that has fired stays current until `finish` retires it, so its completion
/// event still passes the token check while it is being handled.
#[derive(Debug)]
pub struct SelectionTimer {
    total: Duration,
    last_token: u64,
    run: Option<Run>,
}

fn ceil_secs(remaining: Duration) -> u64 {
    let millis = remaining.as_millis() as u64;
    (millis + 999) / 1000
}

impl SelectionTimer {
    pub fn new(total: Duration) -> SelectionTimer {
        SelectionTimer {
            total,
            last_token: 0,
            run: None,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn start(&mut self, now: Instant) -> TimerToken {
        self.cancel();
        self.last_token += 1;
        let token = TimerToken(self.last_token);
        debug!("timer start {token:?} for {:?}", self.total);
        self.run = Some(Run {
            token,
            started: now,
            ticks_sent: 0,
            fired: false,
        });
        token
    }

    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            debug!("timer cancel {:?}", run.token);
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.run {
            Some(run) => !run.fired,
            None => false,
        }
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        match &self.run {
            Some(run) => run.token == token,
            None => false,
        }
    }

    /// Retires a fired run once its completion has been handled.
    pub fn finish(&mut self, token: TimerToken) {
        if self.is_current(token) {
            self.run = None;
        }
    }

    /// Everything that has come due up to `now`, oldest first. Completion is reported
    /// once; nothing further comes out of a fired run.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut events = vec![];
        let Some(run) = self.run.as_mut() else {
            return events;
        };
        if run.fired {
            return events;
        }
        let elapsed = now.saturating_duration_since(run.started);

        loop {
            let tick_at = TICK_INTERVAL * run.ticks_sent;
            if tick_at >= self.total || tick_at > elapsed {
                break;
            }
            events.push(TimerEvent::Tick {
                token: run.token,
                remaining_secs: ceil_secs(self.total - tick_at),
            });
            run.ticks_sent += 1;
        }

        if elapsed >= self.total {
            events.push(TimerEvent::Complete { token: run.token });
            run.fired = true;
        }
        events
    }
}
