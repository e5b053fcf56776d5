use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneShotTimer {
    deadline: Instant,
    fired: bool,
}

impl OneShotTimer {
    pub fn start(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            fired: false,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[derive(Debug)]
pub struct LoadingGate {
    timer: OneShotTimer,
}

impl LoadingGate {
    pub fn new(now: Instant, duration: Duration) -> Self {
        Self {
            timer: OneShotTimer::start(now, duration),
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.timer.has_fired()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        let finished = self.timer.poll(now);
        if finished {
            tracing::debug!("loading gate opened");
        }
        finished
    }
}
