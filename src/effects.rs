use std::time::{Duration, Instant};

use rand::Rng;

use crate::constants::{LOADING_TYPIST_SETTINGS, SCRAMBLE_SETTINGS};

#[derive(Debug, Clone)]
pub struct LoadingTypist {
    chars: Vec<char>,
    started: Instant,
    type_step: Duration,
    hold: Duration,
    delete_step: Duration,
}

impl LoadingTypist {
    pub fn new(text: &str, started: Instant) -> Self {
        Self {
            chars: text.chars().collect(),
            started,
            type_step: Duration::from_millis(LOADING_TYPIST_SETTINGS.type_ms),
            hold: Duration::from_millis(LOADING_TYPIST_SETTINGS.hold_ms),
            delete_step: Duration::from_millis(LOADING_TYPIST_SETTINGS.delete_ms),
        }
    }

    pub fn visible_len(&self, now: Instant) -> usize {
        let len = self.chars.len();
        let elapsed = now.saturating_duration_since(self.started);

        let typing = self.type_step * len as u32;
        if elapsed < typing {
            return steps(elapsed, self.type_step).min(len);
        }

        let after_hold = typing + self.hold;
        if elapsed < after_hold {
            return len;
        }

        let deleted = steps(elapsed - after_hold, self.delete_step);
        len.saturating_sub(deleted)
    }

    pub fn text(&self, now: Instant) -> String {
        self.chars[..self.visible_len(now)].iter().collect()
    }

    pub fn is_done(&self, now: Instant) -> bool {
        let len = self.chars.len() as u32;
        let total = self.type_step * len + self.hold + self.delete_step * len;
        now.saturating_duration_since(self.started) >= total
    }
}

fn steps(elapsed: Duration, step: Duration) -> usize {
    if step.is_zero() {
        return usize::MAX;
    }
    (elapsed.as_millis() / step.as_millis()) as usize
}

const MIN_STEP: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Pausing,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<Vec<char>>,
    line: usize,
    shown: usize,
    phase: Phase,
    next_step: Instant,
    type_step: Duration,
    delete_step: Duration,
    pause: Duration,
}

impl Typewriter {
    pub fn new(
        lines: &[String],
        now: Instant,
        type_step: Duration,
        delete_step: Duration,
        pause: Duration,
    ) -> Self {
        // zero-length steps would never let `tick` catch up
        let type_step = type_step.max(MIN_STEP);
        let delete_step = delete_step.max(MIN_STEP);
        Self {
            lines: lines.iter().map(|l| l.chars().collect()).collect(),
            line: 0,
            shown: 0,
            phase: Phase::Typing,
            next_step: now + type_step,
            type_step,
            delete_step,
            pause,
        }
    }

    pub fn text(&self) -> String {
        self.current()
            .map(|chars| chars[..self.shown.min(chars.len())].iter().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn line_index(&self) -> usize {
        self.line
    }

    fn current(&self) -> Option<&Vec<char>> {
        self.lines.get(self.line)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut len) = self.current().map(Vec::len) else {
            return false;
        };

        let mut changed = false;
        while now >= self.next_step {
            match self.phase {
                Phase::Typing if self.shown < len => {
                    self.shown += 1;
                    changed = true;
                    if self.shown == len {
                        self.phase = Phase::Pausing;
                        self.next_step += self.pause;
                    } else {
                        self.next_step += self.type_step;
                    }
                }
                Phase::Typing | Phase::Pausing => {
                    self.phase = Phase::Deleting;
                    self.next_step += self.delete_step;
                }
                Phase::Deleting if self.shown > 0 => {
                    self.shown -= 1;
                    changed = true;
                    self.next_step += self.delete_step;
                }
                Phase::Deleting => {
                    self.line = (self.line + 1) % self.lines.len();
                    len = self.current().map(Vec::len).unwrap_or(0);
                    self.phase = Phase::Typing;
                    self.next_step += self.type_step;
                }
            }
        }
        changed
    }
}

#[derive(Debug, Clone)]
pub struct Scrambler {
    target: String,
    shown: String,
    revealed: bool,
    next_step: Instant,
    interval: Duration,
}

impl Scrambler {
    pub fn new<R: Rng + ?Sized>(target: &str, now: Instant, rng: &mut R) -> Self {
        Self {
            target: target.to_string(),
            shown: scramble(target, rng),
            revealed: false,
            next_step: now,
            interval: Duration::from_millis(SCRAMBLE_SETTINGS.interval_ms),
        }
    }

    pub fn text(&self) -> &str {
        if self.revealed { &self.target } else { &self.shown }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if self.revealed || now < self.next_step {
            return false;
        }
        self.shown = scramble(&self.target, rng);
        self.next_step = now + self.interval;
        true
    }
}

pub fn scramble<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let alphabet: Vec<char> = SCRAMBLE_SETTINGS.alphabet.chars().collect();
    text.chars()
        .map(|c| {
            if c == ' ' {
                c
            } else {
                alphabet[rng.gen_range(0..alphabet.len())]
            }
        })
        .collect()
}
