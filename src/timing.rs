use std::time::{Duration, SystemTime};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimingState {
    Idle,
    Running,
    Stopped,
}

/// Clock and keystroke counters for one practice session.
///
/// Every transition consumes the session and returns the next one, so calls
/// chain: `TimingSession::new().start(t0).add_character(true).stop(t1)`.
/// Time is always passed in; nothing here reads the wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSession {
    is_running: bool,
    start_time: Option<SystemTime>,
    end_time: Option<SystemTime>,
    character_count: u64,
    error_count: u64,
}

impl Default for TimingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSession {
    pub fn new() -> Self {
        Self {
            is_running: false,
            start_time: None,
            end_time: None,
            character_count: 0,
            error_count: 0,
        }
    }

    pub fn reset(self) -> Self {
        Self::new()
    }

    /// Start the clock. Starting a running session keeps the original start
    /// time.
    pub fn start(self, now: SystemTime) -> Self {
        if self.is_running {
            return self;
        }
        Self {
            is_running: true,
            start_time: Some(now),
            end_time: None,
            ..self
        }
    }

    /// Freeze the clock. Only a running session can be stopped.
    pub fn stop(self, now: SystemTime) -> Self {
        if !self.is_running {
            return self;
        }
        Self {
            is_running: false,
            end_time: Some(now),
            ..self
        }
    }

    pub fn add_character(self, is_correct: bool) -> Self {
        Self {
            character_count: self.character_count + 1,
            error_count: self.error_count + u64::from(!is_correct),
            ..self
        }
    }

    /// Time between start and stop, or start and `now` while running.
    pub fn duration(&self, now: SystemTime) -> Duration {
        match self.start_time {
            None => Duration::ZERO,
            Some(start) => self
                .end_time
                .unwrap_or(now)
                .duration_since(start)
                .unwrap_or_default(),
        }
    }

    pub fn state(&self) -> TimingState {
        match (self.is_running, self.start_time) {
            (true, _) => TimingState::Running,
            (false, None) => TimingState::Idle,
            (false, Some(_)) => TimingState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn start_time(&self) -> Option<SystemTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<SystemTime> {
        self.end_time
    }

    pub fn character_count(&self) -> u64 {
        self.character_count
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn correct_count(&self) -> u64 {
        self.character_count - self.error_count
    }
}
