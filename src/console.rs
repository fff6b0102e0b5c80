use time::{OffsetDateTime, UtcOffset};

const MAX_LINES: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub timestamp: String,
    pub message: String,
}

impl std::fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

#[derive(Debug)]
pub struct Console {
    lines: Vec<ConsoleLine>,
    pushed: usize,
    offset: UtcOffset,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        // Must be resolved before other threads start on unix.
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self {
            lines: Vec::new(),
            pushed: 0,
            offset,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) -> &ConsoleLine {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        if self.lines.len() == MAX_LINES {
            self.lines.remove(0);
        }
        self.lines.push(ConsoleLine {
            timestamp: format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second()),
            message: message.into(),
        });
        self.pushed += 1;
        &self.lines[self.lines.len() - 1]
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn pushed(&self) -> usize {
        self.pushed
    }

    pub fn since(&self, seen: usize) -> &[ConsoleLine] {
        let evicted = self.pushed - self.lines.len();
        let start = seen.saturating_sub(evicted).min(self.lines.len());
        &self.lines[start..]
    }
}
