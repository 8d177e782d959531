use std::time::{Duration, Instant};

/// Quiet period before typed search text reaches the query.
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Settles a stream of keystrokes.
///
/// [`input`](Self::input) updates the echoed value immediately;
/// [`poll`](Self::poll) yields the value once no input arrived for the quiet
/// period. Only settled values ever leave the debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    raw: String,
    settled: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self::with_value(quiet, "")
    }

    /// Start from an already-settled value, e.g. the search restored from
    /// the address.
    pub fn with_value(quiet: Duration, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            quiet,
            raw: value.clone(),
            settled: value,
            deadline: None,
        }
    }

    /// Record a keystroke at `at`. Restarts the quiet period.
    pub fn input(&mut self, value: impl Into<String>, at: Instant) {
        self.raw = value.into();
        self.deadline = Some(at + self.quiet);
    }

    /// The value as typed, for echoing back in the input field.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// When the pending input will settle, if any is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Emit the settled value once the quiet period has elapsed by `now`.
    /// Returns `None` while typing continues or when the settled value is
    /// unchanged.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        if self.raw == self.settled {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }

    /// Forget pending input and take `value` as settled, without emitting.
    pub fn reset(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.raw = value.clone();
        self.settled = value;
        self.deadline = None;
    }
}

/// Settle a timestamped sequence of input values observed until `end`.
///
/// Pure form of [`Debouncer`]: a value is emitted when the gap to the next
/// event (or to `end`) is at least `quiet` and it differs from the previous
/// emission.
pub fn settle<I, S>(events: I, quiet: Duration, end: Instant) -> Vec<String>
where
    I: IntoIterator<Item = (Instant, S)>,
    S: Into<String>,
{
    let mut debouncer = Debouncer::new(quiet);
    let mut emitted = Vec::new();
    for (at, value) in events {
        if let Some(value) = debouncer.poll(at) {
            emitted.push(value);
        }
        debouncer.input(value, at);
    }
    if let Some(value) = debouncer.poll(end) {
        emitted.push(value);
    }
    emitted
}
