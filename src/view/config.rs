use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a [`RosterView`](crate::RosterView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Origin of the activities API.
    pub base_url: String,
    /// How long a status message stays visible.
    pub message_timeout: Duration,
}

impl ViewConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        }
    }
}
