#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// Messages surfaced to the user, newest last. The view drains them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        AlertQueue::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.alerts.push(Alert {
            level: AlertLevel::Error,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.alerts.push(Alert {
            level: AlertLevel::Success,
            message: message.into(),
        });
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn messages(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.alerts
            .iter()
            .rev()
            .find(|alert| alert.level == AlertLevel::Error)
            .map(|alert| alert.message.as_str())
    }
}
