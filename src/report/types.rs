use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Classification bucket for a single request attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Any 2xx response
    Success,
    NotFound,
    RateLimited,
    ServerError,
    /// Everything else: construction failures, transport failures and
    /// statuses outside the tracked set
    Undefined,
}

impl Outcome {
    /// Classify a response that was received without a transport error.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            return Outcome::Success;
        }
        Self::from_error_status(status)
    }

    /// Classify a transport error. A status only exists when the client
    /// surfaced a response alongside the error; 2xx on this path is not
    /// counted as success.
    pub fn from_transport_error(status: Option<StatusCode>) -> Self {
        match status {
            Some(status) => Self::from_error_status(status),
            None => Outcome::Undefined,
        }
    }

    fn from_error_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Outcome::RateLimited,
            StatusCode::NOT_FOUND => Outcome::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => Outcome::ServerError,
            _ => Outcome::Undefined,
        }
    }

    /// Stable label used for metrics and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::NotFound => "not_found",
            Outcome::RateLimited => "rate_limited",
            Outcome::ServerError => "server_error",
            Outcome::Undefined => "undefined",
        }
    }
}

/// Immutable copy of a report, taken once the run has finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_requests: u64,
    pub total_200: u64,
    pub total_404: u64,
    pub total_429: u64,
    pub total_500: u64,
    pub total_undefined_errors: u64,
    pub elapsed_secs: f64,
}

impl ReportSnapshot {
    /// Sum of all outcome buckets
    pub fn total_classified(&self) -> u64 {
        self.total_200 + self.total_404 + self.total_429 + self.total_500 + self.total_undefined_errors
    }

    /// Every attempted request landed in exactly one bucket
    pub fn is_consistent(&self) -> bool {
        self.total_classified() == self.total_requests
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Success => self.total_200,
            Outcome::NotFound => self.total_404,
            Outcome::RateLimited => self.total_429,
            Outcome::ServerError => self.total_500,
            Outcome::Undefined => self.total_undefined_errors,
        }
    }

    /// Execution time rounded to whole seconds
    pub fn elapsed_rounded_secs(&self) -> u64 {
        self.elapsed_secs.max(0.0).round() as u64
    }

    /// Lines of the textual execution report, in print order
    pub fn render_lines(&self) -> Vec<String> {
        vec![
            ">>>>>> Execution Report <<<<<<".to_string(),
            format!("Total requests: {}", self.total_requests),
            format!("Total 200: {}", self.total_200),
            format!("Total 404: {}", self.total_404),
            format!("Total 429: {}", self.total_429),
            format!("Total 500: {}", self.total_500),
            format!("Total undefined errors: {}", self.total_undefined_errors),
            format!("Execution time: {} seconds", self.elapsed_rounded_secs()),
        ]
    }

    pub fn render_text(&self) -> String {
        self.render_lines().join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
