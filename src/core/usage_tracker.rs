//! Translation usage counters exposed as Prometheus text

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Snapshot of processed translation traffic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    /// UTF-8 bytes submitted for translation
    pub chars_processed: u64,
    /// Requests per (from, to) language pair
    pub requests: BTreeMap<(String, String), u64>,
}

impl UsageStats {
    /// Total requests across all pairs
    pub fn total_requests(&self) -> u64 {
        self.requests.values().sum()
    }
}

/// Usage tracker shared between request handlers
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    usage: Arc<RwLock<UsageStats>>,
}

impl UsageTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one translate request and the text it carries.
    ///
    /// Text is measured in UTF-8 bytes, so `é` counts as two.
    pub async fn record_request(&self, from: &str, to: &str, texts: &[String]) {
        let chars: u64 = texts.iter().map(|t| t.len() as u64).sum();

        let mut usage = self.usage.write().await;
        usage.chars_processed += chars;
        *usage
            .requests
            .entry((from.to_string(), to.to_string()))
            .or_insert(0) += 1;

        debug!("Recorded {} -> {} request with {} chars", from, to, chars);
    }

    /// Get current usage statistics
    pub async fn get_stats(&self) -> UsageStats {
        let usage = self.usage.read().await;
        usage.clone()
    }

    /// Render counters in the Prometheus text exposition format
    pub async fn render_prometheus(&self) -> String {
        let usage = self.usage.read().await;
        let mut out = String::new();

        // writing into a String can't fail
        let _ = writeln!(
            out,
            "# HELP translate_processed_chars_total The total number of characters processed for translation"
        );
        let _ = writeln!(out, "# TYPE translate_processed_chars_total counter");
        let _ = writeln!(out, "translate_processed_chars_total {}", usage.chars_processed);

        let _ = writeln!(
            out,
            "# HELP translate_processed_requests_total The total number of requests processed for translation by language"
        );
        let _ = writeln!(out, "# TYPE translate_processed_requests_total counter");
        for ((from, to), count) in &usage.requests {
            let _ = writeln!(
                out,
                "translate_processed_requests_total{{from_lang=\"{}\",to_lang=\"{}\"}} {}",
                escape_label(from),
                escape_label(to),
                count
            );
        }

        out
    }
}

/// Escape a Prometheus label value
fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
