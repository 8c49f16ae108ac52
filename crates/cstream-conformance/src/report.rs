//! Report generation for scenario results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenario::ScenarioResult;

/// Failure to parse a serialized report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Aggregate scenario summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Total scenarios run.
    pub total: usize,
    /// Scenarios passed.
    pub passed: usize,
    /// Scenarios failed.
    pub failed: usize,
    /// Individual results.
    pub results: Vec<ScenarioResult>,
}

impl ScenarioSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all scenarios passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// A conformance report combining summary data with run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Run mode (strict or verbose).
    pub mode: String,
    /// Timestamp (unix seconds).
    pub timestamp: String,
    /// Scenario summary.
    pub summary: ScenarioSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Scenario | Facility | Status |\n");
        out.push_str("|----------|----------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("| {} | {} | {} |\n", r.name, r.reference, status));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// Parse a report from JSON.
    pub fn from_json(body: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(body)?)
    }
}
