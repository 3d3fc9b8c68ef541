//! Point-wise review prompt and per-key analysis results.
//!
//! Every analysis overwrites the slot for its key, successful or not. A
//! failed call leaves `ANALYSIS_ERROR_PLACEHOLDER` in the slot instead of
//! the previous review.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Shown in place of a review when the analysis call fails.
pub const ANALYSIS_ERROR_PLACEHOLDER: &str = "❌ Error invoking model";

const REVIEW_REQUIREMENTS: [&str; 5] = [
    "Highlight key ideas or functionality.",
    "Detect and explain any errors or issues (syntax, logic, clarity).",
    "Suggest improvements or best practices.",
    "Avoid any irrelevant or unrelated information.",
    "Keep the tone professional and concise.",
];

/// Wrap note text in the fixed review template sent to the model.
pub fn build_analysis_prompt(text: &str) -> String {
    let mut prompt = String::from(
        "\nYou are an expert code and text reviewer.\n\
         Analyze the following note or code strictly in a **point-wise** format.\n\n\
         Requirements:\n",
    );
    for (i, requirement) in REVIEW_REQUIREMENTS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, requirement));
    }
    prompt.push_str("\nHere is the content to analyze:\n---\n");
    prompt.push_str(text);
    prompt.push_str("\n---");
    prompt
}

/// Render a model result for display: strings verbatim, anything else as
/// pretty-printed JSON.
pub fn render_result(result: &Value) -> String {
    match result {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Completed(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AnalysisEntry {
    /// Text that was analyzed (without the prompt template).
    pub source_text: String,
    pub outcome: AnalysisOutcome,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisEntry {
    /// What the user sees for this slot.
    pub fn display_text(&self) -> &str {
        match &self.outcome {
            AnalysisOutcome::Completed(text) => text,
            AnalysisOutcome::Failed(_) => ANALYSIS_ERROR_PLACEHOLDER,
        }
    }

    /// Why the call failed, for display next to the placeholder.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            AnalysisOutcome::Failed(reason) => Some(reason),
            AnalysisOutcome::Completed(_) => None,
        }
    }
}

/// Last analysis per result key. Session-local, never persisted.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    entries: HashMap<String, AnalysisEntry>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, source_text: &str, outcome: AnalysisOutcome) {
        self.entries.insert(
            key.to_string(),
            AnalysisEntry {
                source_text: source_text.to_string(),
                outcome,
                analyzed_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&AnalysisEntry> {
        self.entries.get(key)
    }

    /// Rendered result for `key`, if any analysis ran for it.
    pub fn result(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.display_text())
    }

    /// Text last analyzed under `key`; `None` disables re-analysis.
    pub fn last_source(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.source_text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_wraps_text_with_five_requirements() {
        let prompt = build_analysis_prompt("fn main() {}");
        assert!(prompt.contains("strictly in a **point-wise** format"));
        for (i, req) in REVIEW_REQUIREMENTS.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. {}", i + 1, req)));
        }
        assert!(prompt.ends_with("---\nfn main() {}\n---"));
    }

    #[test]
    fn test_render_string_verbatim() {
        assert_eq!(render_result(&json!("  - point one\n")), "  - point one\n");
    }

    #[test]
    fn test_render_structured_pretty() {
        let rendered = render_result(&json!({ "summary": "ok" }));
        assert_eq!(rendered, "{\n  \"summary\": \"ok\"\n}");
    }

    #[test]
    fn test_failure_overwrites_previous_result() {
        let mut store = AnalysisStore::new();
        store.record("a", "foo", AnalysisOutcome::Completed("bar".to_string()));
        assert_eq!(store.result("a"), Some("bar"));

        store.record("a", "foo", AnalysisOutcome::Failed("timeout".to_string()));
        assert_eq!(store.result("a"), Some(ANALYSIS_ERROR_PLACEHOLDER));
        assert_eq!(store.get("a").unwrap().failure_reason(), Some("timeout"));
        assert_eq!(store.last_source("a"), Some("foo"));
    }

    #[test]
    fn test_unknown_key_has_no_source() {
        let store = AnalysisStore::new();
        assert!(store.last_source("missing").is_none());
        assert!(store.result("missing").is_none());
    }
}
