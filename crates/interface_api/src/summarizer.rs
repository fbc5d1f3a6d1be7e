//! Fallback summarizer
//!
//! The production deployment may wire an LLM-backed collaborator into the
//! `Summarizer` port; this deterministic implementation is what the API
//! ships with. It only narrates figures already present in the payload -
//! a summarizer can never change a number, and its failure downgrades the
//! response to `summary: null` without touching the analysis.

use async_trait::async_trait;

use core_kernel::{Summarizer, SummaryError};

/// Deterministic, template-based summarizer
#[derive(Debug, Clone, Default)]
pub struct FallbackSummarizer;

#[async_trait]
impl Summarizer for FallbackSummarizer {
    async fn summarize(&self, report: serde_json::Value) -> Result<String, SummaryError> {
        let period = report
            .get("period")
            .and_then(|v| v.as_i64())
            .map(|y| y.to_string())
            .unwrap_or_else(|| "the selected period".to_string());
        let balance_base = field(&report, "balance_sheet_base");
        let income_base = field(&report, "income_base");

        Ok(format!(
            "Common-size analysis for {period}: balance-sheet lines are \
             expressed against total assets of {balance_base}, income lines \
             against revenue of {income_base}. Percentages above their \
             category peers mark the accounts that dominate the structure."
        ))
    }
}

fn field(report: &serde_json::Value, key: &str) -> String {
    report
        .get(key)
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "n/a".to_string())
}
