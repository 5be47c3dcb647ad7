//! Quote presentation adapter
//!
//! Formats a [`CostBreakdown`] for display: labelled lines and a total in
//! `$0.00` form, or a placeholder when the request is incomplete.

use serde::Serialize;

use crate::domain::quote::format_usd;
use crate::domain::{CostBreakdown, CostLine};

pub const INCOMPLETE_PLACEHOLDER: &str = "Complete the form to see the quote";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub line: CostLine,
    pub label: &'static str,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub lines: Vec<SummaryLine>,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl QuoteSummary {
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Plain-text rendering, one line per cost item.
    pub fn to_text(&self) -> String {
        if let Some(placeholder) = self.placeholder {
            return format!("{}\nTotal: {}\n", placeholder, self.total);
        }

        let width = self.lines.iter().map(|l| l.label.len()).max().unwrap_or(0);
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!("{:<width$}  {:>12}\n", line.label, line.amount));
        }
        out.push_str(&format!("{:<width$}  {:>12}\n", "Total", self.total));
        out
    }
}

impl From<&CostBreakdown> for QuoteSummary {
    fn from(breakdown: &CostBreakdown) -> Self {
        if breakdown.is_empty() {
            return Self {
                lines: Vec::new(),
                total: format_usd(0.0),
                placeholder: Some(INCOMPLETE_PLACEHOLDER),
            };
        }

        Self {
            lines: breakdown
                .items()
                .iter()
                .map(|item| SummaryLine {
                    line: item.line,
                    label: item.line.label(),
                    amount: format_usd(item.amount),
                })
                .collect(),
            total: breakdown.format_total(),
            placeholder: None,
        }
    }
}
