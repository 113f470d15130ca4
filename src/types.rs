use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim category assigned to a sentence or atomic clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Metric,
    Vision,
    Action,
    Governance,
    Marketing,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Metric => "metric",
            Category::Vision => "vision",
            Category::Action => "action",
            Category::Governance => "governance",
            Category::Marketing => "marketing",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted unit: one claim sentence (or atomic clause) with its
/// company/year provenance and classification flags. Records are created by
/// the orchestrators and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Company identifier recovered from the source filename, `UNKNOWN` when
    /// the filename carried no usable tokens.
    pub company: String,
    /// Reporting year (4-digit, 1900-2099) when the filename carried one.
    pub year: Option<i32>,
    pub sentence: String,
    pub category: Category,
    /// Whether the sentence contains a metric expression. Independent of
    /// `category`: a governance sentence may also quote a metric.
    pub has_metric: bool,
    pub env_relevant: bool,
}
