use serde::Serialize;

pub const DEFAULT_PASS_THRESHOLD: f64 = 7.0;
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

/// One scored item exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeEntry {
    pub label: Option<String>,
    pub raw_grade: String,
    pub raw_weight: Option<String>,
}

impl GradeEntry {
    pub fn new(raw_grade: impl Into<String>) -> Self {
        Self {
            label: None,
            raw_grade: raw_grade.into(),
            raw_weight: None,
        }
    }

    pub fn weighted(raw_grade: impl Into<String>, raw_weight: impl Into<String>) -> Self {
        Self {
            label: None,
            raw_grade: raw_grade.into(),
            raw_weight: Some(raw_weight.into()),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    pub entries: Vec<GradeEntry>,
    pub weighted: bool,
    pub pass_threshold: f64,
}

impl AggregationRequest {
    pub fn new(entries: Vec<GradeEntry>, weighted: bool) -> Self {
        Self {
            entries,
            weighted,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, pass_threshold: f64) -> Self {
        self.pass_threshold = pass_threshold;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedEntry {
    pub label: Option<String>,
    pub grade: f64,
    pub weight: f64,
}

/// Entries that passed validation. Only [`crate::engine::validate`] builds one
/// from user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedEntries {
    pub(crate) entries: Vec<ValidatedEntry>,
    pub(crate) weighted: bool,
}

impl ValidatedEntries {
    /// Wraps numbers that did not come from text input. Nothing is checked, so
    /// [`crate::engine::aggregate`] still guards the division.
    pub fn assume_valid(entries: Vec<ValidatedEntry>, weighted: bool) -> Self {
        Self { entries, weighted }
    }

    pub fn entries(&self) -> &[ValidatedEntry] {
        &self.entries
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Failed,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Approved => "Aprovado",
            Verdict::Failed => "Reprovado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub average: f64,
    pub verdict: Verdict,
    pub pass_threshold: f64,
}

/// A successful submission: the numbers that were averaged and the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub entries: ValidatedEntries,
    pub result: AggregationResult,
}
