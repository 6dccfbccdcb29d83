use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Field, UsageError};
use crate::models::{AggregationRequest, GradeEntry};

pub const FUNDAMENTAL_SUBJECTS: [&str; 10] = [
    "Português",
    "História",
    "Geografia",
    "Ciências",
    "Matemática",
    "Educação Física",
    "Artes",
    "Inglês",
    "Espanhol",
    "Ensino Religioso",
];

pub const MEDIO_SUBJECTS: [&str; 5] = ["Matemática", "Português", "Física", "Química", "Biologia"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SchoolLevel {
    Fundamental,
    #[value(alias = "médio")]
    Medio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[value(alias = "bimestral")]
    Bimester,
    #[value(alias = "trimestral")]
    Trimester,
    #[value(alias = "semestral")]
    Semester,
}

impl Period {
    pub fn entry_count(self) -> usize {
        match self {
            Period::Bimester => 4,
            Period::Trimester => 3,
            Period::Semester => 2,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Period::Bimester => "Bimestre",
            Period::Trimester => "Trimestre",
            Period::Semester => "Semestre",
        }
    }
}

/// What decides how many entries a request has and what they are called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scheme {
    Level(SchoolLevel),
    Period(Period),
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [
        Scheme::Level(SchoolLevel::Fundamental),
        Scheme::Level(SchoolLevel::Medio),
        Scheme::Period(Period::Bimester),
        Scheme::Period(Period::Trimester),
        Scheme::Period(Period::Semester),
    ];

    pub fn key(self) -> &'static str {
        match self {
            Scheme::Level(SchoolLevel::Fundamental) => "fundamental",
            Scheme::Level(SchoolLevel::Medio) => "medio",
            Scheme::Period(Period::Bimester) => "bimester",
            Scheme::Period(Period::Trimester) => "trimester",
            Scheme::Period(Period::Semester) => "semester",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Scheme::Level(SchoolLevel::Fundamental) => "Ensino Fundamental",
            Scheme::Level(SchoolLevel::Medio) => "Ensino Médio",
            Scheme::Period(Period::Bimester) => "Bimestral",
            Scheme::Period(Period::Trimester) => "Trimestral",
            Scheme::Period(Period::Semester) => "Semestral",
        }
    }

    /// Subject or period names, honouring subject overrides from `config`.
    pub fn labels(self, config: &Config) -> Vec<String> {
        match self {
            Scheme::Level(level) => config.subjects_for(level),
            Scheme::Period(period) => (1..=period.entry_count())
                .map(|n| format!("{}º {}", n, period.noun()))
                .collect(),
        }
    }

    pub fn entry_count(self, config: &Config) -> usize {
        match self {
            Scheme::Level(level) => config.subjects_for(level).len(),
            Scheme::Period(period) => period.entry_count(),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Scheme {
    type Err = UsageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "fundamental" => Ok(Scheme::Level(SchoolLevel::Fundamental)),
            "medio" | "médio" => Ok(Scheme::Level(SchoolLevel::Medio)),
            "bimester" | "bimestral" => Ok(Scheme::Period(Period::Bimester)),
            "trimester" | "trimestral" => Ok(Scheme::Period(Period::Trimester)),
            "semester" | "semestral" => Ok(Scheme::Period(Period::Semester)),
            _ => Err(UsageError::UnknownScheme(value.to_string())),
        }
    }
}

/// Pair raw grade (and weight) text with the scheme's labels.
///
/// The counts must match the scheme exactly. Weight text is only required when
/// `weighted` is set; in unweighted mode any weights given are dropped.
pub fn build_request(
    scheme: Scheme,
    config: &Config,
    grades: &[String],
    weights: &[String],
    weighted: bool,
    pass_threshold: f64,
) -> Result<AggregationRequest, UsageError> {
    let labels = scheme.labels(config);

    if grades.len() != labels.len() {
        return Err(UsageError::EntryCountMismatch {
            scheme: scheme.display_name().to_string(),
            field: Field::Grade,
            expected: labels.len(),
            actual: grades.len(),
        });
    }
    if weighted && weights.len() != labels.len() {
        return Err(UsageError::EntryCountMismatch {
            scheme: scheme.display_name().to_string(),
            field: Field::Weight,
            expected: labels.len(),
            actual: weights.len(),
        });
    }

    let entries = labels
        .into_iter()
        .zip(grades)
        .enumerate()
        .map(|(index, (label, grade))| GradeEntry {
            label: Some(label),
            raw_grade: grade.clone(),
            raw_weight: if weighted {
                weights.get(index).cloned()
            } else {
                None
            },
        })
        .collect();

    Ok(AggregationRequest::new(entries, weighted).with_threshold(pass_threshold))
}
