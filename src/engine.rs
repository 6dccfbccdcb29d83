//! Grade aggregation: turn raw (grade, weight) text into a weighted average
//! and a pass/fail verdict.
//!
//! Both steps are pure. [`validate`] checks the whole batch at submit time and
//! stops at the first bad entry in sequence order; [`aggregate`] never looks at
//! anything but its arguments, so the verdict always matches the average it
//! returns.

use crate::error::{EntryRef, Field, ValidationError};
use crate::models::{
    AggregationRequest, AggregationResult, Evaluation, GradeEntry, ValidatedEntries, ValidatedEntry,
    Verdict, MAX_GRADE, MIN_GRADE,
};

pub fn validate(entries: &[GradeEntry], weighted: bool) -> Result<ValidatedEntries, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::NoEntries);
    }

    let mut validated = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let entry_ref = || EntryRef {
            index,
            label: entry.label.clone(),
        };

        let grade = parse_decimal(&entry.raw_grade).ok_or_else(|| ValidationError::NotANumber {
            entry: entry_ref(),
            field: Field::Grade,
            text: entry.raw_grade.clone(),
        })?;
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(ValidationError::OutOfRange {
                entry: entry_ref(),
                value: grade,
            });
        }

        let weight = if weighted {
            let text = entry.raw_weight.as_deref().unwrap_or("");
            let weight = parse_decimal(text).ok_or_else(|| ValidationError::NotANumber {
                entry: entry_ref(),
                field: Field::Weight,
                text: text.to_string(),
            })?;
            if weight <= 0.0 {
                return Err(ValidationError::NonPositiveWeight {
                    entry: entry_ref(),
                    value: weight,
                });
            }
            weight
        } else {
            1.0
        };

        validated.push(ValidatedEntry {
            label: entry.label.clone(),
            grade,
            weight,
        });
    }

    Ok(ValidatedEntries {
        entries: validated,
        weighted,
    })
}

pub fn aggregate(
    validated: &ValidatedEntries,
    pass_threshold: f64,
) -> Result<AggregationResult, ValidationError> {
    let entries = validated.entries();
    let max_weight = entries.iter().map(|entry| entry.weight).fold(0.0_f64, f64::max);
    if max_weight <= 0.0 {
        return Err(ValidationError::ZeroTotalWeight);
    }

    // Weights are scaled into (0, 1] so neither sum can overflow or underflow
    let mut weighted_sum = 0.0_f64;
    let mut scaled_total = 0.0_f64;
    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    for entry in entries {
        let scaled = entry.weight / max_weight;
        weighted_sum += entry.grade * scaled;
        scaled_total += scaled;
        lowest = lowest.min(entry.grade);
        highest = highest.max(entry.grade);
    }

    if scaled_total == 0.0 {
        return Err(ValidationError::ZeroTotalWeight);
    }

    let average = weighted_sum / scaled_total;
    if !average.is_finite() {
        return Err(ValidationError::NonFiniteAverage);
    }
    // rounding must not push the mean past the grades it came from
    let average = average.clamp(lowest, highest);

    Ok(AggregationResult {
        average,
        verdict: classify(average, pass_threshold),
        pass_threshold,
    })
}

/// Validate then aggregate, as a form does on submit. The validated entries
/// are returned alongside the result for rendering.
pub fn evaluate(request: &AggregationRequest) -> Result<Evaluation, ValidationError> {
    let outcome = validate(&request.entries, request.weighted).and_then(|entries| {
        let result = aggregate(&entries, request.pass_threshold)?;
        Ok(Evaluation { entries, result })
    });

    match &outcome {
        Ok(evaluation) => tracing::debug!(
            entries = evaluation.entries.len(),
            weighted = request.weighted,
            average = evaluation.result.average,
            verdict = evaluation.result.verdict.label(),
            "aggregated grades"
        ),
        Err(err) => tracing::warn!(error = %err, weighted = request.weighted, "input rejected"),
    }
    outcome
}

pub fn classify(average: f64, pass_threshold: f64) -> Verdict {
    if average >= pass_threshold {
        Verdict::Approved
    } else {
        Verdict::Failed
    }
}

/// Parse user-typed decimal text. Surrounding whitespace is ignored and a single
/// comma may stand in for the decimal point. Blank or non-finite input yields
/// `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if trimmed.contains(',') {
        if trimmed.contains('.') || trimmed.matches(',').count() > 1 {
            return None;
        }
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    // f64's parser accepts "inf" and "NaN", which are not grades
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}
