use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{AggregationResult, ValidatedEntries, Verdict};

pub fn verdict_message(result: &AggregationResult) -> String {
    match result.verdict {
        Verdict::Approved => format!(
            "Parabéns! Você foi aprovado com média {:.2}",
            result.average
        ),
        Verdict::Failed => format!(
            "Infelizmente, você foi reprovado. Sua média foi {:.2}.",
            result.average
        ),
    }
}

/// User-facing text for a rejected submission.
pub fn error_message(err: &ValidationError) -> String {
    let body = match err {
        ValidationError::NotANumber { text, .. } => format!("Valor inválido: \"{text}\""),
        ValidationError::OutOfRange { .. } => "A nota deve estar entre 0 e 10.".to_string(),
        ValidationError::NonPositiveWeight { .. } => "Os pesos devem ser maiores que 0.".to_string(),
        ValidationError::ZeroTotalWeight => "A soma dos pesos não pode ser zero.".to_string(),
        ValidationError::NonFiniteAverage => "Não foi possível calcular a média.".to_string(),
        ValidationError::NoEntries => "Nenhuma nota informada.".to_string(),
    };

    match err.entry() {
        Some(entry) => match &entry.label {
            Some(label) => format!("{label}: {body}"),
            None => format!("Linha {}: {body}", entry.index + 1),
        },
        None => body,
    }
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub scheme: Option<&'a str>,
    pub weighted: bool,
    pub entries: &'a ValidatedEntries,
    pub result: &'a AggregationResult,
    pub message: String,
}

pub fn build_json(
    scheme: Option<&str>,
    entries: &ValidatedEntries,
    result: &AggregationResult,
) -> serde_json::Result<String> {
    let report = JsonReport {
        scheme,
        weighted: entries.is_weighted(),
        entries,
        result,
        message: verdict_message(result),
    };
    serde_json::to_string_pretty(&report)
}

pub fn build_report(
    scheme: Option<&str>,
    generated_on: NaiveDate,
    entries: &ValidatedEntries,
    result: &AggregationResult,
) -> String {
    let mut output = String::new();
    let scheme_label = scheme.unwrap_or("personalizado");

    let _ = writeln!(output, "# Boletim Escolar");
    let _ = writeln!(
        output,
        "Esquema: {} (gerado em {})",
        scheme_label,
        generated_on.format("%d/%m/%Y")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Notas");

    if entries.is_weighted() {
        let _ = writeln!(output, "| Disciplina | Nota | Peso |");
        let _ = writeln!(output, "|---|---|---|");
    } else {
        let _ = writeln!(output, "| Disciplina | Nota |");
        let _ = writeln!(output, "|---|---|");
    }

    for (index, entry) in entries.entries().iter().enumerate() {
        let label = entry
            .label
            .clone()
            .unwrap_or_else(|| format!("Item {}", index + 1));
        if entries.is_weighted() {
            let _ = writeln!(
                output,
                "| {} | {:.2} | {} |",
                label, entry.grade, entry.weight
            );
        } else {
            let _ = writeln!(output, "| {} | {:.2} |", label, entry.grade);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Resultado");
    let _ = writeln!(output, "- Média: {:.2}", result.average);
    let _ = writeln!(output, "- Média mínima: {:.2}", result.pass_threshold);
    let _ = writeln!(output, "- Situação: {}", result.verdict.label());
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", verdict_message(result));
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "© {} Cálculo do Boletim. Todos os direitos reservados.",
        generated_on.year()
    );

    output
}
