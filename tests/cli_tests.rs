//! Integration tests for the boletim CLI

use std::fs;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

fn boletim() -> Command {
    let mut cmd = cargo_bin_cmd!("boletim");
    cmd.env_remove("BOLETIM_CONFIG").env_remove("BOLETIM_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    boletim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("schemes"));
}

#[test]
fn test_schemes_lists_entry_counts() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .arg("schemes")
        .assert()
        .success()
        .stdout(predicate::str::contains("fundamental (Ensino Fundamental): 10 entries"))
        .stdout(predicate::str::contains("semester (Semestral): 2 entries"))
        .stdout(predicate::str::contains("1º Bimestre, 2º Bimestre, 3º Bimestre, 4º Bimestre"));
}

#[test]
fn test_equal_weight_semester_fails() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "semester", "--grades", "10,0"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "Infelizmente, você foi reprovado. Sua média foi 5.00.",
        ));
}

#[test]
fn test_weighted_semester_passes() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--weighted", "--grades", "10", "0", "--weights", "3",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Parabéns! Você foi aprovado com média 7.50",
        ));
}

#[test]
fn test_weights_ignored_without_weighted_flag() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--grades", "10;0", "--weights", "abc;0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sua média foi 5.00."));
}

#[test]
fn test_out_of_range_grade_is_rejected() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "semester", "--grades", "8,11"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "2º Semestre: A nota deve estar entre 0 e 10.",
        ));
}

#[test]
fn test_zero_weight_is_rejected() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--weighted", "--grades", "8,9", "--weights", "1,0",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Os pesos devem ser maiores que 0."));
}

#[test]
fn test_wrong_grade_count_is_usage_error() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "trimester", "--grades", "8,9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expects 3 grades, got 2"));
}

#[test]
fn test_level_and_period_are_exclusive() {
    boletim()
        .args([
            "calc", "--level", "medio", "--period", "semester", "--grades", "8,9",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    let output = boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "semester", "--grades", "7,7", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["result"]["average"], 7.0);
    assert_eq!(value["result"]["verdict"], "approved");
    assert_eq!(value["scheme"], "Semestral");
}

#[test]
fn test_threshold_from_config_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("boletim.toml"), "pass_threshold = 5.0\n").unwrap();

    boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "semester", "--grades", "10,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aprovado com média 5.00"));

    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--grades", "10,0", "--threshold", "6",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("reprovado"));
}

#[test]
fn test_invalid_threshold_flag_is_usage_error() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--grades", "10,0", "--threshold", "12",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_custom_subjects_from_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("escola.toml");
    fs::write(&config, "[subjects]\nmedio = [\"Matemática\", \"Física\"]\n").unwrap();

    boletim()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["calc", "--level", "medio", "--grades", "9,x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Física: Valor inválido: \"x\""));
}

#[test]
fn test_import_csv_writes_report() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("notas.csv");
    let out = dir.path().join("boletim.md");
    fs::write(&csv, "label,grade,weight\nMatemática,10,3\nFísica,0,1\n").unwrap();

    boletim()
        .current_dir(dir.path())
        .arg("import")
        .arg("--csv")
        .arg(&csv)
        .arg("--weighted")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("média 7.50"));

    let report = fs::read_to_string(&out).unwrap();
    assert!(report.contains("| Matemática | 10.00 | 3 |"));
    assert!(report.contains("- Situação: Aprovado"));
}

#[test]
fn test_import_blank_grade_is_rejected() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("notas.csv");
    fs::write(&csv, "label,grade\n1º Semestre,8\n2º Semestre,\n").unwrap();

    boletim()
        .current_dir(dir.path())
        .arg("import")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("2º Semestre: Valor inválido"));
}

#[test]
fn test_import_checks_scheme_row_count() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("notas.csv");
    fs::write(&csv, "label,grade\nA,8\nB,9\n").unwrap();

    boletim()
        .current_dir(dir.path())
        .arg("import")
        .arg("--csv")
        .arg(&csv)
        .args(["--scheme", "bimester"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_csv_is_failure() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args(["import", "--csv", "missing.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_level_rejects_period_value() {
    boletim()
        .args(["calc", "--level", "trimester", "--grades", "8,9,7"])
        .assert()
        .code(2);

    boletim()
        .args(["calc", "--period", "medio", "--grades", "8,9,7,6,5"])
        .assert()
        .code(2);
}

#[test]
fn test_period_accepts_portuguese_alias() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args(["calc", "--period", "semestral", "--grades", "8,9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("média 8.50"));
}

#[test]
fn test_huge_weights_keep_average_finite() {
    let dir = tempdir().unwrap();
    boletim()
        .current_dir(dir.path())
        .args([
            "calc", "--period", "semester", "--weighted", "--grades", "5,5", "--weights",
            "1e308,1e308",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sua média foi 5.00."));
}
