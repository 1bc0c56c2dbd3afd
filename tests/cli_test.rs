//! CLI Tests for the xlsxtxt binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const INPUT: &str = "Nro,Importe,Cliente\n1,\"2,5\",Ana\n,,\n2,3,Luis\n";

fn run(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xlsxtxt"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run xlsxtxt")
}

fn write_input(dir: &Path) -> String {
    let path = dir.join("facturas.csv");
    fs::write(&path, INPUT).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_writes_explicit_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("out.txt");

    let result = run(&[&input, "-o", &output.to_string_lossy()], dir.path());
    assert!(result.status.success());

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "1;2.50;Ana\n2;3.00;Luis\n");

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Wrote 2 rows"));
}

#[test]
fn test_default_output_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let result = run(&[&input], dir.path());
    assert!(result.status.success());

    let text = fs::read_to_string(dir.path().join("salida.txt")).unwrap();
    assert_eq!(text, "1;2.50;Ana\n2;3.00;Luis\n");
}

#[test]
fn test_stdout_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let result = run(&[&input, "-o", "-"], dir.path());
    assert!(result.status.success());
    assert_eq!(
        String::from_utf8_lossy(&result.stdout),
        "1;2.50;Ana\n2;3.00;Luis\n"
    );
    assert!(!dir.path().join("salida.txt").exists());
}

#[test]
fn test_row_count_ignores_line_breaks_inside_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notas.csv");
    fs::write(&path, "Nro,Importe,Obs\n1,2,\"linea 1\nlinea 2\"\n3,4,x\n").unwrap();

    let result = run(&[&path.to_string_lossy()], dir.path());
    assert!(result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Wrote 2 rows"), "stderr: {}", stderr);

    let text = fs::read_to_string(dir.path().join("salida.txt")).unwrap();
    assert_eq!(text, "1;2.00;linea 1\nlinea 2\n3;4.00;x\n");
}

#[test]
fn test_failed_conversion_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let result = run(&[&input, "--sheet-name", "Marzo"], dir.path());
    assert!(!result.status.success());
    assert!(!dir.path().join("salida.txt").exists());
}

#[test]
fn test_semicolon_delimited_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos.csv");
    fs::write(&path, "Nro;Importe\n7;1,005\n").unwrap();

    let result = run(
        &[&path.to_string_lossy(), "--csv-delimiter", ";", "-o", "-"],
        dir.path(),
    );
    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout), "7;1.00\n");
}

#[test]
fn test_list_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let result = run(&[&input, "--list-sheets"], dir.path());
    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout), "0\tSheet1\n");
    assert!(!dir.path().join("salida.txt").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    let result = run(&["no_existe.xlsx"], dir.path());
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("no_existe.xlsx"));
    assert!(!dir.path().join("salida.txt").exists());
}

#[test]
fn test_conflicting_sheet_options_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let result = run(
        &[&input, "--sheet-index", "0", "--sheet-name", "Sheet1"],
        dir.path(),
    );
    assert!(!result.status.success());
}
