//! End-to-end tests for the compare_results binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const EXACT: &str = "a b\t0.50\n a\t0.40\n b\t0.30\n";
const SAMPLE: &str = "a b(0.48, 0.40, 0.55)\na(0.42, 0.36, 0.48)\nc(0.38, 0.33, 0.43)\n";

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("failed to write fixture");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compare_results"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn compare_results")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_summary_and_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", SAMPLE);

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let summary = stdout(&out);
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "large=exact.txt,sample=sample.txt,e=0.05,minFreq=0.4,largeFIs=2");
    // c is not in the exact file at all: a non-tolerable false positive
    assert_eq!(lines[1], "inter=2,fn=0,fp=1,nafp=1,jaccard=0.6666666666666666");
    assert!(lines[2].starts_with("we=0,"));
    assert!(lines[3].starts_with("wcb=0,wcb2=2,"));

    let err = stderr(&out);
    assert_eq!(err.lines().count(), 1, "stderr: {err}");
    let record = err.lines().next().expect("record line");
    let fields: Vec<&str> = record.split(',').collect();
    assert_eq!(fields.len(), 18);
    assert_eq!(&fields[..9], ["exact.txt", "sample.txt", "0.05", "0.4", "2", "2", "0", "1", "1"]);
}

#[test]
fn test_inconsistent_sample_bounds_keep_stderr_to_the_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    // 0.48 lies outside its own interval (0.49, 0.55)
    let sample = write(dir.path(), "sample.txt", "a b(0.48, 0.49, 0.55)\na(0.42, 0.36, 0.48)\n");

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert_eq!(err.lines().count(), 1, "stderr: {err}");
    assert!(err.starts_with("exact.txt,sample.txt,0.05,0.4,2,2,0,0,0,"), "stderr: {err}");
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", SAMPLE);
    let args = ["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()];

    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stderr, second.stderr);
}

#[test]
fn test_gzip_input() {
    use std::io::Write;

    let dir = tempfile::tempdir().expect("tempdir");
    let exact = dir.path().join("exact.txt.gz");
    let mut enc = flate2::write::GzEncoder::new(
        std::fs::File::create(&exact).expect("create gz"),
        flate2::Compression::default(),
    );
    enc.write_all(EXACT.as_bytes()).expect("write gz");
    enc.finish().expect("finish gz");
    let sample = write(dir.path(), "sample.txt", SAMPLE);

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("largeFIs=2"));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", SAMPLE);

    let out = run(&["--json", "0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["intersection"], 2);
    assert_eq!(value["non_tolerable_false_positives"], 1);
    assert_eq!(value["evaluated"], 2);
}

#[test]
fn test_record_log_gets_header_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", SAMPLE);
    let log = dir.path().join("records.csv");
    let args = [
        "--record-log",
        log.to_str().unwrap(),
        "0.05",
        "0.4",
        exact.to_str().unwrap(),
        sample.to_str().unwrap(),
    ];

    assert!(run(&args).status.success());
    assert!(run(&args).status.success());

    let content = std::fs::read_to_string(&log).expect("read log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("exact,sample,eps,minFreq"));
    assert_eq!(lines[1], lines[2]);
}

#[test]
fn test_unsorted_input_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", "a\t0.4\nb\t0.5\n");
    let sample = write(dir.path(), "sample.txt", SAMPLE);

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert_eq!(err.lines().count(), 1, "stderr: {err}");
    assert!(err.contains("sorted"), "stderr: {err}");
}

#[test]
fn test_malformed_sample_line_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", "a b(0.48, 0.40)\n");

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("sample.txt:1"));
}

#[test]
fn test_empty_evaluation_set_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", "z(0.45, 0.40, 0.50)\n");

    let out = run(&["0.05", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("no itemset to evaluate"));
}

#[test]
fn test_usage_errors_exit_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exact = write(dir.path(), "exact.txt", EXACT);
    let sample = write(dir.path(), "sample.txt", SAMPLE);
    let missing = dir.path().join("missing.txt");

    // wrong argument count
    let out = run(&["0.05", "0.4", exact.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));

    // non-numeric epsilon
    let out = run(&["eps", "0.4", exact.to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).lines().count(), 1);

    // missing file
    let out = run(&["0.05", "0.4", missing.to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("does not exist, or is not a file"));

    // directory instead of a file
    let out = run(&["0.05", "0.4", dir.path().to_str().unwrap(), sample.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("EXACT_FILE"));
}
