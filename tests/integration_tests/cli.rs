use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

const SAMPLE_LOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/report/testdata/sample.log");

const GREETING: &str = "20230101120000000000000-20230101120005000000000 r=0m5.0s u=0m1.0s s=0m0.5s echo hi##Greeting##";

/// Scratch directory with the config path pinned inside it, so the
/// user's own config is never read.
struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_timereport"))
            .args(args)
            .current_dir(self.dir.path())
            .env("TIMEREPORT_CONFIG_PATH", self.path("no-config.toml"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run timereport")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn svg_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "svg"))
        .collect()
}

#[test]
fn test_bare_run_prints_summary() {
    let scratch = Scratch::new();
    let output = scratch.run(&["--file", SAMPLE_LOG]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("TASK TIMELINE"), "Should have header");
    assert!(out.contains("Configure"));
    assert!(out.contains("5 tasks, 4 connections, chart spans 30s"));
    // The dropped `true` task never shows up
    assert!(!out.contains(" true "));
}

#[test]
fn test_svg_suffix_appended() {
    let scratch = Scratch::new();
    let output = scratch.run(&["-f", SAMPLE_LOG, "-s", "chart"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let svg = std::fs::read_to_string(scratch.path("chart.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains(">Install</text>"));
    // Summary is opt-in once a chart is requested
    assert!(!stdout(&output).contains("TASK TIMELINE"));
    assert!(stderr(&output).contains("Wrote chart to"));
}

#[test]
fn test_svg_and_summary() {
    let scratch = Scratch::new();
    let log = scratch.write("times.log", GREETING);
    let output = scratch.run(&["-f", log.to_str().unwrap(), "--svg", "out.svg", "--summary"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(scratch.path("out.svg").exists());
    assert!(!scratch.path("out.svg.svg").exists());
    assert!(stdout(&output).contains("Greeting"));
}

#[rstest]
#[case::malformed(
    "not a timing line",
    "cannot parse line 2: \"not a timing line\""
)]
#[case::unassigned(
    "20230101120005000000000-20230101120005001000000 r=0m0.001s u=0m0.1s s=0m0.0s spin",
    "big task unassigned at line 2"
)]
fn test_fatal_input_writes_nothing(#[case] bad_line: &str, #[case] message: &str) {
    let scratch = Scratch::new();
    let log = scratch.write("times.log", &format!("{GREETING}\n{bad_line}\n"));
    let output = scratch.run(&["-f", log.to_str().unwrap(), "--svg", "chart", "--summary"]);

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains(message),
        "stderr: {}",
        stderr(&output)
    );
    assert!(svg_files(scratch.dir.path()).is_empty());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_unassigned_task_dumps_record() {
    let scratch = Scratch::new();
    let log = scratch.write(
        "times.log",
        "20230101120005000000000-20230101120005001000000 r=0m0.001s u=0m0.1s s=0m0.0s spin\n",
    );
    let output = scratch.run(&["-f", log.to_str().unwrap()]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("\"user_seconds\": 0.1"), "stderr: {err}");
    assert!(err.contains("\"command\": \"spin\""), "stderr: {err}");
}

#[test]
fn test_short_unlabeled_task_is_not_fatal() {
    let scratch = Scratch::new();
    let log = scratch.write(
        "times.log",
        &format!(
            "{GREETING}\n20230101120001000000000-20230101120001001000000 r=0m0.001s u=0m0.001s s=0m0.001s true\n"
        ),
    );
    let output = scratch.run(&["-f", log.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 tasks, 0 connections"));
}

#[test]
fn test_missing_input_file() {
    let scratch = Scratch::new();
    let output = scratch.run(&["-f", "/nonexistent/path/to/times.log"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read"));
}

#[test]
fn test_explicit_config_must_exist() {
    let scratch = Scratch::new();
    let output = scratch.run(&["-f", SAMPLE_LOG, "-s", "chart", "--config", "missing.toml"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config file not found"));
    assert!(svg_files(scratch.dir.path()).is_empty());
}

#[test]
fn test_config_styles_chart() {
    let scratch = Scratch::new();
    let config = scratch.write("style.toml", "bar-fill = \"steelblue\"\nwidth = 640\n");
    let output = scratch.run(&[
        "-f",
        SAMPLE_LOG,
        "-s",
        "chart",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let svg = std::fs::read_to_string(scratch.path("chart.svg")).unwrap();
    assert!(svg.contains("fill=\"steelblue\""));
    assert!(svg.contains("width=\"640\""));
}

#[test]
fn test_verbose_logs_connections() {
    let scratch = Scratch::new();
    let output = scratch.run(&["-f", SAMPLE_LOG, "-v"]);

    assert!(output.status.success());
    assert!(
        stderr(&output).contains("connection 'Configure'"),
        "stderr: {}",
        stderr(&output)
    );
}
