use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::tempdir;

fn cargo_bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("litex").unwrap();
    // Keep the environment from leaking into flag defaults.
    cmd.env_remove("LITEX_BROWSER")
        .env_remove("LITEX_NO_SANDBOX")
        .env_remove("LITEX_VERBOSE")
        .env_remove("LITEX_QUIET")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sources(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let input = dir.join("doc.md");
    let css = dir.join("style.css");
    fs::write(&input, "# Title\nHello [^1]\n\n[^1]: note\n").unwrap();
    fs::write(&css, "body { font-family: serif; }\n").unwrap();
    (input, css)
}

#[test]
fn help_lists_both_flags() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--css"))
        .stdout(predicate::str::contains("Convert markdown files to PDF"));
}

#[test]
fn missing_css_is_usage_error() {
    let dir = tempdir().unwrap();
    let (input, _css) = write_sources(dir.path());

    cargo_bin()
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--css"));

    assert!(!dir.path().join("doc.md.html").exists());
}

#[test]
fn empty_input_is_rejected_before_io() {
    let dir = tempdir().unwrap();

    cargo_bin()
        .current_dir(dir.path())
        .args(["--input", "", "--css", "style.css"])
        .assert()
        .failure()
        .code(2);

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_input_file_creates_no_outputs() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("absent.md");

    let assert = cargo_bin()
        .arg("--input")
        .arg(&input)
        .args(["--css", "style.css", "--browser", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.md"));

    // The cause is reported once, not repeated by the log line.
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert_eq!(stderr.matches("can not read file").count(), 1, "{stderr}");

    assert!(!dir.path().join("absent.md.html").exists());
    assert!(!dir.path().join("absent.md.pdf").exists());
}

#[test]
fn absent_browser_keeps_html_and_fails() {
    let dir = tempdir().unwrap();
    let (input, css) = write_sources(dir.path());

    cargo_bin()
        .arg("--input")
        .arg(&input)
        .arg("--css")
        .arg(&css)
        .args(["--browser", "litex-test-no-such-browser-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("installed"));

    let html = fs::read_to_string(dir.path().join("doc.md.html")).unwrap();
    assert!(html.contains(r#"<h1 id="title">"#));
    assert!(html.contains("↩"));
    assert!(!dir.path().join("doc.md.pdf").exists());
}

#[cfg(unix)]
#[test]
fn successful_run_prints_pdf_path() {
    let dir = tempdir().unwrap();
    let (input, css) = write_sources(dir.path());

    // `true` stands in for a browser that exits cleanly.
    cargo_bin()
        .arg("--input")
        .arg(&input)
        .arg("--css")
        .arg(&css)
        .args(["--browser", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doc.md.pdf"));

    assert!(dir.path().join("doc.md.html").exists());
}

/// Real browser round trip. Needs chromium on PATH and network access for
/// the highlighting assets.
///
/// Run with: LITEX_E2E=1 cargo test --test cli -- --nocapture
#[test]
fn e2e_real_browser_writes_pdf() {
    if std::env::var("LITEX_E2E").is_err() {
        println!("SKIP — set LITEX_E2E=1 to run the real-browser test");
        return;
    }
    let browser = std::env::var("LITEX_E2E_BROWSER").unwrap_or_else(|_| "chromium-browser".into());
    let dir = tempdir().unwrap();
    let (input, css) = write_sources(dir.path());

    cargo_bin()
        .arg("--input")
        .arg(&input)
        .arg("--css")
        .arg(&css)
        .args(["--browser", browser.as_str(), "--no-sandbox"])
        .assert()
        .success();

    let pdf = fs::metadata(dir.path().join("doc.md.pdf")).unwrap();
    assert!(pdf.len() > 0);
}
