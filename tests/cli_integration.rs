use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn termaudit() -> Command {
    Command::cargo_bin("termaudit").unwrap()
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("config.txt");
    fs::write(&path, body).unwrap();
    path
}

fn site(dir: &Path) -> std::path::PathBuf {
    let site = dir.join("site");
    fs::create_dir_all(site.join("blog")).unwrap();
    fs::write(site.join("index.html"), "<h1>Welcome</h1>\n<p>Our cat is here</p>\n").unwrap();
    fs::write(site.join("blog/catalog.md"), "nothing\n").unwrap();
    fs::write(site.join("logo.png"), b"\x89PNG cat").unwrap();
    site
}

#[test]
fn writes_html_report_and_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let site = site(dir.path());
    let output = dir.path().join("out/report.html");
    let config = write_config(
        dir.path(),
        &format!(
            "# audit\nDIRECTORY={}\nSEARCH_TERMS=cat, welcome\nBASE_URL=https://example.com/\nOUTPUT_FILE={}\n",
            site.display(),
            output.display()
        ),
    );

    termaudit()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of results: 2"))
        .stdout(predicate::str::contains("Terms searched: cat, welcome"))
        .stdout(predicate::str::contains("Match found: catalog.md contains cat"));

    let html = fs::read_to_string(&output)?;
    assert!(html.contains("href=\"https://example.com/blog/catalog.md\""));
    assert!(html.contains("href=\"https://example.com/index.html\""));
    assert!(!html.contains("logo.png"));
    assert!(html.contains("Found matches in <strong>2</strong> files."));
    Ok(())
}

#[test]
fn json_format_writes_json_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let site = site(dir.path());
    let output = dir.path().join("report.json");
    let config = write_config(
        dir.path(),
        &format!(
            "DIRECTORY={}\nSEARCH_TERMS=cat\nBASE_URL=\nOUTPUT_FILE={}\n",
            site.display(),
            output.display()
        ),
    );

    termaudit()
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .arg("--parallel")
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(value["total_files"], 2);
    assert!(value["files"][0]["url"].is_null());
    Ok(())
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    termaudit()
        .arg("--config")
        .arg(dir.path().join("config.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn missing_keys_are_listed_and_nothing_is_written() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.html");
    let config = write_config(
        dir.path(),
        &format!("SEARCH_TERMS=cat\nOUTPUT_FILE={}\n", output.display()),
    );

    termaudit()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("  - DIRECTORY"))
        .stderr(predicate::str::contains("  - BASE_URL"))
        .stderr(predicate::str::contains("SEARCH_TERMS").not());

    assert!(!output.exists());
}

#[test]
fn nonexistent_directory_fails_before_scanning() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.html");
    let config = write_config(
        dir.path(),
        &format!(
            "DIRECTORY={}\nSEARCH_TERMS=cat\nBASE_URL=\nOUTPUT_FILE={}\n",
            dir.path().join("missing").display(),
            output.display()
        ),
    );

    termaudit()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));

    assert!(!output.exists());
}
