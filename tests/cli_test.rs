use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn analyze_json(fixture: &str, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["analyze", fixture, "--format", "json", "--quiet"];
    args.extend_from_slice(extra);
    let output = Command::cargo_bin("inquest")
        .unwrap()
        .args(&args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn analyze_sample_project_json() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "analyze",
            "tests/fixtures/sample_project",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"all\""))
        .stdout(predicate::str::contains("\"files_scanned\": 3"))
        .stdout(predicate::str::contains("\"full_name\": \"Greeter.add\""))
        .stdout(predicate::str::contains("\"full_name\": \"Circle.area\""))
        .stdout(predicate::str::contains("\"full_name\": \"Greeter.greet\""))
        .stdout(predicate::str::contains("\"docstring\": \"Greets people.\""));
}

#[test]
fn analyze_summary_matches_expected_shape() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "analyze",
            "tests/fixtures/sample_project",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Function 'add(int x, String[] names)' in Greeter.java (line 5): ",
        ));
}

#[test]
fn analyze_sample_project_text() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "analyze",
            "tests/fixtures/sample_project",
            "--format",
            "text",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inquest Analysis Report"))
        .stdout(predicate::str::contains("Scanned:"))
        .stdout(predicate::str::contains(
            "Function 'add(int x, String[] names)' in Greeter.java (line 5):",
        ));
}

#[test]
fn analyze_lang_filter_restricts_files() {
    let json = analyze_json("tests/fixtures/sample_project", &["--lang", "java"]);
    assert_eq!(json["metadata"]["language"], "java");
    assert_eq!(json["metadata"]["files_scanned"], 1);
    let components = json["components"].as_array().unwrap();
    assert!(components.iter().all(|c| c["file"] == "Greeter.java"));
}

#[test]
fn analyze_counts_classes_and_functions() {
    let json = analyze_json("tests/fixtures/sample_project", &[]);
    assert_eq!(json["metadata"]["components"], 10);
    assert_eq!(json["metadata"]["classes"], 3);
    assert_eq!(json["metadata"]["functions"], 7);
}

#[test]
fn analyze_skips_kotlin_top_level_functions() {
    let json = analyze_json("tests/fixtures/sample_project", &["--lang", "kotlin"]);
    let names: Vec<&str> = json["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Circle"));
    assert!(names.contains(&"scale"));
    assert!(!names.contains(&"describe"));
}

#[test]
fn analyze_exclude_pattern() {
    let json = analyze_json("tests/fixtures/sample_project", &["--exclude", "*.java"]);
    assert_eq!(json["metadata"]["files_scanned"], 2);
    let components = json["components"].as_array().unwrap();
    assert!(components.iter().all(|c| c["file"] != "Greeter.java"));
}

#[test]
fn analyze_malformed_file_is_isolated() {
    let json = analyze_json("tests/fixtures/malformed", &[]);
    assert_eq!(json["metadata"]["files_scanned"], 3);
    assert!(json["metadata"]["files_failed"].as_u64().unwrap() >= 1);

    // Components from the healthy file survive
    let names: Vec<&str> = json["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"ok"));

    // The broken file is recorded as a failure
    let failures = json["failures"].as_array().unwrap();
    assert!(failures
        .iter()
        .any(|f| f["file"].as_str().unwrap().contains("broken.java")));
}

#[test]
fn analyze_strict_aborts_on_malformed_file() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args(["analyze", "tests/fixtures/malformed", "--strict", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn analyze_no_supported_files_fails() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args(["analyze", "tests/fixtures/no_sources", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn analyze_nonexistent_path_fails() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args(["analyze", "tests/fixtures/nonexistent", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn questions_seeded_runs_are_deterministic() {
    let run = || {
        let output = Command::cargo_bin("inquest")
            .unwrap()
            .args([
                "questions",
                "tests/fixtures/sample_project",
                "--seed",
                "42",
                "--count",
                "5",
                "--format",
                "json",
                "--quiet",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        json["questions"].clone()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn questions_honors_count_and_cycles_difficulty() {
    let output = Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "questions",
            "tests/fixtures/sample_project",
            "--count",
            "7",
            "--seed",
            "1",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 7);
    assert_eq!(questions[0]["difficulty"], "beginner");
    assert_eq!(questions[1]["difficulty"], "intermediate");
    assert_eq!(questions[2]["difficulty"], "advanced");
    assert_eq!(questions[3]["difficulty"], "beginner");
}

#[test]
fn questions_focus_filters_components() {
    let output = Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "questions",
            "tests/fixtures/sample_project",
            "--focus",
            "greet",
            "--count",
            "6",
            "--seed",
            "3",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 6);
    for q in questions {
        let component = q["component"].as_str().unwrap().to_lowercase();
        assert!(component.contains("greet"), "unexpected component {component}");
    }
}

#[test]
fn questions_unmatched_focus_falls_back_to_all() {
    let output = Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "questions",
            "tests/fixtures/sample_project",
            "--focus",
            "zzz-nothing",
            "--count",
            "4",
            "--seed",
            "3",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["questions"].as_array().unwrap().len(), 4);
}

#[test]
fn questions_text_format() {
    Command::cargo_bin("inquest")
        .unwrap()
        .args([
            "questions",
            "tests/fixtures/sample_project",
            "--count",
            "3",
            "--seed",
            "8",
            "--format",
            "text",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inquest Interview Questions"))
        .stdout(predicate::str::contains("[beginner]"))
        .stdout(predicate::str::contains("Answer:"));
}

#[test]
fn config_show_defaults() {
    // No config file present, shows all defaults
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("inquest").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.format: json <- default"))
        .stdout(predicate::str::contains("defaults.quiet: false <- default"))
        .stdout(predicate::str::contains("questions.count: 10 <- default"))
        .stdout(predicate::str::contains(
            "questions.seed: (entropy) <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".inquest.toml"),
        r#"
[defaults]
format = "text"
quiet = true

[questions]
count = 3
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("inquest").unwrap();
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files:"))
        .stdout(predicate::str::contains(".inquest.toml"))
        .stdout(predicate::str::contains(
            "defaults.format: text <- project config",
        ))
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- project config",
        ))
        .stdout(predicate::str::contains(
            "questions.count: 3 <- project config",
        ));
}

#[test]
fn config_explain_questions_section() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".inquest.toml"),
        r#"
[questions]
seed = 9
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("inquest").unwrap();
    cmd.args([
        "config",
        "explain",
        "questions",
        "--path",
        tmp.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Section: questions"))
        .stdout(predicate::str::contains("questions.count: 10 <- default"))
        .stdout(predicate::str::contains(
            "questions.seed: 9 <- project config",
        ));
}

#[test]
fn config_explain_unknown_section() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("inquest").unwrap();
    cmd.args([
        "config",
        "explain",
        "nonexistent",
        "--path",
        tmp.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Unknown config section: nonexistent",
        ))
        .stdout(predicate::str::contains("Available sections"));
}

#[test]
fn project_config_sets_output_format() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::copy(
        fixture_path("sample_project/app.py"),
        project.join("app.py"),
    )
    .unwrap();
    std::fs::write(
        project.join(".inquest.toml"),
        r#"
[defaults]
format = "text"
"#,
    )
    .unwrap();

    Command::cargo_bin("inquest")
        .unwrap()
        .current_dir(&project)
        .args(["analyze", ".", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inquest Analysis Report"));
}

#[test]
fn cli_flag_overrides_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::copy(
        fixture_path("sample_project/app.py"),
        project.join("app.py"),
    )
    .unwrap();

    // Config says text, the flag says json
    std::fs::write(
        project.join(".inquest.toml"),
        r#"
[defaults]
format = "text"
"#,
    )
    .unwrap();

    let output = Command::cargo_bin("inquest")
        .unwrap()
        .current_dir(&project)
        .args(["analyze", ".", "--format", "json", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let _: serde_json::Value =
        serde_json::from_slice(&output).expect("flag should win over project config");
}

#[test]
fn env_var_sets_output_format() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::copy(
        fixture_path("sample_project/app.py"),
        project.join("app.py"),
    )
    .unwrap();

    Command::cargo_bin("inquest")
        .unwrap()
        .current_dir(&project)
        .env("INQUEST_FORMAT", "text")
        .args(["analyze", ".", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inquest Analysis Report"));
}

#[test]
fn inquestignore_excludes_matching_files() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::copy(
        fixture_path("sample_project/app.py"),
        project.join("app.py"),
    )
    .unwrap();
    std::fs::copy(
        fixture_path("sample_project/Greeter.java"),
        project.join("Greeter.java"),
    )
    .unwrap();
    std::fs::write(project.join(".inquestignore"), "*.java\n").unwrap();

    let output = Command::cargo_bin("inquest")
        .unwrap()
        .current_dir(&project)
        .args(["analyze", ".", "--format", "json", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["metadata"]["files_scanned"], 1);
    let components = json["components"].as_array().unwrap();
    assert!(components.iter().all(|c| c["file"] != "Greeter.java"));
}
