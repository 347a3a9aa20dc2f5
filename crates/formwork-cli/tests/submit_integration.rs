// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the submission commands.
//!
//! These tests drive the full request lifecycle against a SQLite cache and a
//! data directory inside a temp directory.

use std::fs;
use std::path::Path;

use formwork::{FormStatus, Outcome};
use formwork_cli::commands::submit::{execute, SubmitArgs, DEFAULT_CONTENT_TYPE};
use formwork_cli::commands::{check, forms};
use formwork_cli::config::Config;
use tempfile::tempdir;

const PAGES: &str = r#"
/contact:
  title: Contact
  form:
    name: contact
    fields:
      - { name: email, label: Email, type: email, validate: { required: true } }
      - { name: body, label: Message }
    process:
      - ip: { label: Sender }
      - save: { fileprefix: "msg-", dateformat: "Y", extension: ".log" }
      - message: "Thanks {{ form.value.email }}"
      - display: thanks
/contact/thanks:
  title: Thanks
/newsletter:
  forms:
    signup:
      fields:
        - { name: address, type: email }
      process:
        - save: { filename: list.yaml, operation: add }
        - redirect: /newsletter/done
        - tweet: {}
"#;

/// Create a project in a temp directory and return its config
fn setup_project(dir: &Path) -> Config {
    fs::write(dir.join("pages.yaml"), PAGES).unwrap();
    fs::write(
        dir.join("formwork.toml"),
        format!(
            "[project]\nname = \"test\"\n\n[storage]\ndata_dir = \"{}\"\ncache_dir = \"{}\"\n",
            dir.join("data").display(),
            dir.join("cache").display()
        ),
    )
    .unwrap();
    Config::load(Some(&dir.join("formwork.toml"))).unwrap()
}

fn submit(config: &Config, dir: &Path, route: &str, body: &str) -> Outcome {
    let pages = dir.join("pages.yaml");
    execute(
        config,
        &SubmitArgs {
            pages: &pages,
            route,
            body,
            content_type: DEFAULT_CONTENT_TYPE,
            ip: Some("198.51.100.7"),
        },
    )
    .unwrap()
}

#[test]
fn test_submit_saves_and_displays() {
    let dir = tempdir().unwrap();
    let config = setup_project(dir.path());

    let outcome = submit(
        &config,
        dir.path(),
        "/contact",
        "__form-name__=contact&email=ada%40example.com&body=Hello",
    );

    let Outcome::Display { route, form } = outcome else {
        panic!("expected display outcome, got {:?}", outcome);
    };
    assert_eq!(route, "/contact/thanks");
    assert_eq!(form.status, FormStatus::Accepted);
    assert_eq!(form.message.as_deref(), Some("Thanks ada@example.com"));

    let saved: Vec<_> = fs::read_dir(dir.path().join("data/contact"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("msg-20"));
    assert!(saved[0].ends_with(".log"));

    let content = fs::read_to_string(dir.path().join("data/contact").join(&saved[0])).unwrap();
    assert!(content.contains("Email: ada@example.com"));
    assert!(content.contains("Sender: 198.51.100.7"));
}

#[test]
fn test_submit_rejects_invalid_fields() {
    let dir = tempdir().unwrap();
    let config = setup_project(dir.path());

    let outcome = submit(&config, dir.path(), "/contact", "__form-name__=contact&email=not-an-address");

    match outcome {
        Outcome::ValidationFailed { route, message, .. } => {
            assert_eq!(route, "/contact");
            assert!(message.starts_with("Validation failed:"));
            assert!(message.contains("Email must be a valid email address."));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(!dir.path().join("data/contact").exists());
}

#[test]
fn test_submit_redirect_and_log() {
    let dir = tempdir().unwrap();
    let config = setup_project(dir.path());

    for address in ["one%40example.com", "two%40example.com"] {
        let outcome = submit(
            &config,
            dir.path(),
            "/newsletter",
            &format!("__form-name__=signup&address={}", address),
        );
        assert_eq!(outcome, Outcome::redirect("/newsletter/done"));
    }

    let log = fs::read_to_string(dir.path().join("data/signup/list.yaml")).unwrap();
    let records: Vec<serde_yaml::Value> = serde_yaml::from_str(&log).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["address"].as_str(), Some("two@example.com"));
}

#[test]
fn test_unknown_form_is_ignored() {
    let dir = tempdir().unwrap();
    let config = setup_project(dir.path());

    let outcome = submit(&config, dir.path(), "/contact", "__form-name__=nobody&email=x");

    match outcome {
        Outcome::Render { route, form } => {
            assert_eq!(route, "/contact");
            assert_eq!(form.unwrap().status, FormStatus::Unsubmitted);
        }
        other => panic!("expected plain render, got {:?}", other),
    }
}

#[test]
fn test_forms_lists_cached_registry() {
    let dir = tempdir().unwrap();
    let config = setup_project(dir.path());

    assert!(forms::collect(&config).unwrap().is_empty());

    submit(&config, dir.path(), "/contact", "email=x");

    let listed = forms::collect(&config).unwrap();
    let names: Vec<_> = listed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["contact", "signup"]);
    assert_eq!(listed[0].route, "/contact");
    assert_eq!(listed[0].actions, vec!["ip", "save", "message", "display"]);
    assert_eq!(listed[1].fields, vec!["address"]);
}

#[test]
fn test_check_reports_forms_per_page() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let reports = check::inspect(&dir.path().join("pages.yaml")).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].forms, vec!["contact"]);
    assert!(reports[1].forms.is_empty());
    assert_eq!(reports[2].forms, vec!["signup"]);
    assert_eq!(reports[2].unknown_actions, vec!["tweet"]);
}

#[test]
fn test_check_rejects_malformed_declaration() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pages.yaml"), "/broken:\n  form: 12\n").unwrap();

    assert!(check::inspect(&dir.path().join("pages.yaml")).is_err());
}
