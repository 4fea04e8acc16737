//! End-to-end tests for `lexi search`, run in-process against a mock API.

mod common;

use clap::CommandFactory;
use common::{MockApi, config_with_key, run_cli};
use lexi::cli::Cli;
use lexi::config::AppConfig;
use lexi::openai::{Tool, WebSearchFilters};
use serde_json::json;

fn cited_answer() -> serde_json::Value {
    json!({
        "id": "resp_123",
        "output": [
            {"type": "web_search_call", "id": "ws_1", "status": "completed"},
            {
                "type": "message",
                "role": "assistant",
                "content": [{
                    "type": "output_text",
                    "text": "Rust 1.80 stabilized LazyLock.",
                    "annotations": [
                        {"type": "url_citation", "title": "Announcing Rust 1.80.0", "url": "https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html"},
                        {"type": "url_citation", "title": "LazyLock", "url": "https://doc.rust-lang.org/std/sync/struct.LazyLock.html"}
                    ]
                }]
            }
        ]
    })
}

#[test]
fn search_prints_answer_and_numbered_sources() {
    let api = MockApi::answering(cited_answer());

    let run = run_cli(
        &["lexi", "search", "What did Rust 1.80 stabilize?"],
        &config_with_key(),
        api.clone(),
        "",
    );

    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert_eq!(
        run.stdout,
        "Rust 1.80 stabilized LazyLock.\n\nSources:\n\
         [1] Announcing Rust 1.80.0 - https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html\n\
         [2] LazyLock - https://doc.rust-lang.org/std/sync/struct.LazyLock.html\n"
    );

    let requests = api.requests.lock().unwrap();
    assert_eq!(requests[0].user_message(), Some("What did Rust 1.80 stabilize?"));
    assert_eq!(requests[0].tools, vec![Tool::WebSearch { filters: None }]);
}

#[test]
fn search_without_citations_says_so() {
    let api = MockApi::answering(json!({"output_text": "Nobody knows."}));

    let run = run_cli(&["lexi", "search", "unknowable"], &config_with_key(), api, "");

    assert_eq!(run.code, 0);
    assert_eq!(run.stdout, "Nobody knows.\n\nNo citations found\n");
}

#[test]
fn domains_flag_restricts_web_search() {
    let api = MockApi::answering(cited_answer());

    let run = run_cli(
        &["lexi", "search", "climate news", "--domains", "bbc.com, cnn.com,", "--model", "gpt-5"],
        &config_with_key(),
        api.clone(),
        "",
    );

    assert_eq!(run.code, 0);
    let requests = api.requests.lock().unwrap();
    assert_eq!(requests[0].model, "gpt-5");
    assert_eq!(
        requests[0].tools,
        vec![Tool::WebSearch {
            filters: Some(WebSearchFilters {
                allowed_domains: vec!["bbc.com".to_string(), "cnn.com".to_string()],
            }),
        }]
    );
}

#[test]
fn api_key_flag_overrides_environment() {
    let run = run_cli(
        &["lexi", "search", "q", "--api-key", "sk-from-flag"],
        &AppConfig::default(),
        MockApi::answering(cited_answer()),
        "",
    );

    assert_eq!(run.code, 0);
    assert_eq!(run.keys, vec!["sk-from-flag"]);
}

#[test]
fn search_without_api_key_fails() {
    let run = run_cli(
        &["lexi", "search", "q"],
        &AppConfig::default(),
        MockApi::answering(cited_answer()),
        "",
    );

    assert_eq!(run.code, 1);
    assert_eq!(run.stderr, "Error: OPENAI_API_KEY not found in environment variables\n");
}

#[test]
fn empty_answer_is_a_search_error() {
    let run = run_cli(
        &["lexi", "search", "q"],
        &config_with_key(),
        MockApi::answering(json!({"output": []})),
        "",
    );

    assert_eq!(run.code, 1);
    assert_eq!(
        run.stderr,
        "Error: Search API error: Search response contained no answer text\n"
    );
}

#[test]
fn blank_query_is_rejected() {
    let api = MockApi::answering(cited_answer());

    let run = run_cli(&["lexi", "search", "  "], &config_with_key(), api.clone(), "");

    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("empty query"));
    assert_eq!(api.request_count(), 0);
}

#[test]
fn verbose_search_prints_request_details() {
    let run = run_cli(
        &["lexi", "search", "climate news", "--domains", "bbc.com", "--verbose"],
        &config_with_key(),
        MockApi::answering(cited_answer()),
        "",
    );

    assert_eq!(run.code, 0);
    assert!(run.stdout.starts_with(
        "Using model: gpt-4o-mini\nQuery: climate news\nDomain filter: bbc.com\n\nSearching...\n\n"
    ));
}

#[test]
fn subcommands_have_help_text() {
    let cmd = Cli::command();

    for name in ["search", "translate"] {
        let sub = cmd
            .get_subcommands()
            .find(|c| c.get_name() == name)
            .unwrap_or_else(|| panic!("{name} subcommand should exist"));
        assert!(sub.get_about().is_some(), "{name} should have help text");
    }
}
