//! Shared helpers for driving the CLI in-process.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use clap::Parser;
use lexi::cli::{self, Cli, Console};
use lexi::config::AppConfig;
use lexi::openai::{ApiResponse, OpenAiClientTrait, OpenAiError, ResponseRequest};

/// Canned Responses API that records every request it receives.
pub struct MockApi {
    outcome: Result<serde_json::Value, String>,
    pub requests: Mutex<Vec<ResponseRequest>>,
}

impl MockApi {
    /// Answers every request with `body`.
    pub fn answering(body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(body),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Fails every request with an API error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl OpenAiClientTrait for MockApi {
    fn create_response(&self, request: &ResponseRequest) -> Result<ApiResponse, OpenAiError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(body) => Ok(ApiResponse::new(body.clone())),
            Err(message) => Err(OpenAiError::Api {
                message: message.clone(),
            }),
        }
    }
}

/// Result of one CLI run.
pub struct Run {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    /// API keys the CLI connected with
    pub keys: Vec<String>,
}

/// Config with an API key and file logging left unconfigured.
pub fn config_with_key() -> AppConfig {
    AppConfig {
        api_key: Some("sk-test-key".to_string()),
        ..AppConfig::default()
    }
}

/// Parses `args` and runs them against `api`, feeding `stdin`.
pub fn run_cli(args: &[&str], config: &AppConfig, api: Arc<MockApi>, stdin: &str) -> Run {
    let cli = Cli::try_parse_from(args).expect("arguments should parse");
    let keys = Mutex::new(Vec::new());
    let connect = |key: &str| -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError> {
        keys.lock().unwrap().push(key.to_string());
        Ok(api.clone())
    };

    let mut input = stdin.as_bytes();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut console = Console::new(&mut input, &mut out, &mut err);
    let code = cli::run(cli, config, connect, &mut console);

    Run {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
        keys: keys.into_inner().unwrap(),
    }
}
