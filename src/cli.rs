//! Command line surface: argument parsing, validation and output.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::interactive;
use crate::languages::{display_language, validate_codes};
use crate::logging::redact_secrets;
use crate::models::{SearchOptions, TranslationResult};
use crate::openai::{OpenAiClientTrait, OpenAiError};
use crate::parser::format_for_display;
use crate::service::{ClientHandle, SearchService, TranslationService};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Conventional status for a run cancelled with Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// lexi - web search with citations and strict JSON translation
#[derive(Parser, Debug)]
#[command(name = "lexi")]
#[command(about = "Web search and translation on the OpenAI Responses API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns true if the chosen command asked for verbose output.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Search(cmd) => cmd.verbose,
            Commands::Translate(cmd) => cmd.verbose,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question using web search, with cited sources
    Search(SearchCommand),

    /// Detect the language of text and translate it
    ///
    /// Without TEXT an interactive prompt is started.
    Translate(TranslateCommand),
}

/// Search the web
#[derive(Parser, Debug)]
pub struct SearchCommand {
    /// The search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Model to use (default: OPENAI_MODEL or gpt-4o-mini)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Comma-separated list of allowed domains (e.g. "bbc.com,cnn.com")
    #[arg(short, long, value_name = "DOMAINS")]
    pub domains: Option<String>,

    /// Print request details before the answer
    #[arg(short, long)]
    pub verbose: bool,

    /// API key, overriding OPENAI_API_KEY
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Translate text
#[derive(Parser, Debug)]
pub struct TranslateCommand {
    /// Text to translate (omit for interactive mode)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Target language codes (e.g. en es de)
    #[arg(short, long = "to", value_name = "CODE", num_args = 1..)]
    pub to: Vec<String>,

    /// Model to use (default: OPENAI_MODEL or gpt-4o-mini)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Print request details before the result
    #[arg(short, long)]
    pub verbose: bool,
}

/// Invalid command line input, reported before any API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("--to flag required when providing text directly")]
    MissingTargets,

    #[error("empty text provided. Please provide text to translate")]
    EmptyText,

    #[error("invalid language code")]
    InvalidLanguageCode(Vec<String>),

    #[error("empty query provided. Please provide a search query")]
    EmptyQuery,
}

/// Terminal streams a command reads from and writes to.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { input, out, err }
    }

    /// Writes `message`, then reads one trimmed line.
    ///
    /// Returns `None` at end of input.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim().to_string())),
            Err(e) => Err(e).context("Failed to read from terminal"),
        }
    }
}

/// Runs `cli` and returns the process exit status.
///
/// `connect` turns an API key into a Responses API client; it is only called
/// once the input has been validated.
pub fn run<F>(cli: Cli, config: &AppConfig, connect: F, console: &mut Console) -> i32
where
    F: Fn(&str) -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError>,
{
    let verbose = cli.verbose();
    let outcome = match cli.command {
        Commands::Search(cmd) => run_search(&cmd, config, &connect, console),
        Commands::Translate(cmd) => run_translate(&cmd, config, &connect, console),
    };

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            report_error(&e, verbose, console.err);
            EXIT_FAILURE
        }
    }
}

/// Reports a Ctrl-C to the user and returns `EXIT_INTERRUPTED`.
///
/// Called from the SIGINT handler installed in `main`, which then flushes the
/// log file and exits with the returned status.
pub fn report_interrupt(err: &mut dyn Write) -> i32 {
    warn!("operation cancelled by user");
    let _ = writeln!(err, "\nOperation cancelled by user.");
    let _ = err.flush();
    EXIT_INTERRUPTED
}

fn run_search<F>(cmd: &SearchCommand, config: &AppConfig, connect: &F, console: &mut Console) -> Result<()>
where
    F: Fn(&str) -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError>,
{
    let query = cmd.query.trim();
    if query.is_empty() {
        return Err(InputError::EmptyQuery.into());
    }

    let model = cmd.model.as_deref().unwrap_or(&config.model);
    let domains = cmd.domains.as_deref().map(parse_domains).unwrap_or_default();
    let api = open_api(cmd.api_key.as_deref(), config, connect)?;

    if cmd.verbose {
        writeln!(console.out, "Using model: {model}")?;
        writeln!(console.out, "Query: {query}")?;
        if !domains.is_empty() {
            writeln!(console.out, "Domain filter: {}", domains.join(", "))?;
        }
        writeln!(console.out, "\nSearching...\n")?;
    }

    let mut options = SearchOptions::new(model);
    if !domains.is_empty() {
        info!(domains = ?domains, "domain filtering enabled");
        options = options.with_allowed_domains(domains);
    }

    info!(query, model, "executing search");
    let result = SearchService::new(ClientHandle::Raw(api)).search(query, &options)?;
    info!(citations = result.citations().len(), "search completed");

    writeln!(console.out, "{}", format_for_display(&result))?;
    Ok(())
}

fn run_translate<F>(
    cmd: &TranslateCommand,
    config: &AppConfig,
    connect: &F,
    console: &mut Console,
) -> Result<()>
where
    F: Fn(&str) -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError>,
{
    let model = cmd.model.clone().unwrap_or_else(|| config.model.clone());

    let Some(text) = cmd.text.as_deref() else {
        let api = open_api(None, config, connect)?;
        let service = TranslationService::new(ClientHandle::Raw(api), Some(model));
        return interactive::run(&service, console, cmd.verbose);
    };

    let targets = validate_direct(text, &cmd.to)?;
    let api = open_api(None, config, connect)?;

    if cmd.verbose {
        writeln!(console.out, "Using model: {model}")?;
        writeln!(console.out, "Text: {text}")?;
        writeln!(console.out, "Target languages: {}", targets.join(", "))?;
        writeln!(console.out, "\nTranslating...\n")?;
    }

    let service = TranslationService::new(ClientHandle::Raw(api), Some(model));
    info!(targets = targets.len(), "translating text");
    let result = service.translate(text, &targets)?;
    info!("translation completed");

    write_translation(console.out, &result)?;
    Ok(())
}

/// Checks direct mode input, returning the lowercased target codes.
///
/// Checks run in order: targets present, text not blank, codes supported.
pub fn validate_direct(text: &str, targets: &[String]) -> Result<Vec<String>, InputError> {
    if targets.is_empty() {
        return Err(InputError::MissingTargets);
    }
    if text.trim().is_empty() {
        return Err(InputError::EmptyText);
    }

    validate_codes(targets).map_err(|invalid| {
        info!(invalid = ?invalid, "invalid language code(s)");
        InputError::InvalidLanguageCode(invalid)
    })
}

/// Splits a comma-separated domain list, dropping blank entries.
pub fn parse_domains(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Prints the detected language followed by one `code: text` line per target.
pub fn write_translation(out: &mut dyn Write, result: &TranslationResult) -> io::Result<()> {
    writeln!(out, "Detected: {}", display_language(result.detected_language()))?;
    for (code, text) in result.translations() {
        writeln!(out, "{code}: {text}")?;
    }
    Ok(())
}

fn open_api<F>(
    api_key: Option<&str>,
    config: &AppConfig,
    connect: &F,
) -> Result<Arc<dyn OpenAiClientTrait>>
where
    F: Fn(&str) -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError>,
{
    let key = api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or(config.api_key.as_deref())
        .ok_or(OpenAiError::MissingApiKey)?;

    Ok(connect(key)?)
}

fn report_error(error: &anyhow::Error, verbose: bool, err: &mut dyn Write) {
    warn!(error = %redact_secrets(&format!("{error:#}")), "command failed");

    let _ = writeln!(err, "Error: {error}");
    if let Some(InputError::MissingTargets) = error.downcast_ref::<InputError>() {
        let _ = writeln!(err, "Try: lexi translate \"your text\" --to en es de");
        let _ = writeln!(err, "Or run without text for interactive mode");
    }
    if verbose {
        for cause in error.chain().skip(1) {
            let _ = writeln!(err, "  caused by: {cause}");
        }
    }
}
