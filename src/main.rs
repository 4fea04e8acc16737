use std::io;
use std::sync::{Arc, Mutex};

use clap::Parser;
use lexi::cli::{self, Cli, Console};
use lexi::config::AppConfig;
use lexi::logging::{self, LogGuard};
use lexi::openai::{OpenAiClientBuilder, OpenAiClientTrait, OpenAiError};
use tracing::{info, warn};

type SharedGuard = Arc<Mutex<Option<LogGuard>>>;

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let guard: SharedGuard = Arc::new(Mutex::new(logging::init(&config.log, cli.verbose())));
    info!(version = env!("CARGO_PKG_VERSION"), "lexi started");

    // std retries reads interrupted by a signal, so Ctrl-C is handled here.
    let handler_guard = Arc::clone(&guard);
    if let Err(e) = ctrlc::set_handler(move || {
        let code = cli::report_interrupt(&mut io::stderr());
        exit(&handler_guard, code);
    }) {
        warn!(error = %e, "failed to install Ctrl-C handler");
    }

    let connect = |api_key: &str| -> Result<Arc<dyn OpenAiClientTrait>, OpenAiError> {
        let client = OpenAiClientBuilder::new()
            .base_url(&config.base_url)
            .api_key(api_key)
            .build()?;
        Ok(Arc::new(client))
    };

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let mut console = Console::new(&mut input, &mut out, &mut err);

    let code = cli::run(cli, &config, connect, &mut console);
    exit(&guard, code);
}

/// Flushes the log file, then exits; `process::exit` skips destructors.
fn exit(guard: &SharedGuard, code: i32) -> ! {
    if let Ok(mut guard) = guard.lock() {
        drop(guard.take());
    }
    std::process::exit(code);
}
