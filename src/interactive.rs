//! Prompt-driven translation loop used when `translate` gets no text.

use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::cli::{Console, write_translation};
use crate::languages::{
    MAX_INTERACTIVE_TARGETS, ensure_english_first, supported_codes_list, validate_codes,
};
use crate::service::TranslationService;

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Runs the prompt loop until the user quits or input ends.
///
/// Each round asks for text, then for target codes, translates, prints the
/// result and asks whether to continue. Translation failures are printed
/// and do not end the loop.
///
/// # Errors
///
/// Terminal I/O failures.
pub fn run(service: &TranslationService, console: &mut Console, verbose: bool) -> Result<()> {
    writeln!(console.out, "\nTranslation Tool - Interactive Mode")?;
    writeln!(console.out, "{}", "=".repeat(40))?;

    loop {
        let Some(text) = prompt_for_text(console)? else {
            break;
        };
        let Some(targets) = prompt_for_languages(console)? else {
            break;
        };

        let (targets, added) = ensure_english_first(targets);
        if added {
            writeln!(console.out, "Adding English (en) as default language")?;
        }

        if verbose {
            writeln!(console.out, "\nUsing model: {}", service.client_model())?;
            writeln!(console.out, "Translating to: {}", targets.join(", "))?;
        }
        writeln!(console.out, "\nTranslating...\n")?;

        info!(targets = targets.len(), "translating text");
        match service.translate(&text, &targets) {
            Ok(result) => {
                write_translation(console.out, &result)?;
                info!("translation completed");
            }
            Err(e) => {
                writeln!(console.err, "\nError: {e}")?;
            }
        }

        if !prompt_continue(console)? {
            break;
        }
    }

    writeln!(console.out, "\nGoodbye!")?;
    Ok(())
}

/// Asks for text until something non-blank arrives.
///
/// Returns `None` when the user quits or input ends.
fn prompt_for_text(console: &mut Console) -> Result<Option<String>> {
    loop {
        let Some(text) = console.prompt("\nEnter text to translate (or 'q' to quit): ")? else {
            return Ok(None);
        };

        if QUIT_WORDS.contains(&text.to_lowercase().as_str()) {
            return Ok(None);
        }
        if !text.is_empty() {
            return Ok(Some(text));
        }

        writeln!(console.out, "Text cannot be empty. Please try again.")?;
    }
}

/// Asks for target codes until a valid list arrives, keeping at most
/// `MAX_INTERACTIVE_TARGETS`.
fn prompt_for_languages(console: &mut Console) -> Result<Option<Vec<String>>> {
    loop {
        writeln!(
            console.out,
            "\nEnter target languages (up to {MAX_INTERACTIVE_TARGETS}, space-separated):"
        )?;
        writeln!(console.out, "Examples: es fr de | ja zh ko | ru ar hi")?;
        let Some(line) = console.prompt("Languages: ")? else {
            return Ok(None);
        };

        let codes = split_codes(&line);
        if codes.is_empty() {
            writeln!(console.out, "Please enter at least one language code.")?;
            continue;
        }

        let mut codes = match validate_codes(&codes) {
            Ok(codes) => codes,
            Err(invalid) => {
                info!(invalid = ?invalid, "invalid language code(s)");
                writeln!(console.out, "Invalid language code(s): {}", invalid.join(", "))?;
                writeln!(console.out, "Valid codes: {}", supported_codes_list())?;
                continue;
            }
        };

        if codes.len() > MAX_INTERACTIVE_TARGETS {
            codes.truncate(MAX_INTERACTIVE_TARGETS);
            writeln!(
                console.out,
                "Maximum {MAX_INTERACTIVE_TARGETS} languages allowed. Using first {MAX_INTERACTIVE_TARGETS}: {}",
                codes.join(", ")
            )?;
        }

        return Ok(Some(codes));
    }
}

/// Asks whether to translate another phrase; end of input means no.
fn prompt_continue(console: &mut Console) -> Result<bool> {
    loop {
        let Some(choice) = console.prompt("\nTranslate another phrase? (y/n): ")? else {
            return Ok(false);
        };

        match choice.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(console.out, "Please enter 'y' or 'n'")?,
        }
    }
}

/// Splits on whitespace and commas.
fn split_codes(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
