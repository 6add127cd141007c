// UI layer: provides a simple interactive flow using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::ChatClient;
use crate::config::Config;
use crate::persona::SELECTABLE;
use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Startup gate, run before the form is ever shown.
///
/// First the key-check region: a well-formed key prints a success line
/// with the masked prefix, a malformed or missing one prints an error
/// with a hint and halts. Then the connectivity probe: a quick models
/// listing confirms the endpoint and the key actually work; on failure
/// the error is shown and the process halts as well.
pub fn startup_check(cfg: &Config, api: &ChatClient) -> Result<()> {
    if cfg.key_is_well_formed() {
        println!("{}", style("API key detected.").green());
        println!("  Key prefix: {}", cfg.masked_key());
    } else {
        println!(
            "{}",
            style("OPENAI_API_KEY is not set or does not look like an API key.").red()
        );
        println!("  Set it in the environment, a local .env file, or the secrets file.");
        anyhow::bail!("API key check failed");
    }

    let spinner = thinking_spinner("Checking connectivity...");
    let probe = api.list_models();
    spinner.finish_and_clear();
    match probe {
        Ok(models) => {
            println!(
                "{}",
                style(format!("Endpoint reachable ({} models available).", models.len())).green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", style(format!("Connectivity check failed: {}", e)).red());
            anyhow::bail!("Connectivity check failed")
        }
    }
}

/// Main interactive loop. Receives a `ChatClient` instance and runs a
/// simple select loop until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn main_menu(api: ChatClient) -> Result<()> {
    print_intro();
    loop {
        let items = vec!["Ask a question", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                // One full ask: persona, question, blocking call, result.
                handle_question(&api)?;
            }
            1 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Title and overview block, printed once before the loop starts.
fn print_intro() {
    println!("{}", style("Expert Q&A console").bold());
    println!("The AI answers as the expert you pick (English teacher or nutritionist).");
    println!();
    println!("How it works:");
    println!("  1. Pick the expert persona");
    println!("  2. Type your question");
    println!("  3. Send it and read the answer");
    println!();
}

/// Collect the persona and the question, then run one completion call.
fn handle_question(api: &ChatClient) -> Result<()> {
    let names: Vec<&str> = SELECTABLE.iter().map(|p| p.display_name()).collect();
    let persona = SELECTABLE[Select::new()
        .with_prompt("Pick the expert to ask")
        .items(&names)
        .default(0)
        .interact()?];

    // Empty input is allowed through the prompt so the blank check below
    // owns the rejection and can warn instead of re-prompting.
    let question: String = Input::new()
        .with_prompt("Your question")
        .allow_empty(true)
        .interact_text()?;

    if is_blank(&question) {
        println!("{}", style("Please type a question before sending.").yellow());
        return Ok(());
    }

    let spinner = thinking_spinner("The AI is thinking...");
    let result = api.complete(persona.instruction(), &question);
    spinner.finish_and_clear();

    match result {
        Ok(answer) => {
            println!("{}", style("AI answer:").green());
            println!("{}", answer);
        }
        Err(e) => println!("{}", style(format!("Request failed: {}", e)).red()),
    }
    Ok(())
}

/// A question is blank when it is empty or whitespace only; blank
/// questions never reach the network.
fn is_blank(question: &str) -> bool {
    question.trim().is_empty()
}

/// indicatif spinner shown while a blocking call is in flight. The
/// steady tick keeps it animating even though this thread is busy
/// waiting on the response.
fn thinking_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_covers_empty_and_whitespace_input() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\n\t  \n"));
    }

    #[test]
    fn real_questions_are_not_blank() {
        assert!(!is_blank("What should I eat before a run?"));
        assert!(!is_blank("  padded but real  "));
    }
}
