use std::future::Future;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Run `fut` with a spinner showing `message`, clearing it afterwards.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = create_spinner(message.to_string());
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

/// Prompt the user for text input.
pub fn prompt_text(label: &str) -> Result<String> {
    let input: String = dialoguer::Input::new().with_prompt(label).interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt the user for password input (hidden).
pub fn prompt_password(label: &str) -> Result<String> {
    let prompt = format!("{}: ", label);
    rpassword::prompt_password(&prompt).context("Failed to read password")
}
