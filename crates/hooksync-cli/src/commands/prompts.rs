use color_eyre::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for the API key; empty input keeps the current one
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read API key: {}", e))
}

/// Prompt for yes/no with a default
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}
