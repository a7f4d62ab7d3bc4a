use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::CommandError;

/// Yes/no confirmation, defaulting to "no". Destructive store operations
/// must pass through here (or the script-mode flag) before executing.
pub fn confirm(prompt: &str) -> Result<bool, CommandError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(CommandError::from)
}

/// Free-form text input.
pub fn text(prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String, CommandError> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(allow_empty);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    input.interact_text().map_err(CommandError::from)
}

/// Single choice from a list; `None` when the user backs out.
pub fn select(prompt: &str, items: &[String]) -> Result<Option<usize>, CommandError> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(CommandError::from)
}
