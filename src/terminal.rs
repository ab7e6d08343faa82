use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::ProgressBar;

/// Run `task` under a terminal spinner. The spinner is cleared afterwards,
/// also when the task fails.
pub async fn with_spinner<T>(message: &str, task: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = task.await;
    spinner.finish_and_clear();
    result
}

pub fn prompt(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}
