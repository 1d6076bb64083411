use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response to a string in the requested format.
///
/// `Text` uses the response's `Display` impl; the JSON formats serialize it.
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}
