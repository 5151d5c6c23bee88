//! Rendering of search results.

use anyhow::Result;
use cardseek::{Card, FieldTable};

use crate::cli::OutputFormat;

/// Renders matching cards in the requested format.
pub fn render_cards(cards: &[&Card], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Names => Ok(cards
            .iter()
            .map(|card| format!("{}\n", card.display_name()))
            .collect()),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(cards)?)),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(cards)?),
    }
}

/// Renders the alias table, one `alias  binding` pair per line.
pub fn render_fields(fields: &FieldTable) -> String {
    let width = fields.aliases().map(|(alias, _)| alias.len()).max().unwrap_or(0);
    fields
        .aliases()
        .map(|(alias, binding)| format!("{alias:<width$}  {binding}\n"))
        .collect()
}
