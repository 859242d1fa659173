//! `scratchdir config`: show the resolved configuration.

use crate::config::ProviderConfig;

/// Print the configuration as aligned `key  value` rows or as JSON.
pub fn run_config_command(config: &ProviderConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let rows = config_rows(config);
    let max_key_len = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in rows {
        println!("{:width$}  {}", key, value, width = max_key_len);
    }
    Ok(())
}

fn config_rows(config: &ProviderConfig) -> Vec<(&'static str, String)> {
    vec![
        ("provider", config.provider.clone()),
        ("root", config.root.display().to_string()),
        ("prefix", config.prefix.clone()),
    ]
}
