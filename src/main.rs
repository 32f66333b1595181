// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use freja::{AgentBuilder, tools};
use freja_model::registry::{list_drivers, DriverMeta};
use freja_tools::{Tool, ToolCall};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match &cli.command {
        Commands::ShowConfig => {
            let config = freja_config::load(cli.config.as_deref())?;
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
        Commands::ListProviders { json } => list_providers_cmd(*json),
        Commands::Ask { prompt } => {
            let config = Arc::new(freja_config::load(cli.config.as_deref())?);
            let agent = AgentBuilder::new(config).build()?;
            debug!(
                provider = agent.model().provider(),
                model = agent.model().model_name(),
                "agent ready"
            );
            println!("{}", agent.ask(prompt).await?);
            Ok(())
        }
        Commands::Calc { expression } => {
            let value = tools::evaluate(expression)?;
            println!("{}", tools::format_number(value));
            Ok(())
        }
        Commands::Fetch { url, max_chars } => {
            let (text, source) = freja_fetch::fetch_webpage(url, *max_chars).await;
            if source == freja_fetch::FetchSource::Error {
                anyhow::bail!("failed to fetch {url}");
            }
            eprintln!("(fetched via {source})");
            println!("{text}");
            Ok(())
        }
        Commands::Search { query, count } => {
            let tool = tools::InternetSearchTool::default();
            let call = ToolCall {
                id: "cli".into(),
                name: "internet_search".into(),
                args: serde_json::json!({ "query": query, "max_results": count }),
            };
            let out = tool.execute(&call).await;
            if out.is_error {
                anyhow::bail!("{}", out.content);
            }
            println!("{}", out.content);
            Ok(())
        }
    }
}

/// List all registered model providers.
fn list_providers_cmd(as_json: bool) -> anyhow::Result<()> {
    let drivers = list_drivers();

    if as_json {
        #[derive(serde::Serialize)]
        struct ProviderJson {
            id: &'static str,
            name: &'static str,
            description: &'static str,
            default_api_key_env: Option<&'static str>,
            default_base_url: Option<&'static str>,
            requires_api_key: bool,
        }
        let rows: Vec<ProviderJson> = drivers
            .iter()
            .map(|d| ProviderJson {
                id: d.id,
                name: d.name,
                description: d.description,
                default_api_key_env: d.default_api_key_env,
                default_base_url: d.default_base_url,
                requires_api_key: d.requires_api_key,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", provider_table(drivers));
    Ok(())
}

/// Render the provider table with column widths computed from the data,
/// so the divider spans every column exactly.
fn provider_table(drivers: &[DriverMeta]) -> String {
    let id_w = drivers.iter().map(|d| d.id.len()).max().unwrap_or(0).max("ID".len());
    let key_w = drivers
        .iter()
        .map(|d| d.default_api_key_env.unwrap_or("-").len())
        .max()
        .unwrap_or(0)
        .max("API KEY ENV".len());
    let desc_w = drivers
        .iter()
        .map(|d| d.description.len())
        .max()
        .unwrap_or(0)
        .max("DESCRIPTION".len());

    let mut out = String::new();
    out.push_str(&format!("{:<id_w$}  {:<key_w$}  DESCRIPTION\n", "ID", "API KEY ENV"));
    out.push_str(&format!("{}\n", "-".repeat(id_w + key_w + desc_w + 4)));
    for d in drivers {
        let key = d.default_api_key_env.unwrap_or("-");
        out.push_str(&format!("{:<id_w$}  {:<key_w$}  {}\n", d.id, key, d.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_table_divider_spans_the_widest_line() {
        let table = provider_table(list_drivers());
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let divider = lines.next().unwrap();

        assert!(header.starts_with("ID"));
        assert!(header.contains("API KEY ENV"));
        let widest = table.lines().map(|l| l.len()).max().unwrap();
        assert_eq!(divider.len(), widest);
    }

    #[test]
    fn provider_table_lists_every_driver() {
        let drivers = list_drivers();
        let table = provider_table(drivers);
        for d in drivers {
            assert!(table.contains(d.id), "missing driver row: {}", d.id);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
