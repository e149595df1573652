// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use the_switchyard::config::{load_and_validate_config, OnboardingSummary, RuntimeBuilder};
use the_switchyard::engine::OnboardingCoordinator;
use the_switchyard::model::SubsystemKind;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The Switchyard - onboard connectors from a catalog file and report what was published
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog configuration file (.yaml, .yml or .toml)
    config: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    summary: &'a OnboardingSummary,
    registries: BTreeMap<SubsystemKind, Vec<String>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("the_switchyard={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Config file: {}", args.config);

    let config = load_and_validate_config(&args.config)
        .with_context(|| format!("Failed to load '{}'", args.config))?;
    let coordinator = RuntimeBuilder::from_config(&config)?;
    let summary = RuntimeBuilder::onboard_all(&coordinator, &config)
        .context("Registries are inconsistent after a publication fault")?;

    let report = Report {
        summary: &summary,
        registries: registry_contents(&coordinator),
    };
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    if !summary.failed.is_empty() {
        anyhow::bail!("{} connector(s) failed to onboard", summary.failed.len());
    }
    Ok(())
}

fn registry_contents(coordinator: &OnboardingCoordinator) -> BTreeMap<SubsystemKind, Vec<String>> {
    SubsystemKind::ALL
        .into_iter()
        .map(|kind| (kind, coordinator.subsystems().connector_ids(kind)))
        .collect()
}

fn print_text(report: &Report<'_>) {
    println!("Onboarded {} connector(s)", report.summary.onboarded.len());
    for onboarded in &report.summary.onboarded {
        let scope = match &onboarded.catalog {
            Some(catalog) => format!("catalog '{}'", catalog),
            None => "global".to_string(),
        };
        println!("  {} ({}): {:?}", onboarded.connector_id, scope, onboarded.published);
    }
    for failed in &report.summary.failed {
        println!("  FAILED {}: {}", failed.connector_id, failed.error);
    }

    println!();
    println!("Registries");
    for (kind, ids) in &report.registries {
        println!("  {:<16} {}", kind.as_str(), ids.join(", "));
    }
}
