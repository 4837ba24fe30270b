// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::io::Write;
use std::time::Instant;

use bronze::cli::{Cli, OutputFormat};
use bronze::color::resolve_color;
use bronze::config::{self, Config};
use bronze::detect::Detector;
use bronze::discovery;
use bronze::error::ExitCode;
use bronze::options::RunOptions;
use bronze::registry::Registry;
use bronze::report::json::{self, JsonFormatter};
use bronze::report::text::{TextFormatter, TextOptions};
use bronze::report::{RunReport, timestamp};
use bronze::runner::{CheckRunner, describe_plan};

/// Detect, run, report.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let total_start = Instant::now();

    let config = match discovery::resolve_config(cli.config.as_deref(), &cli.path)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let options = RunOptions::resolve(cli, &config);
    tracing::trace!("resolved options: {:?}", options);

    let detection = Detector::new(options.walker.clone()).detect(&options.root)?;
    if detection.is_empty() {
        tracing::debug!("no supported languages under {}", options.root.display());
    }
    if cli.detect {
        writeln!(std::io::stdout().lock(), "{}", json::detection_json(&detection)?)?;
        return Ok(ExitCode::Success);
    }
    let registry = Registry::builtin();
    let plans = registry.plan(&detection, &options.selection);
    tracing::debug!(
        "planned {} checks across {} languages",
        plans.iter().map(|p| p.checks.len()).sum::<usize>(),
        plans.len()
    );

    if cli.list {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if plans.is_empty() {
            writeln!(out, "No checks selected.")?;
        }
        for line in describe_plan(&plans, &options.root) {
            writeln!(out, "{}", line)?;
        }
        return Ok(ExitCode::Success);
    }

    let results = CheckRunner::new(options.clone()).run(&plans)?;
    let report = RunReport::build(results, options.strict, timestamp(), total_start.elapsed());

    match cli.output {
        OutputFormat::Text => {
            let text_options = TextOptions {
                show_advisory: options.show_advisory,
                ..TextOptions::default()
            };
            let mut formatter =
                TextFormatter::stdout(resolve_color(cli.color, cli.no_color), text_options);
            formatter.write(&report)?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            JsonFormatter::new(stdout.lock()).write(&report)?;
        }
    }

    if let Some(path) = &cli.report {
        json::write_report_file(&report, path)?;
    }

    Ok(report.exit_code(options.advisory_exit))
}
