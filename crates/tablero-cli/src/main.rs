// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::{ApiRuntime, MemoryRuntime};
use std::env;
use std::path::PathBuf;
use tablero_app::WorkbenchState;
use tablero_tui::UiOptions;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `tablero --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let base_url = match &options.base_url {
        Some(base_url) => base_url.trim_end_matches('/').to_owned(),
        None => config.base_url(),
    };
    if options.print_base_url {
        println!("{base_url}");
        return Ok(());
    }

    let ui_options = UiOptions {
        confirm_destructive: config.confirm_destructive(),
    };
    let mut state = WorkbenchState::default();

    if options.demo {
        if options.check_only {
            return Ok(());
        }
        let mut runtime = MemoryRuntime::seeded()?;
        return tablero_tui::run_app(&mut state, &mut runtime, ui_options);
    }

    let client = tablero_api::Client::new(&base_url, config.timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let mut runtime = ApiRuntime::new(client);
    tablero_tui::run_app(&mut state, &mut runtime, ui_options)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_url: Option<String>,
    print_config_path: bool,
    print_base_url: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_url: None,
        print_config_path: false,
        print_base_url: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a URL"))?;
                options.base_url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-base-url" => {
                options.print_base_url = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("tablero");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-url <url>         Override the store's API root for this run");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-base-url         Print resolved API root");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with seeded sample data (in-memory)");
    println!("  --check                  Validate config and client setup, then exit");
    println!("  --help                   Show this help");
}
