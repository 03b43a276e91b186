use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use dvc::cli::args::CliArgs;
use dvc::cli::driver;
use dvc::cli::reporter::{Reporter, json_report};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // Opt-in through DVC_LOG / RUST_LOG, see src/tracing_config.rs.
    dvc::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let (types, result) = driver::compile(&args, &cwd)?;

    if args.json {
        let report = serde_json::to_string_pretty(&json_report(&result))
            .context("failed to serialize diagnostics")?;
        println!("{report}");
    } else {
        let color = !args.no_color && std::io::stdout().is_terminal();
        let reporter = Reporter::new(color);
        let output = reporter.render(&result);
        if !output.is_empty() {
            println!("{output}");
        }
        if args.verbose {
            print!("{}", reporter.summary(&types, &result));
        }
    }

    let code = if result.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    };
    std::process::exit(code);
}
