//! tierrate CLI - Command-line interface
//!
//! Commands:
//!   quote     - Resolve the cost for a quantity
//!   parse     - Show the validated tier list
//!   sanitize  - Normalize a config for storage
//!   coverage  - Report overlaps, unreachable tiers and gaps
//!   schema    - Print JSON schemas

mod cli;

use std::process::ExitCode;
use tierrate::VERSION;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "quote" => cli::cmd_quote(&args[2..]),
        "parse" => cli::cmd_parse(&args[2..]),
        "sanitize" => cli::cmd_sanitize(&args[2..]),
        "coverage" => cli::cmd_coverage(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("tierrate {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"
tierrate - Quantity-tiered rate resolution

USAGE:
    tierrate <COMMAND> [OPTIONS]

COMMANDS:
    quote <config> <quantity>        Resolve the cost for a quantity
    quote <config> --cart <file>     Resolve the cost for a cart's total quantity
    parse <config>                   Show the validated tier list
    sanitize <config>                Normalize rules for storage (same format as input)
    coverage <config>                Report overlaps, unreachable tiers and gaps
    schema [config|quote|coverage|cart]
                                     Print JSON schema
    version                          Print version

OPTIONS:
    --json                            JSON output format (quote, parse, coverage)
    --output <file>                   Output file (default: stdout)

CONFIG:
    YAML by default, JSON when the file ends in .json:

        label: "Bulk shipping"
        free_threshold: 100
        rules:
          - {{ min: 1, max: 10, cost: 5 }}
          - {{ min: 11, max: 30, cost: 8 }}

    `rules` may also be a text block of `min,max,cost` lines.

ENVIRONMENT:
    RUST_LOG                          Log filter, e.g. RUST_LOG=tierrate=debug

EXAMPLES:
    tierrate quote rate.yaml 12
    tierrate quote rate.json --cart cart.yaml --json
    tierrate sanitize rate.yaml --output rate.clean.yaml
    tierrate coverage rate.yaml
"#
    );
}
