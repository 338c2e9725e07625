//! Rule commands (quote, parse, sanitize, coverage)

use super::util::{has_flag, load_config, parse_output_arg, quantity_arg, write_output};
use tierrate::*;

pub fn cmd_quote(args: &[String]) -> Result<()> {
    const USAGE: &str = "tierrate quote <config> <quantity> | --cart <file> [--json]";

    let (_, config) = load_config(args, USAGE)?;
    let quantity = quantity_arg(args, USAGE)?;

    let quote = evaluate(quantity, &config);

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        let basis = match &quote.basis {
            Resolution::FreeThreshold { threshold } => format!("free at {} or more", threshold),
            Resolution::Tier { index, tier } => {
                format!("tier {} ({}-{})", index + 1, tier.min, tier.max)
            }
            Resolution::Fallback => "no matching tier".to_string(),
        };
        println!("{}: {} [qty {}, {}]", quote.label, quote.cost, quote.quantity, basis);
    }
    Ok(())
}

pub fn cmd_parse(args: &[String]) -> Result<()> {
    let (_, config) = load_config(args, "tierrate parse <config> [--json]")?;
    let rules = config.rule_set();

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&rules)?);
    } else {
        println!("{} tier(s)", rules.len());
        for (i, tier) in rules.iter().enumerate() {
            println!("  {}. {}-{} → {}", i + 1, tier.min, tier.max, tier.cost);
        }
        if config.free_threshold > 0 {
            println!("  free at {} or more", config.free_threshold);
        }
    }
    Ok(())
}

pub fn cmd_sanitize(args: &[String]) -> Result<()> {
    let (path, config) = load_config(args, "tierrate sanitize <config> [--output <file>]")?;
    let output = parse_output_arg(args);

    // Always written back in the input's format
    let content = config
        .sanitized()
        .to_string_as(ConfigFormat::from_path(&path))?;

    write_output(&output, content.trim_end())
}

pub fn cmd_coverage(args: &[String]) -> Result<()> {
    let (_, config) = load_config(args, "tierrate coverage <config> [--json]")?;
    let report = analyze_coverage(&config.rule_set(), config.free_threshold);

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
    }
    Ok(())
}
