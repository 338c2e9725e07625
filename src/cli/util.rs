//! CLI utility helpers

use std::fs;
use std::path::{Path, PathBuf};
use tierrate::{cart, ConfigFormat, Error, RateConfig, Result};

/// Parse --output argument to determine output file path
pub fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    parse_value_arg(args, &["--output", "-o"]).map(PathBuf::from)
}

/// Parse --cart argument to determine the cart file
pub fn parse_cart_arg(args: &[String]) -> Option<PathBuf> {
    parse_value_arg(args, &["--cart", "-c"]).map(PathBuf::from)
}

fn parse_value_arg<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    for (i, arg) in args.iter().enumerate() {
        if names.contains(&arg.as_str()) {
            if let Some(value) = args.get(i + 1) {
                return Some(value);
            }
        }
    }
    None
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Load the config named by the first positional argument
pub fn load_config(args: &[String], usage: &str) -> Result<(PathBuf, RateConfig)> {
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(PathBuf::from)
        .ok_or_else(|| Error::Usage(usage.to_string()))?;
    let config = RateConfig::load(&path)?;
    Ok((path, config))
}

/// Load a cart file (YAML, or JSON by extension) and return its total quantity
pub fn load_cart_quantity(path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path).map_err(Error::Io)?;
    let lines = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => cart::lines_from_json(&content)?,
        ConfigFormat::Yaml => cart::lines_from_yaml(&content)?,
    };
    Ok(cart::cart_quantity(&lines))
}

/// Quantity from `--cart <file>` when given, else the second positional argument
pub fn quantity_arg(args: &[String], usage: &str) -> Result<u64> {
    if let Some(cart) = parse_cart_arg(args) {
        return load_cart_quantity(&cart);
    }
    let raw = args.get(1).ok_or_else(|| Error::Usage(usage.to_string()))?;
    raw.trim().parse::<u64>().map_err(|_| {
        Error::Usage(format!(
            "quantity must be a non-negative integer, got '{}'",
            raw
        ))
    })
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
