//! Schema CLI command

use tierrate::*;

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match schema_name {
        "list" => {
            println!("Available schemas: config, quote, coverage, cart");
            Ok(())
        }
        "config" => print_schema::<RateConfig>(),
        "quote" => print_schema::<Quote>(),
        "coverage" => print_schema::<CoverageReport>(),
        "cart" => print_schema::<Vec<CartLine>>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
