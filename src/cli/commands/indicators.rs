//! List indicators command.

use anyhow::Result;
use quant_analysis::Analyzer;

use crate::cli::{IndicatorsArgs, OutputFormat};

pub async fn run(args: IndicatorsArgs) -> Result<()> {
    let specs = Analyzer::global().list_indicators();

    if args.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for spec in specs {
        println!("  {} ({}, {})", spec.id, spec.display_name, spec.plot_type);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", spec.description);
        for param in &spec.params {
            println!(
                "    {:<10} default {:<4} range [{}, {}]  {}",
                param.name, param.default, param.min, param.max, param.description
            );
        }
        println!("    outputs: {}", spec.outputs.join(", "));
        println!();
    }

    println!("Use --indicators \"ID:param=value;ID\" with the analyze command.");

    Ok(())
}
