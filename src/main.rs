//! exprchain - inspect how a SELECT column expression is compiled

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use exprchain::access::Value;
use exprchain::expression::{classify, extract_aggregate, unwrap_full_chain, Expression};
use exprchain::planner::ColumnPlan;
use log::info;
use std::path::PathBuf;

/// Compile a column expression and push raw backend values through it
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression tree as JSON
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// File containing the expression tree as JSON
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Raw leaf value to materialize (repeatable)
    #[arg(short, long = "value")]
    values: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let json = match (&args.expr, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Either --expr or --file is required"),
    };
    let expr: Expression =
        serde_json::from_str(&json).context("Failed to parse expression JSON")?;
    info!("Loaded expression {}", expr);

    println!("Expression: {}", expr);
    println!("Kind:       {:?}", classify(&expr));
    match extract_aggregate(&expr) {
        Some(aggregate) => println!("Aggregate:  {}", aggregate),
        None => println!("Aggregate:  none"),
    }

    let chain = unwrap_full_chain(&expr);
    if chain.is_empty() {
        println!("Chain:      none");
    } else {
        println!("Chain:");
        for (depth, link) in chain.iter().enumerate() {
            println!("  {:>2}: {}", depth, link);
        }
    }

    let plan = ColumnPlan::compile(&expr).context("Failed to compile expression")?;
    println!(
        "Processor:  {}",
        if plan.processor().is_some() {
            "composed"
        } else {
            "passthrough"
        }
    );

    for raw in &args.values {
        let value = Value::parse_raw(raw);
        let output = plan
            .materialize(value.clone())
            .with_context(|| format!("Failed to process value {}", value))?;
        println!("{} -> {}", value, output);
    }

    Ok(())
}
