//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use serde::Serialize;
use zeroeq_core::{EqParam, ParamDescriptor, ParamScale};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter (name, short name or ID)
    #[arg(value_name = "PARAM")]
    param: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ParamReport {
    index: usize,
    id: u32,
    string_id: &'static str,
    name: &'static str,
    short_name: &'static str,
    group: &'static str,
    min: f32,
    max: f32,
    default: f32,
    default_text: String,
    logarithmic: bool,
}

impl ParamReport {
    fn new(param: EqParam) -> Self {
        let desc = param.descriptor();
        Self {
            index: param.index(),
            id: desc.id.0,
            string_id: desc.string_id,
            name: desc.name,
            short_name: desc.short_name,
            group: desc.group,
            min: desc.min,
            max: desc.max,
            default: desc.default,
            default_text: desc.format_value(desc.default),
            logarithmic: desc.scale == ParamScale::Logarithmic,
        }
    }
}

fn range_text(desc: &ParamDescriptor) -> String {
    format!("{} .. {}", desc.format_value(desc.min), desc.format_value(desc.max))
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params: Vec<EqParam> = match &args.param {
        Some(name) => vec![
            EqParam::from_name(name).ok_or_else(|| anyhow::anyhow!("Unknown parameter: {name}"))?,
        ],
        None => EqParam::ALL.to_vec(),
    };

    if args.json {
        let reports: Vec<ParamReport> = params.into_iter().map(ParamReport::new).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if let [param] = params.as_slice() {
        let desc = param.descriptor();
        println!("{}", desc.name);
        println!("{}", "=".repeat(desc.name.len()));
        println!();
        println!("  Short name:  {}", desc.short_name);
        println!("  ID:          {} ({})", desc.id.0, desc.string_id);
        println!("  Group:       {}", desc.group);
        println!("  Range:       {}", range_text(&desc));
        println!("  Default:     {}", desc.format_value(desc.default));
        println!("  Scale:       {:?}", desc.scale);
        return Ok(());
    }

    println!("ZeroEQ Parameters");
    println!("=================");
    println!();
    println!(
        "  {:>2}  {:18}  {:9}  {:24}  {}",
        "#", "Name", "Short", "Range", "Default"
    );
    println!(
        "  {:>2}  {:18}  {:9}  {:24}  {}",
        "--", "----", "-----", "-----", "-------"
    );
    for param in params {
        let desc = param.descriptor();
        println!(
            "  {:>2}  {:18}  {:9}  {:24}  {}",
            param.index(),
            desc.name,
            desc.short_name,
            range_text(&desc),
            desc.format_value(desc.default)
        );
    }
    println!();
    println!("Use 'zeroeq params <name>' for details, 'zeroeq curve --set NAME=VALUE' to try values.");

    Ok(())
}
