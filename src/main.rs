use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use dotenv::dotenv;
use introns_db_fill::{Config, ORGANISMS, generator, increment_for, logging};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run_command(&matches) {
        eprintln!("{}", error_line(&e));
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("introns-db-fill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate per-organism intron database scripts from one SQL template")
        .long_about(
            "Expands the database-creation template once per organism, replacing `%` with the \
             organism name and `?` with its ID increment, and writes create/drop/bootstrap \
             scripts for all organisms. Runs `generate` when no subcommand is given.",
        )
        .subcommand(
            Command::new("generate")
                .about("Expand the template for every organism (default)")
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .help("Template file, overrides paths.template")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .help("Output directory, overrides paths.output_dir")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List organisms with their ID increments")
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["plain", "json"])
                        .default_value("plain"),
                ),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory containing config.toml")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let config = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => Config::load_from_dir(dir)
            .with_context(|| format!("Failed to load configuration from {}", dir.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn run_command(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = load_config(matches)?;
    logging::init(&config.logging, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("generate", sub_matches)) => {
            apply_overrides(&mut config, sub_matches);
            handle_generate(&config)
        }
        Some(("list", sub_matches)) => {
            let format = sub_matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("plain");
            print!("{}", render_list(format)?);
            Ok(())
        }
        None => handle_generate(&config),
        Some((other, _)) => Err(anyhow::anyhow!("Unknown command: {}", other)),
    }
}

/// Failure line printed to stderr, with the full cause chain
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}

/// `generate` flags take precedence over configured paths
fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(template) = matches.get_one::<PathBuf>("template") {
        config.paths.template = template.clone();
    }
    if let Some(output_dir) = matches.get_one::<PathBuf>("output-dir") {
        config.paths.output_dir = output_dir.clone();
    }
}

fn handle_generate(config: &Config) -> anyhow::Result<()> {
    println!("🧬 Template: {}", config.paths.template.display());
    println!("📂 Output: {}", config.paths.output_dir.display());

    let report = generator::run(config).with_context(|| {
        format!(
            "Failed to generate scripts from {}",
            config.paths.template.display()
        )
    })?;

    for path in &report.scripts {
        println!("   ✓ {}", path.display());
    }
    println!("\n✅ Wrote {} organism scripts", report.scripts.len());
    for path in &report.aggregates {
        println!("📝 {}", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct OrganismEntry {
    position: usize,
    organism: &'static str,
    increment: u64,
}

fn organism_entries() -> Vec<OrganismEntry> {
    ORGANISMS
        .iter()
        .enumerate()
        .map(|(idx, &organism)| OrganismEntry {
            position: idx + 1,
            organism,
            increment: increment_for(idx + 1),
        })
        .collect()
}

fn render_list(format: &str) -> anyhow::Result<String> {
    let entries = organism_entries();

    let rendered = match format {
        "json" => format!("{}\n", serde_json::to_string_pretty(&entries)?),
        _ => entries
            .iter()
            .map(|entry| {
                format!(
                    "{:>2}  {:<28} {:>11}\n",
                    entry.position, entry.organism, entry.increment
                )
            })
            .collect(),
    };

    Ok(rendered)
}
