//! isde-translate CLI - ISO 19139 metadata to DCAT and Schema.org

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use isde_translator::{Graph, OutputFormat, Translator, TranslatorConfig};

/// Translate ISO 19115/19139 dataset metadata into linked data
#[derive(ClapParser)]
#[command(name = "isde-translate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log extraction details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one or more ISO 19139 records
    Translate {
        /// Input XML files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Target vocabulary
        #[arg(short, long, value_enum, default_value = "dcat")]
        format: Format,

        /// Output syntax
        #[arg(short, long, value_enum, default_value = "ntriples")]
        syntax: Syntax,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subject IRI for the dataset (defaults to the record's dataset URI)
        #[arg(short, long)]
        base_uri: Option<String>,

        /// Close WKT polygon rings on (east, north) like older exports
        #[arg(long)]
        legacy_wkt: bool,

        /// Protocol marking a distribution as a direct download
        #[arg(long)]
        download_protocol: Option<String>,
    },

    /// Show what is extracted from a record
    Inspect {
        /// Input XML file
        input: PathBuf,

        /// Dump the record as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Benchmark extraction and serialization
    Bench {
        /// Input XML file
        input: PathBuf,

        /// Number of iterations
        #[arg(short, long, default_value = "100")]
        iterations: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Dcat,
    SchemaOrg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Dcat => OutputFormat::Dcat,
            Format::SchemaOrg => OutputFormat::SchemaOrg,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Syntax {
    Ntriples,
    JsonLd,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "isde_translator=debug" } else { "isde_translator=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn render(graph: &Graph, syntax: Syntax) -> String {
    match syntax {
        Syntax::Ntriples => graph.to_ntriples(),
        Syntax::JsonLd => {
            let mut doc = graph.to_json_ld();
            doc.push('\n');
            doc
        }
    }
}

fn translate_one(
    translator: &Translator,
    input: &Path,
    base_uri: &str,
    format: OutputFormat,
    syntax: Syntax,
) -> Result<String> {
    let record = translator
        .extract_file(input, base_uri)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let graph = translator.serialize(&record, format);
    info!(input = %input.display(), statements = graph.len(), "translated");
    Ok(render(&graph, syntax))
}

#[cfg(feature = "parallel")]
fn translate_all(
    translator: &Translator,
    inputs: &[PathBuf],
    base_uri: &str,
    format: OutputFormat,
    syntax: Syntax,
) -> Vec<Result<String>> {
    use rayon::prelude::*;
    inputs
        .par_iter()
        .map(|input| translate_one(translator, input, base_uri, format, syntax))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn translate_all(
    translator: &Translator,
    inputs: &[PathBuf],
    base_uri: &str,
    format: OutputFormat,
    syntax: Syntax,
) -> Vec<Result<String>> {
    inputs
        .iter()
        .map(|input| translate_one(translator, input, base_uri, format, syntax))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Translate {
            inputs,
            format,
            syntax,
            output,
            base_uri,
            legacy_wkt,
            download_protocol,
        } => {
            let mut config = TranslatorConfig::default().with_legacy_wkt(legacy_wkt);
            if let Some(protocol) = download_protocol {
                config = config.with_download_protocol(protocol);
            }
            let translator = Translator::with_config(config);
            let base_uri = base_uri.unwrap_or_default();

            let start = Instant::now();
            let results = translate_all(&translator, &inputs, &base_uri, format.into(), syntax);

            let mut rendered = String::new();
            let mut failures = 0;
            for (input, result) in inputs.iter().zip(results) {
                match result {
                    Ok(text) => {
                        rendered.push_str(&text);
                        eprintln!("{} {}", "✓".green().bold(), input.display());
                    }
                    Err(e) => {
                        failures += 1;
                        eprintln!("{} {}: {:#}", "✗".red().bold(), input.display(), e);
                    }
                }
            }

            match output {
                Some(path) => std::fs::write(&path, &rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{}", rendered),
            }

            eprintln!(
                "  {} of {} records in {:.2}ms",
                inputs.len() - failures,
                inputs.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            if failures > 0 {
                std::process::exit(1);
            }
        }

        Commands::Inspect { input, json } => {
            let translator = Translator::new();
            let record = translator
                .extract_file(&input, "")
                .with_context(|| format!("Failed to read {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }

            println!("{} {}", "✓".green().bold(), input.display());
            println!("  Title: {}", record.title);
            println!("  Identifier: {}", record.identifier);
            if !record.doi.is_empty() {
                println!("  DOI: {}", record.doi);
            }
            println!("  Topic categories: {}", record.topic_categories.join(", "));
            println!(
                "  Keywords: {} ({} themes, {} variables)",
                record.keywords.len(),
                record.themes.len(),
                record.variables_measured.len()
            );
            println!("  Distributions: {}", record.distributions.len());
            match record.bounding_box_to_wkt() {
                Ok(wkt) => println!("  Extent: {}", wkt),
                Err(_) => println!("  Extent: {}", "none".yellow()),
            }
            if let Some(extent) = &record.temporal_extent {
                println!(
                    "  Period: {} to {}",
                    extent.start.as_deref().unwrap_or(".."),
                    extent.end.as_deref().unwrap_or("..")
                );
            }
            match &record.license {
                Some(license) => println!("  License: {}", license.name),
                None => println!("  License: {}", "none".yellow()),
            }
            for limitation in &record.use_limitations {
                println!("  {} {}", "Use limitation:".cyan(), limitation);
            }
        }

        Commands::Bench { input, iterations } => {
            let iterations = iterations.max(1);
            let xml = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let translator = Translator::new();

            // Warmup
            for _ in 0..3 {
                let _ = translator.translate_str(&xml, "", OutputFormat::Dcat)?;
            }

            let mut times = Vec::with_capacity(iterations);
            let mut statements = 0;

            for _ in 0..iterations {
                let start = Instant::now();
                let graph = translator.translate_str(&xml, "", OutputFormat::Dcat)?;
                times.push(start.elapsed());
                statements = graph.len();
            }

            times.sort();
            let min = times[0];
            let max = times[times.len() - 1];
            let median = times[times.len() / 2];
            let mean = times.iter().sum::<std::time::Duration>() / times.len() as u32;

            println!("Benchmark Results for {}", input.display());
            println!("  Iterations: {}", iterations);
            println!("  Statements: {}", statements);
            println!("  Min:    {:.3}ms", min.as_secs_f64() * 1000.0);
            println!("  Median: {:.3}ms", median.as_secs_f64() * 1000.0);
            println!("  Mean:   {:.3}ms", mean.as_secs_f64() * 1000.0);
            println!("  Max:    {:.3}ms", max.as_secs_f64() * 1000.0);
            println!("  Throughput: {:.0} records/sec", 1.0 / mean.as_secs_f64());
        }
    }

    Ok(())
}
