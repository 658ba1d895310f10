//! reqmodel CLI - requirements to domain model extraction tool

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use reqmodel::{render, Analyzer, DomainModel, JsonFormat, Label, LoadedText, ReportOptions};

#[derive(Parser)]
#[command(name = "reqmodel")]
#[command(version)]
#[command(about = "Extract UML domain models from requirements documents", long_about = None)]
struct Cli {
    /// Input requirements file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract domain models as JSON
    Analyze {
        /// Input requirements files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (one input) or directory (several inputs)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Document id (defaults to the file stem; one input only)
        #[arg(long, env = "REQMODEL_DOC_ID")]
        doc_id: Option<String>,

        /// Keep every distinct (source, target, verb) relation
        #[arg(long)]
        keep_all_relations: bool,

        /// Analyze several inputs one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Render a Markdown report
    #[command(alias = "md")]
    Report {
        /// Input requirements file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Append the labeled segment listing
        #[arg(short, long)]
        segments: bool,
    },

    /// List labeled segments
    Segments {
        /// Input requirements file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Hide INFO segments
        #[arg(long)]
        relevant_only: bool,
    },

    /// Show extraction quality summary
    Info {
        /// Input requirements file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            inputs,
            output,
            compact,
            doc_id,
            keep_all_relations,
            sequential,
        }) => cmd_analyze(
            &inputs,
            output.as_deref(),
            compact,
            doc_id,
            keep_all_relations,
            sequential,
        ),
        Some(Commands::Report {
            input,
            output,
            frontmatter,
            segments,
        }) => cmd_report(&input, output.as_deref(), frontmatter, segments),
        Some(Commands::Segments {
            input,
            relevant_only,
        }) => cmd_segments(&input, relevant_only),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&[input], None, false, None, false, false)
            } else {
                println!("{}", "Usage: reqmodel <FILE>".yellow());
                println!("       reqmodel --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_one(
    analyzer: &Analyzer,
    input: &Path,
) -> Result<LoadedText, Box<dyn std::error::Error>> {
    let loaded = analyzer.registry().load(input)?;
    log::debug!(
        "Loaded {} as {:?} ({} bytes)",
        input.display(),
        loaded.doc_id,
        loaded.text.len()
    );
    Ok(loaded)
}

fn analyze_one(
    analyzer: &Analyzer,
    input: &Path,
    doc_id: Option<&str>,
) -> Result<DomainModel, Box<dyn std::error::Error>> {
    let loaded = load_one(analyzer, input)?;
    let doc_id = doc_id.map(str::to_string).unwrap_or(loaded.doc_id);
    Ok(analyzer.analyze_text(doc_id, &loaded.text))
}

/// Path of the JSON file written for `input` inside `dir`.
fn json_output_path(input: &Path, dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.json", stem))
}

fn write_json_file(
    path: &Path,
    model: &DomainModel,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(File::create(path)?);
    render::write_json(model, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

fn cmd_analyze(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    doc_id: Option<String>,
    keep_all_relations: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut analyzer = Analyzer::new();
    if keep_all_relations {
        analyzer = analyzer.keep_all_relations();
    }
    if sequential {
        analyzer = analyzer.sequential();
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let [input] = inputs {
        let model = analyze_one(&analyzer, input, doc_id.as_deref())?;

        if let Some(path) = output {
            write_json_file(path, &model, format)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", render::to_json(&model, format)?);
        }
        return Ok(());
    }

    if doc_id.is_some() {
        return Err("--doc-id applies to a single input file".into());
    }

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Load files in order so a bad input fails before any analysis runs
    let mut documents = Vec::with_capacity(inputs.len());
    for input in inputs {
        pb.set_message(format!("Loading {}", input.display()));
        let loaded = load_one(&analyzer, input)?;
        documents.push((loaded.doc_id, loaded.text));
        pb.inc(1);
    }

    pb.set_message("Analyzing...");
    let models = analyzer.analyze_batch(&documents);
    pb.finish_with_message("Done!");

    let mut written = Vec::with_capacity(models.len());
    for (input, model) in inputs.iter().zip(&models) {
        let path = json_output_path(input, &output_dir);
        write_json_file(&path, model, format)?;
        written.push((path, model.quality.num_classes, model.quality.num_relations));
    }

    println!("\n{}", "Output files:".green().bold());
    for (i, (path, classes, relations)) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!(
            "  {} {} ({} classes, {} relations)",
            branch.dimmed(),
            path.display(),
            classes,
            relations
        );
    }

    Ok(())
}

fn cmd_report(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    segments: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = Analyzer::new().analyze_file(input)?;

    let options = ReportOptions::new()
        .with_frontmatter(frontmatter)
        .with_segments(segments);
    let markdown = render::to_markdown(&model, &options)?;

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn colored_label(label: Label) -> ColoredString {
    let text = format!("{:<4}", label.as_str());
    match label {
        Label::Req => text.green().bold(),
        Label::Def => text.cyan().bold(),
        Label::Con => text.yellow().bold(),
        Label::Info => text.dimmed(),
    }
}

fn cmd_segments(input: &Path, relevant_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = Analyzer::new().registry().load(input)?;
    let segments = reqmodel::segment(&loaded.text);

    for seg in segments
        .iter()
        .filter(|s| !relevant_only || s.is_relevant())
    {
        println!(
            "{:>5}  {}  {}",
            seg.id.to_string().dimmed(),
            colored_label(seg.label),
            seg.text
        );
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let model = Analyzer::new().analyze_file(input)?;
    let q = &model.quality;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Document".bold(), model.metadata.doc_id);
    println!("{}: {}", "Model version".bold(), model.metadata.version);

    println!();
    println!("{}", "Extraction Quality".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Segments".bold(), q.num_segments);
    println!("{}: {}", "Kept".bold(), q.kept_segments);
    println!("{}: {:.2}%", "Filter ratio".bold(), q.filter_ratio * 100.0);
    println!("{}: {}", "Classes".bold(), q.num_classes);
    println!("{}: {}", "Relations".bold(), q.num_relations);

    let attributes: usize = model.classes.iter().map(|c| c.attributes.len()).sum();
    println!("{}: {}", "Attributes".bold(), attributes);

    if !model.classes.is_empty() {
        let names: Vec<&str> = model.class_names().collect();
        println!("{}: {}", "Class names".bold(), names.join(", "));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "reqmodel".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Requirements to UML domain model extraction tool");
    println!();
    println!("License: MIT");
}
