// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::segmenter::SegmentationMode;
use crate::tmx::{Document, Resource};

mod errors;
mod file_utils;
mod language_utils;
mod segmenter;
mod tmx;

#[derive(Parser, Debug)]
#[command(name = "tmxdoc", version, about = "Build, inspect, diff and merge TMX 1.4 translation memories")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show unit and variant counts plus header properties
    Stats {
        /// TMX file to inspect
        file: PathBuf,
    },

    /// Parse a TMX file and report whether it is acceptable
    Validate {
        /// TMX file to check
        file: PathBuf,
    },

    /// Write everything new or changed in OTHER relative to BASE
    Diff {
        /// Baseline TMX file
        base: PathBuf,
        /// TMX file to compare against the baseline
        other: PathBuf,
        /// Where to write the diff TMX
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Merge two or more TMX files into one
    Merge {
        /// TMX files to merge, first-seen content wins
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,
        /// Where to write the merged TMX
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build a TMX file from a JSON list of localizable resources
    Ingest {
        /// JSON file holding an array of resources
        resources: PathBuf,
        /// Source locale of the memory
        #[arg(short, long)]
        source_locale: String,
        /// Segment strings into sentences instead of keeping them whole
        #[arg(long)]
        sentence: bool,
        /// Where to write the resulting TMX
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Stats { file } => stats(&file),
        Commands::Validate { file } => validate(&file),
        Commands::Diff { base, other, output } => diff(&base, &other, &output),
        Commands::Merge { inputs, output } => merge(&inputs, &output),
        Commands::Ingest { resources, source_locale, sentence, output } => {
            ingest(&resources, &source_locale, sentence, &output)
        }
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let mut document = Document::new("en").with_path(path);
    document
        .load()
        .with_context(|| format!("Failed to load TMX file: {:?}", path))?;
    Ok(document)
}

fn stats(file: &Path) -> Result<()> {
    let document = load_document(file)?;
    let variant_count: usize = document
        .get_translation_units()
        .iter()
        .map(|u| u.variants.len())
        .sum();

    println!("file:           {}", file.display());
    println!("source locale:  {}", document.source_locale());
    println!("admin locale:   {}", document.admin_locale());
    println!("segmentation:   {}", document.segmentation_type());
    println!("units:          {}", document.size());
    println!("variants:       {}", variant_count);
    for (key, value) in document.properties() {
        println!("property:       {} = {}", key, value);
    }
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    match load_document(file) {
        Ok(document) => {
            println!("{}: OK ({} units)", file.display(), document.size());
            Ok(())
        }
        Err(e) => Err(anyhow!("{}: {:#}", file.display(), e)),
    }
}

fn diff(base: &Path, other: &Path, output: &Path) -> Result<()> {
    let base_doc = load_document(base)?;
    let other_doc = load_document(other)?;

    let result = base_doc.diff(&other_doc);
    info!("diff produced {} unit(s)", result.size());

    FileManager::write_to_file(output, &result.serialize()?)?;
    println!("wrote {} unit(s) to {}", result.size(), output.display());
    Ok(())
}

fn merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let first = load_document(&inputs[0])?;
    let rest = inputs[1..]
        .iter()
        .map(|p| load_document(p))
        .collect::<Result<Vec<_>>>()?;
    let refs: Vec<&Document> = rest.iter().collect();

    let result = first.merge(&refs);
    info!("merge produced {} unit(s)", result.size());

    FileManager::write_to_file(output, &result.serialize()?)?;
    println!("wrote {} unit(s) to {}", result.size(), output.display());
    Ok(())
}

fn ingest(resources: &Path, source_locale: &str, sentence: bool, output: &Path) -> Result<()> {
    let text = FileManager::read_to_string(resources)?;
    let resources: Vec<Resource> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse resource file: {:?}", resources))?;

    let mode = if sentence {
        SegmentationMode::Sentence
    } else {
        SegmentationMode::Paragraph
    };
    let mut document = Document::new(source_locale).with_segmentation(mode);

    for resource in &resources {
        document.add_resource(resource);
    }
    info!("ingested {} resource(s) into {} unit(s)", resources.len(), document.size());

    FileManager::write_to_file(output, &document.serialize()?)?;
    println!("wrote {} unit(s) to {}", document.size(), output.display());
    Ok(())
}
