//! Command-line options.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use markboard::error::BoardError;
use markboard::registry::ShapeRegistry;
use markboard::shape::ShapeKind;

#[derive(Parser, Debug)]
#[command(name = "labelz", about = "Inspect and export markboard annotation datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the dataset in another format.
    Export(ExportArgs),
    /// Print per-image shape counts and the label set.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset JSON file.
    #[arg(long, env = "LABELZ_INPUT")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output path; defaults to the format's conventional file name.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Extra type tag for a built-in shape, as `TAG=KIND` (e.g. `box=rect`).
    /// Repeatable. Use the aliases the board registered.
    #[arg(long = "alias", value_name = "TAG=KIND", value_parser = parse_alias)]
    pub aliases: Vec<(String, ShapeKind)>,
}

impl ExportArgs {
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name()))
    }

    /// Built-in tags plus every `--alias`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyShapeTag`] for a blank alias tag.
    pub fn registry(&self) -> Result<ShapeRegistry, BoardError> {
        let mut registry = ShapeRegistry::new();
        for (tag, kind) in &self.aliases {
            registry.register(tag, *kind)?;
        }
        Ok(registry)
    }
}

fn parse_alias(raw: &str) -> Result<(String, ShapeKind), String> {
    let (tag, kind) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=KIND, got `{raw}`"))?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err("alias tag is empty".to_owned());
    }
    let kind = ShapeKind::ALL
        .into_iter()
        .find(|k| k.tag() == kind.trim())
        .ok_or_else(|| format!("unknown shape kind `{kind}`"))?;
    Ok((tag.to_owned(), kind))
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset JSON file.
    #[arg(long, env = "LABELZ_INPUT")]
    pub input: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Dataset JSON without board-internal fields.
    Json,
    /// COCO detection JSON.
    Coco,
    /// YOLO labels, classes and descriptor in a zip.
    Yolo,
}

impl ExportFormat {
    #[must_use]
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "annotations.json",
            Self::Coco => "coco_annotations.json",
            Self::Yolo => "yolo_dataset.zip",
        }
    }
}
