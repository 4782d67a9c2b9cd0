use std::fs::{self, File};
use std::io::BufWriter;

use clap::Parser;
use labelz::config::{Cli, Command, ExportArgs, ExportFormat, InspectArgs};
use labelz::dataset::{labels, load_dataset, summarize};
use labelz::error::ExportError;
use labelz::export::{coco, plain, yolo};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ExportError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Export(args) => export(&args),
        Command::Inspect(args) => inspect(&args),
    }
}

fn export(args: &ExportArgs) -> Result<(), ExportError> {
    let dataset = load_dataset(&args.input)?;
    let output = args.output_path();
    let registry = args.registry()?;
    match args.format {
        ExportFormat::Json => fs::write(&output, plain::to_plain_json(&dataset)?)?,
        ExportFormat::Coco => fs::write(&output, coco::to_coco_json(&dataset, &registry)?)?,
        ExportFormat::Yolo => {
            let file = BufWriter::new(File::create(&output)?);
            yolo::write_yolo_zip(&dataset, &registry, file)?;
        }
    }
    tracing::info!(format = ?args.format, output = %output.display(), "export written");
    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<(), ExportError> {
    let dataset = load_dataset(&args.input)?;
    for summary in summarize(&dataset) {
        let counts: Vec<String> = summary.by_type.iter().map(|(tag, n)| format!("{tag}={n}")).collect();
        println!("{}\t{}\t{}", summary.image_name, summary.total(), counts.join(" "));
    }
    println!("labels: {}", labels(&dataset).join(", "));
    Ok(())
}
