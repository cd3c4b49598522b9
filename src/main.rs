use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;

use mandalaviz::config::DisplayConfig;
use mandalaviz::dataset;
use mandalaviz::layout;
use mandalaviz::model::{Dataset, DatasetDoc};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out a verse dataset radially and print or view it", long_about = None)]
struct Cli {
    /// Verse dataset: a JSON array of records, or a .mviz binary document
    #[arg(value_name = "DATASET_FILE")]
    dataset_file: String,

    /// Optional config.json with media and layout settings
    #[arg(short, long)]
    config: Option<String>,

    /// Write the grouped dataset to this binary document and exit
    #[arg(long, value_name = "OUT_FILE")]
    save_binary: Option<String>,

    /// Open the interactive viewer (requires building with --features egui)
    #[arg(long)]
    view: bool,
}

fn load_dataset_file(path: &Utf8PathBuf) -> Result<Dataset> {
    if path.extension() == Some("mviz") {
        let doc = DatasetDoc::load_from_binary(path.as_std_path())
            .with_context(|| format!("Failed to load binary document {}", path))?;
        Ok(doc.dataset)
    } else {
        dataset::load_dataset(path)
    }
}

fn load_all(cli: &Cli) -> Result<(Dataset, DisplayConfig)> {
    let path = Utf8PathBuf::from(&cli.dataset_file);
    let dataset = load_dataset_file(&path)?;
    let display = match &cli.config {
        Some(cfg_path) => DisplayConfig::load(Utf8PathBuf::from(cfg_path))?,
        None => DisplayConfig::default(),
    };
    Ok((dataset, display))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.view {
        // The viewer surfaces load failures as its own error panel instead of
        // exiting; a reload (restart) is the only recovery.
        return run_viewer(load_all(&cli));
    }

    let (mut dataset, display) = load_all(&cli)?;

    if let Some(out) = &cli.save_binary {
        let doc = DatasetDoc { dataset };
        doc.save_to_binary(out)
            .with_context(|| format!("Failed to write binary document {}", out))?;
        return Ok(());
    }

    layout::layout_mandalas(&mut dataset.mandalas, &display.layout);
    let json = serde_json::to_string_pretty(&dataset)?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "egui")]
fn run_viewer(loaded: Result<(Dataset, DisplayConfig)>) -> Result<()> {
    use mandalaviz::egui_app::AtlasApp;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Mandala Atlas",
        options,
        Box::new(move |cc| {
            let app = match loaded {
                Ok((dataset, display)) => AtlasApp::new(cc, dataset, display),
                Err(e) => AtlasApp::failed(format!("{e:#}")),
            };
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Viewer failed: {e}"))
}

#[cfg(not(feature = "egui"))]
fn run_viewer(_loaded: Result<(Dataset, DisplayConfig)>) -> Result<()> {
    anyhow::bail!("The viewer requires building with --features egui")
}
