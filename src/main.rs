use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::info;

use markshot::capture::{
    CaptureDependencies, CaptureOutcome, PresetSelector, StaticPageRasterizer, capture_and_edit,
};
use markshot::util::Rect;
use markshot::{Config, EditingSession, ImageSource, Script};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MARKSHOT_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "markshot")]
#[command(
    version = VERSION,
    about = "Screenshot annotation engine: capture a region, mark it up, export a PNG"
)]
struct Cli {
    /// Read settings from FILE instead of ~/.config/markshot/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print where the config file is looked up, then exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config_path: bool,

    /// Write a documented default config file, then exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    /// PNG image to annotate
    #[arg(long, short = 'i', value_name = "PNG", requires = "output")]
    input: Option<PathBuf>,

    /// Capture only this region of the input before editing
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_region, requires = "input")]
    select: Option<Rect>,

    /// Annotation script to replay over the image
    #[arg(long, short = 's', value_name = "TOML", requires = "input")]
    script: Option<PathBuf>,

    /// Where to write the annotated PNG
    #[arg(long, short = 'o', value_name = "PNG", requires = "input")]
    output: Option<PathBuf>,

    /// Also print the result as a data URI on stdout
    #[arg(long, action = ArgAction::SetTrue, requires = "input")]
    data_uri: bool,
}

fn parse_region(value: &str) -> Result<Rect, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in region: {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] if width > 0.0 && height > 0.0 => Ok(Rect {
            x,
            y,
            width,
            height,
        }),
        &[_, _, _, _] => Err("region width and height must be positive".to_string()),
        _ => Err("expected X,Y,WIDTH,HEIGHT".to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", Config::get_config_path()?.display());
        return Ok(());
    }

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created default config at {}", path.display());
        return Ok(());
    }

    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        print_usage();
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut session = EditingSession::attached(&config);

    let bytes =
        fs::read(input).with_context(|| format!("Failed to read image {}", input.display()))?;

    match cli.select {
        Some(region) => {
            let page = image::load_from_memory(&bytes)
                .with_context(|| format!("Failed to decode {}", input.display()))?
                .to_rgba8();
            let dependencies = CaptureDependencies {
                selector: Arc::new(PresetSelector::new(region, config.capture.min_selection)),
                rasterizer: Arc::new(StaticPageRasterizer::new(
                    page,
                    config.capture.background_color.to_color(),
                )),
            };
            match capture_and_edit(&dependencies, &mut session).await? {
                CaptureOutcome::Opened { selection, .. } => info!(
                    "Captured {}x{} region",
                    selection.width as u32, selection.height as u32
                ),
                CaptureOutcome::Cancelled(reason) => bail!("Nothing captured: {}", reason),
            }
        }
        None => session.load_image(ImageSource::Encoded(bytes)).await?,
    }

    if let Some(path) = &cli.script {
        Script::load(path)?.apply(&mut session)?;
    }

    let exported = session.export_image().await?;
    fs::write(output, &exported.blob)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} ({} bytes)", output.display(), exported.blob.len());

    if cli.data_uri {
        println!("{}", exported.encoded_text);
    }

    session.close();
    Ok(())
}

fn print_usage() {
    println!("markshot: Screenshot annotation engine");
    println!();
    println!("Usage:");
    println!("  markshot --input shot.png --output out.png [--script steps.toml]");
    println!("  markshot --input page.png --select X,Y,W,H --output region.png");
    println!("  markshot --init-config         Write ~/.config/markshot/config.toml");
    println!("  markshot --print-config-path   Show where config is read from");
    println!("  markshot --help                Show all options");
}
