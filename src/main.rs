use anyhow::Context;
use clap::{CommandFactory, Parser};
use drawpad::script::Script;
use drawpad::{Config, ElementSize, Page, Widget, WidgetConfig, export};
use std::path::PathBuf;

/// Element id the replayed widget is mounted on.
const CANVAS_ID: &str = "drawingCanvas";

#[derive(Parser, Debug)]
#[command(name = "drawpad")]
#[command(version, about = "Headless drawing canvas with undo/redo and PNG export")]
struct Cli {
    /// Replay a TOML event script against a fresh canvas
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Where to write the final canvas as PNG
    #[arg(long, short = 'o', value_name = "FILE", default_value = "drawing.png")]
    output: PathBuf,

    /// Canvas width in pixels (overrides the script and config)
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the script and config)
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Use this config file instead of ~/.config/drawpad/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for PNGs produced by Save events (defaults to the configured export directory)
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(&script_path)?;

    let size = ElementSize::new(
        cli.width
            .or(script.width)
            .unwrap_or(config.canvas.default_width),
        cli.height
            .or(script.height)
            .unwrap_or(config.canvas.default_height),
    );
    let mut page = Page::new();
    page.insert_canvas(CANVAS_ID, size);

    let mut widget = Widget::mount(&mut page, WidgetConfig::new(CANVAS_ID).with_settings(config))
        .context("Failed to create drawing canvas")?;

    log::info!(
        "Replaying {} event(s) from {}",
        script.events.len(),
        script_path.display()
    );
    let report = script.replay(&mut widget)?;
    if report.failed_restores > 0 {
        log::warn!("{} restore(s) failed during replay", report.failed_restores);
    }

    let export_dir = cli
        .export_dir
        .unwrap_or_else(|| widget.export_settings().save_directory.clone());
    for request in &report.exports {
        let path = export::save_png(request, &export_dir)
            .with_context(|| format!("Failed to save {}", request.filename))?;
        println!("Saved {}", path.display());
    }

    let png = widget
        .surface()
        .export_png()
        .context("Failed to encode canvas")?;
    std::fs::write(&cli.output, png)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!(
        "Wrote {}x{} canvas to {}",
        widget.surface().width(),
        widget.surface().height(),
        cli.output.display()
    );

    Ok(())
}
