use anyhow::{Context, bail};
use caret::harness::{MonospaceMeasurer, SimField};
use caret::{CaretTracker, FieldEvent, LocatorConfig, SourceField};
use clap::Parser;
use input_core::char_count;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Measure where a simulated field paints its caret.
#[derive(Debug, Clone, Parser)]
struct Cli {
    /// Field text; `\n` escapes become line breaks
    #[arg(long, default_value = "hello world")]
    text: String,

    /// Caret offset in characters (defaults to the end of the text)
    #[arg(long)]
    caret: Option<usize>,

    /// Content width in px
    #[arg(long, default_value = "200")]
    width: f32,

    /// Content height in px
    #[arg(long, default_value = "120")]
    height: f32,

    /// Simulate a textarea instead of a single-line input
    #[arg(long)]
    multiline: bool,

    /// Font size in px
    #[arg(long, default_value = "10")]
    font_size: f32,

    /// Padding on every side in px
    #[arg(long, default_value = "0")]
    padding: f32,

    /// Advance of every character in px
    #[arg(long, default_value = "10")]
    advance: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    if cli.width <= 0.0 || cli.height <= 0.0 {
        bail!("field size must be positive, got {}x{}", cli.width, cli.height);
    }
    if cli.font_size <= 0.0 || cli.advance <= 0.0 {
        bail!("font size and advance must be positive");
    }

    let text = cli.text.replace("\\n", "\n");
    let caret = cli.caret.unwrap_or_else(|| char_count(&text));
    if caret > char_count(&text) {
        bail!("caret {caret} is past the end of a {}-character text", char_count(&text));
    }

    let field = if cli.multiline {
        SimField::textarea(1u32, &text)
    } else {
        SimField::input(1u32, &text)
    };
    let mut field = field
        .with_content_size(cli.width, cli.height)
        .with_advance(cli.advance)
        .with_style(&format!(
            "font-size: {}px; padding-top: {p}px; padding-right: {p}px; \
             padding-bottom: {p}px; padding-left: {p}px",
            cli.font_size,
            p = cli.padding
        ))
        .caret_at(caret);

    let measurer = MonospaceMeasurer {
        advance: cli.advance,
    };
    let mut tracker = CaretTracker::new(Box::new(measurer));
    tracker.attach(&field, LocatorConfig::default());
    let pos = tracker
        .notify(&mut field, FieldEvent::KeyUp)
        .context("field was not tracked")?;

    log::info!("{} caret {caret}", field.field_id());
    println!("position: left={} top={}", pos.position.left, pos.position.top);
    println!("offset:   left={} top={}", pos.offset.left, pos.offset.top);
    Ok(())
}
