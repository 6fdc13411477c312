use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed layout as JSON.
    Layout(LayoutArgs),
    /// Composite a quote card and write it as PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct QuoteArgs {
    /// Quote text.
    #[arg(long)]
    text: String,

    /// Person the quote is attributed to.
    #[arg(long)]
    attribution: Option<String>,

    /// Output size as `WIDTHxHEIGHT`; bad components fall back to 1080.
    #[arg(long, default_value = "1080x1080")]
    resolution: String,

    /// Brand constants JSON (partial files override the defaults).
    #[arg(long)]
    brand: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Extra font directory (repeatable).
    #[arg(long = "fonts")]
    font_dirs: Vec<PathBuf>,

    /// Brand font file, required for `--measure shaped`.
    #[arg(long)]
    brand_font: Option<PathBuf>,

    /// Do not load fonts installed on this machine.
    #[arg(long)]
    no_system_fonts: bool,

    /// How quote lines are broken.
    #[arg(long, value_enum, default_value_t = MeasureChoice::Chars)]
    measure: MeasureChoice,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    quote: QuoteArgs,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    quote: QuoteArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Directory holding `person-NN.png` figures.
    #[arg(long)]
    figures: Option<PathBuf>,

    /// Seed for the figure choice. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MeasureChoice {
    Chars,
    Shaped,
}

impl From<MeasureChoice> for quotecard::WrapMode {
    fn from(choice: MeasureChoice) -> Self {
        match choice {
            MeasureChoice::Chars => quotecard::WrapMode::CharCount,
            MeasureChoice::Shaped => quotecard::WrapMode::Shaped,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quotecard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_brand(path: Option<&PathBuf>) -> anyhow::Result<quotecard::BrandConstants> {
    match path {
        Some(p) => Ok(quotecard::BrandConstants::from_json_path(p)?),
        None => Ok(quotecard::BrandConstants::default()),
    }
}

fn make_pipeline(
    quote: &QuoteArgs,
    fonts: &FontArgs,
) -> anyhow::Result<(quotecard::QuotePipeline, quotecard::QuoteRequest)> {
    let brand = load_brand(quote.brand.as_ref())?;
    let font_config = quotecard::FontConfig {
        font_dirs: fonts.font_dirs.clone(),
        brand_font: fonts.brand_font.clone(),
        load_system_fonts: !fonts.no_system_fonts,
        sans_serif_family: None,
    };
    let render_ctx = quotecard::RenderContext::new(&font_config)?;

    let pipeline = quotecard::QuotePipeline::new(Arc::new(render_ctx), Arc::new(brand))
        .with_wrap_mode(fonts.measure.into())?;

    let mut request =
        quotecard::QuoteRequest::new(quote.text.as_str())?.with_resolution(&quote.resolution);
    if let Some(a) = &quote.attribution {
        request = request.with_attribution(a.as_str());
    }
    Ok((pipeline, request))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let (pipeline, request) = make_pipeline(&args.quote, &args.fonts)?;
    let layout = pipeline.layout(&request)?;
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut pipeline, request) = make_pipeline(&args.quote, &args.fonts)?;
    if let Some(dir) = &args.figures {
        let count = pipeline.compositor().brand().figure_count;
        pipeline = pipeline.with_figures(quotecard::FigurePool::new(dir, count));
    }

    let provider = quotecard::FileBackgroundProvider::new(&args.background);
    let result = match args.seed {
        Some(seed) => pipeline.render_with_provider(
            &provider,
            &request.text,
            &request,
            &mut quotecard::RngPicker::seeded(seed),
        ),
        None => pipeline.render_with_provider(
            &provider,
            &request.text,
            &request,
            &mut quotecard::RngPicker::from_os(),
        ),
    }
    .with_context(|| format!("render quote card from '{}'", args.background.display()))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = result.to_png()?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        result.canvas.width,
        result.canvas.height
    );
    Ok(())
}
