use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brand_render::fonts::load_font_assets;
use brand_render::{DocumentKind, FsFontLoader, RenderRequest, TenantBranding};
use clap::{Parser, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "brand-render",
    about = "Render branded invoices, reports and project snapshots to PDF",
    version
)]
struct Cli {
    /// Document kind
    #[arg(value_enum)]
    kind: Kind,

    /// Record JSON file
    #[arg(short, long)]
    record: PathBuf,

    /// Tenant branding JSON file
    #[arg(short, long)]
    branding: Option<PathBuf>,

    /// Document language
    #[arg(short, long, value_enum, default_value = "en")]
    language: Lang,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Directory holding the Noto Naskh Arabic fonts
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Footer timestamp (defaults to now)
    #[arg(long)]
    generated_at: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Invoice,
    Report,
    Project,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Invoice => DocumentKind::Invoice,
            Kind::Report => DocumentKind::Report,
            Kind::Project => DocumentKind::Project,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Lang {
    En,
    Ar,
}

impl Lang {
    fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli)? {
        Some(path) => println!("Wrote {}", path.display()),
        None => log::warn!("Record file holds no record, nothing rendered"),
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn build_request(cli: &Cli) -> Result<RenderRequest> {
    let branding = match &cli.branding {
        Some(path) => serde_json::from_value::<TenantBranding>(read_json(path)?)
            .with_context(|| format!("Invalid branding in {}", path.display()))?,
        None => TenantBranding::default(),
    };

    Ok(RenderRequest {
        record: Some(read_json(&cli.record)?),
        language: cli.language.code().to_string(),
        branding,
        generated_at: cli.generated_at.clone(),
    })
}

fn run(cli: &Cli) -> Result<Option<PathBuf>> {
    let request = build_request(cli)?;
    let kind = DocumentKind::from(cli.kind);

    let artifact = match &cli.font_dir {
        Some(dir) if cli.language == Lang::Ar => {
            let fonts = load_font_assets(&FsFontLoader::new(dir));
            brand_render::render_with_fonts(kind, &request, &fonts)?
        }
        _ => brand_render::render(kind, &request)?,
    };
    let Some(artifact) = artifact else {
        return Ok(None);
    };

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;
    let path = cli.out_dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Rendered {kind} with {} page(s) to {}",
        artifact.page_count,
        path.display()
    );
    Ok(Some(path))
}
