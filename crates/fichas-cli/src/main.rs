// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fichas — command line front end.
//
// Reads a decoded sheet (RowSet JSON), cleans it, and writes one PDF record
// page per row next to the input or under `--out-dir`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use fichas_core::{LayoutConfig, RowSet};
use fichas_document::{ImageSource, PdfReader, export_pdf, load_images, output_file_name};
use fichas_sheet::sanitize_row_set;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fichas")]
#[command(about = "Export registration sheet rows as one-page-per-row PDF records")]
#[command(version)]
struct Args {
    /// Decoded sheet as RowSet JSON (`headers` plus `rows`).
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Logo drawn in the header band. Also used as the watermark unless
    /// `--watermark` or `--no-watermark` is given.
    #[arg(long, env = "FICHAS_LOGO", value_name = "IMAGE")]
    logo: Option<PathBuf>,

    /// Background watermark image.
    #[arg(long, value_name = "IMAGE", conflicts_with = "no_watermark")]
    watermark: Option<PathBuf>,

    /// Do not draw a watermark.
    #[arg(long = "no-watermark")]
    no_watermark: bool,

    /// Layout configuration JSON; missing fields take their defaults.
    #[arg(short, long, env = "FICHAS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the PDF. Defaults to the input's directory.
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the effective layout configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn watermark_source(&self) -> ImageSource {
        if self.no_watermark {
            return ImageSource::None;
        }
        match (&self.watermark, &self.logo) {
            (Some(path), _) | (None, Some(path)) => ImageSource::Path(path.clone()),
            (None, None) => ImageSource::None,
        }
    }

    fn logo_source(&self) -> ImageSource {
        self.logo
            .clone()
            .map(ImageSource::Path)
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("loading layout configuration {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        bail!("no input sheet given");
    };

    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let row_set: RowSet = serde_json::from_str(&raw)
        .with_context(|| format!("parsing RowSet JSON in {}", input.display()))?;
    info!(
        sheet = row_set.sheet.as_deref().unwrap_or("-"),
        headers = row_set.headers.len(),
        rows = row_set.rows.len(),
        "Sheet loaded"
    );

    let snapshot = sanitize_row_set(&row_set);
    let images = load_images(args.logo_source(), args.watermark_source()).await;
    if args.logo.is_some() && images.logo.is_none() {
        warn!("Logo could not be loaded; pages are rendered without it");
    }

    let bytes = export_pdf(&snapshot, &images, &config).context("building the PDF")?;

    let out_path = output_path(input, args.out_dir.as_deref());
    std::fs::write(&out_path, &bytes)
        .with_context(|| format!("writing {}", out_path.display()))?;

    let reader = PdfReader::open(&out_path)?;
    info!(
        pages = reader.page_count(),
        path = reader.source_path().unwrap_or_default(),
        "PDF written"
    );
    println!("{}", out_path.display());
    Ok(())
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_file_name(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn logo_doubles_as_watermark() {
        let args = parse(&["fichas", "dados.json", "--logo", "logo.png"]);
        assert_eq!(args.watermark_source(), ImageSource::Path("logo.png".into()));
    }

    #[test]
    fn explicit_watermark_wins() {
        let args = parse(&["fichas", "dados.json", "--logo", "logo.png", "--watermark", "fundo.png"]);
        assert_eq!(args.watermark_source(), ImageSource::Path("fundo.png".into()));
        assert_eq!(args.logo_source(), ImageSource::Path("logo.png".into()));
    }

    #[test]
    fn no_watermark_disables_it() {
        let args = parse(&["fichas", "dados.json", "--logo", "logo.png", "--no-watermark"]);
        assert_eq!(args.watermark_source(), ImageSource::None);
    }

    #[test]
    fn output_lands_next_to_input_by_default() {
        assert_eq!(
            output_path(Path::new("planilhas/inscricoes.json"), None),
            PathBuf::from("planilhas/inscricoes.pdf")
        );
        assert_eq!(
            output_path(Path::new("planilhas/inscricoes.json"), Some(Path::new("saida"))),
            PathBuf::from("saida/inscricoes.pdf")
        );
    }
}
