//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use pdfoutline::{outline_file_with_config, JsonFormat, OutlineConfig};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract document titles and heading outlines from PDF papers", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (single-file input prints to stdout when omitted)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Known document title (repeatable, matched case-insensitively)
    #[arg(long = "known-title", value_name = "TITLE")]
    known_titles: Vec<String>,

    /// Horizontal tolerance in points for heading indent checks
    #[arg(long, value_name = "POINTS")]
    indent_tolerance: Option<f32>,

    /// Process files one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = if cli.input.is_dir() {
        cmd_batch(&cli)
    } else {
        cmd_single(&cli)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> OutlineConfig {
    let mut config = OutlineConfig::new();
    for title in &cli.known_titles {
        config = config.with_known_title(title);
    }
    if let Some(tolerance) = cli.indent_tolerance {
        config = config.with_indent_tolerance(tolerance);
    }
    config
}

fn json_format(cli: &Cli) -> JsonFormat {
    if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

/// Extract one PDF, printing to stdout or writing `<stem>.json`.
fn cmd_single(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let result = outline_file_with_config(&cli.input, build_config(cli))?;
    let json = result.to_json(json_format(cli))?;

    match &cli.output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = output_path(dir, &cli.input);
            fs::write(&path, &json)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Extract every PDF in a directory (non-recursive), one JSON file each.
///
/// Failures are reported and skipped; the batch always runs to completion.
fn cmd_batch(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pdfs = find_pdfs(&cli.input)?;
    if pdfs.is_empty() {
        println!(
            "{} no PDF files in {}",
            "Warning:".yellow(),
            cli.input.display()
        );
        return Ok(());
    }

    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.join("outlines"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let config = build_config(cli);
    let format = json_format(cli);

    let process = |pdf: &PathBuf| -> bool {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let ok = match extract_one(pdf, &output_dir, &config, format) {
            Ok(()) => true,
            Err(e) => {
                pb.suspend(|| {
                    eprintln!("{} {}: {}", "Failed".red(), name, e);
                });
                false
            }
        };
        pb.inc(1);
        ok
    };

    let succeeded: usize = if cli.sequential {
        pdfs.iter().filter(|&p| process(p)).count()
    } else {
        pdfs.par_iter().filter(|&p| process(p)).count()
    };

    pb.finish_and_clear();

    let failed = pdfs.len() - succeeded;
    println!(
        "{} {} of {} files ({} failed)",
        "Done!".green().bold(),
        succeeded,
        pdfs.len(),
        failed
    );
    println!("Output: {}", output_dir.display());

    if failed > 0 && succeeded == 0 {
        return Err("all files failed".into());
    }
    Ok(())
}

fn extract_one(
    pdf: &Path,
    output_dir: &Path,
    config: &OutlineConfig,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = outline_file_with_config(pdf, config.clone())?;
    let json = result.to_json(format)?;
    fs::write(output_path(output_dir, pdf), &json)?;
    Ok(())
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.json", stem))
}

/// PDF files directly under `dir`, sorted by name for stable batch order.
fn find_pdfs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"x").unwrap();
        fs::write(dir.path().join("a.PDF"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.pdf"), b"x").unwrap();

        let pdfs = find_pdfs(dir.path()).unwrap();
        let names: Vec<String> = pdfs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_output_path_uses_stem() {
        let path = output_path(Path::new("/out"), Path::new("/in/paper.pdf"));
        assert_eq!(path, PathBuf::from("/out/paper.json"));
    }
}
