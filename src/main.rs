use anyhow::{bail, Context, Result};
use clap::Parser;
use img_crush::batch::{batch, print_batch_summary};
use img_crush::cli::{Args, Commands};
use img_crush::formats::ImageType;
use img_crush::logger::{self, Verbosity};
use img_crush::utils::print_crush_report;
use img_crush::{info, success, ImageCrusher};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    let args = Args::parse();
    logger::set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    if let Err(e) = run(args.command) {
        img_crush::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Crush {
            source,
            destination,
            image_type,
            dry_run,
        } => crush_single(source, destination, image_type, dry_run),
        Commands::Batch {
            directory,
            recursive,
        } => crush_directory(&directory, recursive),
        Commands::Check => {
            ImageCrusher::check_requirements()?;
            success!("pngcrush found");
            Ok(())
        }
    }
}

fn crush_single(
    source: PathBuf,
    destination: Option<PathBuf>,
    image_type: Option<ImageType>,
    dry_run: bool,
) -> Result<()> {
    let crusher = ImageCrusher::new(source, destination, image_type);

    if dry_run {
        match crusher.command() {
            Some(command) => println!("{}", command),
            None => info!("Nothing to run for type \"{}\"", crusher.image_type()),
        }
        return Ok(());
    }

    if crusher.image_type().is_crushable() {
        ImageCrusher::check_requirements()?;
    }

    info!("🗜️  Crushing {}", crusher.source().display());
    let report = crusher
        .crush()
        .with_context(|| format!("Failed to crush {}", crusher.source().display()))?;
    print_crush_report(&report);
    Ok(())
}

fn crush_directory(directory: &Path, recursive: bool) -> Result<()> {
    info!("🚀 Starting batch crush...");
    info!("📁 Directory: {}", directory.display());

    let started = Instant::now();
    let summary = batch(directory, recursive)?;
    print_batch_summary(&summary, started);

    if !summary.is_success() {
        bail!(
            "{} of {} files failed",
            summary.failed_count(),
            summary.attempted()
        );
    }
    Ok(())
}
