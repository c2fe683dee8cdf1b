use crate::formats::ImageType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-crush",
    about = "Shrink PNG and JPEG files losslessly with pngcrush and jpegtran",
    long_about = "img-crush runs pngcrush (PNG) and jpegtran (JPEG) over your images. \
                  Without a destination the crushed file replaces the original. \
                  GIF and other formats are passed through untouched.",
    version,
    after_help = "EXAMPLES:\n  \
    img-crush crush logo.png\n  \
    img-crush crush photo.jpg photo-small.jpg\n  \
    img-crush batch ./assets -r\n  \
    img-crush check"
)]
pub struct Args {
    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Only print errors"
    )]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Print the commands being run"
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Crush a single image",
        long_about = "Crush a single image. With only SOURCE the image is crushed in place \
                      through a SOURCE_tmp sibling; with DESTINATION the source is left untouched."
    )]
    Crush {
        #[arg(help = "Image to crush")]
        source: PathBuf,

        #[arg(help = "Where to write the crushed image (default: replace SOURCE)")]
        destination: Option<PathBuf>,

        #[arg(
            short = 't',
            long = "type",
            value_name = "TYPE",
            help = "Image type override (png, jpg, gif)",
            long_help = "Force the image type instead of reading it from the destination's \
                         or the source's extension. Types other than png and jpg are skipped."
        )]
        image_type: Option<ImageType>,

        #[arg(
            long,
            help = "Print the command that would run and exit",
            long_help = "Resolve the image type and print the shell command without running it \
                         or touching any file."
        )]
        dry_run: bool,
    },

    #[command(
        about = "Crush every PNG/JPEG in a directory in place",
        long_about = "Crush every *.png and *.jpg file (any case) in DIRECTORY in place, \
                      one at a time. Failures are reported and do not stop the run."
    )]
    Batch {
        #[arg(help = "Directory to scan")]
        directory: PathBuf,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively"
        )]
        recursive: bool,
    },

    #[command(about = "Check that pngcrush is installed")]
    Check,
}
