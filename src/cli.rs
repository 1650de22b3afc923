// ============================================================================
// Tilemark CLI — watermark one image from the command line
// ============================================================================
//
// Usage:
//   tilemark photo.jpg photo_marked.png
//
// Output is always PNG, whatever the output path's extension says.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::WatermarkConfig;
use crate::pipeline::watermark_file;

/// Stamp a tiled, rotated, translucent text watermark onto an image.
#[derive(Parser, Debug)]
#[command(
    name = "tilemark",
    version,
    about = "Apply a tiled, rotated, semi-transparent text watermark to an image",
    long_about = "Reads any raster image the decoder understands (PNG, JPEG, WEBP, BMP, …),\n\
                  stamps a 30° tiled text watermark at low opacity and writes the\n\
                  result as a PNG.\n\n\
                  Example:\n  \
                  tilemark photo.jpg photo_marked.png"
)]
pub struct CliArgs {
    /// Image to watermark.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file; written as PNG and overwritten if present.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Anything after OUTPUT is accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<OsString>,
}

/// Parse `args` (program name first) and run. Returns the process exit code:
/// `0` on success (or `--help`/`--version`), `1` on usage or processing errors.
pub fn run_from<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match CliArgs::try_parse_from(args) {
        Ok(args) => run(args),
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Watermark `args.input` into `args.output` with the built-in settings.
pub fn run(args: CliArgs) -> ExitCode {
    let config = WatermarkConfig::default();
    match watermark_file(&args.input, &args.output, &config) {
        Ok(()) => {
            println!("Watermarked: {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
