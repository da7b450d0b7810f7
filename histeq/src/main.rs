use clap::Parser;
use histeq::filter::{EqualizeOptions, Equalizer, FilterError};
use histeq::io::{load_grayscale_image, save_grayscale_image};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "histeq")]
#[command(version, about = "Histogram equalization for grayscale images", long_about = None)]
struct Cli {
    /// Input image (PNG, PGM, or JPEG)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image; .pgm/.pnm writes PGM, anything else PNG
    #[arg(short, long, value_name = "FILE", default_value = "output.png")]
    output: PathBuf,

    /// Number of parallel workers [default: $HISTEQ_WORKERS or CPU count]
    #[arg(short = 'j', long, value_name = "N")]
    workers: Option<usize>,

    /// Log per-phase details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = match cli.workers {
        Some(n) => EqualizeOptions::with_workers(n).map_err(|e| e.to_string())?,
        None => EqualizeOptions::from_env(),
    };

    let src = load_grayscale_image(&cli.input)
        .map_err(|e| format!("could not load image {}: {}", cli.input.display(), e))?;
    log::info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        src.width(),
        src.height()
    );

    let (dest, report) = Equalizer::new(options)
        .equalize_with_report(&src)
        .map_err(|e: FilterError| format!("equalization failed ({:?}): {}", e.kind(), e))?;

    let t = report.timings;
    log::info!(
        "equalized with {} workers: histogram {:?}, mapping {:?}, apply {:?}, total {:?}",
        report.workers,
        t.histogram,
        t.mapping,
        t.apply,
        t.total()
    );

    save_grayscale_image(&cli.output, &dest)
        .map_err(|e| format!("could not save output image {}: {}", cli.output.display(), e))?;
    log::info!("wrote {}", cli.output.display());
    Ok(())
}
