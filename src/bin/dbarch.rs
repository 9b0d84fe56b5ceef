use barch::{uncompress, CompressedBitmap};
use clap::Parser;
use image::GrayImage;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Expands a barch file to a BMP image", long_about = None)]
#[command(version)]
struct Args {
    /// The input barch file.
    #[arg(short, long)]
    input: PathBuf,

    /// The output image file. The output format is determined by the
    /// extension. Defaults to `<input stem>-unpacked.bmp` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn unpacked_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}-unpacked.bmp", stem))
}

/// Prints the progress percentage in place as rows are processed.
fn print_progress() -> impl FnMut(usize, usize) {
    let mut last_percent = usize::MAX;
    move |current_step, total_steps| {
        let percent = 100 * current_step / total_steps;
        if percent != last_percent {
            print!("\r{}%", percent);
            io::stdout().flush().ok();
            last_percent = percent;
        }
    }
}

fn main() {
    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| unpacked_path(&args.input));

    let input_file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            println!("Cannot open input file: {}", e);
            process::exit(1)
        }
    };

    let compressed = match CompressedBitmap::load(BufReader::new(input_file)) {
        Ok(c) => c,
        Err(e) => {
            println!("Cannot load barch file: {}", e);
            process::exit(1)
        }
    };

    println!(
        "Expanding {}x{} compressed image...",
        compressed.width(),
        compressed.height()
    );
    let bitmap = match uncompress(&compressed, print_progress()) {
        Ok(b) => b,
        Err(e) => {
            println!("Cannot expand barch file: {}", e);
            process::exit(1)
        }
    };
    println!();

    let (width, height) = match (u32::try_from(bitmap.width()), u32::try_from(bitmap.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            println!("The image is too large to save.");
            process::exit(1)
        }
    };

    // The buffer has exactly width * height pixels, so from_raw cannot fail.
    let image = GrayImage::from_raw(width, height, bitmap.into_raw()).unwrap();
    if let Err(e) = image.save(&output) {
        println!("Cannot save image: {}", e);
        process::exit(1)
    }
    println!("Saved {}", output.display());
}
