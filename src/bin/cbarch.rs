use barch::{compress, Bitmap, CompressedBitmap, Error};
use clap::Parser;
use image::{self, DynamicImage};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

// Use clap to define the argument list.

#[derive(Parser, Debug)]
#[command(about = "Compresses a grayscale image file to a barch file", long_about = None)]
#[command(version)]
struct Args {
    /// The input image file. Must be 8-bit grayscale.
    #[arg(short, long)]
    input: PathBuf,

    /// The output barch file. Defaults to `<input stem>-packed.barch`
    /// next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn packed_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}-packed.barch", stem))
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

fn save_to(compressed: &CompressedBitmap, path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    compressed.save(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| packed_path(&args.input));

    let dynamic_image = match image::open(&args.input) {
        Ok(d) => d,
        Err(e) => {
            println!("Cannot open image: {}", e);
            process::exit(1)
        }
    };

    let luma = match dynamic_image {
        DynamicImage::ImageLuma8(luma) => luma,
        _ => {
            println!("Unsupported image format: this image is not 8-bit grayscale.");
            process::exit(1)
        }
    };

    let (width, height) = luma.dimensions();
    let mut bitmap = match Bitmap::new(width as usize, height as usize) {
        Ok(b) => b,
        Err(e) => {
            println!("Cannot create bitmap: {}", e);
            process::exit(1)
        }
    };
    bitmap.as_raw_mut().copy_from_slice(luma.as_raw());

    println!("Compressing {}x{} grayscale image...", width, height);
    let compressed = compress(&bitmap, print_progress());
    println!();

    if let Err(e) = save_to(&compressed, &output) {
        println!("Cannot save barch file: {}", e);
        process::exit(1)
    }
    println!("Saved {}", output.display());
}
