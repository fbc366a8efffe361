use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wallet_imaging::{Bitmap, Color, ECLevel, ImageCodec, NativeCodec, QrOptions, Quality, Size};

#[derive(Parser)]
#[command(name = "imgtool", version, about = "wallet_imaging CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a payload as a QR code image
    Qr {
        /// Payload text (or hex bytes with --hex)
        #[arg(long)]
        data: String,
        /// Interpret --data as hex-encoded bytes
        #[arg(long)]
        hex: bool,
        /// Dark module color as #rrggbb or #rrggbbaa
        #[arg(long, default_value = "#000000")]
        color: Color,
        /// Pixels per module
        #[arg(long, default_value_t = 1)]
        scale: u32,
        /// Light border in modules
        #[arg(long)]
        quiet_zone: Option<u32>,
        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        level: Option<ECLevel>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Stretch an image to an exact size
    Resize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        /// Interpolation quality (default, none, low, medium, high)
        #[arg(long, default_value = "default")]
        quality: Quality,
        #[arg(long)]
        out: PathBuf,
    },
    /// Gaussian blur an image
    Blur {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        radius: f32,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Qr {
            data,
            hex,
            color,
            scale,
            quiet_zone,
            level,
            out,
        } => {
            let payload = if hex {
                decode_hex(&data)?
            } else {
                data.into_bytes()
            };
            let defaults = QrOptions::default();
            let options = QrOptions {
                ec_level: level.unwrap_or(defaults.ec_level),
                module_px: scale,
                quiet_zone: quiet_zone.unwrap_or(defaults.quiet_zone),
                ..defaults
            };
            let bitmap = NativeCodec::with_options(options).encode_qr(&payload, color)?;
            write_bitmap(&bitmap, &out)
        }
        Command::Resize {
            input,
            width,
            height,
            quality,
            out,
        } => {
            let bitmap = read_bitmap(&input)?;
            let resized = bitmap.resize(Size::new(width, height), quality)?;
            write_bitmap(&resized, &out)
        }
        Command::Blur { input, radius, out } => {
            let bitmap = read_bitmap(&input)?;
            let blurred = bitmap.blur(radius)?;
            write_bitmap(&blurred, &out)
        }
    }
}

fn read_bitmap(path: &Path) -> Result<Bitmap> {
    Bitmap::open(path).with_context(|| format!("failed to load image {}", path.display()))
}

fn write_bitmap(bitmap: &Bitmap, path: &Path) -> Result<()> {
    bitmap
        .save(path)
        .with_context(|| format!("failed to write image {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        width = bitmap.width(),
        height = bitmap.height(),
        "wrote image"
    );
    Ok(())
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        bail!("hex payload has an odd number of digits");
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            let pair = text
                .get(i..i + 2)
                .context("hex payload is not ASCII")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("invalid hex byte {pair:?}"))
        })
        .collect()
}
