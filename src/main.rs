use std::error::Error;

use clap::Parser;
use tracing::{info, warn};

use ringcode::{GeometryParams, RingBuilder, RingReader};

#[derive(Parser, Debug)]
#[command(name = "ringcode")]
#[command(about = "Ringcode - Renders text as a circular barcode", long_about = None)]
struct Args {
    /// Text to encode
    #[arg(default_value = "19292390")]
    text: String,

    /// Output PNG path
    #[arg(short, long, default_value = "ring.png")]
    output: String,

    /// Module size in logical units
    #[arg(long, default_value_t = 8)]
    module: u32,

    /// Inner radius in logical units
    #[arg(long, default_value_t = 80)]
    min_radius: u32,

    /// Outer radius in logical units
    #[arg(long, default_value_t = 160)]
    max_radius: u32,

    /// Pixels per logical unit
    #[arg(short, long, default_value_t = 10)]
    gain: u32,

    /// Read the rendered image back and compare it with the input
    #[arg(long)]
    verify: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_level = args.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(log_level).with_target(false).init();

    let geometry = GeometryParams::new(args.module, args.min_radius, args.max_radius, args.gain)?;

    let mut builder = RingBuilder::new(&args.text);
    builder.geometry(geometry);

    let capacity = builder.capacity();
    info!(
        modules = capacity.module_per_circle(),
        bytes_per_ring = capacity.byte_per_circle(),
        max_bytes = capacity.max_bytes(),
        "Geometry {}",
        builder.metadata()
    );

    if builder.exceeds_capacity() {
        warn!(bytes = args.text.len(), max_bytes = capacity.max_bytes(), "Text too long");
        return Err("text exceeds ring capacity".into());
    }

    let ring = builder.build()?;
    let img = ring.to_image();
    img.save(&args.output)?;
    info!(path = %args.output, rings = ring.rows(), "Saved ring");

    if args.verify {
        let decoded = RingReader::new(geometry).read(&ring.render())?;
        if decoded != args.text {
            return Err(format!("read back {decoded:?}, expected {:?}", args.text).into());
        }
        info!("Read back matches input");
    }

    Ok(())
}
