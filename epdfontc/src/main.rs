use std::path::PathBuf;

use epdfontc::{Error, FontStack};
use write_epdfont::{
    compile, default_intervals, BitDepth, CodePointInterval, MetricsTransform,
};

/// Compile TTF/OTF font files into the .epdfont binary format.
#[derive(clap::Parser, Debug)]
#[command(version)]
struct Args {
    /// Font name, used for the default output file name and for script
    /// detection
    name: String,
    /// Font size in points
    size: u32,
    /// Font files in priority order; the first face covering a code point
    /// wins (may use glob syntax)
    #[arg(required = true)]
    fontfiles: Vec<PathBuf>,
    /// Generate 2-bit greyscale instead of 1-bit black and white
    #[arg(long = "2bit")]
    two_bit: bool,
    /// Additional Unicode interval as MIN,MAX (hex or decimal); may be
    /// repeated
    #[arg(long, value_name = "MIN,MAX")]
    additional_intervals: Vec<CodePointInterval>,
    /// Output path [default: {name}_{size}.epdfont]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Line height multiplier
    #[arg(long, default_value_t = 1.0)]
    line_height: f32,
    /// Extra pixels added between glyphs
    #[arg(long, default_value_t = 0)]
    letter_spacing: i32,
    /// Horizontal advance scale factor
    #[arg(long, default_value_t = 1.0)]
    width_scale: f32,
    /// Pixels added to every glyph's top bearing
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    baseline_offset: i32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    use clap::Parser as _;
    let args = Args::parse_from(wild::args());
    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}.epdfont", args.name, args.size)));
    let depth = if args.two_bit {
        BitDepth::Two
    } else {
        BitDepth::One
    };
    log::info!(
        "converting {} to {} ({}pt, {:?})",
        args.fontfiles[0].display(),
        output.display(),
        args.size,
        depth
    );

    let mut candidates = default_intervals(&args.name);
    candidates.extend_from_slice(&args.additional_intervals);

    let transform = MetricsTransform {
        line_height: args.line_height,
        letter_spacing: args.letter_spacing,
        width_scale: args.width_scale,
        baseline_offset: args.baseline_offset,
    };

    let mut stack = FontStack::new(&args.fontfiles, args.size)?;
    let font = compile(&mut stack, candidates, &transform, depth);
    font.write(&output)?;

    log::info!(
        "created {}: {} intervals, {} glyphs, {} bitmap bytes, {} bytes total",
        output.display(),
        font.interval_count,
        font.glyph_count,
        font.bitmap_len,
        font.total_len()
    );
    Ok(())
}
