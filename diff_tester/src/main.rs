mod image_helper;

use anyhow::Result;
use bitmap_diff::{ClusterOptions, CompareOptions, DiffConfig, DiffPipeline, RasterBuffer};
use clap::Parser;
use std::path::PathBuf;

/// Diff two images and outline every changed region.
#[derive(Debug, Parser)]
#[command(name = "diff_tester", version, about)]
struct Args {
    /// The reference image.
    first: PathBuf,
    /// The image to compare against the reference.
    second: PathBuf,
    /// Maximum gap in pixels between differences grouped into one region.
    #[arg(short, long, default_value_t = 10)]
    threshold: u32,
    /// Expected share of changed pixels in percent (allocation hint only).
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    assumed_difference: f64,
    /// Where to write the annotated side-by-side PNG.
    #[arg(short, long, default_value = "diff_result.png")]
    output: PathBuf,
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Skip writing the annotated image.
    #[arg(long)]
    no_image: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // --- 1. Load both images ---
    let original = image_helper::load_rgb(&args.first)?;
    let changed = image_helper::load_rgb(&args.second)?;
    log::info!(
        "loaded images, original size {} x {}",
        original.width(),
        original.height()
    );

    // --- 2. Run the difference pipeline ---
    let pipeline = DiffPipeline::new(DiffConfig {
        compare: CompareOptions::new(args.assumed_difference),
        cluster: ClusterOptions::new(args.threshold),
    });
    let report = pipeline.run(&RasterBuffer::from(&original), &RasterBuffer::from(&changed))?;

    // --- 3. Report ---
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Diffed images in {:?}. Difference count: {}.",
            report.compare_elapsed,
            report.difference_count()
        );
        println!(
            "Generated difference clusters in {:?}. Cluster count: {}.",
            report.cluster_elapsed,
            report.regions.len()
        );
        for rect in &report.regions {
            println!(" (x: {}, y: {}, w: {}, h: {})", rect.x, rect.y, rect.width, rect.height);
        }
    }

    // --- 4. Annotated output ---
    if !args.no_image {
        let canvas = image_helper::annotate(&original, &changed, &report.regions)?;
        image_helper::save_png(&args.output, &canvas)?;
        if !args.json {
            println!("Wrote diff result to {}.", args.output.display());
        }
    }

    Ok(())
}
