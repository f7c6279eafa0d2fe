#![allow(clippy::arithmetic_side_effects)]

use chaintable::{BucketStats, HashTable};
use plotters::prelude::*;
use rand::Rng;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Number of random puts; keys and values are drawn from `0..PUTS`
const PUTS: u32 = 512;
/// Output file for the chain length histogram
const HISTOGRAM_PATH: &str = "chain_lengths.png";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut rng = rand::rng();
    let mut table = HashTable::new();
    let mut replaced: usize = 0;

    for _ in 0..PUTS {
        let key = rng.random_range(0..PUTS);
        let value = rng.random_range(0..PUTS);
        if table.put(key, value).is_some() {
            replaced += 1;
        }
    }

    let stats = table.stats();
    info!(puts = PUTS, size = table.len(), replaced, capacity = table.capacity(), "table filled");
    info!(
        empty_buckets = stats.empty_buckets(),
        longest_chain = stats.longest_chain(),
        mean_chain = stats.mean_occupied_chain(),
        "bucket occupancy"
    );

    println!("{}", table.show());

    draw_histogram(&stats)?;
    info!(path = HISTOGRAM_PATH, "wrote chain length histogram");

    Ok(())
}

/// Plots how many buckets hold each chain length
fn draw_histogram(stats: &BucketStats) -> Result<(), Box<dyn std::error::Error>> {
    let histogram = stats.histogram();
    let max_count = histogram.iter().copied().max().unwrap_or(0);

    let font_family = "sans-serif";
    let root = BitMapBackend::new(HISTOGRAM_PATH, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Chain Lengths ({} entries, {} buckets)", stats.entries(), stats.capacity()),
            (font_family, 35),
        )
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..histogram.len()).into_segmented(), 0..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Chain Length")
        .y_desc("Buckets")
        .axis_desc_style((font_family, 16))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(50, 90, 220).filled())
            .margin(10)
            .data(histogram.iter().enumerate().map(|(len, &count)| (len, count))),
    )?;

    root.present()?;
    Ok(())
}
