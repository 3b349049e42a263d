use wavefront_aligner::{AlignmentPair, PerformanceConfig, ScoreParams, WavefrontEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = WavefrontEngine::new(ScoreParams::default(), 64)?
        .with_performance(PerformanceConfig::rayon(16));

    let pair = AlignmentPair::encode("ACGTACGTTTGACCA", "TTACGTACGTGACC", engine.max_dim())?;
    let result = engine.score(&pair)?;

    println!("Target:   {}", pair.target);
    println!("Database: {}", pair.database);
    println!("Score: {}", result.score);
    println!(
        "Swept {} cells over {} diagonals",
        result.statistics.cells, result.statistics.diagonals
    );

    Ok(())
}
