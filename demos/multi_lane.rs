use wavefront_aligner::{AlignerParameters, LanePartition, LaneScheduler, ScoreParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let params = AlignerParameters::new()
        .with_lanes(4)?
        .with_scoring(ScoreParams::new(1, -1, -3, -1))?
        .with_partition(LanePartition::RoundRobin);
    let mut scheduler = LaneScheduler::new(params)?;

    let pairs = [
        ("ACGTACGT", "ACGTAGCT"),
        ("GGTTAACC", "GGTTAACT"),
        ("ACGTACGT", "ACGT"),
        ("AAAA", "TTTT"),
        ("GATTACA", "GATNACA"),
    ];

    let batch = scheduler.align_sequences(&pairs)?;

    for (i, ((target, database), result)) in pairs.iter().zip(&batch.results).enumerate() {
        match result {
            Ok(score) => println!("Alignment {i}: {target} x {database} -> score {}", score.score),
            Err(e) => println!("Alignment {i}: {target} x {database} -> error: {e}"),
        }
    }
    println!(
        "{} pairs, {} failed, {} cells, {:.3} ms",
        batch.stats.pairs, batch.stats.failed, batch.stats.cells, batch.stats.execution_time_ms
    );

    Ok(())
}
