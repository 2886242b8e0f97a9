//! Lesson simulator binary.
//!
//! ```bash
//! LESSON_SEED=7 LESSON_RUNS=10 cargo run -p lesson-sim
//! ```

use std::io::Write;

use anyhow::Result;
use lesson_content::ContentFactory;
use lesson_sim::{SimConfig, Simulation, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        lesson = %config.lesson,
        seed = config.seed,
        runs = config.runs,
        "Starting lesson simulator"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let simulation = Simulation::from_factory(&factory, &config.lesson)?;

    let mut stdout = std::io::stdout().lock();
    for seed in config.seeds() {
        let report = simulation.run(seed)?;
        serde_json::to_writer(&mut stdout, &report)?;
        writeln!(stdout)?;
    }

    Ok(())
}
