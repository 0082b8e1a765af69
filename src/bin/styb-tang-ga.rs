use std::process::ExitCode;

use styb_tang_map::function::styblinski_tang;
use styb_tang_map::genetic::{GeneticAlgorithm, GeneticConfig};
use tracing::{error, info};

fn main() -> ExitCode {
    if let Err(err) = styb_tang_map::init_logging() {
        eprintln!("styb-tang-ga: logging disabled: {err}");
    }

    let ga = match GeneticAlgorithm::new(GeneticConfig::default(), styblinski_tang) {
        Ok(ga) => ga,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(err.exit_code() as u8);
        }
    };
    let outcome = ga.run(&mut rand::thread_rng());
    info!(best = ?outcome.best, "Best minimum found was {:.2}.", outcome.fitness);
    ExitCode::SUCCESS
}
