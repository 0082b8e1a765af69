use std::process::ExitCode;

use styb_tang_map::plot::render_map;
use styb_tang_map::PlotConfig;
use tracing::error;

fn main() -> ExitCode {
    if let Err(err) = styb_tang_map::init_logging() {
        eprintln!("styb-tang-map: logging disabled: {err}");
    }

    match render_map(PlotConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
