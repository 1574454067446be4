use crate::reports;
use bodyforge::config::Config;
use bodyforge::error::BfResult;
use bodyforge::solver::BodySolver;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct BasisArgs {
    #[command(flatten)]
    pub config: Config,
}

/// Prints the slider values that reproduce the dataset basis.
pub fn run(config: &Config, solver: &BodySolver) -> BfResult<()> {
    let inputs = solver.default_inputs();
    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&inputs)?);
    } else {
        reports::print_inputs(&inputs, config.output.table_precision);
    }
    Ok(())
}
