use crate::reports;
use bodyforge::config::Config;
use bodyforge::error::BfResult;
use bodyforge::probe;
use bodyforge::solver::BodySolver;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON object of raw measurements to perturb around.
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long, default_value = "")]
    pub set: String,
}

pub fn run(args: &ProbeArgs, config: &Config, solver: &BodySolver) -> BfResult<()> {
    let base = super::resolve_inputs(solver, args.input.as_deref(), &args.set)?;
    let summary = probe::run_probe(solver, &base, &config.probe);

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_probe_summary(&summary, config.output.table_precision);
    }
    Ok(())
}
