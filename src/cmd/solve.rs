use crate::reports;
use bodyforge::config::Config;
use bodyforge::error::BfResult;
use bodyforge::solver::BodySolver;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON object of raw measurements, keyed by label.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Overrides such as "Height=185,Thigh Length=50".
    #[arg(short, long, default_value = "")]
    pub set: String,
}

pub fn run(args: &SolveArgs, config: &Config, solver: &BodySolver) -> BfResult<()> {
    let inputs = super::resolve_inputs(solver, args.input.as_deref(), &args.set)?;
    let report = solver.solve_detailed(&inputs)?;

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&report.output)?);
        return Ok(());
    }

    let precision = config.output.table_precision;
    if config.output.show_chain {
        reports::print_chain(&report.chain, precision);
    }
    reports::print_shape_keys(&report.output, precision);
    reports::print_bone_scales(&report.output, precision);
    if report.output.is_neutral() {
        println!("\nInputs match the dataset basis: neutral deformation.");
    }
    Ok(())
}
