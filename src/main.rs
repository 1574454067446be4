use bodyforge::config::Config;
use bodyforge::solver::BodySolver;
use bodyforge::variant::Variant;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "female")]
    variant: Variant,

    /// Dataset document. Defaults to data/<variant>.json.
    #[arg(global = true, short, long)]
    dataset: Option<String>,

    /// JSON file with runtime settings; command-line flags override it.
    #[arg(global = true, long)]
    settings: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Solve(cmd::solve::SolveArgs),
    Batch(cmd::batch::BatchArgs),
    Probe(cmd::probe::ProbeArgs),
    Basis(cmd::basis::BasisArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Solve(args) => (&args.config, "solve"),
        Commands::Batch(args) => (&args.config, "batch"),
        Commands::Probe(args) => (&args.config, "probe"),
        Commands::Basis(args) => (&args.config, "basis"),
    };

    let config = match &cli.settings {
        Some(path) => {
            info!("Loading settings from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("Could not read settings '{}': {}", path, e);
                process::exit(1);
            });
            if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    let dataset_path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| format!("data/{}", cli.variant.dataset_file()));
    info!("Loading {} dataset: {}", cli.variant, dataset_path);

    let solver = BodySolver::load(&dataset_path, cli.variant).unwrap_or_else(|e| {
        error!("FATAL ERROR LOADING DATASET: {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(&args, &config, &solver),
        Commands::Batch(args) => cmd::batch::run(&args, &config, &solver),
        Commands::Probe(args) => cmd::probe::run(&args, &config, &solver),
        Commands::Basis(_) => cmd::basis::run(&config, &solver),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
