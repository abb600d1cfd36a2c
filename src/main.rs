use bloglist::cli::{Cli, Commands, cmd_check_config, cmd_init};
use bloglist::{Config, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command() {
        Commands::Init => return cmd_init(),
        Commands::CheckConfig => return cmd_check_config(&Config::load()?),
        Commands::Serve => {}
    }

    let config = Config::load()?;
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(config))
}
