use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use user_lookup::{logging, Cli, LookupConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_level(&cli.log_level);

    match try_main(cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(config: LookupConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    user_lookup::run(&config, &mut out).with_context(|| {
        format!(
            "lookup of `{}` in `{}` failed",
            config.column,
            config.db_path.display()
        )
    })
}
