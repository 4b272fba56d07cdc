mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, audit, interfaces};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.no_banner, commands.quiet);

    run(commands).await
}

async fn run(commands: CommandLine) -> ExitCode {
    match dispatch(commands).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(commands: CommandLine) -> anyhow::Result<()> {
    if commands.list_interfaces {
        interfaces::list_interfaces(commands.quiet);
        return Ok(());
    }

    match commands.audit_args() {
        Some(args) => audit::audit(args).await,
        None => anyhow::bail!("--input, --output and --interface are required"),
    }
}
