use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use coefont::DEFAULT_BASE_URL;
use tarako::report::{banner, Reporter};
use tarako::{
    init_logging, App, AppError, Command, Config, ConsoleReporter, RodioPlayer, API_URL_ENV,
};

#[derive(Parser)]
#[command(name = "tarako", author, version, about)]
struct Cli {
    /// Base URL of the CoeFont synthesis API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_BASE_URL, hide_default_value = true)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    init_logging();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let reporter = ConsoleReporter::new();
    reporter.rule(Some(&banner(env!("CARGO_PKG_VERSION"))));

    let result = run(command, cli.api_url, reporter).await;
    if let Err(e) = &result {
        reporter.error(&e.to_string());
    }
    reporter.rule(None);
    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code()),
    })
}

async fn run(command: Command, api_url: String, reporter: ConsoleReporter) -> Result<(), AppError> {
    let client = Config::with_api_url(api_url).client()?;
    let app = App::new(client, reporter, RodioPlayer);
    let mut stdout = io::stdout().lock();
    app.run(command, io::stdin().lock(), &mut stdout).await
}
