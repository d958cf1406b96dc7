use crate::demo::{run_demo, run_lead_import, run_lead_score, DemoArgs, ImportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leadflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Leadflow",
    about = "Run the agency lead desk service and qualification tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Lead qualification utilities
    Lead {
        #[command(subcommand)]
        command: LeadCommand,
    },
    /// Run an end-to-end CLI demo covering intake, scoring, and reporting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LeadCommand {
    /// Score an ad-hoc lead and print the qualification breakdown
    Score(ScoreArgs),
    /// Import a CSV lead export, qualify every row, and print the queue
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Lead {
            command: LeadCommand::Score(args),
        } => run_lead_score(args),
        Command::Lead {
            command: LeadCommand::Import(args),
        } => run_lead_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
