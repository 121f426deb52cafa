use crate::demo::{run_confidence, run_demo, run_select, ConfidenceArgs, DemoArgs, SelectArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use procure_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Procurement Intelligence Decision Layer",
    about = "Select presentation components and classify source confidence from the command line",
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
    /// Resolve the component for one turn and print the renderer instructions
    Select(SelectArgs),
    /// Classify the evidence behind a response
    Confidence(ConfidenceArgs),
    /// Walk through representative turns with built-in sample data
    Demo(DemoArgs),
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
        Command::Select(args) => run_select(args),
        Command::Confidence(args) => run_confidence(args),
        Command::Demo(args) => run_demo(args),
    }
}
