use clap::{Parser, Subcommand};
use hitreport_core::cli::config::{self as config_cmd, ConfigCmd};
use hitreport_core::cli::report::{ReportArgs, run_report};
use hitreport_core::logging::{self, LogFormat, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "hitreport",
    version,
    about = "Per-client status code report for Apache access logs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Diagnostic log format on stderr [default: pretty on a terminal, json otherwise]
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(logging::default_log_format));

    match cli.command {
        Some(Command::Config { cmd }) => {
            if let Err(e) = config_cmd::run(cmd) {
                eprintln!("config error: {e:#}");
                std::process::exit(1);
            }
        }

        None => {
            let result = cli
                .report
                .into_options()
                .map_err(anyhow::Error::from)
                .and_then(|options| {
                    tracing::debug!(?options, "resolved report options");
                    run_report(&options)
                });

            if let Err(e) = result {
                eprintln!("error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
