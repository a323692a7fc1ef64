//! Entry point for the `realize` command-line tool.
use std::process::ExitCode;

use clap::Parser;

use realize_cli::cli::{Cli, Command};
use realize_cli::error::SettingsError;
use realize_cli::escalation::{Action, Escalator, Policy};
use realize_cli::{commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let log = logging::init_subscriber(args.verbose);
    let escalator = Escalator::new(Policy::default());
    let name = args.command.name();

    let result = match args.command {
        Command::Init(opts) => commands::init::run(&args.global, &opts),
        Command::Show => commands::show::run(&args.global),
        Command::Clean => commands::clean::run(&args.global),
        Command::Open => commands::open::run(&args.global, &log),
        Command::Token(opts) => {
            commands::token::run(&opts);
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    let Err(err) = result else {
        return ExitCode::SUCCESS;
    };
    let action = match err.downcast_ref::<SettingsError>() {
        Some(settings_err) => escalator.escalate(settings_err, &[name]),
        None => {
            escalator.fatal(Some(&format!("{err:#}")), &[name]);
            Action::Terminate
        }
    };
    ExitCode::from(action.exit_status())
}

#[allow(clippy::print_stdout)]
fn print_version() {
    let version = option_env!("REALIZE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("realize {version}");
}
