use clap::Parser;
use colored::Colorize;

use studyfocus::cli::args::{Cli, Commands};
use studyfocus::cli::commands;
use studyfocus::config::{Config, Paths};
use studyfocus::error::StudyError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StudyError> {
    let cli = Cli::parse();

    let paths = match cli.home {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    let config = Config::load_from_path(&paths.config_file)?;

    studyfocus::logging::init(cli.verbose, &config.logging.level);
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    if let Commands::Completions { shell, install } = &cli.command {
        println!("{}", commands::completions(shell, *install)?);
        return Ok(());
    }

    let mut controller = commands::open_controller(&paths, &config)?;
    let controller = &mut controller;

    let output = match cli.command {
        Commands::Start => commands::start(controller, format)?,
        Commands::Pause => commands::pause(controller, format)?,
        Commands::Resume => commands::resume(controller, format)?,
        Commands::Stop => commands::stop(controller, format)?,
        Commands::Complete { no_break } => commands::complete(controller, no_break, format)?,
        Commands::Break => commands::start_break(controller, format)?,
        Commands::Skip => commands::skip(controller, format)?,
        Commands::Status => commands::status(controller, format)?,
        Commands::Watch => {
            studyfocus::tui::run(controller)?;
            String::new()
        }
        Commands::Config(args) => commands::config(controller, args.command, format)?,
        Commands::History { limit, skip } => commands::history(controller, limit, skip, format)?,
        Commands::Delete { id } => commands::delete(controller, id, format)?,
        Commands::Report => commands::report(controller, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
