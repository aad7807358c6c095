use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studyfocus")]
#[command(about = "A Pomodoro focus timer that survives restarts")]
#[command(long_about = "studyfocus - A Pomodoro focus timer for the terminal

Runs focus intervals and breaks from the command line. The timer is saved
after every change and its remaining time is computed from when it started,
so you can close the terminal mid-interval and pick up where you left off.
Every fourth completed focus interval earns a long break.

QUICK START:
  studyfocus start          Start a focus interval
  studyfocus status         Show the countdown
  studyfocus watch          Live countdown in the terminal
  studyfocus complete       Finish early and start the break

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studyfocus <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to
    /// `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory (default: ~/.studyfocus)
    #[arg(long, env = "STUDYFOCUS_HOME", global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a focus interval
    ///
    /// Logs a new focus session and starts counting down the configured
    /// focus duration. Fails if a focus interval or break is already active.
    ///
    /// # Examples
    ///
    ///   studyfocus start
    ///   studyfocus s
    #[command(alias = "s")]
    Start,

    /// Pause the running countdown
    Pause,

    /// Resume a paused countdown
    Resume,

    /// Stop the current focus interval or break
    ///
    /// A focus interval stopped this way is logged as not completed and does
    /// not count toward the long break.
    Stop,

    /// Complete the current focus interval now
    ///
    /// Marks the session completed, counts it toward the long break and,
    /// unless --no-break is given, starts the break it earned.
    Complete {
        /// Go idle instead of starting the break
        #[arg(long)]
        no_break: bool,
    },

    /// Start the break earned by the completed focus intervals
    Break,

    /// Skip the current break
    Skip,

    /// Show the timer
    ///
    /// Also finishes an interval that ran out while nothing was watching.
    #[command(alias = "st")]
    Status,

    /// Live countdown in the terminal
    ///
    /// Keys: s start, p pause/resume, b break, k skip break, x stop, q quit.
    #[command(alias = "w")]
    Watch,

    /// Show or change the timer durations
    Config(ConfigArgs),

    /// List logged focus sessions, newest first
    ///
    /// # Examples
    ///
    ///   studyfocus history
    ///   studyfocus history --limit 5 --skip 10
    History {
        /// Maximum number of sessions to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,

        /// Number of newest sessions to skip
        #[arg(long, default_value = "0")]
        skip: usize,
    },

    /// Delete a logged focus session
    Delete {
        /// Session ID
        id: i64,
    },

    /// Summarize completed focus sessions
    ///
    /// Shows totals and a per-day breakdown of the last seven days.
    Report,

    /// Generate shell completions
    ///
    /// Example: studyfocus completions bash > ~/.bash_completion.d/studyfocus
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current durations
    Show,

    /// Set the focus duration (1-60 minutes)
    ///
    /// Accepts minutes or a duration such as 25m, 1h, 90s.
    Focus {
        /// Duration
        duration: String,
    },

    /// Set the short break duration (1-30 minutes)
    Break {
        /// Duration
        duration: String,
    },
}
