//workout-feedback-cli/src/cli.rs
use chrono::{Duration, Local};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use workout_feedback_lib::RowEditor;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a workout feedback form into a text report", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Expands `today` / `yesterday`; everything else is passed through untouched
/// so the report can show it verbatim.
pub fn expand_date_shorthand(s: &str) -> String {
    match s.trim().to_lowercase().as_str() {
        "today" => Local::now().date_naive().format("%Y-%m-%d").to_string(),
        "yesterday" => (Local::now() - Duration::days(1))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string(),
        _ => s.to_string(),
    }
}

fn parse_date_arg(s: &str) -> Result<String, String> {
    Ok(expand_date_shorthand(s))
}

fn parse_row_spec(s: &str) -> Result<RowEditor, String> {
    s.parse::<RowEditor>().map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the feedback report from a submission file and/or flags
    Generate {
        /// TOML submission file (see `template`)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Training date, YYYY-MM-DD, 'today' or 'yesterday' (defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<String>,
        /// RPE, 1-10
        #[arg(long)]
        rpe: Option<String>,
        /// Energy level, 1-10
        #[arg(short, long)]
        energy: Option<String>,
        /// Sleep quality (好 / 一般 / 差)
        #[arg(short, long)]
        sleep: Option<String>,
        /// Sleep duration in hours
        #[arg(long)]
        sleep_duration: Option<String>,
        /// Muscle soreness (无 / 轻微 / 中等 / 严重), printed exactly as given
        #[arg(long)]
        soreness: Option<String>,
        /// Anything else worth noting
        #[arg(short, long)]
        other: Option<String>,
        /// Exercise row, e.g. "select=深蹲,sets=5,reps=5,weight=100" or "text=农夫行走,sets=3".
        /// Repeat for more rows; replaces rows from --file
        #[arg(short, long = "row", value_name = "SPEC", value_parser = parse_row_spec)]
        rows: Vec<RowEditor>,
        /// Copy the report to the clipboard
        #[arg(short, long)]
        copy: bool,
        /// Print the collected exercise entries as a table before the report
        #[arg(long)]
        show_entries: bool,
    },
    /// Show the commentary for RPE, energy, sleep and soreness values
    Advice {
        #[arg(long)]
        rpe: Option<String>,
        #[arg(short, long)]
        energy: Option<String>,
        /// good / average / poor (or 好 / 一般 / 差)
        #[arg(short, long)]
        sleep: Option<String>,
        /// none / mild / moderate / severe (or 无 / 轻微 / 中等 / 严重)
        #[arg(long)]
        soreness: Option<String>,
    },
    /// List the movements offered by the row selector
    Movements,
    /// Print a blank submission file to fill in
    Template,
    /// Show the path to the config file
    ConfigPath,
    GenerateCompletion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
