use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use value_stocks::constants::{DEFAULT_SEASON, DEFAULT_SEASON_TYPE};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Whether the invocation only touches the configuration file.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Reports to generate from the play-by-play feed.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Report {
    /// Value stocks per player, box score stocks, and the merged spreadsheet (default)
    #[default]
    ValueStocks,
    /// Offensive rebounds and what followed them, per rebounder
    PlayFlow,
    /// Every play labelled with team, play type, next play and credited player
    Annotate,
    /// Per-game count of stocks with a follow-up inside the clock window
    QuickStocks,
}

/// NBA value stocks
///
/// Finds the steals and blocks that the team turned into points within a few
/// seconds of game clock, and writes per-player spreadsheets (CSV) to the
/// output directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub report: Option<Report>,

    /// Season in `YYYY-YY` form.
    #[arg(short = 's', long, default_value = DEFAULT_SEASON, help_heading = "Games")]
    pub season: String,

    /// Season type, e.g. "Regular Season" or "Playoffs".
    #[arg(short = 't', long = "season-type", default_value = DEFAULT_SEASON_TYPE, help_heading = "Games")]
    pub season_type: String,

    /// Analyse only these games instead of the whole season. Can be repeated.
    #[arg(short = 'g', long = "game-id", value_name = "GAME_ID", help_heading = "Games")]
    pub game_ids: Vec<String>,

    /// Directory the spreadsheets are written to.
    #[arg(short = 'o', long = "output-dir", default_value = ".", help_heading = "Output")]
    pub output_dir: String,

    /// Seconds of game clock allowed between a play and its follow-up.
    /// Defaults to the configured value.
    #[arg(long = "max-delta", value_name = "SECONDS", help_heading = "Output")]
    pub max_delta: Option<i64>,

    /// Update API domain in config.
    #[arg(long = "config", help_heading = "Configuration", value_name = "API_DOMAIN")]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Log only to the log file, not to the terminal.
    #[arg(short = 'q', long = "quiet", help_heading = "Debug")]
    pub quiet: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    pub fn report(&self) -> Report {
        self.report.unwrap_or_default()
    }
}
