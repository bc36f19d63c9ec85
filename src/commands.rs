use crate::cli::{Args, Report};
use std::path::{Path, PathBuf};
use tracing::info;
use value_stocks::analysis::PlayFlow;
use value_stocks::config::Config;
use value_stocks::config::validation::validate_max_time_delta;
use value_stocks::constants::output_files;
use value_stocks::error::AppError;
use value_stocks::pipeline::{
    GameSelection, run_annotate, run_play_flow, run_quick_stocks, run_value_stocks,
    write_play_flow,
};
use value_stocks::report::write_report;
use value_stocks::stats_api::create_http_client_with_timeout;

/// Validates command line argument combinations.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if let Some(max_delta) = args.max_delta {
        validate_max_time_delta(max_delta)?;
    }
    if args.new_log_file_path.is_some() && args.clear_log_file_path {
        return Err(AppError::config_error(
            "Cannot use --set-log-file and --clear-log-file together",
        ));
    }
    if args.game_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(AppError::config_error("Game id must not be empty"));
    }
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = new_domain.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

fn selection_from_args(args: &Args) -> GameSelection {
    GameSelection::season(&args.season, &args.season_type).with_game_ids(args.game_ids.clone())
}

/// Runs the selected report and writes its spreadsheets.
///
/// Returns the paths of the files written.
pub async fn handle_report_command(args: &Args) -> Result<Vec<PathBuf>, AppError> {
    let config = Config::load().await?;
    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
    let selection = selection_from_args(args);
    let max_delta = args.max_delta.unwrap_or(config.max_time_delta_seconds);
    let output_dir = Path::new(&args.output_dir);

    info!(
        "Running {:?} for {} {} (window {max_delta}s)",
        args.report(),
        selection.season,
        selection.season_type
    );

    let written = match args.report() {
        Report::ValueStocks => {
            run_value_stocks(&client, &config, &selection, max_delta)
                .await?
                .write_to(output_dir)?
        }
        Report::PlayFlow => {
            let tally = run_play_flow(
                &client,
                &config,
                &selection,
                PlayFlow::offensive_rebound(),
                max_delta,
            )
            .await?;
            vec![write_play_flow(&tally, output_dir)?]
        }
        Report::Annotate => {
            let plays = run_annotate(&client, &config, &selection).await?;
            let path = output_dir.join(output_files::ANNOTATED);
            write_report(&path, &plays)?;
            vec![path]
        }
        Report::QuickStocks => {
            let summaries = run_quick_stocks(&client, &config, &selection, max_delta).await?;
            let path = output_dir.join(output_files::QUICK_STOCKS);
            write_report(&path, &summaries)?;
            vec![path]
        }
    };

    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(written)
}
