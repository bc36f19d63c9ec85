use crate::constants::MAX_TIME_DELTA_SECONDS;
use crate::error::AppError;
use std::path::Path;

/// Checks a clock window in seconds: at least one second, at most one full game.
pub fn validate_max_time_delta(seconds: i64) -> Result<(), AppError> {
    if !(1..=MAX_TIME_DELTA_SECONDS).contains(&seconds) {
        return Err(AppError::config_error(format!(
            "Maximum time delta must be between 1 and {MAX_TIME_DELTA_SECONDS} seconds, got {seconds}"
        )));
    }
    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty
/// - API domain must be a valid URL or domain name
/// - HTTP timeout must be positive
/// - Clock window must be between one second and one full game
/// - If log file path is provided, it cannot be empty and its directory must be creatable
pub fn validate_config(
    api_domain: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
    max_time_delta_seconds: i64,
) -> Result<(), AppError> {
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://") && !api_domain.starts_with("https://") {
        // Without a scheme it should at least look like a host name
        if !api_domain.contains('.') && !api_domain.starts_with("localhost") {
            return Err(AppError::config_error(
                "API domain must be a valid URL or domain name",
            ));
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    validate_max_time_delta(max_time_delta_seconds)?;

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
