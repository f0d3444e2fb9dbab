//! File logging bootstrap.
//!
//! Logging is started at most once per process. A second call with the same
//! directory is a no-op; a different directory is rejected.

use std::path::{
    Path,
    PathBuf,
};

use flexi_logger::{
    Cleanup,
    Criterion,
    FileSpec,
    Logger,
    LoggerHandle,
    Naming,
    WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;

use crate::core::MyoSimError;

const LOG_FILE_BASENAME: &str = "myosim";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), MyoSimError> {
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, MyoSimError> {
        std::fs::create_dir_all(log_dir)?;

        let logger = Logger::try_with_str(level)
            .map_err(|e| MyoSimError::Custom(format!("invalid log level `{level}`: {e}")))?
            .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_FILE_BASENAME))
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| MyoSimError::Custom(format!("failed to start logger: {e}")))?;

        info!(
            "event=app_start platform={} version={} level={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION"),
            level
        );

        Ok(LoggingState { log_dir: log_dir.to_path_buf(), _logger: logger })
    })?;

    if state.log_dir != log_dir {
        return Err(MyoSimError::Custom(format!(
            "logging already initialized at `{}`",
            state.log_dir.display()
        )));
    }

    Ok(())
}
