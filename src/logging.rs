use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use crate::error::InitError;

/// Send `tracing` output to `log_file`, filtered by `RUST_LOG`.
///
/// Without a file nothing is installed: the terminal is busy drawing the game.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InitError> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| InitError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| InitError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_installs_nothing() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snake.log");
        assert!(matches!(
            init_tracing(Some(&path)),
            Err(InitError::LogFile { .. })
        ));
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        // the first call may win or lose against another global subscriber,
        // the second can never win
        let _ = init_tracing(Some(&first));
        assert!(matches!(
            init_tracing(Some(&second)),
            Err(InitError::Logging(_))
        ));
    }
}
