use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before the first tick.
///
/// These are reported once at startup and never retried.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tick period must be at least 1ms")]
    ZeroTickPeriod,
    #[error("node size must be at least 1")]
    ZeroNodeSize,
    #[error("surface {width}x{height} cannot hold a single {node_size}-unit node")]
    SurfaceTooSmall {
        width: u32,
        height: u32,
        node_size: u32,
    },
    #[error("grid bounds must not be negative (got {width}x{height})")]
    NegativeGrid { width: i32, height: i32 },
    #[error("grid bounds {width}x{height} exceed the largest supported bound")]
    GridTooLarge { width: i32, height: i32 },
    #[error("grid needs {columns}x{rows} cells but the board only shows {board_columns}x{board_rows}")]
    GridExceedsBoard {
        columns: usize,
        rows: usize,
        board_columns: usize,
        board_rows: usize,
    },
    #[error("failed to set up the terminal")]
    Terminal(#[source] std::io::Error),
    #[error("failed to open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install the log subscriber: {0}")]
    Logging(String),
}
