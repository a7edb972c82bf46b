//! Domain error types.

/// Top-level error type for tradewatch.
#[derive(Debug, thiserror::Error)]
pub enum TradewatchError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("duplicate trade id {id}")]
    DuplicateTradeId { id: u64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade {id} not found")]
    TradeNotFound { id: u64 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradewatchError> for std::process::ExitCode {
    fn from(err: &TradewatchError) -> Self {
        let code: u8 = match err {
            TradewatchError::Io(_) | TradewatchError::Json(_) => 1,
            TradewatchError::ConfigParse { .. }
            | TradewatchError::ConfigMissing { .. }
            | TradewatchError::ConfigInvalid { .. } => 2,
            TradewatchError::DataSource { .. }
            | TradewatchError::InvalidRecord { .. }
            | TradewatchError::DuplicateTradeId { .. } => 3,
            TradewatchError::TradeNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
