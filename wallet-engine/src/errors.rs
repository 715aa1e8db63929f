use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("user not found: {0}")]
    UserNotFound(i64),

    #[error("recipient '{0}' not found")]
    RecipientNotFound(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("cannot send coins to yourself")]
    SelfTransferRejected,

    #[error("amount must be a positive integer, got {0}")]
    InvalidAmount(i64),

    #[error("store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl WalletError {
    /// Transient infra failures may be retried by the caller; every other
    /// kind is terminal for the call that produced it.
    pub fn is_transient(&self) -> bool {
        matches!(self, WalletError::Store(_))
    }
}
