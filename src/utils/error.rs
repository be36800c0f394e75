use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("{message}")]
    ConfigMissing { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("DB Error: {body}")]
    Rejected { status: u16, body: String },

    #[error("Network error. Check your internet or DB URL.")]
    Network(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl CheckoutError {
    /// Inline text shown in the wizard. Every variant is recoverable: the
    /// wizard stays on its current step and the user may retry.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
