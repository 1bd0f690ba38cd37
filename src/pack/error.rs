use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Malformed request: {0}")]
    MalformedInput(#[source] serde_json::Error),
    #[error("Image of skin {skin} is not valid base64")]
    Decode {
        skin: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("Failed to write archive entry: {0}")]
    Serialization(#[from] zip::result::ZipError),
    #[error("Failed to encode {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write archive data: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Whether the error was caused by the request rather than by the assembler.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PackError::MalformedInput(_) | PackError::Decode { .. })
    }
}
