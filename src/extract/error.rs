pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Document parse error: {message}")]
    DocumentParse { message: String },

    #[error("Document has no GetExtractByIdResponse.extract node")]
    MissingExtract,

    #[error("Malformed service reference `{url}`: {message}")]
    MalformedServiceReference { url: String, message: String },
}

impl ExtractError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::DocumentParse {
            message: message.into(),
        }
    }
}
