use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("label table line {line}: {message}")]
    MalformedLabelRow { line: usize, message: String },

    #[error("label table line {line}: channel {channel} appears more than once")]
    DuplicateChannel { line: usize, channel: u32 },

    #[error("no channel carries label '{label}'")]
    LabelNotFound { label: String },

    #[error("label '{label}' is carried by channels {channels:?}; refusing to pick one")]
    AmbiguousLabel { label: String, channels: Vec<u32> },

    #[error("{location}: log file contains no data rows")]
    EmptyLog { location: String },

    #[error("{location}: invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        location: String,
        value: String,
        message: String,
    },

    #[error("{location}: last timestamp precedes the first")]
    InvertedTimeframe { location: String },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParserError {
    pub(crate) fn io(location: &str, source: std::io::Error) -> Self {
        ParserError::Io {
            location: location.to_string(),
            source,
        }
    }
}
