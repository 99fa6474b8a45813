//! Keyframe error types.

/// Category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Header missing, in the wrong place, or with the wrong field count.
    Header,
    /// Data line has too few fields.
    LineStructure,
    /// State or previous state is not a 4-element numeric vector.
    FieldShape,
    /// Record carries too many fields.
    Arity,
    /// Action is not a coded 0/1 value.
    Action,
    /// Reward is not a coded -1/0/1 value.
    Reward,
    /// A required number is NaN or infinite.
    NonFinite,
    /// A bounded number is outside its physical range.
    Range,
}

/// Errors that can occur while validating a single record.
///
/// These carry no line context; the line parser wraps them in
/// [`ParseError::InvalidRecord`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Wrong number of fields.
    #[error("Expected 4 or 5 fields; got {count}")]
    Arity { count: usize },

    /// State or previous state has the wrong shape.
    #[error("Expected field {field} '{value}' to be an array of length 4")]
    FieldShape { field: usize, value: String },

    /// Action field is not 0 or 1.
    #[error("Expected action '{value}' ({shape}) to be either 0 or 1")]
    Action { value: String, shape: &'static str },

    /// Reward field is not -1, 0 or 1.
    #[error("Expected reward '{value}' ({shape}) to be either -1, 0, or 1")]
    Reward { value: String, shape: &'static str },

    /// A state component is NaN or infinite.
    #[error("{name}: given {value}; expected a finite number")]
    NonFinite { name: &'static str, value: f64 },

    /// A state component is outside its bounds.
    #[error("{name}: given {value}; out of bounds [{min}, {max}]")]
    Range {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl RecordError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::Arity { .. } => ErrorKind::Arity,
            RecordError::FieldShape { .. } => ErrorKind::FieldShape,
            RecordError::Action { .. } => ErrorKind::Action,
            RecordError::Reward { .. } => ErrorKind::Reward,
            RecordError::NonFinite { .. } => ErrorKind::NonFinite,
            RecordError::Range { .. } => ErrorKind::Range,
        }
    }
}

/// Errors that can occur while parsing a log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// No header line at all.
    #[error("Missing header: input is empty")]
    MissingHeader,

    /// First line is a data record rather than a header.
    #[error("Missing header: line 1 is a data record: '{header}'")]
    DataInHeader { header: String },

    /// Header has the wrong number of fields.
    #[error("Invalid header: expected {min} to {max} fields, found {field_count} in '{header}'")]
    HeaderFieldCount {
        field_count: usize,
        min: usize,
        max: usize,
        header: String,
    },

    /// Header text differs from the canonical header.
    #[error("Unknown header '{header}'; expected '{expected}'")]
    UnknownHeader {
        header: String,
        expected: &'static str,
    },

    /// Data line has too few fields.
    #[error("Couldn't parse line {line} '{text}': only {field_count} fields")]
    LineStructure {
        line: usize,
        text: String,
        field_count: usize,
    },

    /// State or previous state on a data line is not a numeric 4-vector.
    #[error("Invalid field {field} at line {line}: expected '[n1 n2 n3 n4]', got '{value}'")]
    FieldShape {
        line: usize,
        field: usize,
        value: String,
    },

    /// Record failed validation.
    #[error("Invalid record at line {line} '{text}': {source}")]
    InvalidRecord {
        line: usize,
        text: String,
        source: RecordError,
    },
}

impl ParseError {
    /// Create a line structure error.
    pub fn line_structure(line: usize, text: impl Into<String>, field_count: usize) -> Self {
        Self::LineStructure {
            line,
            text: text.into(),
            field_count,
        }
    }

    /// Create a field shape error.
    pub fn field_shape(line: usize, field: usize, value: impl Into<String>) -> Self {
        Self::FieldShape {
            line,
            field,
            value: value.into(),
        }
    }

    /// Wrap a record validation error with its line context.
    pub fn invalid_record(line: usize, text: impl Into<String>, source: RecordError) -> Self {
        Self::InvalidRecord {
            line,
            text: text.into(),
            source,
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MissingHeader
            | ParseError::DataInHeader { .. }
            | ParseError::HeaderFieldCount { .. }
            | ParseError::UnknownHeader { .. } => ErrorKind::Header,
            ParseError::LineStructure { .. } => ErrorKind::LineStructure,
            ParseError::FieldShape { .. } => ErrorKind::FieldShape,
            ParseError::InvalidRecord { source, .. } => source.kind(),
        }
    }

    /// 1-based source line the error refers to.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MissingHeader => None,
            ParseError::DataInHeader { .. }
            | ParseError::HeaderFieldCount { .. }
            | ParseError::UnknownHeader { .. } => Some(1),
            ParseError::LineStructure { line, .. }
            | ParseError::FieldShape { line, .. }
            | ParseError::InvalidRecord { line, .. } => Some(*line),
        }
    }
}

/// Type alias for parse results.
pub type ParseResult<T> = Result<T, ParseError>;
