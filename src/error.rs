use thiserror::Error;

/** recoverable failures: reading an instance or validating parameters.
Timeouts are not errors, they are reported as unsure verdicts. */
#[derive(Debug, Error)]
pub enum KvcsError {
    /// the instance file cannot be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// file name
        path: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// a line does not follow the DIMACS col format
    #[error("line {line} is not in DIMACS col format: {content:?}")]
    Format {
        /// 1-based line number
        line: usize,
        /// offending line
        content: String,
    },

    /// an edge line appears before the `p` header
    #[error("edge on line {0} appears before the problem line")]
    MissingHeader(usize),

    /// an edge endpoint is outside 1..=n
    #[error("edge ({u},{v}) references a vertex outside 1..={n}")]
    VertexOutOfRange {
        /// first endpoint (1-based)
        u: usize,
        /// second endpoint (1-based)
        v: usize,
        /// number of vertices declared by the header
        n: usize,
    },

    /// a parameter value is rejected
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// parameter name
        name: &'static str,
        /// why it is rejected
        reason: String,
    },
}
