use std::io;

/// Errors surfaced by every top-level entry point of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A read ran past the end of the input buffer.
    #[error("end of stream")]
    EndOfStream,
    /// The bitstream violates ITU-T H.265 syntax or semantic constraints.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// A caller-supplied value is outside its legal range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The operation needs active VPS, SPS and PPS, and at least one of
    /// them has not been installed.
    #[error("missing parameter sets")]
    MissingParameterSets,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::EndOfStream,
            _ => Error::Protocol(err.to_string()),
        }
    }
}
