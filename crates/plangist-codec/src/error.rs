use plangist_operators::Operator;
use thiserror::Error;

/// Everything that can go wrong turning a gist back into a plan.
///
/// Decoding stops at the first error. Offsets are byte positions in the
/// base64-decoded gist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("plan gist is not valid base64: {0}")]
    Base64(String),

    #[error("plan gist is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },

    #[error("unsupported plan gist version {found} (expected {expected})")]
    UnsupportedVersion { found: i64, expected: i64 },

    #[error("plan gist truncated at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("malformed varint at byte {offset}")]
    BadVarint { offset: usize },

    #[error("unknown operator code {code} at byte {offset}")]
    UnknownOperator { code: u8, offset: usize },

    #[error("invalid {what} {value} at byte {offset}")]
    InvalidValue {
        what: &'static str,
        value: i64,
        offset: usize,
    },

    #[error("list of {len} elements at byte {offset} exceeds limit {limit}")]
    ListTooLong {
        len: usize,
        limit: usize,
        offset: usize,
    },

    #[error("list at byte {offset} exceeds the gist-wide budget of {limit} list elements")]
    ListBudgetExceeded { limit: usize, offset: usize },

    #[error("{op} needs {needed} input(s), only {available} on the stack")]
    StackUnderflow {
        op: Operator,
        needed: usize,
        available: usize,
    },

    #[error("plan gist has more than {limit} operators")]
    TooManyNodes { limit: usize },

    #[error("plan gist nests operators deeper than {limit}")]
    TooDeep { limit: usize },

    #[error("plan gist contains no operators")]
    MissingRoot,
}

pub type Result<T> = std::result::Result<T, DecodeError>;
