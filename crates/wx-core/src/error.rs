use thiserror::Error;

pub type WxResult<T> = Result<T, WxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WxError {
    #[error("Unknown varcode {code} in table {table}")]
    UnknownCode { code: String, table: String },

    #[error("No table available for master table version {version}")]
    UnknownTable { version: u8 },

    #[error("Type mismatch for {code}: {what}")]
    TypeMismatch { code: String, what: &'static str },

    #[error("Value {value} out of range for {code} (min={min}, max={max})")]
    Range {
        code: String,
        value: String,
        min: i64,
        max: i64,
    },

    #[error("Cannot parse {text:?} as {what}")]
    Parse { text: String, what: &'static str },

    #[error("Variable {code} has no value")]
    Unset { code: String },
}

impl WxError {
    pub(crate) fn parse(text: &str, what: &'static str) -> Self {
        WxError::Parse {
            text: text.to_string(),
            what,
        }
    }
}
