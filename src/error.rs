use thiserror::Error;

use crate::types::{CompressionType, EncryptionType};

#[derive(Debug, Error)]
pub enum RresError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid rres file (signature {signature:?}, version {version})")]
    InvalidFormat { signature: [u8; 4], version: u16 },

    #[error("resource id {0:#010x} not found")]
    ResourceNotFound(u32),

    #[error("corrupted central directory: {0}")]
    CorruptDirectory(String),

    #[error("malformed chunk: {0}")]
    Malformed(String),

    #[error("unknown {kind} value: {value}")]
    UnknownTag { kind: &'static str, value: u32 },

    #[error("compression not supported: {0:?}")]
    UnsupportedCompression(CompressionType),

    #[error("cipher not supported: {0:?}")]
    UnsupportedCipher(EncryptionType),
}

pub type RresResult<T> = Result<T, RresError>;
