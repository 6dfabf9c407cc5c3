use std::io::Read;

use crate::error::{RresError, RresResult};
use crate::io::{read_array, read_u8, read_u16_le, read_u32_le};
use crate::types::{CompressionType, EncryptionType, ResourceDataType};

/// File identifier: `rres`
pub const RRES_SIGNATURE: [u8; 4] = *b"rres";

/// Supported file version (1.0)
pub const RRES_VERSION: u16 = 100;

/// File header (16 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub id: [u8; 4],      // File identifier: b"rres"
    pub version: u16,     // File version: 100 for version 1.0
    pub chunk_count: u16, // Number of resource chunks in the file (MAX: 65535)
    pub cd_offset: u32,   // Central Directory offset in file (0 if not available)
    pub reserved: u32,    // <reserved>
}

impl FileHeader {
    pub const SIZE: usize = 16;

    /// Reads a file header from the provided reader.
    pub fn from_reader<R: Read>(r: &mut R) -> RresResult<Self> {
        Ok(Self {
            id: read_array(r)?,
            version: read_u16_le(r)?,
            chunk_count: read_u16_le(r)?,
            cd_offset: read_u32_le(r)?,
            reserved: read_u32_le(r)?,
        })
    }

    /// Reads a header and rejects anything that is not an rres 1.0 file.
    pub fn read_validated<R: Read>(r: &mut R) -> RresResult<Self> {
        let header = Self::from_reader(r)?;
        header.validate()?;
        Ok(header)
    }

    pub fn validate(&self) -> RresResult<()> {
        if self.id != RRES_SIGNATURE || self.version != RRES_VERSION {
            log::warn!(
                "RRES: file signature or version not valid ({:?}, {})",
                String::from_utf8_lossy(&self.id),
                self.version
            );
            return Err(RresError::InvalidFormat {
                signature: self.id,
                version: self.version,
            });
        }
        Ok(())
    }
}

/// Resource chunk info header (32 bytes)
///
/// Compression and cipher tags are kept as raw bytes: the reader passes them
/// through untouched, [`ResourceChunkInfo::compression`] and
/// [`ResourceChunkInfo::cipher`] interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChunkInfo {
    pub chunk_type: [u8; 4], // Resource chunk type (FourCC)
    pub id: u32,             // Resource chunk identifier (CRC32 filename hash or custom)
    pub comp_type: u8,       // Data compression algorithm
    pub cipher_type: u8,     // Data encryption algorithm
    pub flags: u16,          // Data flags (if required)
    pub packed_size: u32,    // Data chunk size (compressed/encrypted + custom data appended)
    pub base_size: u32,      // Data base size (uncompressed/unencrypted, props included)
    pub next_offset: u32,    // Next resource chunk global offset (0 on the last chunk)
    pub reserved: u32,       // <reserved>
    pub crc32: u32,          // Data chunk CRC32 (prop_count + props[] + data)
}

impl ResourceChunkInfo {
    pub const SIZE: usize = 32;

    /// Reads a resource chunk info header from the provided reader.
    pub fn from_reader<R: Read>(r: &mut R) -> RresResult<Self> {
        Ok(Self {
            chunk_type: read_array(r)?,
            id: read_u32_le(r)?,
            comp_type: read_u8(r)?,
            cipher_type: read_u8(r)?,
            flags: read_u16_le(r)?,
            packed_size: read_u32_le(r)?,
            base_size: read_u32_le(r)?,
            next_offset: read_u32_le(r)?,
            reserved: read_u32_le(r)?,
            crc32: read_u32_le(r)?,
        })
    }

    pub fn data_type(&self) -> ResourceDataType {
        ResourceDataType::from_fourcc(&self.chunk_type)
    }

    pub fn compression(&self) -> RresResult<CompressionType> {
        CompressionType::try_from(u32::from(self.comp_type))
    }

    pub fn cipher(&self) -> RresResult<EncryptionType> {
        EncryptionType::try_from(u32::from(self.cipher_type))
    }

    /// True when the data is stored as is, so properties can be read directly.
    pub fn is_plain(&self) -> bool {
        self.comp_type == CompressionType::None as u8
            && self.cipher_type == EncryptionType::None as u8
    }

    /// FourCC as text, for diagnostics.
    pub fn type_str(&self) -> &str {
        std::str::from_utf8(&self.chunk_type).unwrap_or("????")
    }
}
