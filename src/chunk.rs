use log::{debug, warn};

use crate::crc::compute_crc32;
use crate::error::{RresError, RresResult};
use crate::header::ResourceChunkInfo;
use crate::io::{i32_at, u32_at};
use crate::types::{CompressionType, EncryptionType, ResourceDataType};

/// What the decoder could make of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    /// Properties and data were parsed.
    Valid,
    /// Data is compressed and/or encrypted, `data` holds the packed bytes and
    /// there are no properties until the chunk is unpacked.
    Packed,
    /// CRC32 mismatch, the data must not be trusted.
    Corrupted,
    /// `NULL` or unknown FourCC, no properties or data.
    Empty,
    /// CRC32 matched but the property block does not fit in the chunk.
    Malformed,
}

/// Policy for chunks whose CRC32 does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcPolicy {
    /// Drop properties and data.
    #[default]
    Strict,
    /// Keep the packed bytes as data, properties are not parsed.
    Lenient,
}

/// Options used while loading resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub crc_policy: CrcPolicy,
}

/// Resource chunk, as returned to the user after reading and processing the
/// data from file.
#[derive(Debug, Clone)]
pub struct ResourceChunk {
    pub info: ResourceChunkInfo,
    pub data_type: ResourceDataType,
    pub status: ChunkStatus,
    pub props: Vec<i32>,
    pub data: Vec<u8>,
}

impl ResourceChunk {
    /// Decodes a chunk from its info header and the `packed_size` bytes that
    /// follow it in the file.
    ///
    /// Never fails: problems are reported through [`ResourceChunk::status`]
    /// and a log line.
    pub fn decode(info: ResourceChunkInfo, packed: Vec<u8>) -> Self {
        Self::decode_with(info, packed, &LoadOptions::default())
    }

    pub fn decode_with(info: ResourceChunkInfo, packed: Vec<u8>, options: &LoadOptions) -> Self {
        let data_type = info.data_type();
        let mut chunk = ResourceChunk {
            info,
            data_type,
            status: ChunkStatus::Empty,
            props: Vec::new(),
            data: Vec::new(),
        };

        if compute_crc32(&packed) != chunk.info.crc32 {
            warn!(
                "RRES: [ID {:#010x}] {}: CRC32 does not match, data can be corrupted",
                chunk.info.id,
                chunk.info.type_str()
            );
            chunk.status = ChunkStatus::Corrupted;
            if options.crc_policy == CrcPolicy::Lenient {
                chunk.data = packed;
            }
            return chunk;
        }

        if data_type == ResourceDataType::Null {
            debug!(
                "RRES: [ID {:#010x}] {}: no data to load",
                chunk.info.id,
                chunk.info.type_str()
            );
            return chunk;
        }

        if !chunk.info.is_plain() {
            // Properties live inside the packed stream, the user has to unpack first
            chunk.status = ChunkStatus::Packed;
            chunk.data = packed;
            return chunk;
        }

        if chunk.info.base_size as usize != packed.len() {
            debug!(
                "RRES: [ID {:#010x}] {}: base size {} differs from packed size {}",
                chunk.info.id,
                chunk.info.type_str(),
                chunk.info.base_size,
                packed.len()
            );
        }

        match chunk.load_props_and_data(&packed) {
            Ok(()) => chunk.status = ChunkStatus::Valid,
            Err(e) => {
                warn!(
                    "RRES: [ID {:#010x}] {}: {e}",
                    chunk.info.id,
                    chunk.info.type_str()
                );
                chunk.status = ChunkStatus::Malformed;
            }
        }
        chunk
    }

    /// Replaces properties and data with the ones contained in `plain`, an
    /// uncompressed and unencrypted data chunk.
    pub(crate) fn load_props_and_data(&mut self, plain: &[u8]) -> RresResult<()> {
        let (props, data) = parse_props(plain)?;
        self.props = props;
        self.data = data.to_vec();
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.status == ChunkStatus::Valid
    }

    pub fn id(&self) -> u32 {
        self.info.id
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    pub fn compression(&self) -> RresResult<CompressionType> {
        self.info.compression()
    }

    pub fn cipher(&self) -> RresResult<EncryptionType> {
        self.info.cipher()
    }

    pub fn packed_size(&self) -> u32 {
        self.info.packed_size
    }

    pub fn base_size(&self) -> u32 {
        self.info.base_size
    }
}

/// Splits a plain data chunk into its properties and the data that follows them.
///
/// Layout: `prop_count: u32`, `prop_count` x `i32`, data.
pub fn parse_props(plain: &[u8]) -> RresResult<(Vec<i32>, &[u8])> {
    let Some(prop_count) = u32_at(plain, 0) else {
        return Err(RresError::Malformed("chunk data too short for prop_count".into()));
    };
    let prop_count = prop_count as usize;

    let data_start = prop_count
        .checked_mul(4)
        .and_then(|n| n.checked_add(4))
        .filter(|&end| end <= plain.len())
        .ok_or_else(|| {
            RresError::Malformed(format!(
                "{prop_count} properties do not fit in {} bytes",
                plain.len()
            ))
        })?;

    let props = (0..prop_count)
        .map(|i| i32_at(plain, 4 + 4 * i).unwrap_or_default())
        .collect();
    Ok((props, &plain[data_start..]))
}
