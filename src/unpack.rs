//! Decompression of packed chunks.
//!
//! The reader itself only passes compressed data through; this is the optional
//! step a user library runs afterwards. Ciphers are not implemented.

use std::io::Read;

use flate2::read::DeflateDecoder;
use log::{info, warn};

use crate::chunk::{ChunkStatus, ResourceChunk};
use crate::error::{RresError, RresResult};
use crate::types::{CompressionType, EncryptionType};

/// Largest decompressed/packed size ratio trusted for preallocation.
const MAX_HINT_RATIO: usize = 64;

impl ResourceChunk {
    /// Unpacks a [`ChunkStatus::Packed`] chunk and parses its properties.
    ///
    /// Returns `false` when there was nothing to unpack.
    pub fn unpack(&mut self) -> RresResult<bool> {
        if self.status != ChunkStatus::Packed {
            return Ok(false);
        }

        let cipher = self.info.cipher()?;
        if cipher != EncryptionType::None {
            return Err(RresError::UnsupportedCipher(cipher));
        }

        let comp = self.info.compression()?;
        let plain = decompress(comp, &self.data, self.info.base_size)?;
        if plain.len() != self.info.base_size as usize {
            warn!(
                "RRES: {}: decompressed data could be corrupted, expected {} bytes, got {}",
                self.info.type_str(),
                self.info.base_size,
                plain.len()
            );
        }

        self.load_props_and_data(&plain)?;
        self.info.comp_type = CompressionType::None as u8;
        self.info.packed_size = plain.len() as u32;
        self.status = ChunkStatus::Valid;
        info!(
            "RRES: {}: data decompressed successfully ({comp:?})",
            self.info.type_str()
        );
        Ok(true)
    }
}

/// Decompresses `data` using the specified compression type.
///
/// `base_size` is the expected decompressed size, required by LZ4 blocks.
pub fn decompress(comp: CompressionType, data: &[u8], base_size: u32) -> RresResult<Vec<u8>> {
    match comp {
        CompressionType::None => Ok(data.to_vec()),
        CompressionType::Deflate => {
            let mut decoder = DeflateDecoder::new(data);
            let mut out = Vec::with_capacity(capacity_hint(data, base_size));
            if let Err(e) = decoder.read_to_end(&mut out) {
                return Err(RresError::Malformed(format!("deflate stream: {e}")));
            }
            Ok(out)
        }
        CompressionType::Lz4 => {
            let Ok(size) = i32::try_from(base_size) else {
                return Err(RresError::Malformed(format!("lz4 base size: {base_size}")));
            };
            lz4::block::decompress(data, Some(size))
                .map_err(|e| RresError::Malformed(format!("lz4 block: {e}")))
        }
        other => Err(RresError::UnsupportedCompression(other)),
    }
}

/// Initial output buffer size: `base_size`, capped to a generous ratio of the
/// packed size.
fn capacity_hint(data: &[u8], base_size: u32) -> usize {
    (base_size as usize).min(data.len().saturating_mul(MAX_HINT_RATIO))
}
