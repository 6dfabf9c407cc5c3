//! Reader for `rres` resource files.
//!
//! An rres file is a 16-byte [`FileHeader`] followed by resource chunks, each
//! one a 32-byte [`ResourceChunkInfo`] plus `packed_size` bytes of data, and an
//! optional central directory (`CDIR` chunk) mapping original file names to
//! resource ids.
//!
//! ```no_run
//! let dir = rres::load_central_directory("resources.rres")?;
//! let id = dir.id_from_file_name("resources/images/fudesumi.png");
//!
//! let resource = rres::load_resource("resources.rres", id)?;
//! for chunk in &resource {
//!     println!("{:?} {:?} {} bytes", chunk.data_type, chunk.status, chunk.data.len());
//! }
//! # Ok::<(), rres::RresError>(())
//! ```
//!
//! Resources and directories own their buffers: dropping them is the release.

mod chunk;
mod crc;
mod directory;
mod error;
mod header;
mod io;
mod props;
mod resource;
mod types;
mod unpack;

#[cfg(test)]
mod testutil;

use std::path::Path;

pub use chunk::{ChunkStatus, CrcPolicy, LoadOptions, ResourceChunk, parse_props};
pub use crc::compute_crc32;
pub use directory::{CentralDir, DirEntry, RRES_MAX_FILENAME_SIZE, parse_entries};
pub use error::{RresError, RresResult};
pub use header::{FileHeader, RRES_SIGNATURE, RRES_VERSION, ResourceChunkInfo};
pub use props::{FontGlyphInfo, Properties};
pub use resource::{Resource, chunk_info_all, load_chunk_info, load_chunk_info_all};
pub use types::{
    CodeLang, CompressionType, EncryptionType, FontStyle, PixelFormat, ResourceDataType,
    TextEncoding, VertexAttribute, VertexFormat,
};
pub use unpack::decompress;

/// Loads all resource chunks linked to `rres_id`.
pub fn load_resource<P: AsRef<Path>>(path: P, rres_id: u32) -> RresResult<Resource> {
    Resource::load(path, rres_id)
}

/// Loads the central directory, empty when the file has none.
pub fn load_central_directory<P: AsRef<Path>>(path: P) -> RresResult<CentralDir> {
    CentralDir::load(path)
}

/// Resource id of a file name: the CRC32 of its bytes, as assigned by packers.
pub fn id_from_name(file_name: &str) -> u32 {
    compute_crc32(file_name.as_bytes())
}
