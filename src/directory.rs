use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::{info, warn};

use crate::chunk::{ChunkStatus, ResourceChunk};
use crate::error::{RresError, RresResult};
use crate::header::{FileHeader, ResourceChunkInfo};
use crate::io::u32_at;
use crate::resource::{open, read_packed};
use crate::types::ResourceDataType;

pub const RRES_MAX_FILENAME_SIZE: usize = 1024;

/// Size of the fixed part of a directory entry: id, offset, reserved, file name size.
const ENTRY_PREFIX_SIZE: usize = 16;

/// CDIR: Central directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub id: u32,             // Resource id
    pub offset: u32,         // Resource global offset in file
    pub reserved: u32,       // <reserved>
    pub file_name_size: u32, // Stored file name size (NUL terminator and 4-byte padding included)
    pub file_name: String,   // Resource original file name, NUL and padding stripped
}

/// CDIR: Central directory, maps original file names to resource ids.
#[derive(Debug, Clone, Default)]
pub struct CentralDir {
    pub entries: Vec<DirEntry>,
}

impl CentralDir {
    /// Loads the central directory from file.
    ///
    /// A file without central directory yields an empty directory.
    pub fn load<P: AsRef<Path>>(path: P) -> RresResult<Self> {
        let mut file = open(path.as_ref())?;
        Self::from_reader(&mut file)
    }

    pub fn from_reader<R: Read + Seek>(r: &mut R) -> RresResult<Self> {
        let header = FileHeader::read_validated(r)?;
        if header.cd_offset == 0 {
            info!("RRES: CDIR: no central directory found");
            return Ok(Self::default());
        }

        // cd_offset counts from the end of the file header
        let cd_pos = FileHeader::SIZE as u64 + u64::from(header.cd_offset);
        info!("RRES: CDIR: expected to be found at offset {cd_pos:#010x}");
        r.seek(SeekFrom::Start(cd_pos))?;

        let info = ResourceChunkInfo::from_reader(r)?;
        if info.data_type() != ResourceDataType::Directory {
            warn!(
                "RRES: CDIR: found {} chunk at directory offset, ignoring",
                info.type_str()
            );
            return Ok(Self::default());
        }
        info!(
            "RRES: CDIR: valid central directory found, size: {} bytes",
            info.packed_size
        );

        let packed = read_packed(r, &info)?;
        let chunk = ResourceChunk::decode(info, packed);
        let reason = match chunk.status {
            ChunkStatus::Valid => None,
            ChunkStatus::Corrupted => Some("CRC32 mismatch".to_string()),
            ChunkStatus::Packed => Some("directory is compressed or encrypted".to_string()),
            other => Some(format!("unreadable chunk ({other:?})")),
        };
        if let Some(reason) = reason {
            return Err(RresError::CorruptDirectory(reason));
        }

        let count = chunk
            .props
            .first()
            .copied()
            .and_then(|c| u32::try_from(c).ok())
            .ok_or_else(|| RresError::CorruptDirectory("missing entry count".into()))?;

        Ok(CentralDir {
            entries: parse_entries(&chunk.data, count)?,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// First entry whose stored file name equals `file_name`.
    pub fn find(&self, file_name: &str) -> Option<&DirEntry> {
        self.entries.iter().find(|e| e.file_name == file_name)
    }

    /// Gets resource id for a provided filename.
    pub fn get_resource_id(&self, file_name: &str) -> Option<u32> {
        self.find(file_name).map(|e| e.id)
    }

    /// Same as [`CentralDir::get_resource_id`], with 0 standing for "not found".
    pub fn id_from_file_name(&self, file_name: &str) -> u32 {
        self.get_resource_id(file_name).unwrap_or(0)
    }
}

/// Parses `count` directory entries laid out back to back in `data`.
pub fn parse_entries(data: &[u8], count: u32) -> RresResult<Vec<DirEntry>> {
    let corrupt = |i: u32, what: &str| RresError::CorruptDirectory(format!("entry {i}: {what}"));

    let max_entries = data.len() / ENTRY_PREFIX_SIZE;
    let mut entries = Vec::with_capacity((count as usize).min(max_entries));
    let mut pos = 0usize;
    for i in 0..count {
        let truncated = || corrupt(i, "truncated entry");
        let word = |at: usize| u32_at(data, pos + at).ok_or_else(truncated);
        let id = word(0)?;
        let offset = word(4)?;
        let reserved = word(8)?;
        let file_name_size = word(12)?;

        let name_len = file_name_size as usize;
        if name_len > RRES_MAX_FILENAME_SIZE {
            return Err(corrupt(i, "file name too long"));
        }
        let name_start = pos + ENTRY_PREFIX_SIZE;
        let name = data
            .get(name_start..name_start + name_len)
            .ok_or_else(|| corrupt(i, "truncated file name"))?;
        let name = match name.iter().position(|&b| b == 0) {
            Some(nul) => &name[..nul],
            None => name,
        };

        entries.push(DirEntry {
            id,
            offset,
            reserved,
            file_name_size,
            file_name: String::from_utf8_lossy(name).into_owned(),
        });
        pos = name_start + name_len;
    }
    Ok(entries)
}
