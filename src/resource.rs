use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info, warn};

use crate::chunk::{LoadOptions, ResourceChunk};
use crate::error::{RresError, RresResult};
use crate::header::{FileHeader, ResourceChunkInfo};

/// Resource: all the chunks linked to one resource id, in chain order.
///
/// Owns every chunk's properties and data; dropping it releases them.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    pub id: u32,
    pub chunks: Vec<ResourceChunk>,
}

impl Resource {
    /// Loads all resource chunks linked to `rres_id`.
    pub fn load<P: AsRef<Path>>(path: P, rres_id: u32) -> RresResult<Self> {
        Self::load_with(path, rres_id, &LoadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(
        path: P,
        rres_id: u32,
        options: &LoadOptions,
    ) -> RresResult<Self> {
        let mut file = open(path.as_ref())?;
        Self::from_reader(&mut file, rres_id, options)
    }

    /// Loads a resource from any seekable rres stream positioned at its start.
    pub fn from_reader<R: Read + Seek>(
        r: &mut R,
        rres_id: u32,
        options: &LoadOptions,
    ) -> RresResult<Self> {
        let header = FileHeader::read_validated(r)?;
        let Some(first) = find_chunk(r, &header, rres_id)? else {
            return Err(RresError::ResourceNotFound(rres_id));
        };
        let first_data = r.stream_position()?;

        let count = chain_len(r, &first, header.chunk_count)?;
        if count > 1 {
            info!("RRES: [ID {rres_id:#010x}] multiple resource chunks detected: {count} chunks");
        }
        r.seek(SeekFrom::Start(first_data))?;

        let mut chunks = Vec::with_capacity(count);
        let mut info = first;
        loop {
            let packed = read_packed(r, &info)?;
            let next = info.next_offset;
            chunks.push(ResourceChunk::decode_with(info, packed, options));
            if next == 0 || chunks.len() == count {
                break;
            }
            r.seek(SeekFrom::Start(u64::from(next)))?;
            info = ResourceChunkInfo::from_reader(r)?;
        }

        Ok(Resource {
            id: rres_id,
            chunks,
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn first(&self) -> Option<&ResourceChunk> {
        self.chunks.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceChunk> {
        self.chunks.iter()
    }

    /// True when every chunk decoded cleanly.
    pub fn is_valid(&self) -> bool {
        !self.chunks.is_empty() && self.chunks.iter().all(ResourceChunk::is_valid)
    }
}

impl<'a> IntoIterator for &'a Resource {
    type Item = &'a ResourceChunk;
    type IntoIter = std::slice::Iter<'a, ResourceChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

impl IntoIterator for Resource {
    type Item = ResourceChunk;
    type IntoIter = std::vec::IntoIter<ResourceChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

/// Info header of the first chunk with id `rres_id`.
pub fn load_chunk_info<P: AsRef<Path>>(path: P, rres_id: u32) -> RresResult<ResourceChunkInfo> {
    let mut file = open(path.as_ref())?;
    let header = FileHeader::read_validated(&mut file)?;
    find_chunk(&mut file, &header, rres_id)?.ok_or(RresError::ResourceNotFound(rres_id))
}

/// Info headers of every chunk in the file, in file order.
pub fn load_chunk_info_all<P: AsRef<Path>>(path: P) -> RresResult<Vec<ResourceChunkInfo>> {
    let mut file = open(path.as_ref())?;
    chunk_info_all(&mut file)
}

pub fn chunk_info_all<R: Read + Seek>(r: &mut R) -> RresResult<Vec<ResourceChunkInfo>> {
    let header = FileHeader::read_validated(r)?;
    let mut infos = Vec::with_capacity(header.chunk_count as usize);
    for _ in 0..header.chunk_count {
        let info = ResourceChunkInfo::from_reader(r)?;
        r.seek(SeekFrom::Current(i64::from(info.packed_size)))?;
        infos.push(info);
    }
    Ok(infos)
}

pub(crate) fn open(path: &Path) -> RresResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) => {
            warn!(
                "RRES: [{}] rres file could not be opened: {e}",
                path.display()
            );
            Err(e.into())
        }
    }
}

/// Scans the chunk sequence for the first chunk with id `rres_id`, leaving the
/// reader right after its info header.
fn find_chunk<R: Read + Seek>(
    r: &mut R,
    header: &FileHeader,
    rres_id: u32,
) -> RresResult<Option<ResourceChunkInfo>> {
    for _ in 0..header.chunk_count {
        let info = ResourceChunkInfo::from_reader(r)?;
        if info.id == rres_id {
            return Ok(Some(info));
        }
        debug!(
            "RRES: skipping {} [ID {:#010x}], {} bytes",
            info.type_str(),
            info.id,
            info.packed_size
        );
        r.seek(SeekFrom::Current(i64::from(info.packed_size)))?;
    }
    Ok(None)
}

/// Walks the `next_offset` links without reading any data.
///
/// A chain can never be longer than the file chunk count; a longer one means
/// the links loop.
fn chain_len<R: Read + Seek>(
    r: &mut R,
    first: &ResourceChunkInfo,
    chunk_count: u16,
) -> RresResult<usize> {
    let mut len = 1;
    let mut next = first.next_offset;
    while next != 0 {
        if len >= usize::from(chunk_count) {
            return Err(RresError::Malformed(format!(
                "[ID {:#010x}] chunk chain longer than chunk count {chunk_count}",
                first.id
            )));
        }
        r.seek(SeekFrom::Start(u64::from(next)))?;
        next = ResourceChunkInfo::from_reader(r)?.next_offset;
        len += 1;
    }
    Ok(len)
}

pub(crate) fn read_packed<R: Read>(r: &mut R, info: &ResourceChunkInfo) -> RresResult<Vec<u8>> {
    let mut packed = Vec::new();
    (&mut *r)
        .take(u64::from(info.packed_size))
        .read_to_end(&mut packed)?;
    if packed.len() != info.packed_size as usize {
        let msg = format!(
            "{} [ID {:#010x}]: expected {} bytes of data, found {}",
            info.type_str(),
            info.id,
            info.packed_size,
            packed.len()
        );
        return Err(std::io::Error::new(ErrorKind::UnexpectedEof, msg).into());
    }
    Ok(packed)
}
