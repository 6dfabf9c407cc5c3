//! In-memory rres file builder for unit tests.

use crate::crc::compute_crc32;
use crate::header::{FileHeader, ResourceChunkInfo};

struct ChunkSpec {
    fourcc: [u8; 4],
    id: u32,
    packed: Vec<u8>,
    /// Index of the next chunk of the same resource.
    next: Option<usize>,
    bad_crc: bool,
}

#[derive(Default)]
pub(crate) struct RresBuilder {
    chunks: Vec<ChunkSpec>,
    entries: Vec<(u32, String)>,
    chunk_count: Option<u16>,
}

pub(crate) fn plain_data(props: &[i32], data: &[u8]) -> Vec<u8> {
    let mut out = (props.len() as u32).to_le_bytes().to_vec();
    for p in props {
        out.extend_from_slice(&p.to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

/// Info header of an uncompressed, unencrypted chunk holding `packed`.
pub(crate) fn chunk_info(fourcc: &[u8; 4], packed: &[u8]) -> ResourceChunkInfo {
    ResourceChunkInfo {
        chunk_type: *fourcc,
        id: 0x0BAD_F00D,
        comp_type: 0,
        cipher_type: 0,
        flags: 0,
        packed_size: packed.len() as u32,
        base_size: packed.len() as u32,
        next_offset: 0,
        reserved: 0,
        crc32: compute_crc32(packed),
    }
}

/// Directory entries laid out as in a CDIR chunk, without the property block.
pub(crate) fn dir_entries(entries: &[(u32, u32, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (id, offset, name) in entries {
        let mut name = name.as_bytes().to_vec();
        name.push(0);
        while name.len() % 4 != 0 {
            name.push(0);
        }
        out.extend_from_slice(&id.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(name.len() as u32).to_le_bytes());
        out.extend_from_slice(&name);
    }
    out
}

impl RresBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain chunk and returns its index.
    pub fn chunk(&mut self, fourcc: &[u8; 4], id: u32, props: &[i32], data: &[u8]) -> usize {
        self.chunks.push(ChunkSpec {
            fourcc: *fourcc,
            id,
            packed: plain_data(props, data),
            next: None,
            bad_crc: false,
        });
        self.chunks.len() - 1
    }

    pub fn link(&mut self, from: usize, to: usize) -> &mut Self {
        self.chunks[from].next = Some(to);
        self
    }

    pub fn corrupt(&mut self, index: usize) -> &mut Self {
        self.chunks[index].bad_crc = true;
        self
    }

    pub fn entry(&mut self, id: u32, name: &str) -> &mut Self {
        self.entries.push((id, name.to_string()));
        self
    }

    pub fn chunk_count(&mut self, count: u16) -> &mut Self {
        self.chunk_count = Some(count);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut offsets = Vec::with_capacity(self.chunks.len());
        let mut pos = FileHeader::SIZE;
        for c in &self.chunks {
            offsets.push(pos as u32);
            pos += ResourceChunkInfo::SIZE + c.packed.len();
        }
        let cd_pos = pos;

        let mut out = Vec::new();
        out.extend_from_slice(b"rres");
        out.extend_from_slice(&100u16.to_le_bytes());
        let count = self.chunk_count.unwrap_or(self.chunks.len() as u16);
        out.extend_from_slice(&count.to_le_bytes());
        let cd_offset = if self.entries.is_empty() {
            0
        } else {
            (cd_pos - FileHeader::SIZE) as u32
        };
        out.extend_from_slice(&cd_offset.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        for c in &self.chunks {
            let next = c.next.map(|i| offsets[i]).unwrap_or(0);
            let crc = compute_crc32(&c.packed) ^ u32::from(c.bad_crc);
            write_chunk(&mut out, &c.fourcc, c.id, &c.packed, next, crc);
        }

        if !self.entries.is_empty() {
            let entries: Vec<(u32, u32, &str)> = self
                .entries
                .iter()
                .map(|(id, name)| {
                    let offset = self
                        .chunks
                        .iter()
                        .position(|c| c.id == *id)
                        .map(|i| offsets[i])
                        .unwrap_or(0);
                    (*id, offset, name.as_str())
                })
                .collect();
            let packed = plain_data(&[entries.len() as i32], &dir_entries(&entries));
            let crc = compute_crc32(&packed);
            write_chunk(&mut out, b"CDIR", 0, &packed, 0, crc);
        }
        out
    }
}

fn write_chunk(out: &mut Vec<u8>, fourcc: &[u8; 4], id: u32, packed: &[u8], next: u32, crc: u32) {
    out.extend_from_slice(fourcc);
    out.extend_from_slice(&id.to_le_bytes());
    // uncompressed, unencrypted, no flags
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(packed.len() as u32).to_le_bytes());
    out.extend_from_slice(&(packed.len() as u32).to_le_bytes());
    out.extend_from_slice(&next.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(packed);
}
