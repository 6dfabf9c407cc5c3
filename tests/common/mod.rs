#![allow(dead_code)]

use std::io::Write;

use rres::{FileHeader, ResourceChunkInfo, compute_crc32};
use tempfile::NamedTempFile;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Chunk {
    pub fourcc: [u8; 4],
    pub id: u32,
    pub comp_type: u8,
    pub base_size: Option<u32>,
    pub packed: Vec<u8>,
    pub next: Option<usize>,
}

/// Writes rres files chunk by chunk, optionally with a central directory.
#[derive(Default)]
pub struct RresFile {
    chunks: Vec<Chunk>,
    names: Vec<(u32, String)>,
}

pub fn plain(props: &[i32], data: &[u8]) -> Vec<u8> {
    let mut out = (props.len() as u32).to_le_bytes().to_vec();
    for p in props {
        out.extend_from_slice(&p.to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

impl RresFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fourcc: &[u8; 4], id: u32, props: &[i32], data: &[u8]) -> usize {
        self.add_raw(Chunk {
            fourcc: *fourcc,
            id,
            comp_type: 0,
            base_size: None,
            packed: plain(props, data),
            next: None,
        })
    }

    pub fn add_raw(&mut self, chunk: Chunk) -> usize {
        self.chunks.push(chunk);
        self.chunks.len() - 1
    }

    /// Links the chunks at `indices` in order, as chunks of one resource.
    pub fn chain(&mut self, indices: &[usize]) -> &mut Self {
        for pair in indices.windows(2) {
            self.chunks[pair[0]].next = Some(pair[1]);
        }
        self
    }

    pub fn name(&mut self, id: u32, file_name: &str) -> &mut Self {
        self.names.push((id, file_name.to_string()));
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut offsets = Vec::new();
        let mut pos = FileHeader::SIZE;
        for c in &self.chunks {
            offsets.push(pos as u32);
            pos += ResourceChunkInfo::SIZE + c.packed.len();
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"rres");
        out.extend_from_slice(&100u16.to_le_bytes());
        out.extend_from_slice(&(self.chunks.len() as u16).to_le_bytes());
        let cd_offset = if self.names.is_empty() {
            0
        } else {
            (pos - FileHeader::SIZE) as u32
        };
        out.extend_from_slice(&cd_offset.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        for c in &self.chunks {
            let next = c.next.map(|i| offsets[i]).unwrap_or(0);
            let base = c.base_size.unwrap_or(c.packed.len() as u32);
            let info = Info {
                fourcc: &c.fourcc,
                id: c.id,
                comp_type: c.comp_type,
                base_size: base,
                next_offset: next,
            };
            write_chunk(&mut out, &info, &c.packed);
        }

        if !self.names.is_empty() {
            let mut entries = Vec::new();
            for (id, name) in &self.names {
                let offset = self
                    .chunks
                    .iter()
                    .position(|c| c.id == *id)
                    .map(|i| offsets[i])
                    .unwrap_or(0);
                let mut name = name.as_bytes().to_vec();
                name.push(0);
                while name.len() % 4 != 0 {
                    name.push(0);
                }
                entries.extend_from_slice(&id.to_le_bytes());
                entries.extend_from_slice(&offset.to_le_bytes());
                entries.extend_from_slice(&0u32.to_le_bytes());
                entries.extend_from_slice(&(name.len() as u32).to_le_bytes());
                entries.extend_from_slice(&name);
            }
            let packed = plain(&[self.names.len() as i32], &entries);
            let info = Info {
                fourcc: b"CDIR",
                id: 0,
                comp_type: 0,
                base_size: packed.len() as u32,
                next_offset: 0,
            };
            write_chunk(&mut out, &info, &packed);
        }
        out
    }

    pub fn write(&self) -> NamedTempFile {
        write_bytes(&self.bytes())
    }
}

pub fn write_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Chunk header fields the builder controls; sizes and CRC come from the data.
struct Info<'a> {
    fourcc: &'a [u8; 4],
    id: u32,
    comp_type: u8,
    base_size: u32,
    next_offset: u32,
}

fn write_chunk(out: &mut Vec<u8>, info: &Info<'_>, packed: &[u8]) {
    out.extend_from_slice(info.fourcc);
    out.extend_from_slice(&info.id.to_le_bytes());
    out.push(info.comp_type);
    out.push(0);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(packed.len() as u32).to_le_bytes());
    out.extend_from_slice(&info.base_size.to_le_bytes());
    out.extend_from_slice(&info.next_offset.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&compute_crc32(packed).to_le_bytes());
    out.extend_from_slice(packed);
}
