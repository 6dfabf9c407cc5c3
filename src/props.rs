//! Named views over chunk properties and data.
//!
//! The meaning of a chunk's properties depends on its data type:
//!
//! | type   | properties                                           |
//! |--------|------------------------------------------------------|
//! | `RAWD` | size                                                 |
//! | `TEXT` | size, encoding, code language, culture code          |
//! | `IMGE` | width, height, pixel format, mipmaps                 |
//! | `WAVE` | sample count, sample rate, sample size, channels     |
//! | `VRTX` | vertex count, attribute, component count, format     |
//! | `FNTG` | base size, glyph count, glyph padding, font style    |
//! | `LINK` | size                                                 |
//! | `CDIR` | entry count                                          |

use crate::chunk::{ChunkStatus, ResourceChunk};
use crate::error::{RresError, RresResult};
use crate::io::i32_at;
use crate::types::{
    CodeLang, FontStyle, PixelFormat, ResourceDataType, TextEncoding, VertexAttribute,
    VertexFormat,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Properties {
    Raw {
        size: u32,
    },
    Text {
        size: u32,
        encoding: TextEncoding,
        code_lang: CodeLang,
        culture_code: i32,
    },
    Image {
        width: u32,
        height: u32,
        format: PixelFormat,
        mipmaps: u32,
    },
    Wave {
        sample_count: u32,
        sample_rate: u32,
        sample_size: u32,
        channels: u32,
    },
    Vertex {
        vertex_count: u32,
        attribute: VertexAttribute,
        component_count: u32,
        format: VertexFormat,
    },
    FontGlyphs {
        base_size: u32,
        glyph_count: u32,
        glyph_padding: u32,
        style: FontStyle,
    },
    Link {
        size: u32,
    },
    Directory {
        entry_count: u32,
    },
}

/// FNTG: Font glyphs info (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontGlyphInfo {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub value: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: i32,
}

impl FontGlyphInfo {
    pub const SIZE: usize = 32;

    fn from_bytes(b: &[u8]) -> Option<Self> {
        Some(FontGlyphInfo {
            x: i32_at(b, 0)?,
            y: i32_at(b, 4)?,
            width: i32_at(b, 8)?,
            height: i32_at(b, 12)?,
            value: i32_at(b, 16)?,
            offset_x: i32_at(b, 20)?,
            offset_y: i32_at(b, 24)?,
            advance_x: i32_at(b, 28)?,
        })
    }
}

/// Property `index` as an unsigned quantity.
fn count(props: &[i32], index: usize, what: &'static str) -> RresResult<u32> {
    let value = prop(props, index)?;
    u32::try_from(value).map_err(|_| RresError::Malformed(format!("negative {what}: {value}")))
}

fn prop(props: &[i32], index: usize) -> RresResult<i32> {
    props.get(index).copied().ok_or_else(|| {
        RresError::Malformed(format!(
            "expected at least {} properties, found {}",
            index + 1,
            props.len()
        ))
    })
}

/// Property `index` converted into one of the tag enums.
fn tag<T: TryFrom<u32, Error = RresError>>(
    props: &[i32],
    index: usize,
    what: &'static str,
) -> RresResult<T> {
    T::try_from(count(props, index, what)?)
}

impl Properties {
    /// Interprets `props` according to `data_type`. `Null` has no properties.
    pub fn parse(data_type: ResourceDataType, props: &[i32]) -> RresResult<Option<Self>> {
        let parsed = match data_type {
            ResourceDataType::Null => return Ok(None),
            ResourceDataType::Raw => Properties::Raw {
                size: count(props, 0, "size")?,
            },
            ResourceDataType::Text => Properties::Text {
                size: count(props, 0, "size")?,
                encoding: tag(props, 1, "text encoding")?,
                code_lang: tag(props, 2, "code language")?,
                culture_code: prop(props, 3)?,
            },
            ResourceDataType::Image => Properties::Image {
                width: count(props, 0, "width")?,
                height: count(props, 1, "height")?,
                format: tag(props, 2, "pixel format")?,
                mipmaps: count(props, 3, "mipmaps")?,
            },
            ResourceDataType::Wave => Properties::Wave {
                sample_count: count(props, 0, "sample count")?,
                sample_rate: count(props, 1, "sample rate")?,
                sample_size: count(props, 2, "sample size")?,
                channels: count(props, 3, "channels")?,
            },
            ResourceDataType::Vertex => Properties::Vertex {
                vertex_count: count(props, 0, "vertex count")?,
                attribute: tag(props, 1, "vertex attribute")?,
                component_count: count(props, 2, "component count")?,
                format: tag(props, 3, "vertex format")?,
            },
            ResourceDataType::FontGlyphs => Properties::FontGlyphs {
                base_size: count(props, 0, "base size")?,
                glyph_count: count(props, 1, "glyph count")?,
                glyph_padding: count(props, 2, "glyph padding")?,
                style: tag(props, 3, "font style")?,
            },
            ResourceDataType::Link => Properties::Link {
                size: count(props, 0, "size")?,
            },
            ResourceDataType::Directory => Properties::Directory {
                entry_count: count(props, 0, "entry count")?,
            },
        };
        Ok(Some(parsed))
    }
}

impl ResourceChunk {
    /// Typed properties of a valid chunk. `None` for chunks that carry no
    /// parsed properties (packed, corrupted, empty).
    pub fn properties(&self) -> RresResult<Option<Properties>> {
        if self.status != ChunkStatus::Valid {
            return Ok(None);
        }
        Properties::parse(self.data_type, &self.props)
    }

    /// Glyph table of a valid `FNTG` chunk.
    pub fn glyphs(&self) -> RresResult<Vec<FontGlyphInfo>> {
        let glyph_count = match self.properties()? {
            Some(Properties::FontGlyphs { glyph_count, .. }) => glyph_count as usize,
            _ => return Err(self.wrong_type("FNTG")),
        };

        let needed = glyph_count.saturating_mul(FontGlyphInfo::SIZE);
        if self.data.len() < needed {
            return Err(RresError::Malformed(format!(
                "{glyph_count} glyphs need {needed} bytes, chunk has {}",
                self.data.len()
            )));
        }

        Ok(self
            .data
            .chunks_exact(FontGlyphInfo::SIZE)
            .take(glyph_count)
            .filter_map(FontGlyphInfo::from_bytes)
            .collect())
    }

    /// Text of a valid `TEXT` chunk, bounded by the size property and the first NUL.
    pub fn text(&self) -> RresResult<&str> {
        let size = match self.properties()? {
            Some(Properties::Text { size, .. }) => size,
            _ => return Err(self.wrong_type("TEXT")),
        };
        self.sized_str(size)
    }

    /// Linked file path of a valid `LINK` chunk.
    pub fn link_path(&self) -> RresResult<&str> {
        let size = match self.properties()? {
            Some(Properties::Link { size }) => size,
            _ => return Err(self.wrong_type("LINK")),
        };
        self.sized_str(size)
    }

    fn sized_str(&self, size: u32) -> RresResult<&str> {
        let bytes = &self.data[..(size as usize).min(self.data.len())];
        let bytes = match bytes.iter().position(|&b| b == 0) {
            Some(nul) => &bytes[..nul],
            None => bytes,
        };
        std::str::from_utf8(bytes).map_err(|e| {
            RresError::Malformed(format!("{}: text is not utf8: {e}", self.info.type_str()))
        })
    }

    fn wrong_type(&self, expected: &str) -> RresError {
        RresError::Malformed(format!(
            "expected a valid {expected} chunk, found {} ({:?})",
            self.info.type_str(),
            self.status
        ))
    }
}
