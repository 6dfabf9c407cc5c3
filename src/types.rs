use crate::error::{RresError, RresResult};

/// Declares a fieldless tag enum with its numeric values and a checked
/// `TryFrom<u32>` conversion.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ident, $kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl TryFrom<u32> for $name {
            type Error = RresError;

            fn try_from(value: u32) -> RresResult<Self> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    n => Err(RresError::UnknownTag { kind: $kind, value: n }),
                }
            }
        }
    };
}

tag_enum! {
    /// Resource chunk data type, determines the properties and data of every chunk
    ResourceDataType(u32, "resource data type") {
        /// FourCC `NULL`, reserved for empty chunks
        Null = 0,
        /// FourCC `RAWD`
        Raw = 1,
        /// FourCC `TEXT`
        Text = 2,
        /// FourCC `IMGE`
        Image = 3,
        /// FourCC `WAVE`
        Wave = 4,
        /// FourCC `VRTX`
        Vertex = 5,
        /// FourCC `FNTG`
        FontGlyphs = 6,
        /// FourCC `LINK`, external file reference
        Link = 99,
        /// FourCC `CDIR`, central directory
        Directory = 100,
    }
}

impl ResourceDataType {
    /// Maps a FourCC tag to its data type. Unknown tags map to `Null`.
    pub fn from_fourcc(fourcc: &[u8; 4]) -> Self {
        match fourcc {
            b"RAWD" => ResourceDataType::Raw,
            b"TEXT" => ResourceDataType::Text,
            b"IMGE" => ResourceDataType::Image,
            b"WAVE" => ResourceDataType::Wave,
            b"VRTX" => ResourceDataType::Vertex,
            b"FNTG" => ResourceDataType::FontGlyphs,
            b"LINK" => ResourceDataType::Link,
            b"CDIR" => ResourceDataType::Directory,
            _ => ResourceDataType::Null,
        }
    }

    pub fn fourcc(self) -> [u8; 4] {
        match self {
            ResourceDataType::Null => *b"NULL",
            ResourceDataType::Raw => *b"RAWD",
            ResourceDataType::Text => *b"TEXT",
            ResourceDataType::Image => *b"IMGE",
            ResourceDataType::Wave => *b"WAVE",
            ResourceDataType::Vertex => *b"VRTX",
            ResourceDataType::FontGlyphs => *b"FNTG",
            ResourceDataType::Link => *b"LINK",
            ResourceDataType::Directory => *b"CDIR",
        }
    }
}

tag_enum! {
    /// Compression type for resource data
    CompressionType(u8, "compression type") {
        None = 0,
        Rle = 1,
        Deflate = 10,
        Lz4 = 20,
        Lzma2 = 30,
        Qoi = 40,
    }
}

tag_enum! {
    /// Encryption type for resource data
    EncryptionType(u8, "encryption type") {
        None = 0,
        Xor = 1,
        Des = 10,
        Tdes = 11,
        Idea = 20,
        Aes = 30,
        AesGcm = 31,
        Xtea = 40,
        Blowfish = 50,
        Rsa = 60,
        Salsa20 = 70,
        Chacha20 = 71,
        Xchacha20 = 72,
        Xchacha20Poly1305 = 73,
    }
}

tag_enum! {
    /// Text encoding for text resources
    TextEncoding(u8, "text encoding") {
        Utf8 = 0,
        Utf8Bom = 1,
        Utf16Le = 10,
        Utf16Be = 11,
    }
}

tag_enum! {
    /// Programming language for code resources
    CodeLang(u8, "code language") {
        PlainText = 0,
        C = 1,
        Cpp = 2,
        Cs = 3,
        Lua = 4,
        Js = 5,
        Python = 6,
        Rust = 7,
        Zig = 8,
        Odin = 9,
        Jai = 10,
        Gdscript = 11,
    }
}

tag_enum! {
    /// Pixel format for image data
    PixelFormat(u8, "pixel format") {
        Undefined = 0,
        UncompGrayscale = 1,
        UncompGrayAlpha = 2,
        UncompR5G6B5 = 3,
        UncompR8G8B8 = 4,
        UncompR5G5B5A1 = 5,
        UncompR4G4B4A4 = 6,
        UncompR8G8B8A8 = 7,
        UncompR32 = 8,
        UncompR32G32B32 = 9,
        UncompR32G32B32A32 = 10,
        CompDxt1Rgb = 11,
        CompDxt1Rgba = 12,
        CompDxt3Rgba = 13,
        CompDxt5Rgba = 14,
        CompEtc1Rgb = 15,
        CompEtc2Rgb = 16,
        CompEtc2EacRgba = 17,
        CompPvrtRgb = 18,
        CompPvrtRgba = 19,
        CompAstc4x4Rgba = 20,
        CompAstc8x8Rgba = 21,
    }
}

tag_enum! {
    /// Vertex attribute types for vertex data
    VertexAttribute(u8, "vertex attribute") {
        Position = 0,
        TexCoord1 = 10,
        TexCoord2 = 11,
        TexCoord3 = 12,
        TexCoord4 = 13,
        Normal = 20,
        Tangent = 30,
        Color = 40,
        Index = 100,
    }
}

tag_enum! {
    /// Component format for vertex attributes
    VertexFormat(u8, "vertex format") {
        UByte = 0,
        Byte = 1,
        UShort = 2,
        Short = 3,
        UInt = 4,
        Int = 5,
        HFloat = 6,
        Float = 7,
    }
}

tag_enum! {
    /// Font style for font glyphs
    FontStyle(u8, "font style") {
        Default = 0,
        Regular = 1,
        Bold = 2,
        Italic = 3,
    }
}
