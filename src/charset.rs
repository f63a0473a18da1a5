//! # Charset Module
//!
//! Decodifica e codifica dei file con l'encoding configurato.
//!
//! ## Encoding supportati:
//! - `UTF-8` (default)
//! - `ISO-8859-1` (Latin-1)
//! - `US-ASCII`
//! - `UTF-16` (rileva il BOM in lettura, scrive big endian con BOM)
//! - `UTF-16BE`, `UTF-16LE`
//!
//! ## Comportamento:
//! - Input malformato viene sostituito con U+FFFD, mai errore
//! - Caratteri non rappresentabili in output diventano `?`
//! - Nomi non riconosciuti sono un errore di configurazione

use crate::error::CompressError;
use std::fmt;
use std::str::FromStr;

const UNMAPPABLE: u8 = b'?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Iso8859_1,
    UsAscii,
    Utf16,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    /// Decode raw file content into text
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                String::from_utf8_lossy(bytes).into_owned()
            }
            Self::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Self::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }

    /// Encode text for writing
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(UNMAPPABLE))
                .collect(),
            Self::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { UNMAPPABLE })
                .collect(),
            Self::Utf16 => {
                let mut out = vec![0xFE, 0xFF];
                out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                out
            }
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| unit([pair[0], pair[1]]));

    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

impl FromStr for Charset {
    type Err = CompressError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_ascii_uppercase().replace('_', "-");
        match normalized.as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Self::Iso8859_1),
            "US-ASCII" | "ASCII" => Ok(Self::UsAscii),
            "UTF-16" | "UTF16" => Ok(Self::Utf16),
            "UTF-16BE" | "UTF16BE" => Ok(Self::Utf16Be),
            "UTF-16LE" | "UTF16LE" => Ok(Self::Utf16Le),
            _ => Err(CompressError::UnsupportedCharset(name.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
