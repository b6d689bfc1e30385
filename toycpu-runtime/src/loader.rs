//! Memory-image loader
//!
//! One word per line:
//!
//! ```text
//! ; comment            skipped, as are blank lines and `#` lines
//! 00001000000000000000000000000101   exactly 32 bits: an instruction word
//! 42                   decimal data word
//! -3                   negative: stored as a typed integer literal
//! 0x1F / 0b101         hex / binary data word
//! ```

use std::path::Path;

use crate::error::{Result, RuntimeError};
use toycpu_spec::encoding::parse_bit_string;
use toycpu_spec::TypedValue;

/// Parse image text into words
pub fn parse_image(text: &str) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        words.push(parse_word(line).map_err(|message| RuntimeError::Image {
            line: index + 1,
            message,
        })?);
    }
    Ok(words)
}

/// Read and parse an image file
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let text = std::fs::read_to_string(path)?;
    parse_image(&text)
}

fn parse_word(line: &str) -> std::result::Result<u32, String> {
    if let Some(word) = parse_bit_string(line) {
        return Ok(word);
    }

    let parsed = if let Some(hex) = line.strip_prefix("0x").or_else(|| line.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = line.strip_prefix("0b").or_else(|| line.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2)
    } else if line.starts_with('-') {
        let value: i32 = line
            .parse()
            .map_err(|_| format!("invalid negative number '{}'", line))?;
        return TypedValue::Integer(value)
            .to_word()
            .map_err(|err| err.to_string());
    } else {
        line.parse::<u32>()
    };

    parsed.map_err(|_| format!("expected a 32-bit word, found '{}'", line))
}
