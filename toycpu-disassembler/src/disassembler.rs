//! Memory image listing

use crate::decoder::{decode, decode_literal};
use crate::formatter::format;

/// One decoded line of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingLine {
    pub address: u32,
    pub word: u32,
    pub text: String,
    pub error: Option<String>,
}

/// Decode every word of an image placed at `base`
pub fn listing(words: &[u32], base: u32) -> Vec<ListingLine> {
    words
        .iter()
        .zip(base..)
        .map(|(&word, address)| {
            let (text, error) = match decode(word) {
                Ok(inst) => (format(&inst), decode_literal(&inst).err().map(|e| e.to_string())),
                Err(e) => (String::new(), Some(e.to_string())),
            };
            ListingLine {
                address,
                word,
                text,
                error,
            }
        })
        .collect()
}

/// Disassemble a memory image into annotated assembly text
pub fn disassemble(words: &[u32], base: u32) -> String {
    let mut output = String::new();

    output.push_str("; toycpu disassembly\n");
    output.push_str(&format!("; Base address: {}\n", base));
    output.push_str(&format!("; {} words\n", words.len()));
    output.push('\n');

    for line in listing(words, base) {
        // Address and hex encoding
        output.push_str(&format!("{:5}:  {:08X}  {}", line.address, line.word, line.text));

        if let Some(err) = line.error {
            output.push_str(&format!("  ; ERROR: {}", err));
        }

        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_simple() {
        let code = vec![
            0x0800_0005, // LOAD R0, [5]
            0xF800_0000, // HALT
        ];

        let asm = disassemble(&code, 0);
        assert!(asm.contains("LOAD R0, [5]"));
        assert!(asm.contains("HALT"));
        assert!(asm.contains("; 2 words"));
    }

    #[test]
    fn test_listing_addresses_start_at_base() {
        let lines = listing(&[0, 0, 0], 100);
        let addrs: Vec<u32> = lines.iter().map(|l| l.address).collect();
        assert_eq!(addrs, vec![100, 101, 102]);
    }

    #[test]
    fn test_bad_literal_is_marked() {
        // NOP with reserved tag 6
        let word = 6 << 21;
        let asm = disassemble(&[word], 0);
        assert!(asm.contains("ERROR"));
        assert!(asm.contains("type tag"));
    }
}
