//! Canonical hex+ASCII dump of a byte payload.

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Render `data` as a canonical dump, one line per 16 bytes:
///
/// ```text
/// 00000000  68 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21 0a        |hello, world!.|
/// ```
///
/// Every line ends with `\n`; an empty payload renders as an empty string.
pub fn hex_dump(data: &[u8]) -> String {
    let lines = data.len().div_ceil(BYTES_PER_LINE);
    let mut out = String::with_capacity(lines * 79);

    for (index, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "{:08x}  ", index * BYTES_PER_LINE);
        for column in 0..BYTES_PER_LINE {
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, "{:02x} ", byte);
                }
                None => out.push_str("   "),
            }
            if column == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(chunk.iter().map(|&byte| printable(byte)));
        out.push_str("|\n");
    }

    out
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7e).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload() {
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_short_payload_is_padded() {
        let dump = hex_dump(&[0x41, 0x42]);
        let expected = format!("00000000  41 42 {}|AB|\n", " ".repeat(44));
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_full_line() {
        let data: Vec<u8> = (0x30..0x40).collect();
        assert_eq!(
            hex_dump(&data),
            "00000000  30 31 32 33 34 35 36 37  38 39 3a 3b 3c 3d 3e 3f  |0123456789:;<=>?|\n"
        );
    }

    #[test]
    fn test_multiple_lines_have_offsets() {
        let data = vec![0u8; 20];
        let dump = hex_dump(&data);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  00 00"));
        assert!(lines[1].starts_with("00000010  00 00 00 00 "));
        assert!(lines[1].ends_with("|....|"));
    }

    #[test]
    fn test_non_printable_bytes_become_dots() {
        let dump = hex_dump(b"a\x00\x7f\xffz");
        assert!(dump.contains("61 00 7f ff 7a"));
        assert!(dump.ends_with("|a...z|\n"));
    }

    #[test]
    fn test_lines_have_equal_width_up_to_ascii_column() {
        let dump = hex_dump(&[1u8; 17]);
        let bars: Vec<usize> = dump.lines().map(|l| l.find('|').unwrap()).collect();
        assert_eq!(bars, vec![60, 60]);
    }
}
