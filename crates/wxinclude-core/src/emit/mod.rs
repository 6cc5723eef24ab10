//! C/C++ source emission.
//!
//! This module turns file contents into array declarations and provides
//! the boilerplate that surrounds them in the generated header.
//!
//! ## Array layout
//!
//! ```text
//! static const unsigned char logo_png[] = {
//!     0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00,
//! 0x0D
//! };
//! ```
//!
//! Rows hold [`COLUMNS`] elements. Every row starts on a new line indented
//! by four spaces, except a row whose first element is also the last one
//! of the array. An empty input produces `{};`.

mod scaffold;

use std::fmt::Write as FmtWrite;
use std::io::{self, Read};
use tracing::trace;

pub use scaffold::{guard_close, guard_open, helper_macros, TOOL_INFO};

/// Number of elements per row
pub const COLUMNS: u64 = 10;

/// Size of the read buffer used while streaming input
const BUFFER_SIZE: usize = 4096;

const ROW_INDENT: &str = "    ";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Writes the declaration for one array, reading `length` bytes from `input`
///
/// The input is read from its current position and left open. Returns
/// an `UnexpectedEof` error if the input ends before `length` bytes; in
/// that case `out` holds a partial declaration and the caller is expected
/// to discard it.
pub fn format_array<R: Read + ?Sized>(
    out: &mut String,
    name: &str,
    input: &mut R,
    length: u64,
    use_const: bool,
) -> io::Result<()> {
    write_declaration_start(out, name, use_const);

    let mut buffer = [0u8; BUFFER_SIZE];
    let mut index: u64 = 0;

    while index < length {
        let wanted = (length - index).min(BUFFER_SIZE as u64) as usize;
        let read = match input.read(&mut buffer[..wanted]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("input ended after {} of {} bytes", index, length),
                ))
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        for &byte in &buffer[..read] {
            write_element(out, byte, index, length);
            index += 1;
        }
    }

    out.push_str("};\n\n");
    trace!("Formatted {} bytes as '{}'", length, name);
    Ok(())
}

/// Formats an in-memory byte slice as an array declaration
pub fn format_bytes(name: &str, data: &[u8], use_const: bool) -> String {
    let mut out = String::with_capacity(estimated_len(name, data.len() as u64));
    let mut input = data;
    // Reading from a slice of exactly `length` bytes cannot fail
    let _ = format_array(&mut out, name, &mut input, data.len() as u64, use_const);
    out
}

/// Rough size of the declaration text for `length` bytes
///
/// Each element takes six characters (`0xAB, `) plus per-row overhead.
pub fn estimated_len(name: &str, length: u64) -> usize {
    let rows = length.div_ceil(COLUMNS);
    (name.len() + 40) + (length * 6 + rows * 5) as usize
}

fn write_declaration_start(out: &mut String, name: &str, use_const: bool) {
    let qualifier = if use_const { " const " } else { " " };
    // Writing to a String cannot fail
    let _ = write!(out, "static{}unsigned char {}[] = {{", qualifier, name);
}

#[inline]
fn write_element(out: &mut String, byte: u8, index: u64, length: u64) {
    let is_last = index == length - 1;
    let column = index % COLUMNS;

    if column == 0 {
        out.push('\n');
        if !is_last {
            out.push_str(ROW_INDENT);
        }
    }

    out.push_str("0x");
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);

    if is_last {
        out.push('\n');
    } else if column == COLUMNS - 1 {
        out.push(',');
    } else {
        out.push_str(", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex_tokens(text: &str) -> Vec<u8> {
        text.match_indices("0x")
            .filter_map(|(i, _)| text.get(i + 2..i + 4))
            .filter(|digits| digits.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)))
            .filter_map(|digits| u8::from_str_radix(digits, 16).ok())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_bytes("empty", &[], false), "static unsigned char empty[] = {};\n\n");
        assert_eq!(
            format_bytes("empty", &[], true),
            "static const unsigned char empty[] = {};\n\n"
        );
    }

    #[test]
    fn test_single_byte() {
        // The only element is also the last, so its row is not indented
        assert_eq!(format_bytes("one", &[0x0A], false), "static unsigned char one[] = {\n0x0A\n};\n\n");
    }

    #[test]
    fn test_partial_row() {
        assert_eq!(
            format_bytes("abc", b"abc", true),
            "static const unsigned char abc[] = {\n    0x61, 0x62, 0x63\n};\n\n"
        );
    }

    #[test]
    fn test_eleven_bytes() {
        let data: Vec<u8> = (1..=11).collect();
        let expected = "static const unsigned char logo_png[] = {\n    \
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A,\n\
            0x0B\n\
            };\n\n";
        assert_eq!(format_bytes("logo_png", &data, true), expected);
    }

    #[test]
    fn test_exact_row() {
        let data = [0xFFu8; 10];
        let expected = "static unsigned char full[] = {\n    \
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF\n\
            };\n\n";
        assert_eq!(format_bytes("full", &data, false), expected);
    }

    #[test]
    fn test_two_full_rows_and_a_tail() {
        let data: Vec<u8> = (0..23).collect();
        let text = format_bytes("rows", &data, false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "static unsigned char rows[] = {");
        assert!(lines[1].starts_with("    0x00, "));
        assert!(lines[1].ends_with("0x09,"));
        assert!(lines[2].starts_with("    0x0A, "));
        assert!(lines[2].ends_with("0x13,"));
        assert_eq!(lines[3], "    0x14, 0x15, 0x16");
        assert_eq!(lines[4], "};");
    }

    #[test]
    fn test_tokens_preserve_bytes_and_order() {
        for len in [0usize, 1, 9, 10, 11, 19, 20, 21, 255, 256, 4097, 9000] {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 % 256) as u8).collect();
            let text = format_bytes("t", &data, false);
            assert_eq!(hex_tokens(&text), data, "length {}", len);
        }
    }

    #[test]
    fn test_row_breaks() {
        for len in [1usize, 2, 9, 10, 11, 20, 21, 99, 100, 101, 4096, 4097] {
            let data = vec![0x5Au8; len];
            let text = format_bytes("t", &data, false);
            assert_eq!(text.matches(",\n").count(), (len - 1) / 10, "length {}", len);

            for line in text.lines().skip(1) {
                assert!(line.matches("0x").count() <= 10);
            }
        }
    }

    #[test]
    fn test_uppercase_zero_padded() {
        let text = format_bytes("t", &[0x00, 0x0f, 0xab, 0xff], false);
        assert!(text.contains("0x00, 0x0F, 0xAB, 0xFF\n"));
    }

    #[test]
    fn test_streams_from_reader_position() {
        let data = b"skipXYZ";
        let mut reader = &data[..];
        let mut skipped = [0u8; 4];
        reader.read_exact(&mut skipped).unwrap();

        let mut out = String::new();
        format_array(&mut out, "tail", &mut reader, 3, false).unwrap();
        assert_eq!(out, "static unsigned char tail[] = {\n    0x58, 0x59, 0x5A\n};\n\n");
    }

    #[test]
    fn test_short_input_is_an_error() {
        let mut reader = &b"ab"[..];
        let mut out = String::new();
        let err = format_array(&mut out, "short", &mut reader, 5, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_estimated_len_is_close() {
        let data = vec![0u8; 1000];
        let text = format_bytes("name", &data, true);
        let estimate = estimated_len("name", 1000);
        assert!(estimate >= text.len());
        assert!(estimate < text.len() * 2);
    }
}
