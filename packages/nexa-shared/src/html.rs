use std::fmt::Write;

fn needs_encoding(code: u32) -> bool {
    matches!(code, 0x22 | 0x26 | 0x27 | 0x3C | 0x3E)
        || code <= 0x20
        || (0x7F..=0xFF).contains(&code)
        || (0x0100..=0x2700).contains(&code)
}

/// Escapes markup-significant characters, controls, Latin-1 and most of the
/// BMP symbol ranges to decimal character references (`<` becomes `&#60;`).
///
/// A space is written as a non-breaking space, `&#160;`.
pub fn encode_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let code = u32::from(c);
        if needs_encoding(code) {
            let code = if code == 0x20 { 0xA0 } else { code };
            let _ = write!(out, "&#{code};");
        } else {
            out.push(c);
        }
    }
    out
}
