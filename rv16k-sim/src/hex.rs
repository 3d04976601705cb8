//! Parsing of the `-t`/`-d` seed strings: whitespace-separated 2-digit hex
//! bytes, e.g. `"08 78 FF FF"`.

pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, String> {
    text.split_whitespace()
        .map(|token| {
            u8::from_str_radix(token, 16)
                .map_err(|_| format!("invalid hex byte {:?} in seed string", token))
        })
        .collect()
}
