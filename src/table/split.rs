//! Field splitting for a single logical CSV row.

use super::RawRow;

/// Split one logical row into its fields.
///
/// Commas separate fields only outside a quoted section. Every `"` toggles the
/// quoted state and is dropped from the output, so `"Hello, World"` becomes
/// `Hello, World`. A doubled quote inside a quoted field is *not* treated as an
/// escape: it toggles twice and vanishes, which means a literal quote can never
/// appear in a field. The last field is always emitted, so a trailing comma
/// yields a trailing empty field.
pub fn split_fields(row: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in row.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
