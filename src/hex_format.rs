//! Fixed-width hexadecimal rendering of 64-bit flag values.
//!
//! Values render as four groups of four lowercase hex digits, most
//! significant group first: `0000 0000 0000 0001`.

use std::fmt;

/// Length in bytes of a rendered value, separators included.
pub const HEX_WIDTH: usize = 19;

/// Writes `value` into `out` as four space-separated 16-bit groups.
pub fn write_hex<W: fmt::Write + ?Sized>(out: &mut W, value: u64) -> fmt::Result {
    write!(
        out,
        "{:04x} {:04x} {:04x} {:04x}",
        (value >> 48) & 0xffff,
        (value >> 32) & 0xffff,
        (value >> 16) & 0xffff,
        value & 0xffff,
    )
}

/// Renders `value` as four space-separated 16-bit hex groups.
///
/// # Examples
///
/// ```
/// use resolver_flags::to_hex;
///
/// assert_eq!(to_hex(1), "0000 0000 0000 0001");
/// assert_eq!(to_hex(u64::MAX), "ffff ffff ffff ffff");
/// ```
#[must_use]
pub fn to_hex(value: u64) -> String {
    let mut out = String::with_capacity(HEX_WIDTH);
    // Writing into a String cannot fail.
    let _ = write_hex(&mut out, value);
    out
}
