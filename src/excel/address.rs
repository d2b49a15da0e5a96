//! A1-style cell addressing

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
pub fn column_letter(n: u32) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// Zero-based (row, col) → `B12`-style address
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row + 1)
}
