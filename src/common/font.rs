//! ビットマップフォントと描画関数

/// 5x7 ビットマップフォント（0-9）
const DIGITS_5X7: [[u8; 7]; 10] = [
    [
        0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
    ], // 0
    [
        0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
    ], // 1
    [
        0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111,
    ], // 2
    [
        0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110,
    ], // 3
    [
        0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
    ], // 4
    [
        0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
    ], // 5
    [
        0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110,
    ], // 6
    [
        0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
    ], // 7
    [
        0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
    ], // 8
    [
        0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100,
    ], // 9
];

/// パラメータ表示用の記号と小文字 a-d
fn symbol_glyph(c: char) -> Option<[u8; 7]> {
    let glyph = match c {
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        '=' => [0, 0, 0b11111, 0, 0b11111, 0, 0],
        'a' => [0, 0, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'c' => [0, 0, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        _ => return None,
    };
    Some(glyph)
}

fn glyph(c: char) -> Option<[u8; 7]> {
    match c.to_digit(10) {
        Some(digit) => Some(DIGITS_5X7[digit as usize]),
        None => symbol_glyph(c),
    }
}

/// 1文字を描画（未対応の文字は空白扱い）
pub fn draw_char(
    buffer: &mut [u32],
    buffer_width: usize,
    buffer_height: usize,
    x: usize,
    y: usize,
    c: char,
    color: u32,
) {
    if let Some(glyph) = glyph(c) {
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    let px = x + col;
                    let py = y + row;
                    if px < buffer_width && py < buffer_height {
                        buffer[py * buffer_width + px] = color;
                    }
                }
            }
        }
    }
}

/// 文字列を描画
pub fn draw_text(
    buffer: &mut [u32],
    buffer_width: usize,
    buffer_height: usize,
    x: usize,
    y: usize,
    text: &str,
    color: u32,
) {
    let mut cursor_x = x;
    for c in text.chars() {
        draw_char(buffer, buffer_width, buffer_height, cursor_x, y, c, color);
        cursor_x += 6; // 文字幅5 + 間隔1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_minus_sign_row() {
        let mut buf = vec![0u32; 8 * 8];
        draw_char(&mut buf, 8, 8, 0, 0, '-', 1);
        let lit: Vec<usize> = (0..buf.len()).filter(|&i| buf[i] == 1).collect();
        assert_eq!(lit, vec![24, 25, 26, 27, 28]);
    }

    #[test]
    fn unknown_chars_draw_nothing() {
        let mut buf = vec![0u32; 16 * 8];
        draw_text(&mut buf, 16, 8, 0, 0, "x?", 1);
        assert!(buf.iter().all(|&p| p == 0));
    }

    #[test]
    fn clips_at_buffer_edge() {
        let mut buf = vec![0u32; 4 * 4];
        draw_text(&mut buf, 4, 4, 2, 2, "8", 7);
        assert!(buf.iter().any(|&p| p == 7));
    }
}
