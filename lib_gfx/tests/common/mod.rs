#![allow(dead_code)]

/// 2x1 image: opaque red, half-transparent green.
pub const RED_GREEN: [u8; 8] = [
    255, 0, 0, 255, // Red
    0, 255, 0, 128, // Green
];

pub const RED_GREEN_PAYLOAD: [u8; 6] = [0xF8, 0x00, 0x07, 0xE0, 0xFF, 0x80];

pub const RED_GREEN_HEADER: [u8; 12] = [
    0x19, 0x0A, 0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00, 0x00,
];

/// Deterministic pseudo-random RGBA pixels.
pub fn noise(width: u32, height: u32, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..width as usize * height as usize * 4)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Horizontal gradient on every channel, alpha ramping down the rows.
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(2).saturating_sub(1).max(1)) as u8;
            let a = (y * 255 / height.max(2).saturating_sub(1).max(1)) as u8;
            data.extend_from_slice(&[v, v / 2, 255 - v, a]);
        }
    }
    data
}
