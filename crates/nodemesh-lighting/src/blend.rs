// Each entry covers 8 blue levels.
const EMPHASE_BLUE_WHEN_DARK: [i32; 32] = [
    1, 4, 6, 6, 6, 5, 4, 3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// Indexed by night light / 16; artificial light reads slightly yellow.
const EMPHASE_YELLOW_WHEN_ARTIFICIAL: [i32; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 15, 15, 15];

/// Plain interpolation between the two banks; `ratio` is 0 (night) to 1000 (day).
#[inline]
pub fn blend_light_channels(day: u8, night: u8, ratio: u32) -> u8 {
    let r = ratio.min(1000);
    ((day as u32 * r + night as u32 * (1000 - r)) / 1000) as u8
}

/// Displayed (r, g, b) for a vertex lit by `day`/`night` at the given ratio.
/// Moonlight shifts towards blue and artificial light towards yellow.
pub fn final_color_blend(day: u8, night: u8, ratio: u32) -> (u8, u8, u8) {
    let mut rg = blend_light_channels(day, night, ratio) as i32;
    let diff = day as i32 - night as i32;
    let mut b = rg + diff / 13;
    rg -= diff / 23;
    b = b.clamp(0, 255);
    b += EMPHASE_BLUE_WHEN_DARK[(b / 8) as usize];
    rg += EMPHASE_YELLOW_WHEN_ARTIFICIAL[(night / 16) as usize];
    let rg = rg.clamp(0, 255) as u8;
    (rg, rg, b.clamp(0, 255) as u8)
}
