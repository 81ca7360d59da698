//! カラーマップと色変換関数

use std::fmt;
use std::str::FromStr;

/// 深い青 → クリーム → 赤 → 黒 の配色
const CLASSIC: [(f64, f64, f64); 10] = [
    (0.0, 0.0, 0.2), // 深い青
    (0.1, 0.2, 0.5), // 青
    (0.2, 0.5, 0.8), // 水色
    (0.5, 0.8, 0.9), // 薄い水色
    (1.0, 1.0, 0.8), // クリーム
    (1.0, 0.8, 0.3), // 黄色
    (1.0, 0.5, 0.1), // オレンジ
    (0.8, 0.2, 0.1), // 赤
    (0.5, 0.0, 0.2), // 暗い赤
    (0.0, 0.0, 0.0), // 黒
];

// 以下は matplotlib の同名カラーマップを等間隔に標本化した近似

const VIRIDIS: [(f64, f64, f64); 11] = [
    (0.267, 0.005, 0.329),
    (0.283, 0.141, 0.458),
    (0.254, 0.265, 0.530),
    (0.207, 0.372, 0.553),
    (0.164, 0.471, 0.558),
    (0.128, 0.567, 0.551),
    (0.135, 0.659, 0.518),
    (0.267, 0.749, 0.441),
    (0.478, 0.821, 0.318),
    (0.741, 0.873, 0.150),
    (0.993, 0.906, 0.144),
];

const INFERNO: [(f64, f64, f64); 11] = [
    (0.001, 0.000, 0.014),
    (0.087, 0.045, 0.224),
    (0.258, 0.039, 0.406),
    (0.416, 0.090, 0.433),
    (0.578, 0.148, 0.404),
    (0.735, 0.216, 0.330),
    (0.865, 0.317, 0.226),
    (0.954, 0.469, 0.099),
    (0.988, 0.645, 0.040),
    (0.964, 0.843, 0.273),
    (0.988, 0.998, 0.645),
];

const MAGMA: [(f64, f64, f64); 11] = [
    (0.001, 0.000, 0.014),
    (0.079, 0.054, 0.212),
    (0.232, 0.059, 0.437),
    (0.390, 0.100, 0.502),
    (0.550, 0.161, 0.506),
    (0.716, 0.215, 0.475),
    (0.868, 0.288, 0.409),
    (0.967, 0.439, 0.360),
    (0.994, 0.624, 0.427),
    (0.995, 0.812, 0.573),
    (0.987, 0.991, 0.750),
];

const PLASMA: [(f64, f64, f64); 11] = [
    (0.050, 0.030, 0.528),
    (0.255, 0.014, 0.615),
    (0.417, 0.001, 0.658),
    (0.562, 0.051, 0.642),
    (0.692, 0.165, 0.565),
    (0.798, 0.280, 0.470),
    (0.881, 0.393, 0.383),
    (0.949, 0.517, 0.295),
    (0.988, 0.652, 0.211),
    (0.988, 0.809, 0.145),
    (0.940, 0.975, 0.131),
];

const HOT: [(f64, f64, f64); 9] = [
    (0.000, 0.000, 0.000),
    (0.342, 0.000, 0.000),
    (0.685, 0.000, 0.000),
    (1.000, 0.026, 0.000),
    (1.000, 0.354, 0.000),
    (1.000, 0.682, 0.000),
    (1.000, 1.000, 0.016),
    (1.000, 1.000, 0.508),
    (1.000, 1.000, 1.000),
];

const COPPER: [(f64, f64, f64); 5] = [
    (0.000, 0.000, 0.000),
    (0.312, 0.195, 0.124),
    (0.625, 0.391, 0.249),
    (0.938, 0.586, 0.373),
    (1.000, 0.781, 0.498),
];

const BONE: [(f64, f64, f64); 5] = [
    (0.000, 0.000, 0.000),
    (0.219, 0.219, 0.304),
    (0.438, 0.486, 0.549),
    (0.652, 0.777, 0.777),
    (1.000, 1.000, 1.000),
];

const GRAY: [(f64, f64, f64); 2] = [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)];

/// 名前付きカラーマップ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMap {
    Viridis,
    Inferno,
    Magma,
    Plasma,
    Hot,
    Copper,
    Bone,
    Gray,
    Classic,
}

impl ColorMap {
    pub const ALL: [ColorMap; 9] = [
        ColorMap::Viridis,
        ColorMap::Inferno,
        ColorMap::Magma,
        ColorMap::Plasma,
        ColorMap::Hot,
        ColorMap::Copper,
        ColorMap::Bone,
        ColorMap::Gray,
        ColorMap::Classic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorMap::Viridis => "viridis",
            ColorMap::Inferno => "inferno",
            ColorMap::Magma => "magma",
            ColorMap::Plasma => "plasma",
            ColorMap::Hot => "hot",
            ColorMap::Copper => "copper",
            ColorMap::Bone => "bone",
            ColorMap::Gray => "gray",
            ColorMap::Classic => "classic",
        }
    }

    fn table(self) -> &'static [(f64, f64, f64)] {
        match self {
            ColorMap::Viridis => &VIRIDIS,
            ColorMap::Inferno => &INFERNO,
            ColorMap::Magma => &MAGMA,
            ColorMap::Plasma => &PLASMA,
            ColorMap::Hot => &HOT,
            ColorMap::Copper => &COPPER,
            ColorMap::Bone => &BONE,
            ColorMap::Gray => &GRAY,
            ColorMap::Classic => &CLASSIC,
        }
    }

    /// 切り替え用: 次のカラーマップ（末尾の次は先頭）
    pub fn next(self) -> ColorMap {
        let pos = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// t∈[0,1] を線形補間して RGB に変換（範囲外はクランプ）
    pub fn sample(self, t: f64) -> [u8; 3] {
        let table = self.table();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (table.len() - 1) as f64;
        let idx = (scaled as usize).min(table.len() - 2);
        let frac = scaled - idx as f64;

        let (r1, g1, b1) = table[idx];
        let (r2, g2, b2) = table[idx + 1];

        [
            ((r1 + (r2 - r1) * frac) * 255.0).round() as u8,
            ((g1 + (g2 - g1) * frac) * 255.0).round() as u8,
            ((b1 + (b2 - b1) * frac) * 255.0).round() as u8,
        ]
    }

    /// u32形式: 0xRRGGBB
    pub fn sample_u32(self, t: f64) -> u32 {
        rgb_to_u32(self.sample(t))
    }
}

pub fn rgb_to_u32([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

pub fn u32_to_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|m| m.name()).collect();
                format!("未知のカラーマップ '{}' (候補: {})", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_table() {
        assert_eq!(ColorMap::Gray.sample(0.0), [0, 0, 0]);
        assert_eq!(ColorMap::Gray.sample(1.0), [255, 255, 255]);
        assert_eq!(ColorMap::Gray.sample(0.5), [128, 128, 128]);
        assert_eq!(ColorMap::Classic.sample(1.0), [0, 0, 0]);
        assert_eq!(ColorMap::Hot.sample(1.0), [255, 255, 255]);
    }

    #[test]
    fn out_of_range_is_clamped() {
        for map in ColorMap::ALL {
            assert_eq!(map.sample(-3.0), map.sample(0.0));
            assert_eq!(map.sample(7.0), map.sample(1.0));
            assert_eq!(map.sample(f64::NAN), map.sample(0.0));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Viridis".parse::<ColorMap>(), Ok(ColorMap::Viridis));
        assert_eq!(" hot ".parse::<ColorMap>(), Ok(ColorMap::Hot));
        assert!("jet".parse::<ColorMap>().is_err());
        for map in ColorMap::ALL {
            assert_eq!(map.name().parse::<ColorMap>(), Ok(map));
        }
    }

    #[test]
    fn next_cycles_through_all() {
        let mut map = ColorMap::Viridis;
        for _ in 0..ColorMap::ALL.len() {
            map = map.next();
        }
        assert_eq!(map, ColorMap::Viridis);
    }

    #[test]
    fn u32_conversion() {
        assert_eq!(rgb_to_u32([0x12, 0x34, 0x56]), 0x123456);
        assert_eq!(u32_to_rgb(0xABCDEF), [0xAB, 0xCD, 0xEF]);
    }
}
