use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel size of a test image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Scale both axes by `percent`, truncating toward zero.
    pub fn scaled_percent(&self, percent: u32) -> Self {
        let scale = |v: u32| (u64::from(v) * u64::from(percent) / 100) as u32;
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_margin_truncates_like_floor() {
        assert_eq!(Dimensions::new(1600, 1200).scaled_percent(80), Dimensions::new(1280, 960));
        assert_eq!(Dimensions::new(4000, 3000).scaled_percent(80), Dimensions::new(3200, 2400));
        assert_eq!(Dimensions::new(2500, 1875).scaled_percent(80), Dimensions::new(2000, 1500));
        // 0.8 * 1001 = 800.8
        assert_eq!(Dimensions::new(1001, 7).scaled_percent(80), Dimensions::new(800, 5));
    }

    #[test]
    fn area_does_not_overflow_u32() {
        assert_eq!(Dimensions::new(100_000, 100_000).area(), 10_000_000_000);
    }

    #[test]
    fn displays_as_width_x_height() {
        assert_eq!(Dimensions::new(800, 600).to_string(), "800x600");
    }
}
