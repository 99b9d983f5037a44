use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hue in degrees (0..360, 0 for greys), saturation and value in 0..=255.
    pub fn to_hsv(self) -> (i32, i32, i32) {
        let r = self.r as i32;
        let g = self.g as i32;
        let b = self.b as i32;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let v = max;
        if max == 0 || delta == 0 {
            return (0, 0, v);
        }
        let s = (255 * delta + max / 2) / max;
        let d = delta as f64;
        let h = if max == r {
            60.0 * ((g - b) as f64 / d)
        } else if max == g {
            60.0 * ((b - r) as f64 / d + 2.0)
        } else {
            60.0 * ((r - g) as f64 / d + 4.0)
        };
        let h = h.round() as i32;
        (h.rem_euclid(360), s, v)
    }

    pub fn from_hsv(h: i32, s: i32, v: i32) -> Self {
        let s = s.clamp(0, 255);
        let v = v.clamp(0, 255);
        if s == 0 {
            let v = v as u8;
            return Self::rgb(v, v, v);
        }
        let h = h.rem_euclid(360) as f64 / 60.0;
        let s = s as f64 / 255.0;
        let v = v as f64;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Shifts the hue by `step` degrees. A shift that would leave `0..=255`
    /// leaves the color untouched.
    pub fn shift_hue(self, step: i32) -> Self {
        let (h, s, v) = self.to_hsv();
        let shifted = h + step;
        if !(0..=255).contains(&shifted) {
            return self;
        }
        Self::from_hsv(shifted, s, v)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub xml_start_color: Color,
    pub xml_hue_step: i32,
    pub cpp_standard_color: Color,
    pub cpp_custom_color: Color,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            xml_start_color: Color::rgb(153, 238, 99),
            xml_hue_step: 30,
            cpp_standard_color: Color::rgb(140, 200, 240),
            cpp_custom_color: Color::rgb(180, 255, 150),
        }
    }

    pub fn muted() -> Self {
        Self {
            xml_start_color: Color::rgb(199, 210, 229),
            xml_hue_step: 20,
            cpp_standard_color: Color::rgb(238, 242, 248),
            cpp_custom_color: Color::rgb(215, 224, 240),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_round_trips_primaries() {
        for color in [
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
            Color::rgb(128, 128, 128),
        ] {
            let (h, s, v) = color.to_hsv();
            assert_eq!(Color::from_hsv(h, s, v), color);
        }
    }

    #[test]
    fn hue_step_moves_green_towards_cyan() {
        let start = Theme::classic().xml_start_color;
        let (h0, _, _) = start.to_hsv();
        let (h1, _, _) = start.shift_hue(30).to_hsv();
        assert!((h1 - h0 - 30).abs() <= 1, "{h0} -> {h1}");
    }

    #[test]
    fn hue_step_out_of_range_is_ignored() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.shift_hue(-30), red);
        let blue = Color::rgb(0, 0, 255);
        assert_eq!(blue.shift_hue(30), blue);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Color::rgb(153, 238, 99).to_hex(), "#99ee63");
    }
}
