use std::fmt;

/// Straight (non-premultiplied) RGBA color with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit RGB and a normalized alpha.
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            a,
        )
    }

    /// True when every channel is finite and within `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Channels on the wire scale: r, g, b in `[0, 255]`, alpha in `[0, 1]`.
    pub fn to_wire(self) -> [f64; 4] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0, self.a]
    }

    /// Channels in `[0, 1]` as an array.
    pub fn channels(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Per-channel linear blend.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn mix(x: f64, y: f64, t: f64) -> f64 {
            x + (y - x) * t
        }

        Self {
            r: mix(a.r, b.r, t),
            g: mix(a.g, b.g, t),
            b: mix(a.b, b.b, t),
            a: mix(a.a, b.a, t),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_wire();
        write!(f, "rgba({}, {}, {}, {})", r.round(), g.round(), b.round(), a)
    }
}

/// Parse a CSS color string.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`, `hsl()`/`hsla()` and the
/// common CSS named colors. Returns `None` for anything else.
pub fn parse_css_color(input: &str) -> Option<Color> {
    let s = input.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = functional_args(&s, "rgba").or_else(|| functional_args(&s, "rgb")) {
        return parse_rgb_args(&args);
    }
    if let Some(args) = functional_args(&s, "hsla").or_else(|| functional_args(&s, "hsl")) {
        return parse_hsl_args(&args);
    }
    named_color(&s)
}

fn parse_hex(s: &str) -> Option<Color> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }

    let bytes = s.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|n| n * 17))
            .collect::<Option<_>>()?,
        6 | 8 => bytes
            .chunks(2)
            .map(|pair| Some(nibble(pair[0])? * 16 + nibble(pair[1])?))
            .collect::<Option<_>>()?,
        _ => return None,
    };

    let a = channels.get(3).map_or(1.0, |&a| f64::from(a) / 255.0);
    Some(Color::from_rgb8(channels[0], channels[1], channels[2], a))
}

fn functional_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start().strip_prefix('(')?;
    let inner = inner.strip_suffix(')')?;
    Some(inner.split(',').map(|p| p.trim().to_owned()).collect())
}

fn parse_component(s: &str, percent_scale: f64) -> Option<f64> {
    match s.strip_suffix('%') {
        Some(p) => p.trim().parse::<f64>().ok().map(|v| v / 100.0 * percent_scale),
        None => s.parse::<f64>().ok(),
    }
    .filter(|v| v.is_finite())
}

fn parse_alpha(args: &[String], idx: usize) -> Option<f64> {
    match args.get(idx) {
        Some(a) => parse_component(a, 1.0).map(|a| a.clamp(0.0, 1.0)),
        None => Some(1.0),
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Color> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let mut rgb = [0.0; 3];
    for (slot, arg) in rgb.iter_mut().zip(args) {
        *slot = parse_component(arg, 255.0)?.clamp(0.0, 255.0) / 255.0;
    }
    let a = parse_alpha(args, 3)?;
    Some(Color::rgba(rgb[0], rgb[1], rgb[2], a))
}

fn parse_hsl_args(args: &[String]) -> Option<Color> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let h = args[0].parse::<f64>().ok().filter(|h| h.is_finite())?;
    let s = parse_component(&args[1], 1.0)?;
    let l = parse_component(&args[2], 1.0)?;
    let a = parse_alpha(args, 3)?;
    Some(hsla_to_rgba(h, s, l, a))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

fn named_color(name: &str) -> Option<Color> {
    if name == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, rgb)| {
            let [_, r, g, b] = rgb.to_be_bytes();
            Color::from_rgb8(r, g, b, 1.0)
        })
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("orange", 0xffa500),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("silver", 0xc0c0c0),
    ("lightgray", 0xd3d3d3),
    ("lightgrey", 0xd3d3d3),
    ("darkgray", 0xa9a9a9),
    ("darkgrey", 0xa9a9a9),
    ("dimgray", 0x696969),
    ("gainsboro", 0xdcdcdc),
    ("whitesmoke", 0xf5f5f5),
    ("ivory", 0xfffff0),
    ("beige", 0xf5f5dc),
    ("wheat", 0xf5deb3),
    ("tan", 0xd2b48c),
    ("brown", 0xa52a2a),
    ("maroon", 0x800000),
    ("purple", 0x800080),
    ("fuchsia", 0xff00ff),
    ("magenta", 0xff00ff),
    ("pink", 0xffc0cb),
    ("lime", 0x00ff00),
    ("olive", 0x808000),
    ("navy", 0x000080),
    ("teal", 0x008080),
    ("aqua", 0x00ffff),
    ("cyan", 0x00ffff),
    ("skyblue", 0x87ceeb),
    ("lightblue", 0xadd8e6),
    ("steelblue", 0x4682b4),
    ("royalblue", 0x4169e1),
    ("darkblue", 0x00008b),
    ("darkgreen", 0x006400),
    ("forestgreen", 0x228b22),
    ("seagreen", 0x2e8b57),
    ("lightgreen", 0x90ee90),
    ("khaki", 0xf0e68c),
    ("gold", 0xffd700),
    ("coral", 0xff7f50),
    ("salmon", 0xfa8072),
    ("tomato", 0xff6347),
    ("crimson", 0xdc143c),
    ("darkred", 0x8b0000),
    ("indigo", 0x4b0082),
    ("violet", 0xee82ee),
    ("orchid", 0xda70d6),
    ("lavender", 0xe6e6fa),
    ("linen", 0xfaf0e6),
    ("honeydew", 0xf0fff0),
    ("azure", 0xf0ffff),
    ("aliceblue", 0xf0f8ff),
    ("mintcream", 0xf5fffa),
    ("snow", 0xfffafa),
    ("chocolate", 0xd2691e),
    ("sienna", 0xa0522d),
    ("peru", 0xcd853f),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
];

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
