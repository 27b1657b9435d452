//! Color helpers: hexadecimal parsing, a tiny named palette and the normalized sine used to
//! animate colors and camera parameters.

/// Linear RGB color with channels in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
  pub r: f32,
  pub g: f32,
  pub b: f32,
}

impl Rgb {
  pub const fn new(r: f32, g: f32, b: f32) -> Self {
    Rgb { r, g, b }
  }

  /// Parse a `"RRGGBB"` string.
  ///
  /// Returns `None` if the string is not exactly six characters long. Characters that are not
  /// hexadecimal digits count as `0`.
  pub fn from_hex(hex: &str) -> Option<Self> {
    let bytes = hex.as_bytes();

    if bytes.len() != 6 {
      return None;
    }

    let channel = |hi: u8, lo: u8| ((hex_digit(hi) << 4) | hex_digit(lo)) as f32 / 255.;

    Some(Rgb {
      r: channel(bytes[0], bytes[1]),
      g: channel(bytes[2], bytes[3]),
      b: channel(bytes[4], bytes[5]),
    })
  }

  /// Build a color out of a packed `0xRRGGBB` value; the upper byte is ignored.
  pub fn from_packed(hex: u32) -> Self {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.;

    Rgb {
      r: channel(16),
      g: channel(8),
      b: channel(0),
    }
  }

  pub fn to_array(self) -> [f32; 3] {
    [self.r, self.g, self.b]
  }

  /// Same color with an alpha channel, as expected by clear colors.
  pub fn with_alpha(self, a: f32) -> [f32; 4] {
    [self.r, self.g, self.b, a]
  }
}

impl From<Rgb> for [f32; 3] {
  fn from(rgb: Rgb) -> Self {
    rgb.to_array()
  }
}

/// Overwrite `out` with the color encoded in `hex`.
///
/// A malformed input (length other than six) leaves `out` untouched.
pub fn hex_to_rgb(hex: &str, out: &mut Rgb) {
  if let Some(rgb) = Rgb::from_hex(hex) {
    *out = rgb;
  }
}

fn hex_digit(c: u8) -> u32 {
  match c {
    b'0'..=b'9' => (c - b'0') as u32,
    b'a'..=b'f' => (c - b'a' + 10) as u32,
    b'A'..=b'F' => (c - b'A' + 10) as u32,
    _ => 0,
  }
}

/// Sine remapped from [-1, 1] to [0, 1].
pub fn sin_pos(x: f32) -> f32 {
  (x.sin() + 1.) * 0.5
}

/// Linear interpolation between `a` and `b`.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
  a + (b - a) * t
}

/// Named colors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Palette {
  Red,
  Green,
  Blue,
  Yellow,
  Magenta,
  Cyan,
  White,
  Gray,
}

impl Palette {
  pub fn rgb(self) -> Rgb {
    match self {
      Palette::Red => Rgb::new(1., 0., 0.),
      Palette::Green => Rgb::new(0., 1., 0.),
      Palette::Blue => Rgb::new(0., 0., 1.),
      Palette::Yellow => Rgb::new(1., 1., 0.),
      Palette::Magenta => Rgb::new(1., 0., 1.),
      Palette::Cyan => Rgb::new(0., 1., 1.),
      Palette::White => Rgb::new(1., 1., 1.),
      Palette::Gray => Rgb::new(0.5, 0.5, 0.5),
    }
  }
}

impl From<Palette> for Rgb {
  fn from(color: Palette) -> Self {
    color.rgb()
  }
}
