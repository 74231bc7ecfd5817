use crate::foundation::error::{BlockPartyError, BlockPartyResult};

/// Discrete grid cell. `x` grows to the right, `y` grows downward.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct GridPos {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl GridPos {
    /// The first square always lands here.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Construct a grid position.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Sum of absolute coordinate differences.
    pub fn manhattan(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours, in right/down/left/up order.
    pub fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y - 1),
        ]
    }
}

impl From<(i64, i64)> for GridPos {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// Opaque 8-bit RGB triple parsed from a `#RRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Parse `#RRGGBB` (hex digits are case-insensitive; the leading `#` is required).
    pub fn parse_hex(s: &str) -> BlockPartyResult<Self> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(BlockPartyError::validation(format!(
                "color \"{s}\" must start with '#'"
            )));
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BlockPartyError::validation(format!(
                "color \"{s}\" must be #RRGGBB"
            )));
        }

        fn hex_byte(pair: &str) -> BlockPartyResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| BlockPartyError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Return `true` when `s` is a well-formed `#RRGGBB` color.
pub fn is_hex_color(s: &str) -> bool {
    Rgb8::parse_hex(s).is_ok()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
