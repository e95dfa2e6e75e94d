//! Tag colors and the paints derived from them.

use serde::{Deserialize, Serialize};

/// RGB color of a tag, as stored by the backend (`[r, g, b]`).
///
/// Pure black is reserved: a black tag is drawn without fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagColor(pub [u8; 3]);

impl TagColor {
    /// Color value meaning "draw this tag transparent".
    pub const TRANSPARENT: TagColor = TagColor([0, 0, 0]);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn is_transparent(&self) -> bool {
        *self == Self::TRANSPARENT
    }

    /// Paint used to fill this tag, with the given alpha.
    pub fn paint(&self, alpha: f32) -> Paint {
        if self.is_transparent() {
            return Paint::TRANSPARENT;
        }
        let [r, g, b] = self.0;
        Paint::new(r, g, b, alpha)
    }

    /// CSS-ready form of the color, used for swatches.
    pub fn formatted(&self, alpha: f32) -> String {
        self.paint(alpha).to_css()
    }
}

/// A fill or stroke color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in 0.0-1.0
    pub a: f32,
}

impl Paint {
    pub const TRANSPARENT: Paint = Paint {
        r: 255,
        g: 255,
        b: 255,
        a: 0.0,
    };

    pub const BLACK: Paint = Paint {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Format as a CSS `rgba()` color.
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_transparent() {
        assert!(TagColor::TRANSPARENT.paint(0.5).is_transparent());
        assert!(!TagColor::new(255, 0, 0).paint(0.5).is_transparent());
    }

    #[test]
    fn test_css_formatting() {
        assert_eq!(TagColor::new(255, 0, 10).formatted(0.5), "rgba(255,0,10,0.5)");
        assert_eq!(Paint::BLACK.to_css(), "rgba(0,0,0,1)");
        assert_eq!(Paint::TRANSPARENT.to_css(), "rgba(255,255,255,0)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Paint::new(1, 2, 3, 4.0).a, 1.0);
        assert_eq!(Paint::new(1, 2, 3, -1.0).a, 0.0);
    }

    #[test]
    fn test_deserialize_from_array() {
        let color: TagColor = serde_json::from_str("[12, 34, 56]").unwrap();
        assert_eq!(color, TagColor::new(12, 34, 56));
    }
}
