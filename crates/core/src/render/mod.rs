//! Visual output for grids. Only SVG for now, behind the `svg` feature.

pub mod svg;

use derive_more::Display;

/// An RGB color, with one byte per channel
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "{}", "self.to_html()")]
pub struct Color3 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color3 {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert to an HTML color code, e.g. `#ff00a0`
    pub fn to_html(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(Color3::new(255, 0, 160).to_html(), "#ff00a0");
        assert_eq!(Color3::new(1, 2, 3).to_string(), "#010203");
    }
}
