use std::io::Write;

/// A colour for label text and frames, in one of the PDF device colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Emit the operator that sets this as the fill (text) colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} rg\n"),
            Colour::Grey { g } => write!(w, "{g} g\n"),
        }
    }

    /// Emit the operator that sets this as the stroke (line) colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_stroke<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} RG\n"),
            Colour::Grey { g } => write!(w, "{g} G\n"),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.8 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_stroke_operators() {
        let mut out = Vec::new();
        colours::BLACK.write_fill(&mut out).unwrap();
        Colour::from((1.0f32, 0.0, 0.5)).write_stroke(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 g\n1 0 0.5 RG\n");
    }

    #[test]
    fn byte_constructor_scales() {
        assert_eq!(
            Colour::new_rgb_bytes(0, 255, 0),
            Colour::RGB {
                r: 0.0,
                g: 1.0,
                b: 0.0
            }
        );
    }
}
