use crate::error::{AssetError, Result};

pub const PALETTE_COLORS: usize = 256;
pub const PALETTE_PATH: &str = "gfx/palette.lmp";

/// The 256 colour palette every 8-bit texture indexes into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub colors: [[u8; 3]; PALETTE_COLORS],
}

impl Default for Palette {
    /// A grey ramp, for when the real palette is not at hand.
    fn default() -> Self {
        let mut colors = [[0; 3]; PALETTE_COLORS];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = [i as u8; 3];
        }
        Self { colors }
    }
}

impl Palette {
    /// Parse a `palette.lmp`: 256 RGB triples, 768 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != PALETTE_COLORS * 3 {
            return Err(AssetError::Format(format!(
                "palette is {} bytes instead of {}",
                data.len(),
                PALETTE_COLORS * 3
            )));
        }

        let mut colors = [[0; 3]; PALETTE_COLORS];
        for (color, rgb) in colors.iter_mut().zip(data.chunks_exact(3)) {
            color.copy_from_slice(rgb);
        }
        Ok(Self { colors })
    }

    pub fn rgba(&self, index: u8) -> [u8; 4] {
        let [r, g, b] = self.colors[index as usize];
        [r, g, b, 255]
    }
}

#[cfg(test)]
mod palette_tests {
    use super::Palette;

    #[test]
    fn reads_rgb_triples() {
        let data: Vec<u8> = (0..768).map(|i| (i % 256) as u8).collect();
        let palette = Palette::from_bytes(&data).unwrap();
        assert_eq!(palette.colors[0], [0, 1, 2]);
        assert_eq!(palette.rgba(1), [3, 4, 5, 255]);
    }

    #[test]
    fn wrong_length() {
        assert!(Palette::from_bytes(&[0; 767]).unwrap_err().is_format());
    }
}
