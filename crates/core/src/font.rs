//! Bitmap font used for the HUD and the game-over caption.
//!
//! Glyphs are small 0/1 matrices keyed by character. A built-in 3x5 table covers the
//! characters the game prints; a JSON resource of the same shape can replace it:
//!
//! ```json
//! { "A": [[1,1,1],[1,0,1],[1,1,1],[1,0,1],[1,0,1]], ":": [[0],[1],[0],[1],[0]] }
//! ```

use std::collections::HashMap;

use anyhow::{bail, Context, Result};

/// One character of the bitmap font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Glyph {
    /// Build a glyph from rows of 0/1 values. Rows must have equal, non-zero length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            bail!("glyph must have at least one row and one column");
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            bail!("glyph row {} has {} columns, expected {}", bad, rows[bad].len(), width);
        }
        let bits = rows.iter().flatten().map(|&b| b != 0).collect();
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.bits[row * self.width + col]
    }
}

/// Character-keyed glyph table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
}

const BUILTIN: &[(char, [&str; 5])] = &[
    ('A', ["111", "101", "111", "101", "101"]),
    ('C', ["111", "100", "100", "100", "111"]),
    ('E', ["111", "100", "110", "100", "111"]),
    ('G', ["111", "100", "100", "101", "111"]),
    ('N', ["110", "101", "101", "101", "101"]),
    ('M', ["10001", "11011", "10101", "10001", "10001"]),
    ('O', ["111", "101", "101", "101", "111"]),
    ('P', ["111", "101", "111", "100", "100"]),
    ('R', ["111", "101", "110", "101", "101"]),
    ('S', ["111", "100", "111", "001", "111"]),
    ('T', ["111", "010", "010", "010", "010"]),
    ('V', ["101", "101", "101", "101", "010"]),
    ('X', ["101", "101", "010", "101", "101"]),
    ('0', ["111", "101", "101", "101", "111"]),
    ('1', ["010", "110", "010", "010", "111"]),
    ('2', ["111", "001", "111", "100", "111"]),
    ('3', ["111", "001", "011", "001", "111"]),
    ('4', ["101", "101", "111", "001", "001"]),
    ('5', ["111", "100", "111", "001", "111"]),
    ('6', ["111", "100", "111", "101", "111"]),
    ('7', ["111", "001", "010", "100", "100"]),
    ('8', ["111", "101", "111", "101", "111"]),
    ('9', ["111", "101", "111", "001", "111"]),
    (':', ["0", "1", "0", "1", "0"]),
    (' ', ["0", "0", "0", "0", "0"]),
];

impl Font {
    /// The built-in 3x5 table.
    pub fn builtin() -> Self {
        let glyphs = BUILTIN
            .iter()
            .map(|(ch, rows)| {
                let bits = rows
                    .iter()
                    .flat_map(|r| r.chars().map(|c| c == '1'))
                    .collect();
                let glyph = Glyph {
                    width: rows[0].len(),
                    height: rows.len(),
                    bits,
                };
                (*ch, glyph)
            })
            .collect();
        Self { glyphs }
    }

    /// Parse a font from a JSON object mapping single characters to 0/1 matrices.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Vec<u8>>> =
            serde_json::from_str(json).context("font JSON is not a map of glyph matrices")?;

        let mut glyphs = HashMap::with_capacity(raw.len());
        for (key, rows) in raw {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                bail!("font key {:?} must be exactly one character", key);
            };
            let glyph = Glyph::from_rows(&rows).with_context(|| format!("glyph {:?}", ch))?;
            glyphs.insert(ch, glyph);
        }
        Ok(Self { glyphs })
    }

    /// Load a font resource from disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading font {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Horizontal distance the cursor moves after drawing `ch` at `scale`.
    ///
    /// Characters without a glyph take no space.
    pub fn advance(&self, ch: char, scale: usize) -> usize {
        self.glyph(ch).map_or(0, |g| scale * (g.width() + 1))
    }

    /// Total advance of a string at `scale`.
    pub fn text_width(&self, text: &str, scale: usize) -> usize {
        text.chars().map(|ch| self.advance(ch, scale)).sum()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::builtin()
    }
}
