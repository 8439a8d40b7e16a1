//! Wire format of the cross controller.
//!
//! One UDP datagram per frame, holding a JSON array of screen rows, each an array of
//! shade levels 0-7:
//!
//! ```text
//! [[0,0,0,...,0],[0,0,2,...,7],...]
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::QuantizedFrame;
use crate::types::{SCREEN_SIZE, SHADE_LEVELS};

/// A frame as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameDatagram {
    pub rows: Vec<Vec<u8>>,
}

impl FrameDatagram {
    pub fn from_frame(frame: &QuantizedFrame) -> Self {
        Self {
            rows: frame.rows().map(<[u8]>::to_vec).collect(),
        }
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Parse and check a datagram: 48 rows of 48 levels below 8.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let datagram: Self =
            serde_json::from_slice(bytes).context("datagram is not a JSON matrix of levels")?;
        if datagram.rows.len() != SCREEN_SIZE {
            bail!("expected {} rows, got {}", SCREEN_SIZE, datagram.rows.len());
        }
        for (y, row) in datagram.rows.iter().enumerate() {
            if row.len() != SCREEN_SIZE {
                bail!("row {} has {} levels, expected {}", y, row.len(), SCREEN_SIZE);
            }
            if let Some(level) = row.iter().find(|&&l| l >= SHADE_LEVELS) {
                bail!("row {} holds level {}, expected below {}", y, level, SHADE_LEVELS);
            }
        }
        Ok(datagram)
    }
}

/// Encode a quantized frame straight to datagram bytes.
pub fn encode_frame(frame: &QuantizedFrame) -> serde_json::Result<Vec<u8>> {
    // Serializing borrowed rows avoids copying the frame.
    let rows: Vec<&[u8]> = frame.rows().collect();
    serde_json::to_vec(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BrightnessFrame;

    #[test]
    fn test_encode_is_a_matrix_of_levels() {
        let mut frame = BrightnessFrame::screen();
        frame.set(0, 2, 1.0);
        frame.set(1, 0, 0.25);
        let bytes = encode_frame(&frame.quantize()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 48);
        assert_eq!(rows[0].as_array().unwrap().len(), 48);
        assert_eq!(rows[0][2], 7);
        assert_eq!(rows[1][0], 2);
        assert!(bytes.starts_with(b"[[0,0,7,"));
    }

    #[test]
    fn test_decode_accepts_what_encode_produces() {
        let frame = BrightnessFrame::screen().quantize();
        let bytes = encode_frame(&frame).unwrap();
        let datagram = FrameDatagram::decode(&bytes).unwrap();
        assert_eq!(datagram, FrameDatagram::from_frame(&frame));
        assert_eq!(datagram.encode().unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        assert!(FrameDatagram::decode(b"{}").is_err());
        assert!(FrameDatagram::decode(b"[[0,1]]").is_err());

        let mut rows = vec![vec![0u8; 48]; 48];
        rows[3][3] = 8;
        let bytes = serde_json::to_vec(&rows).unwrap();
        assert!(FrameDatagram::decode(&bytes).is_err());
    }
}
