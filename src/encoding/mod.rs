pub mod binary;
pub mod distributed;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which target encoding an experiment trains against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelEncoding {
    /// One output per class, the right one high and the rest low.
    Distributed,
    /// One output per bit of the label, little-endian.
    Binary,
}

impl fmt::Display for LabelEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelEncoding::Distributed => write!(f, "distributed"),
            LabelEncoding::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for LabelEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distributed" => Ok(LabelEncoding::Distributed),
            "binary" => Ok(LabelEncoding::Binary),
            other => Err(format!(
                "unknown encoding '{other}', expected 'distributed' or 'binary'"
            )),
        }
    }
}

/// An encoding choice paired with the class count: fixes the output-layer
/// width, the target vector for a label, and the decoding of an output
/// vector, so training and evaluation cannot drift apart.
#[derive(Debug, Clone, Copy)]
pub struct LabelCodec {
    encoding: LabelEncoding,
    classes: usize,
}

impl LabelCodec {
    pub fn new(encoding: LabelEncoding, classes: usize) -> LabelCodec {
        LabelCodec { encoding, classes }
    }

    pub fn encoding(&self) -> LabelEncoding {
        self.encoding
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Output-layer width this codec requires.
    pub fn target_width(&self) -> usize {
        match self.encoding {
            LabelEncoding::Distributed => self.classes,
            LabelEncoding::Binary => bits_for(self.classes),
        }
    }

    /// Target vector for `label`. Callers keep `label < classes`; the driver
    /// validates its datasets up front.
    pub fn encode(&self, label: usize) -> Vec<f64> {
        match self.encoding {
            LabelEncoding::Distributed => distributed::encode(label, self.classes),
            LabelEncoding::Binary => binary::encode(label, self.target_width()),
        }
    }

    /// Predicted label for a network output.
    pub fn decode(&self, output: &[f64]) -> usize {
        match self.encoding {
            LabelEncoding::Distributed => distributed::decode(output),
            LabelEncoding::Binary => binary::decode(output),
        }
    }
}

/// Bits needed to represent every label in `0..classes`.
fn bits_for(classes: usize) -> usize {
    (usize::BITS - (classes.max(2) - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_width_follows_the_encoding() {
        assert_eq!(LabelCodec::new(LabelEncoding::Distributed, 26).target_width(), 26);
        assert_eq!(LabelCodec::new(LabelEncoding::Binary, 26).target_width(), 5);
        assert_eq!(LabelCodec::new(LabelEncoding::Binary, 10).target_width(), 4);
        assert_eq!(LabelCodec::new(LabelEncoding::Binary, 2).target_width(), 1);
        assert_eq!(LabelCodec::new(LabelEncoding::Binary, 1).target_width(), 1);
    }

    #[test]
    fn codec_dispatches_to_its_encoding() {
        let codec = LabelCodec::new(LabelEncoding::Binary, 10);
        assert_eq!(codec.encode(6), vec![0.05, 0.95, 0.95, 0.05]);
        assert_eq!(codec.decode(&[0.95, 0.05, 0.05, 0.95]), 9);
        let codec = LabelCodec::new(LabelEncoding::Distributed, 4);
        assert_eq!(codec.encode(3), vec![0.05, 0.05, 0.05, 0.95]);
        assert_eq!(codec.decode(&[0.9, 0.1, 0.2, 0.3]), 0);
    }

    #[test]
    fn encoding_names_parse_and_serialize_the_same_way() {
        assert_eq!("binary".parse(), Ok(LabelEncoding::Binary));
        assert_eq!("distributed".parse(), Ok(LabelEncoding::Distributed));
        assert!("onehot".parse::<LabelEncoding>().is_err());
        let parsed: LabelEncoding = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(parsed, LabelEncoding::Binary);
        assert_eq!(serde_json::to_string(&LabelEncoding::Distributed).unwrap(), "\"distributed\"");
    }
}
