//! Loading of labelled glyph images from text files.
//!
//! Supported format, one instance per line:
//! - an uppercase letter naming the class (`A` = 0, `B` = 1, ..),
//! - a comma,
//! - comma-separated pixel values in `0..=16`.
//!
//! Pixel values are scaled to `[0, 1]` by dividing by 16. Blank lines are
//! skipped; anything else that does not fit the format is an error naming the
//! 1-based line, never a silent stop. Every instance in a file must have the
//! same feature width. An empty file loads as an empty list; whether that is
//! acceptable is the caller's call.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::data::instance::Instance;

/// Errors from reading a dataset file. Driver-side: the network core never
/// sees these.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Reads at most `max_instances` instances (all of them when `None`) from
/// `reader`.
pub fn load_instances<R: BufRead>(
    reader: R,
    max_instances: Option<usize>,
) -> Result<Vec<Instance>, DataError> {
    let mut instances: Vec<Instance> = Vec::new();
    let mut width: Option<usize> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let number = index + 1;

        let (label_field, pixels) = line.split_once(',').ok_or_else(|| DataError::Parse {
            line: number,
            reason: "expected a label field followed by pixel values".into(),
        })?;
        let label = parse_label(label_field, number)?;
        let features = pixels
            .split(',')
            .map(|cell| parse_pixel(cell, number))
            .collect::<Result<Vec<f64>, DataError>>()?;

        match width {
            None => width = Some(features.len()),
            Some(expected) if expected != features.len() => {
                return Err(DataError::Parse {
                    line: number,
                    reason: format!(
                        "feature count {} does not match the first instance's {}",
                        features.len(),
                        expected
                    ),
                });
            }
            Some(_) => {}
        }

        instances.push(Instance::new(label, features));
        if let Some(max) = max_instances {
            if instances.len() >= max {
                break;
            }
        }
    }

    Ok(instances)
}

/// [`load_instances`] over a file path.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    max_instances: Option<usize>,
) -> Result<Vec<Instance>, DataError> {
    let file = File::open(path)?;
    load_instances(BufReader::new(file), max_instances)
}

fn parse_label(field: &str, line: usize) -> Result<usize, DataError> {
    let field = field.trim();
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_uppercase() => {
            Ok(letter as usize - 'A' as usize)
        }
        _ => Err(DataError::Parse {
            line,
            reason: format!("'{field}' is not an uppercase letter label"),
        }),
    }
}

fn parse_pixel(cell: &str, line: usize) -> Result<f64, DataError> {
    let cell = cell.trim();
    cell.parse::<f64>()
        .map(|value| value / 16.0)
        .map_err(|_| DataError::Parse {
            line,
            reason: format!("'{cell}' is not a valid pixel value"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_labels_and_scales_pixels() {
        let data = "A,0,8,16\nB,16,8,0\n";
        let instances = load_instances(Cursor::new(data), None).unwrap();
        assert_eq!(
            instances,
            vec![
                Instance::new(0, vec![0.0, 0.5, 1.0]),
                Instance::new(1, vec![1.0, 0.5, 0.0]),
            ]
        );
    }

    #[test]
    fn skips_blank_lines() {
        let data = "A,4\n\n\nC,8\n";
        let instances = load_instances(Cursor::new(data), None).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].label, 2);
    }

    #[test]
    fn honors_max_instances() {
        let data = "A,4\nB,4\nC,4\n";
        let instances = load_instances(Cursor::new(data), Some(1)).unwrap();
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn rejects_a_non_letter_label_with_its_line_number() {
        let data = "A,1,2\n5,1,2\n";
        let err = load_instances(Cursor::new(data), None).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_a_bad_pixel_value() {
        let err = load_instances(Cursor::new("A,1,x\n"), None).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_a_line_without_pixels() {
        let err = load_instances(Cursor::new("A\n"), None).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_inconsistent_feature_widths() {
        let err = load_instances(Cursor::new("A,1,2\nB,1,2,3\n"), None).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_input_loads_as_an_empty_list() {
        let instances = load_instances(Cursor::new(""), None).unwrap();
        assert!(instances.is_empty());
    }
}
