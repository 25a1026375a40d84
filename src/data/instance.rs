/// A labelled example: a class label and a flat feature vector whose length
/// must equal the network's declared input width.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub label: usize,
    pub features: Vec<f64>,
}

impl Instance {
    pub fn new(label: usize, features: Vec<f64>) -> Instance {
        Instance { label, features }
    }

    /// Flattens row-major 2-D image data into the 1-D feature vector the
    /// network consumes.
    pub fn from_rows(label: usize, rows: &[Vec<f64>]) -> Instance {
        let features = rows.iter().flatten().copied().collect();
        Instance::new(label, features)
    }
}
