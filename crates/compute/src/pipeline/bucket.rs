use hrlens_rules::{BracketDefinition, BracketSet};

/// Label of the interval containing `value`.
///
/// Intervals are `[low, high)` by default, `(low, high]` when
/// `right_inclusive`. Values outside every interval (and NaN) are `None`;
/// nothing is clamped into the first or last bucket.
pub fn bucketize<'a>(
    value: f64,
    boundaries: &[f64],
    labels: &'a [String],
    right_inclusive: bool,
) -> Option<&'a str> {
    if value.is_nan() {
        return None;
    }
    boundaries
        .windows(2)
        .zip(labels)
        .find(|(w, _)| {
            if right_inclusive {
                w[0] < value && value <= w[1]
            } else {
                w[0] <= value && value < w[1]
            }
        })
        .map(|(_, label)| label.as_str())
}

/// A bracket definition ready for repeated lookups.
#[derive(Debug, Clone)]
pub struct Bucketizer {
    boundaries: Vec<f64>,
    labels: Vec<String>,
    right_inclusive: bool,
}

impl Bucketizer {
    pub fn new(def: &BracketDefinition) -> Self {
        Self {
            boundaries: def.boundaries.clone(),
            labels: def.labels.clone(),
            right_inclusive: def.right_inclusive,
        }
    }

    pub fn label(&self, value: f64) -> Option<&str> {
        bucketize(value, &self.boundaries, &self.labels, self.right_inclusive)
    }
}

/// The three dashboard brackets.
#[derive(Debug, Clone)]
pub struct Brackets {
    pub age: Bucketizer,
    pub distance: Bucketizer,
    pub tenure: Bucketizer,
}

impl Brackets {
    pub fn new(set: &BracketSet) -> Self {
        Self {
            age: Bucketizer::new(&set.age),
            distance: Bucketizer::new(&set.distance),
            tenure: Bucketizer::new(&set.tenure),
        }
    }
}

impl Default for Brackets {
    fn default() -> Self {
        Self::new(&BracketSet::default())
    }
}
