//! Label mapping from numeric class to a human-readable name.

const SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Binary diagnosis: class `1` is malignant, anything else benign.
pub fn diagnosis_for(label: i64) -> &'static str {
    if label == 1 {
        "malignant"
    } else {
        "benign"
    }
}

/// Iris species for a class index, `None` outside `0..=2`.
pub fn species_for(label: i64) -> Option<&'static str> {
    usize::try_from(label)
        .ok()
        .and_then(|index| SPECIES.get(index).copied())
}
