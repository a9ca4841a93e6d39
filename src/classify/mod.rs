//! Classifier boundary: detection types, the classifier seam, and
//! admission filters that gate what reaches the stabilization logic.

pub mod classifier;
pub mod detection;
pub mod filter;

pub use classifier::{Classifier, MockClassifier};
pub use detection::{Detection, FrameObservation};
pub use filter::{AllowListFilter, ConfidenceFilter};
