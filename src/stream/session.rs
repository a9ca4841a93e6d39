//! Live session binding a classifier to the streaming aggregator.
//!
//! Classification runs outside the aggregator's critical section; counts
//! are only touched once detections are in hand. A failed inference drops
//! that frame and leaves the aggregator untouched.

use crate::classify::classifier::Classifier;
use crate::stream::aggregator::TimeWindowAggregator;
use crate::stream::clock::{Clock, SystemClock};
use std::sync::Arc;

/// A streaming session that classifies frames and feeds the aggregator.
pub struct StreamSession<C: Clock = SystemClock> {
    classifier: Arc<dyn Classifier>,
    aggregator: TimeWindowAggregator<C>,
}

impl<C: Clock> StreamSession<C> {
    /// Creates a session from a classifier and an aggregator.
    pub fn new(classifier: Arc<dyn Classifier>, aggregator: TimeWindowAggregator<C>) -> Self {
        Self {
            classifier,
            aggregator,
        }
    }

    /// Classifies one frame and returns the currently reported label.
    ///
    /// A classifier failure is recoverable: the frame is dropped and the
    /// previous report stands.
    pub fn process_frame(&self, frame: &[u8]) -> String {
        match self.classifier.classify(frame) {
            Ok(detections) => self.aggregator.record_frame(&detections),
            Err(_) => self.aggregator.current_label(),
        }
    }

    /// Returns the underlying aggregator.
    pub fn aggregator(&self) -> &TimeWindowAggregator<C> {
        &self.aggregator
    }
}
