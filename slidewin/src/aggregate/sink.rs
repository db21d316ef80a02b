use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::model::Sample;

/// Destination for derived samples.
pub trait Sink: fmt::Debug {
    fn write(&mut self, sample: Sample);
}

impl Sink for Vec<Sample> {
    fn write(&mut self, sample: Sample) {
        self.push(sample);
    }
}

/// In-memory sink. Clones share the same recorded samples, so a clone can be handed to an
/// aggregator while the original is kept to read results.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    samples: Rc<RefCell<Vec<Sample>>>,
}

impl MemorySink {
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.borrow().clone()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.samples.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.borrow().is_empty()
    }

    /// Removes and returns the recorded samples.
    pub fn take(&self) -> Vec<Sample> {
        self.samples.take()
    }

    pub fn clear(&self) {
        self.samples.borrow_mut().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, sample: Sample) {
        self.samples.borrow_mut().push(sample);
    }
}
