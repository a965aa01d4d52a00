use std::sync::Arc;

use crate::constants::DEFAULT_MAX_BLOCKS;
use crate::rewrite::{PassthroughRewriter, Rewriter};
use crate::scoring::{BatchScheduler, TextScorer};

/// Shared, read-only state handed to every handler.
///
/// The scheduler (and the model inside it) is built once at startup.
pub struct HandlerState<S: TextScorer + 'static> {
    pub scheduler: Arc<BatchScheduler<S>>,

    pub rewriter: Arc<dyn Rewriter>,

    pub max_blocks: usize,
}

impl<S: TextScorer + 'static> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Arc::clone(&self.scheduler),
            rewriter: Arc::clone(&self.rewriter),
            max_blocks: self.max_blocks,
        }
    }
}

impl<S: TextScorer + 'static> HandlerState<S> {
    pub fn new(scheduler: BatchScheduler<S>) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
            rewriter: Arc::new(PassthroughRewriter),
            max_blocks: DEFAULT_MAX_BLOCKS,
        }
    }

    pub fn with_rewriter(mut self, rewriter: Arc<dyn Rewriter>) -> Self {
        self.rewriter = rewriter;
        self
    }

    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }
}
