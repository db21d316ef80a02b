mod batch;
mod retention;
mod sliding;

pub use batch::BatchSlidingWindow;
pub use retention::RetentionStrategy;
pub use sliding::{SlidingWindow, SlidingWindowBuilder, DEFAULT_WINDOW_NAME};
