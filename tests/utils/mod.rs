pub mod recorder;

// Re-export main utilities for use by test files
pub use recorder::CallRecorder;
