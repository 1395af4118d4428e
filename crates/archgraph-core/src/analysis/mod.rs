//! Graph analyses shared by rules and exporters.

pub mod cycles;
pub mod depth;

pub use cycles::{Cycle, CycleDetector, StronglyConnectedComponent};
pub use depth::{DepthAnalyzer, DepthReport, FileDepth};
