//! Diagnostics attached to detection reports.
//!
//! Currently only wall-clock timing per pipeline stage; see [`TimingBreakdown`].

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};
