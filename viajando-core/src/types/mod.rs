//! 类型定义模块

mod platform;
mod trip;

pub use platform::Platform;
pub use trip::{Trip, TripDraft, WriteOutcome};
