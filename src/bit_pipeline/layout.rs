//! Canvas planning module
//!
//! This module derives output canvas dimensions from the input size, the
//! requested aspect ratio and the alignment constraints.

pub mod arith;
mod dimensions;

pub use arith::{gcd, lcm, linear_map, next_multiple};
pub use dimensions::{Dimensions, plan_dimensions};
