#![deny(clippy::all)]

mod error;
pub use error::*;
mod options;
pub use options::*;
mod unit;
pub use unit::*;
mod utils;
pub use utils::*;
mod visitors;
pub use visitors::*;
mod transformer;
pub use transformer::*;
mod compilation;
pub use compilation::*;

pub use swc_core;
