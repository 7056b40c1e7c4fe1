pub mod dive;
pub mod report;
pub mod sample;
pub mod status;

pub use dive::*;
pub use report::*;
pub use sample::*;
pub use status::*;
