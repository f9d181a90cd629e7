pub mod comparator;
pub mod encoder;
pub mod engine;
pub mod frame;
pub mod pipeline;

pub use crate::domain::bitmap::Bitmap;
pub use crate::domain::model::{ByteEntry, ByteSequence, ComparisonReport, Inputs};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
