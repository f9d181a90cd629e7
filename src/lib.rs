pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, EncodeArgs};

pub use config::{local::LocalStorage, toml_config::TomlConfig};
pub use core::{
    comparator::ByteComparator,
    engine::CompareEngine,
    frame::FrameHeader,
    pipeline::{EncodePipeline, EncodeSummary, FilePairPipeline},
};
pub use domain::bitmap::Bitmap;
pub use domain::model::{ByteEntry, ByteSequence, ComparisonReport, Inputs};
pub use utils::error::{CompareError, Result};
