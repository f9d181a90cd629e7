use crate::core::comparator::ByteComparator;
use crate::core::encoder;
use crate::core::frame::FrameHeader;
use crate::core::{Bitmap, ComparisonReport, ConfigProvider, Inputs, Pipeline, Storage};
use crate::utils::error::Result;

/// Compares the reference and candidate files named by the configuration.
pub struct FilePairPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FilePairPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilePairPipeline<S, C> {
    async fn load_inputs(&self) -> Result<Inputs> {
        let loader = ByteComparator::new(&self.storage);

        // Both reads run together; the first failure wins and nothing is reported.
        let (reference, candidate) = tokio::try_join!(
            loader.load_bytes(self.config.reference_path()),
            loader.load_bytes(self.config.candidate_path()),
        )?;

        Ok(Inputs {
            reference,
            candidate,
        })
    }

    async fn compare(&self, inputs: Inputs) -> Result<ComparisonReport> {
        if inputs.reference.len() != inputs.candidate.len() {
            tracing::warn!(
                "Length mismatch: {} is {} bytes, {} is {} bytes",
                inputs.reference.source().display(),
                inputs.reference.len(),
                inputs.candidate.source().display(),
                inputs.candidate.len()
            );
        }

        Ok(ByteComparator::new(&self.storage).compare(&inputs.reference, &inputs.candidate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    pub width: usize,
    pub height: usize,
    pub payload_len: usize,
    pub total_len: usize,
}

/// Reads a 1bpp bitmap, encodes it and writes the framed result.
pub struct EncodePipeline<S: Storage> {
    storage: S,
    input_path: String,
    output_path: String,
}

impl<S: Storage> EncodePipeline<S> {
    pub fn new(storage: S, input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub async fn run(&self) -> Result<EncodeSummary> {
        let bytes = self.storage.read_file(&self.input_path).await?;
        tracing::info!("BMP file {} has length {}", self.input_path, bytes.len());

        let bitmap = Bitmap::parse(&bytes)?;
        tracing::info!(
            "Dimensions: {}x{}, stride {}, {}",
            bitmap.width(),
            bitmap.height(),
            bitmap.stride(),
            if bitmap.is_top_down() { "top-down" } else { "bottom-up" }
        );

        let payload = encoder::encode_bitmap(&bitmap)?;
        let framed = FrameHeader::for_bitmap(&bitmap).frame(&payload)?;
        self.storage.write_file(&self.output_path, &framed).await?;
        tracing::info!("Wrote {} ({} bytes)", self.output_path, framed.len());

        Ok(EncodeSummary {
            width: bitmap.width(),
            height: bitmap.height(),
            payload_len: payload.len(),
            total_len: framed.len(),
        })
    }
}
