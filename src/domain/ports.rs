use crate::domain::model::{ComparisonReport, Inputs};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Reads the whole file. A missing or unreadable file is
    /// `CompareError::InputUnavailable` naming `path`.
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Replaces the file, creating parent directories. Failure is
    /// `CompareError::OutputUnavailable`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn reference_path(&self) -> &str;
    fn candidate_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn load_inputs(&self) -> Result<Inputs>;
    async fn compare(&self, inputs: Inputs) -> Result<ComparisonReport>;
}
