use crate::domain::model::{PlayerStats, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn teams(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn rate_limit_wait(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PlayerStats>>;
    async fn transform(&self, data: Vec<PlayerStats>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
