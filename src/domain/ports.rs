use crate::domain::model::{Alternative, DrugRecord, FilterCriteria, PathResult, Stats};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> &HashMap<String, String>;
    fn format(&self) -> &str;
    fn export_path(&self) -> &str;

    fn is_json(&self) -> bool {
        self.format() == "json"
    }
}

/// The six calls the drug service exposes. Views only talk to this trait.
#[async_trait]
pub trait DrugApi: Send + Sync {
    async fn get_stats(&self) -> Result<Stats>;
    async fn search_drugs(&self, query: &str) -> Result<Vec<String>>;
    async fn get_drug_details(&self, name: &str) -> Result<DrugRecord>;
    async fn get_shortest_path(&self, start: &str, end: &str) -> Result<PathResult>;
    async fn get_alternatives(&self, name: &str, top_n: Option<u32>) -> Result<Vec<Alternative>>;
    async fn filter_drugs(&self, criteria: &FilterCriteria) -> Result<Vec<DrugRecord>>;
}
