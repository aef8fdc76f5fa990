use crate::adapters::payload::parse_teams;
use crate::domain::model::TeamRecord;
use crate::domain::ports::RecordSource;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads team records from a local JSON export, re-reading it on every fetch.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch_records(&self) -> Result<Vec<TeamRecord>, FetchError> {
        let data = tokio::fs::read(&self.path).await?;
        parse_teams(&data)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
