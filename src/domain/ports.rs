use crate::domain::model::TeamRecord;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// "Fetch all records" capability supplied by the record store / transport.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<TeamRecord>, FetchError>;

    /// Short label used in log lines.
    fn describe(&self) -> String {
        "record source".to_string()
    }
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for Arc<S> {
    async fn fetch_records(&self) -> Result<Vec<TeamRecord>, FetchError> {
        (**self).fetch_records().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    async fn fetch_records(&self) -> Result<Vec<TeamRecord>, FetchError> {
        (**self).fetch_records().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn source_endpoint(&self) -> Option<&str>;
    fn records_file(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    /// Static headers sent with every HTTP fetch.
    fn headers(&self) -> &HashMap<String, String>;
    fn refresh_interval(&self) -> Duration;
}
