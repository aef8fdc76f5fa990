// Adapters layer: concrete record sources for external systems.

pub mod file;
pub mod http;
pub mod payload;

pub use file::FileRecordSource;
pub use http::HttpRecordSource;

use crate::domain::ports::{ConfigProvider, RecordSource};

/// A records file takes precedence; otherwise the HTTP backend is used.
pub fn source_from_config<C: ConfigProvider>(config: &C) -> Box<dyn RecordSource> {
    match config.records_file() {
        Some(path) => Box::new(FileRecordSource::new(path)),
        None => Box::new(HttpRecordSource::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use httpmock::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_records_file_selects_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"_id": "a", "team_name": "Alpha", "points": 3}}]"#).unwrap();
        let settings = Settings {
            records_file: Some(file.path().to_str().unwrap().to_string()),
            ..Settings::default()
        };

        let source = source_from_config(&settings);
        let records = source.fetch_records().await.unwrap();

        assert!(source.describe().starts_with("file "));
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_http_source_sends_configured_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/user/get-all-teams")
                .header("x-event-key", "hunt-2024");
            then.status(200).json_body(serde_json::json!({ "teams": [] }));
        });
        let mut settings = Settings {
            endpoint: Some(server.url("/user/get-all-teams")),
            ..Settings::default()
        };
        settings
            .headers
            .insert("x-event-key".to_string(), "hunt-2024".to_string());

        let source = source_from_config(&settings);
        let records = source.fetch_records().await.unwrap();

        api_mock.assert();
        assert!(source.describe().starts_with("HTTP "));
        assert!(records.is_empty());
    }
}
