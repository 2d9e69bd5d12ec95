use crate::domain::model::DataSource;
use crate::domain::ports::SourceReader;
use crate::utils::error::Result;

/// 將資料來源展開成逐行字串
pub async fn resolve(source: &DataSource, reader: &dyn SourceReader) -> Result<Vec<String>> {
    let lines = match source {
        DataSource::FromFile { path } => {
            tracing::debug!("Reading source file: {}", path);
            split_lines(&reader.read_file(path).await?)
        }
        DataSource::FromUrl { url } => {
            tracing::debug!("Fetching source URL: {}", url);
            split_lines(&reader.fetch_url(url).await?)
        }
        DataSource::InMemory { data } => data.clone(),
    };

    tracing::debug!("Resolved {} source with {} lines", source.kind(), lines.len());
    Ok(lines)
}

/// Splits on `\n` or `\r\n`; a trailing newline does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PipelineError;
    use async_trait::async_trait;

    struct FixedReader;

    #[async_trait]
    impl SourceReader for FixedReader {
        async fn read_file(&self, path: &str) -> Result<String> {
            if path == "present.txt" {
                Ok("alpha\nbeta\n".to_string())
            } else {
                Err(PipelineError::SourceIo {
                    path: path.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                })
            }
        }

        async fn fetch_url(&self, _url: &str) -> Result<String> {
            Ok("one\r\ntwo".to_string())
        }
    }

    #[test]
    fn test_split_lines_drops_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[tokio::test]
    async fn test_resolve_each_variant() {
        let file = resolve(&DataSource::file("present.txt"), &FixedReader).await.unwrap();
        assert_eq!(file, vec!["alpha", "beta"]);

        let url = resolve(&DataSource::url("http://host/lines"), &FixedReader).await.unwrap();
        assert_eq!(url, vec!["one", "two"]);

        let memory = resolve(&DataSource::in_memory(["x"]), &FixedReader).await.unwrap();
        assert_eq!(memory, vec!["x"]);
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let err = resolve(&DataSource::file("absent.txt"), &FixedReader)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::SourceIo { ref path, .. } if path == "absent.txt"));
    }
}
