use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::info;

use crate::model::MovieRecord;
use crate::parser::{extract_movie, MovieSelectors};
use crate::store;

pub const BASE_URL: &str = "https://www.imdb.com/title/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Scream, The Matrix, The Dark Knight.
pub const DEFAULT_IDS: [&str; 3] = ["tt0117571", "tt0133093", "tt0468569"];

/// Something that can hand back the HTML of a title page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<String>;
}

/// Fetches title pages over HTTP.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn url_for(&self, id: &str) -> String {
        format!("{}{}/", self.base_url, id)
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, id: &str) -> Result<String> {
        let url = self.url_for(id);
        let html = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Bad status from {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(html)
    }
}

/// Fetch and extract a single movie.
pub async fn scrape_movie(
    source: &dyn PageSource,
    selectors: &MovieSelectors,
    id: &str,
) -> Result<MovieRecord> {
    let html = source.fetch(id).await?;
    Ok(extract_movie(&html, selectors))
}

/// Scrape ids one after another, keeping input order.
/// The first failure aborts the whole batch.
pub async fn scrape_batch(source: &dyn PageSource, ids: &[String]) -> Result<Vec<MovieRecord>> {
    let selectors = MovieSelectors::new()?;

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        info!("Scraping {}...", id);
        pb.set_message(id.clone());
        let record = scrape_movie(source, &selectors, id)
            .await
            .with_context(|| format!("Scraping {} failed", id))?;
        records.push(record);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

/// Scrape the batch and write it to `output`. Nothing is written unless
/// every id succeeded.
pub async fn run_batch(source: &dyn PageSource, ids: &[String], output: &Path) -> Result<usize> {
    let records = scrape_batch(source, ids).await?;
    store::write_records(output, &records)?;
    info!("Wrote {} movies to {}", records.len(), output.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::anyhow;

    use super::*;

    struct FakeSource {
        pages: HashMap<String, String>,
    }

    impl FakeSource {
        fn with(ids: &[(&str, &str, &str)]) -> Self {
            let pages = ids
                .iter()
                .map(|(id, title, year)| {
                    let html = format!(
                        r#"<h1 data-testid="hero__primary-text">{}</h1>
                        <ul class="ipc-inline-list">
                          <li><a href="/title/{}/releaseinfo">{}</a></li>
                          <li>1h 30m</li>
                        </ul>
                        <span data-testid="plot-l">Plot of {}.</span>"#,
                        title, id, year, title
                    );
                    (id.to_string(), html)
                })
                .collect();
            Self { pages }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch(&self, id: &str) -> Result<String> {
            self.pages
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP status client error (404 Not Found) for {}", id))
        }
    }

    /// Answers every request on a local port with `status` and `body`.
    async fn serve(status: &'static str, body: &'static str) -> HttpSource {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                let mut req = Vec::new();
                let mut buf = [0u8; 1024];
                while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => req.extend_from_slice(&buf[..n]),
                    }
                }
                let resp = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });

        let client = Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(client, &format!("http://{}/title/", addr))
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn url_has_trailing_slash() {
        let src = HttpSource::new(BASE_URL).unwrap();
        assert_eq!(src.url_for("tt0133093"), "https://www.imdb.com/title/tt0133093/");
    }

    #[tokio::test]
    async fn http_source_extracts_page() {
        let src = serve(
            "200 OK",
            r#"<h1 data-testid="hero__primary-text">Scream</h1>
            <ul class="ipc-inline-list"><li><a href="/title/tt0117571/releaseinfo">1996</a></li><li>1h 51m</li></ul>"#,
        )
        .await;
        let records = scrape_batch(&src, &ids(&["tt0117571"])).await.unwrap();
        assert_eq!(records[0].title, "Scream");
        assert_eq!(records[0].year, Some(1996));
        assert_eq!(records[0].duration, 111);
    }

    #[tokio::test]
    async fn http_error_status_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("movies.json");
        let src = serve("404 Not Found", "").await;

        let err = run_batch(&src, &ids(&["tt1", "tt2"]), &out).await.unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("tt1"), "{}", chain);
        assert!(chain.contains("404"), "{}", chain);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn batch_keeps_input_order() {
        let src = FakeSource::with(&[
            ("tt3", "Third", "2008"),
            ("tt1", "First", "1996"),
            ("tt2", "Second", "1999"),
        ]);
        let records = scrape_batch(&src, &ids(&["tt1", "tt2", "tt3"])).await.unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(records[1].year, Some(1999));
        assert!(records.iter().all(|r| r.duration == 90));
        assert_eq!(records[0].synopsis, "Plot of First.");
    }

    #[tokio::test]
    async fn run_batch_writes_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("movies.json");
        let src = FakeSource::with(&[
            ("tt1", "First", "1996"),
            ("tt2", "Second", "1999"),
            ("tt3", "Third", "2008"),
        ]);

        let n = run_batch(&src, &ids(&["tt1", "tt2", "tt3"]), &out).await.unwrap();
        assert_eq!(n, 3);

        let back = store::read_collection(&out).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[2].title, "Third");
    }

    #[tokio::test]
    async fn failure_mid_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("movies.json");
        let src = FakeSource::with(&[("tt1", "First", "1996"), ("tt3", "Third", "2008")]);

        let err = run_batch(&src, &ids(&["tt1", "tt2", "tt3"]), &out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("tt2"));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn failure_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("movies.json");
        std::fs::write(&out, "[]").unwrap();
        let src = FakeSource::with(&[]);

        assert!(run_batch(&src, &ids(&["tt1"]), &out).await.is_err());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "[]");
    }
}
