pub mod scheduler;
pub mod segment;

use bytes::Bytes;
use url::Url;

pub struct DownloadClient {
    client: reqwest::Client,
}

impl DownloadClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; rv:78.0) Gecko/20100101 Firefox/78.0")
            .build()
            .unwrap();

        Self { client }
    }

    pub async fn download(&self, url: &Url) -> Result<Bytes, Box<dyn std::error::Error + Send>> {
        let response = match self.client.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(err) => {
                eprintln!("Error requesting {}: {}", url, err);
                return Err(Box::new(err));
            }
        };

        if let Err(err) = response.error_for_status_ref() {
            eprintln!("Error downloading {}: {}", url, err);
            return Err(Box::new(err));
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("Error reading response from {}: {}", url, err);
                return Err(Box::new(err));
            }
        };

        Ok(bytes)
    }

    pub async fn download_text(&self, url: &Url) -> Result<String, Box<dyn std::error::Error + Send>> {
        let bytes = self.download(url).await?;

        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(err) => {
                eprintln!("Error decoding response from {}: {}", url, err);
                Err(Box::new(err))
            }
        }
    }
}
