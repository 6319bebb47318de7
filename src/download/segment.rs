use std::path::Path;

use url::Url;

use crate::download::DownloadClient;

pub fn segment_filename(vod_id: &str, index: usize) -> String {
    format!("{}_{:04}.mp4", vod_id, index)
}

// a segment that is already on disk is left alone, so an interrupted run can
// be resumed without downloading everything again
pub async fn fetch_segment(
    client: &DownloadClient,
    base_url: &str,
    index: usize,
    vod_id: &str,
    folder: &Path,
) -> Result<(), Box<dyn std::error::Error + Send>> {
    let seg_path = folder.join(segment_filename(vod_id, index));

    if seg_path.exists() {
        return Ok(());
    }

    let seg_url = format!("{}{}.ts", base_url, index);
    let url = match Url::parse(seg_url.as_str()) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("Error parsing segment url ({}): {}", seg_url, err);
            return Err(Box::new(err));
        }
    };

    let bytes = match client.download(&url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Error downloading segment {}: {}", index, err);
            return Err(err);
        }
    };

    let mut file = match std::fs::File::create(&seg_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Error creating file ({}): {}", seg_path.to_string_lossy(), err);
            return Err(Box::new(err));
        }
    };

    let mut content = std::io::Cursor::new(bytes);
    if let Err(err) = std::io::copy(&mut content, &mut file) {
        eprintln!("Error writing to file: {}", err);
        return Err(Box::new(err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn segment_filenames_are_zero_padded_to_four_digits() {
        assert_eq!(segment_filename("123456789", 0), "123456789_0000.mp4");
        assert_eq!(segment_filename("123456789", 42), "123456789_0042.mp4");
        assert_eq!(segment_filename("123456789", 12345), "123456789_12345.mp4");
    }

    #[tokio::test]
    async fn fetching_the_same_segment_twice_downloads_it_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chunked/4.ts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"segment bytes".as_ref()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = DownloadClient::new();
        let base_url = format!("{}/chunked/", server.uri());

        fetch_segment(&client, &base_url, 4, "123", dir.path()).await.unwrap();
        fetch_segment(&client, &base_url, 4, "123", dir.path()).await.unwrap();

        let content = std::fs::read(dir.path().join("123_0004.mp4")).unwrap();
        assert_eq!(content, b"segment bytes");
    }

    #[tokio::test]
    async fn a_segment_already_on_disk_is_not_requested_or_overwritten() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".as_ref()))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("123_0007.mp4"), b"kept").unwrap();

        let client = DownloadClient::new();
        let base_url = format!("{}/chunked/", server.uri());

        fetch_segment(&client, &base_url, 7, "123", dir.path()).await.unwrap();

        let content = std::fs::read(dir.path().join("123_0007.mp4")).unwrap();
        assert_eq!(content, b"kept");
    }

    #[tokio::test]
    async fn a_failed_download_leaves_no_file_behind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = DownloadClient::new();
        let base_url = format!("{}/chunked/", server.uri());

        let result = fetch_segment(&client, &base_url, 9, "123", dir.path()).await;

        assert!(result.is_err());
        assert!(!dir.path().join("123_0009.mp4").exists());
    }
}
