use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};

use crate::download::segment::fetch_segment;
use crate::download::DownloadClient;

// downloads every segment in [start_index, start_index + count), with the
// semaphore bounding how many downloads are in flight at once, and only
// returns once all of them have finished
pub async fn download_group(
    client: Arc<DownloadClient>,
    base_url: &str,
    count: usize,
    start_index: usize,
    vod_id: &str,
    folder: &Path,
    semaphore: Arc<Semaphore>,
) -> Result<(), Box<dyn std::error::Error + Send>> {
    let downloaded_segments = Arc::new(Mutex::new(0usize));
    let folder = Arc::new(folder.to_path_buf());

    let tasks = (start_index..start_index + count)
        .map(|index| {
            let client = Arc::clone(&client);
            let semaphore = Arc::clone(&semaphore);
            let downloaded_segments = Arc::clone(&downloaded_segments);
            let folder = Arc::clone(&folder);
            let base_url = base_url.to_string();
            let vod_id = vod_id.to_string();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();

                fetch_segment(&client, &base_url, index, &vod_id, &folder).await?;

                let mut downloaded_segments = downloaded_segments.lock().await;
                *downloaded_segments += 1;

                println!(
                    "Group {:4}: {:width$} / {:width$} segments ({:5.2}%)\t ({})",
                    start_index,
                    *downloaded_segments,
                    count,
                    (*downloaded_segments as f64 / count as f64) * 100.,
                    index,
                    width = count.to_string().len()
                );

                Ok::<(), Box<dyn std::error::Error + Send>>(())
            })
        })
        .collect::<Vec<_>>();

    for task in tasks {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                eprintln!("Error downloading segment: {}", err);
                return Err(err);
            }
            Err(err) => {
                eprintln!("Error waiting for task: {}", err);
                return Err(Box::new(err));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::segment::segment_filename;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn every_segment_of_the_range_ends_up_on_disk() {
        let server = MockServer::start().await;
        for index in 5..9 {
            Mock::given(method("GET"))
                .and(path(format!("/v/{}.ts", index)))
                .respond_with(
                    ResponseTemplate::new(200).set_body_bytes(format!("seg {}", index).into_bytes()),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(DownloadClient::new());
        let semaphore = Arc::new(Semaphore::new(2));
        let base_url = format!("{}/v/", server.uri());

        download_group(client, &base_url, 4, 5, "123", dir.path(), semaphore)
            .await
            .unwrap();

        for index in 5..9 {
            let content = std::fs::read(dir.path().join(segment_filename("123", index))).unwrap();
            assert_eq!(content, format!("seg {}", index).into_bytes());
        }
    }

    #[tokio::test]
    async fn segments_already_on_disk_are_skipped_but_still_counted_as_done() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v/1.ts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"seg 1".as_ref()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(segment_filename("123", 0)), b"old").unwrap();

        let client = Arc::new(DownloadClient::new());
        let semaphore = Arc::new(Semaphore::new(5));
        let base_url = format!("{}/v/", server.uri());

        download_group(client, &base_url, 2, 0, "123", dir.path(), semaphore)
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join(segment_filename("123", 0))).unwrap(), b"old");
        assert_eq!(std::fs::read(dir.path().join(segment_filename("123", 1))).unwrap(), b"seg 1");
    }

    #[tokio::test]
    async fn a_failing_segment_fails_the_whole_group() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v/0.ts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"seg 0".as_ref()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v/1.ts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(DownloadClient::new());
        let semaphore = Arc::new(Semaphore::new(5));
        let base_url = format!("{}/v/", server.uri());

        let result = download_group(client, &base_url, 2, 0, "123", dir.path(), semaphore).await;

        assert!(result.is_err());
    }
}
