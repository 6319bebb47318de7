use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::api;
use crate::combine::combine_group;
use crate::download::scheduler::download_group;
use crate::download::DownloadClient;
use crate::error::muxer_error::MuxerError;
use crate::options::Options;
use crate::planner::{SegmentPlan, Timestamp};

// resolves the stream metadata, plans the segment range and downloads and
// combines it one group at a time
pub async fn run(
    vod_id: &str,
    start: Timestamp,
    end: Timestamp,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(DownloadClient::new());

    println!("Contacting server");

    let (sig, token) = api::resolve_access_token(&client, vod_id).await?;
    let (base_url, m3u8_link) = api::resolve_playback_info(&client, vod_id, &sig, &token).await?;

    println!("Getting video info");

    let target_duration = api::fetch_segment_duration(&client, &m3u8_link).await?;

    let plan = SegmentPlan::for_range(start, end, target_duration);

    println!("Starting download:( {:4} : {:4} )", plan.start_index, plan.count);

    let folder = Path::new(".");
    let semaphore = Arc::new(Semaphore::new(options.max_parallel_downloads));

    // groups run strictly one after another, downloads are only concurrent
    // within the current group
    for group in plan.groups(options.group_size) {
        let downloaded = download_group(
            Arc::clone(&client),
            &base_url,
            group.count,
            group.start_index,
            vod_id,
            folder,
            Arc::clone(&semaphore),
        )
        .await;

        if let Err(err) = downloaded {
            eprintln!("Error downloading group {}: {}", group.number, err);
            return Err(err);
        }

        println!("Combining parts...");

        match combine_group(group.count, group.start_index, vod_id, folder, group.number) {
            Ok(_) => {}
            // a failed combine keeps the group's segments on disk, and the
            // remaining groups are still worth downloading
            Err(ref err) if err.is::<MuxerError>() => {
                eprintln!("Error combining group {}, keeping its segments", group.number);
            }
            Err(err) => {
                return Err(err);
            }
        }
    }

    Ok(())
}
