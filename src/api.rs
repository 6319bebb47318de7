use serde::Deserialize;
use url::Url;

use crate::download::DownloadClient;
use crate::error::marker_error::MarkerError;

const CLIENT_ID: &str = "aokchnui2n8q38g0vezl9hq6htzy4c";

const PLAYBACK_LINK_BEGIN: &str = "http://";
const PLAYBACK_LINK_BASE_END: &str = "index-dvr.m3u8";
const PLAYBACK_LINK_M3U8_END: &str = ".m3u8";
const TARGET_DURATION_BEGIN: &str = "TARGETDURATION:";
const TARGET_DURATION_END: &str = "\n#ID3";

#[derive(Deserialize, Debug)]
struct AccessToken {
    sig: String,
    token: String,
}

// the signature and token are needed for accessing the manifest endpoint
pub async fn resolve_access_token(
    client: &DownloadClient,
    vod_id: &str,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let link = format!(
        "http://api.twitch.tv/api/vods/{}/access_token?&client_id={}",
        vod_id, CLIENT_ID
    );
    let url = match Url::parse(link.as_str()) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("Error parsing token api url: {}", err);
            return Err(Box::new(err));
        }
    };

    let body = match client.download(&url).await {
        Ok(body) => body,
        Err(err) => {
            eprintln!("Error contacting token api: {}", err);
            return Err(err);
        }
    };

    let access_token = match parse_access_token(&body) {
        Ok(access_token) => access_token,
        Err(err) => {
            eprintln!("Error parsing token api response: {}", err);
            return Err(Box::new(err));
        }
    };

    Ok((access_token.sig, access_token.token))
}

fn parse_access_token(body: &[u8]) -> Result<AccessToken, serde_json::Error> {
    serde_json::from_slice(body)
}

// returns the base url for segment addressing and the full playlist url
pub async fn resolve_playback_info(
    client: &DownloadClient,
    vod_id: &str,
    sig: &str,
    token: &str,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let link = format!(
        "http://usher.twitch.tv/vod/{}?nauthsig={}&nauth={}",
        vod_id, sig, token
    );
    let url = match Url::parse(link.as_str()) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("Error parsing manifest url: {}", err);
            return Err(Box::new(err));
        }
    };

    let body = match client.download_text(&url).await {
        Ok(body) => body,
        Err(err) => {
            eprintln!("Error contacting manifest endpoint: {}", err);
            return Err(err);
        }
    };

    let urls = match extract_playback_urls(body.as_str()) {
        Ok(urls) => urls,
        Err(err) => {
            eprintln!("Error reading manifest response: {}", err);
            return Err(Box::new(err));
        }
    };

    Ok(urls)
}

// the manifest response is not parsed as a playlist, the two urls are sliced
// out between known markers
fn extract_playback_urls(body: &str) -> Result<(String, String), MarkerError> {
    let begin = body
        .find(PLAYBACK_LINK_BEGIN)
        .ok_or(MarkerError { marker: PLAYBACK_LINK_BEGIN })?;
    let m3u8_end = body
        .find(PLAYBACK_LINK_M3U8_END)
        .ok_or(MarkerError { marker: PLAYBACK_LINK_M3U8_END })?;
    let base_end = body
        .find(PLAYBACK_LINK_BASE_END)
        .ok_or(MarkerError { marker: PLAYBACK_LINK_BASE_END })?;

    let base_url = body[begin..base_end].to_string();
    let m3u8_link = body[begin..m3u8_end + PLAYBACK_LINK_M3U8_END.len()].to_string();

    Ok((base_url, m3u8_link))
}

// the nominal segment duration in seconds declared by the playlist
pub async fn fetch_segment_duration(
    client: &DownloadClient,
    m3u8_link: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let url = match Url::parse(m3u8_link) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("Error parsing playlist url ({}): {}", m3u8_link, err);
            return Err(Box::new(err));
        }
    };

    let body = match client.download_text(&url).await {
        Ok(body) => body,
        Err(err) => {
            eprintln!("Error downloading playlist: {}", err);
            return Err(err);
        }
    };

    match extract_target_duration(body.as_str()) {
        Ok(duration) => Ok(duration),
        Err(err) => {
            eprintln!("Error reading target duration from playlist: {}", err);
            Err(err)
        }
    }
}

fn extract_target_duration(body: &str) -> Result<usize, Box<dyn std::error::Error>> {
    let value_start = body
        .find(TARGET_DURATION_BEGIN)
        .ok_or(MarkerError { marker: TARGET_DURATION_BEGIN })?
        + TARGET_DURATION_BEGIN.len();
    let value_end = body
        .find(TARGET_DURATION_END)
        .ok_or(MarkerError { marker: TARGET_DURATION_END })?;

    let duration = body[value_start..value_end].parse::<usize>()?;

    Ok(duration)
}
