
#[derive(Debug, Clone)]
pub struct MuxerError {
    pub log: String,
}

impl std::fmt::Display for MuxerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ffmpeg error")
    }
}

impl std::error::Error for MuxerError {}
