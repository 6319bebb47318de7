
#[derive(Debug)]
pub struct Options {
    pub max_parallel_downloads: usize,
    pub group_size: usize,
}
