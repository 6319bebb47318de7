
#[derive(Debug, Clone)]
pub struct MarkerError {
    pub marker: &'static str,
}

impl std::fmt::Display for MarkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Marker {:?} not found in response", self.marker)
    }
}

impl std::error::Error for MarkerError {}
