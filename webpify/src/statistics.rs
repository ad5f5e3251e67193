#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub converted_images: u64,
    pub failed_images: u64,
    pub copied_files: u64,
    pub failed_copies: u64,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage by which the WebP output is smaller than the source images.
    /// Negative when the output grew, `None` when there was nothing to compare against.
    pub fn reduction_percent(&self) -> Option<f64> {
        if self.bytes_before == 0 {
            return None;
        }

        let before = self.bytes_before as f64;
        let after = self.bytes_after as f64;

        Some((before - after) / before * 100.0)
    }
}
