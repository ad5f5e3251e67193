use std::ops::{Not, RangeInclusive};

pub const QUALITY_RANGE: RangeInclusive<u8> = 0..=100;
pub const METHOD_RANGE: RangeInclusive<u8> = 0..=6;

pub const DEFAULT_QUALITY: u8 = 95;
pub const DEFAULT_METHOD: u8 = 4;

/// Encoder settings applied to every image of a run.
///
/// `quality` is the lossy quality factor, or the compression effort in lossless mode.
/// `method` trades encoding speed (0) for smaller files (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    quality: u8,
    method: u8,
    lossless: bool,
}

impl ConversionOptions {
    pub fn new(quality: u8, method: u8, lossless: bool) -> anyhow::Result<Self> {
        if QUALITY_RANGE.contains(&quality).not() {
            anyhow::bail!(
                "Quality {} is out of range, it must be between {} and {}",
                quality,
                QUALITY_RANGE.start(),
                QUALITY_RANGE.end()
            );
        }

        if METHOD_RANGE.contains(&method).not() {
            anyhow::bail!(
                "Method {} is out of range, it must be between {} and {}",
                method,
                METHOD_RANGE.start(),
                METHOD_RANGE.end()
            );
        }

        Ok(Self {
            quality,
            method,
            lossless,
        })
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn method(&self) -> u8 {
        self.method
    }

    pub fn lossless(&self) -> bool {
        self.lossless
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            method: DEFAULT_METHOD,
            lossless: false,
        }
    }
}
