//! Shared constants used across ccget crates.

/// The public Common Crawl bucket.
///
/// Reads against it are heavily throttled; bulk work should go through an
/// intermediary bucket instead.
pub const CC_BUCKET: &str = "commoncrawl";

/// Region every bucket must live in.
/// The corpus is hosted in us-east-1; anything else pays cross-region egress.
pub const AWS_REGION: &str = "us-east-1";

/// Fixed seed for reproducible key sampling.
///
/// Kept separate from the RNG used for manifest name suffixes so suffixes
/// vary across invocations while the sampled keys repeat.
pub const SAMPLE_SEED: u64 = 102;

/// Key count above which a non-archival storage class trips the volume guard.
/// Keys are roughly 1 GB each, so this is about a terabyte.
pub const VOLUME_GUARD_MAX_KEYS: usize = 1000;

/// First month with published CC-NEWS data (August 2016).
pub const NEWS_FEED_START_YEAR: i32 = 2016;

/// See [`NEWS_FEED_START_YEAR`].
pub const NEWS_FEED_START_MONTH: u32 = 8;
