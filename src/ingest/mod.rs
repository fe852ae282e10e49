//! Query ingestion: everything upstream of the scrape stage.
//!
//! Data flows strictly downstream through these submodules:
//!
//! 1. [`loader`]: read raw queries from a line-oriented file
//! 2. [`normalize`]: lowercase, strip punctuation, tokenize, drop stopwords
//! 3. [`cluster`]: group queries into topics keyed by tail n-grams
//! 4. [`topics`]: derive a bounded random sample of candidate URLs per topic

pub mod cluster;
pub mod loader;
pub mod normalize;
pub mod topics;
