//! Topic clustering on query tails.
//!
//! Every query with at least two normalized tokens contributes to up to three
//! topics: its tail bigram, its tail trigram (when it has three tokens) and
//! its tail of up to four tokens. Windows that collapse to the same string are
//! counted once, so a query appears at most once per topic. Fan-out of one
//! query across several topics is intended.

use super::normalize::normalize_query;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Queries with fewer normalized tokens than this produce no topic.
const MIN_TOPIC_TOKENS: usize = 2;

/// Tail window lengths, coarse to fine.
const TAIL_WINDOWS: [usize; 3] = [2, 3, 4];

/// A topic key and the raw queries that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub key: String,
    pub queries: Vec<String>,
}

/// Insertion-ordered mapping from topic key to contributing queries.
#[derive(Debug, Default)]
pub struct TopicClusters {
    topics: Vec<Topic>,
    index: HashMap<String, usize>,
}

impl TopicClusters {
    fn add(&mut self, key: String, query: &str) {
        match self.index.get(&key) {
            Some(&i) => self.topics[i].queries.push(query.to_string()),
            None => {
                self.index.insert(key.clone(), self.topics.len());
                self.topics.push(Topic {
                    key,
                    queries: vec![query.to_string()],
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Topics in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    /// Topics with at least `min_queries` contributing queries, first-seen order kept.
    pub fn with_min_queries(&self, min_queries: usize) -> Vec<&Topic> {
        self.iter()
            .filter(|t| t.queries.len() >= min_queries)
            .collect()
    }
}

/// Distinct tail n-gram keys for one token sequence, coarse first.
///
/// Empty when the sequence has fewer than two tokens.
pub fn tail_topics(tokens: &[String]) -> Vec<String> {
    if tokens.len() < MIN_TOPIC_TOKENS {
        return Vec::new();
    }
    TAIL_WINDOWS
        .iter()
        .filter(|&&n| n != 3 || tokens.len() >= 3)
        .map(|&n| tokens[tokens.len().saturating_sub(n)..].join(" "))
        .unique()
        .collect()
}

/// Group `queries` into topics keyed by their tail n-grams.
#[instrument(level = "info", skip_all, fields(queries = queries.len()))]
pub fn cluster_queries(queries: &[String]) -> TopicClusters {
    let mut clusters = TopicClusters::default();

    for query in queries {
        let tokens = normalize_query(query);
        let keys = tail_topics(&tokens);
        if keys.is_empty() {
            debug!(%query, tokens = tokens.len(), "Query too short to cluster");
            continue;
        }
        for key in keys {
            clusters.add(key, query);
        }
    }

    debug!(topics = clusters.len(), "Clustered queries");
    clusters
}
