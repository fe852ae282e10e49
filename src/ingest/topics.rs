//! Candidate source URLs for a topic.
//!
//! A fixed catalog of URL templates spanning reference, tutorial,
//! documentation, Q&A, academic, blog and vendor-neutral sites. Templates use
//! two placeholders:
//!
//! | Placeholder | Substitution | Example for `web framework` |
//! |-------------|--------------|-----------------------------|
//! | `{slug}` | whitespace runs replaced by `_` | `web_framework` |
//! | `{query}` | percent-encoded topic | `web%20framework` |
//!
//! Per topic, a uniform sample without replacement of at most
//! `max_urls` templates is expanded. The random source is passed in by the
//! caller so runs can be seeded.

use itertools::Itertools;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Default cap on candidate URLs per topic.
pub const DEFAULT_MAX_URLS_PER_TOPIC: usize = 5;

/// Built-in source catalog.
pub const DEFAULT_CATALOG: &[&str] = &[
    // encyclopedic / reference
    "https://en.wikipedia.org/wiki/{slug}",
    "https://www.britannica.com/search?query={query}",
    // programming tutorials
    "https://www.geeksforgeeks.org/{query}/",
    "https://www.javatpoint.com/search?query={query}",
    "https://www.tutorialspoint.com/search/{query}",
    "https://www.programiz.com/search?q={query}",
    // documentation hubs
    "https://www.ibm.com/topics/{slug}",
    "https://learn.microsoft.com/en-us/search/?terms={query}",
    "https://developer.mozilla.org/en-US/search?q={query}",
    // Q&A
    "https://stackoverflow.com/search?q={query}",
    "https://stackprinter.appspot.com/v/1/search?q={query}",
    // academic / learning
    "https://www.geeksforgeeks.org/?s={query}",
    "https://www.cs.cmu.edu/search/?q={query}",
    // blogs
    "https://medium.com/search?q={query}",
    "https://dev.to/search?q={query}",
    // vendor-neutral
    "https://www.redhat.com/en/topics/{slug}",
    "https://www.cloudflare.com/learning/{slug}/",
];

/// Raw slug form of a topic: whitespace runs become underscores.
pub fn topic_slug(topic: &str) -> String {
    topic.split_whitespace().join("_")
}

/// Expand a single template for `topic`.
pub fn expand_template(template: &str, topic: &str) -> String {
    template
        .replace("{slug}", &topic_slug(topic))
        .replace("{query}", &urlencoding::encode(topic))
}

/// Maps topics to sampled candidate URLs.
#[derive(Debug, Clone)]
pub struct TopicUrlResolver {
    templates: Vec<String>,
    max_urls: usize,
}

impl Default for TopicUrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_URLS_PER_TOPIC)
    }
}

impl TopicUrlResolver {
    /// Resolver over [`DEFAULT_CATALOG`].
    pub fn new(max_urls: usize) -> Self {
        Self::with_catalog(DEFAULT_CATALOG.iter().map(|t| t.to_string()).collect(), max_urls)
    }

    /// Resolver over a custom template catalog.
    pub fn with_catalog(templates: Vec<String>, max_urls: usize) -> Self {
        Self {
            templates,
            max_urls,
        }
    }

    /// Sample up to `max_urls` distinct templates and expand them for `topic`.
    pub fn resolve<R: Rng + ?Sized>(&self, topic: &str, rng: &mut R) -> Vec<String> {
        self.templates
            .choose_multiple(rng, self.max_urls)
            .map(|template| expand_template(template, topic))
            .collect()
    }
}
