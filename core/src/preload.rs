use std::collections::{HashMap, VecDeque};

// Workers pull one source at a time, so in-flight fetches never exceed the worker count.
#[derive(Clone, Debug, Default)]
pub struct PreloadQueue {
    pending: VecDeque<String>,
}

impl PreloadQueue {
    pub fn new(sources: &[String]) -> Self {
        Self {
            pending: sources.iter().cloned().collect(),
        }
    }

    pub fn next_source(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn worker_count(&self, concurrency: usize) -> usize {
        concurrency.max(1).min(self.pending.len())
    }
}

// Source URL to object URL. Whatever `insert` or `drain` hands back must be revoked.
#[derive(Clone, Debug, Default)]
pub struct BlobCache {
    entries: HashMap<String, String>,
}

impl BlobCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, src: &str) -> Option<&str> {
        self.entries.get(src).map(String::as_str)
    }

    pub fn contains(&self, src: &str) -> bool {
        self.entries.contains_key(src)
    }

    pub fn insert(&mut self, src: String, object_url: String) -> Option<String> {
        self.entries.insert(src, object_url)
    }

    pub fn drain(&mut self) -> Vec<String> {
        self.entries.drain().map(|(_, object_url)| object_url).collect()
    }
}
