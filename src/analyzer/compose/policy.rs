//! Canonical key-order policy.
//!
//! A `Catalog` ranks keys by their position in a fixed list; keys missing from
//! the list rank after every member. Sorting is always stable, so keys that
//! share a rank keep their input order.

use std::collections::HashMap;

/// Standard root-level key order.
pub const ROOT_KEY_ORDER: &[&str] = &["services", "networks", "configs", "volumes", "secrets"];

/// Standard key order within a service block.
pub const SERVICE_KEY_ORDER: &[&str] = &[
    "extends",
    "image",
    "build",
    "container_name",
    "hostname",
    "environment",
    "env_file",
    "networks",
    "network_mode",
    "ports",
    "expose",
    "volumes",
    "devices",
    "configs",
    "healthcheck",
    "labels",
    "restart",
    "depends_on",
    "mem_limit",
    "memswap_limit",
    "shm_size",
    "cap_add",
    "cap_drop",
    "security_opt",
    "privileged",
    "sysctls",
    "extra_hosts",
    "command",
    "entrypoint",
    "working_dir",
    "user",
    "group_add",
    "ulimits",
    "logging",
    "deploy",
    "profiles",
];

/// An ordered list of known keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    keys: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl Catalog {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let mut ranks = HashMap::with_capacity(keys.len());
        for (idx, key) in keys.iter().enumerate() {
            // First occurrence wins if a catalog lists a key twice.
            ranks.entry(key.clone()).or_insert(idx);
        }
        Self { keys, ranks }
    }

    /// Rank of a key; unknown keys rank `len()`.
    pub fn rank(&self, key: &str) -> usize {
        self.ranks.get(key).copied().unwrap_or(self.keys.len())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.ranks.contains_key(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stable sort of `keys` by rank.
    pub fn sort<S: AsRef<str> + Clone>(&self, keys: &[S]) -> Vec<S> {
        let mut sorted = keys.to_vec();
        // slice::sort_by_key is stable; equal ranks keep input order.
        sorted.sort_by_key(|k| self.rank(k.as_ref()));
        sorted
    }
}

/// Catalogs for every level the policy governs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPolicy {
    pub root: Catalog,
    pub service: Catalog,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            root: Catalog::new(ROOT_KEY_ORDER.iter().copied()),
            service: Catalog::new(SERVICE_KEY_ORDER.iter().copied()),
        }
    }
}

impl OrderPolicy {
    pub fn new(root: Catalog, service: Catalog) -> Self {
        Self { root, service }
    }

    pub fn sort_root<S: AsRef<str> + Clone>(&self, keys: &[S]) -> Vec<S> {
        self.root.sort(keys)
    }

    pub fn sort_service<S: AsRef<str> + Clone>(&self, keys: &[S]) -> Vec<S> {
        self.service.sort(keys)
    }
}

/// First index where `actual` and `expected` disagree.
pub fn first_divergence<'a, S: AsRef<str>>(
    actual: &'a [S],
    expected: &'a [S],
) -> Option<(usize, &'a str, &'a str)> {
    actual
        .iter()
        .zip(expected.iter())
        .enumerate()
        .find(|(_, (a, e))| a.as_ref() != e.as_ref())
        .map(|(idx, (a, e))| (idx, a.as_ref(), e.as_ref()))
}
