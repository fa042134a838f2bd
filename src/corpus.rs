//! Link graph of a directory of HTML pages.

use crate::{Error, LinkGraph, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};
use walkdir::WalkDir;

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// Targets of every `<a href="...">` in `contents`.
pub fn parse_links(contents: &str) -> BTreeSet<String> {
    HREF_RE
        .captures_iter(contents)
        .map(|c| c[1].to_string())
        .collect()
}

/// Reads the `.html` files directly inside `dir`.
///
/// Pages are named by file name. Self-links and links to files outside the
/// corpus are dropped.
pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<LinkGraph<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }
    let mut pages = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path()).map_err(|source| Error::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let mut links = parse_links(&contents);
        links.remove(&name);
        pages.insert(name, links);
    }

    let names: BTreeSet<String> = pages.keys().cloned().collect();
    for (name, links) in pages.iter_mut() {
        let before = links.len();
        links.retain(|l| names.contains(l));
        if links.len() < before {
            tracing::debug!(
                page = %name,
                dropped = before - links.len(),
                "links outside the corpus"
            );
        }
        tracing::debug!(page = %name, links = links.len(), "crawled");
    }
    LinkGraph::from_links(&pages)
}
