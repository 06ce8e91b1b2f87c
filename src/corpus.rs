//! Link graphs from a directory of HTML pages.

use crate::{LinkGraph, Result};
use regex::Regex;
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
    sync::LazyLock,
};
use tracing::{debug, warn};

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex")
});

/// Targets of every `<a href="...">` in `contents`.
pub fn extract_links(contents: &str) -> HashSet<String, ahash::RandomState> {
    ANCHOR
        .captures_iter(contents)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reads every `.html` file directly inside `directory`.
///
/// Pages are named by file name. Links to the page itself and to names
/// outside the directory are dropped.
pub fn crawl<D: AsRef<Path>>(directory: D) -> Result<LinkGraph<String>> {
    let directory = directory.as_ref();
    let mut pages = BTreeMap::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = %path.display(), "skipping file with a non UTF-8 name");
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = fs::read_to_string(&path)?;
        let mut links = extract_links(&contents);
        links.remove(&name);
        pages.insert(name, links);
    }

    let mut graph = LinkGraph::new();
    for name in pages.keys() {
        graph.add_page(name.clone());
    }
    for (name, links) in pages.iter() {
        let mut links: Vec<_> = links
            .iter()
            .filter(|link| pages.contains_key(*link))
            .collect();
        links.sort();
        for link in links {
            graph.add_link(name.clone(), link.clone());
        }
    }
    debug!(
        directory = %directory.display(),
        pages = graph.page_count(),
        links = graph.link_count(),
        "crawled corpus"
    );
    Ok(graph)
}
