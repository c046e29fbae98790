//! Path and connectivity queries over a [`WebGraph`].
//!
//! All searches are depth-first and run on an explicit work-list, so long
//! link chains cannot overflow the stack. Every entry on the work-list owns
//! the path that led to it, and that path is the only "visited" set the
//! branch consults. Sibling branches therefore start from the same
//! visited-so-far list no matter what an earlier sibling explored, which keeps
//! depth-bounded searches from pruning reachable websites.
//!
//! The path returned is whichever one the search meets first. It is not
//! necessarily the shortest, and because neighbour sets are unordered the
//! choice between equally valid paths is not deterministic. Searches that
//! fail may enumerate every simple path in the reachable component, which is
//! exponential in the worst case; bound the depth for large, dense graphs.

use crate::graph::WebGraph;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    Outgoing,
    Both,
}

/// Directed paths in both directions between two websites, as returned by
/// [`WebGraph::strongly_connected`].
pub type PathPair = (Option<Vec<String>>, Option<Vec<String>>);

impl WebGraph {
    /// Some path from `from` to `to`, treating every hyperlink as undirected.
    ///
    /// The path starts with `from` and ends with `to`. `None` if either
    /// website is unknown or they are not connected.
    pub fn path_undirected(&self, from: &str, to: &str) -> Option<Vec<String>> {
        self.search(from, to, Follow::Both, None).map(to_owned_path)
    }

    /// Some path from `from` to `to` following hyperlinks in their direction.
    pub fn path_directed(&self, from: &str, to: &str) -> Option<Vec<String>> {
        self.search(from, to, Follow::Outgoing, None)
            .map(to_owned_path)
    }

    /// Whether `to` can be reached from `from` over at most `max_depth` hyperlinks.
    ///
    /// A website always reaches itself with a path of length zero.
    pub fn bounded_path_directed_exists(&self, from: &str, to: &str, max_depth: usize) -> bool {
        self.search(from, to, Follow::Outgoing, Some(max_depth))
            .is_some()
    }

    /// Directed paths `a -> b` and `b -> a`, each searched independently.
    ///
    /// Both are `Some` exactly when the two websites are strongly connected.
    pub fn strongly_connected(&self, a: &str, b: &str) -> PathPair {
        (self.path_directed(a, b), self.path_directed(b, a))
    }

    fn successors(&self, domain: &str, follow: Follow) -> Vec<&str> {
        let Some(website) = self.vertices.get(domain) else {
            return Vec::new();
        };
        match follow {
            Follow::Outgoing => website.links_out().iter().map(String::as_str).collect(),
            Follow::Both => website
                .links_in()
                .iter()
                .chain(website.links_out().iter())
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    fn search(
        &self,
        from: &str,
        to: &str,
        follow: Follow,
        max_depth: Option<usize>,
    ) -> Option<Vec<&str>> {
        let (start, _) = self.vertices.get_key_value(from)?;
        if !self.vertices.contains_key(to) {
            return None;
        }

        // A fresh work-list per call; nothing survives between searches.
        let mut pending: Vec<Vec<&str>> = vec![vec![start.as_str()]];

        while let Some(path) = pending.pop() {
            let Some(&current) = path.last() else {
                continue;
            };
            if current == to {
                return Some(path);
            }
            if max_depth.is_some_and(|limit| path.len() > limit) {
                continue;
            }

            for next in self.successors(current, follow) {
                if path.contains(&next) {
                    continue;
                }
                let mut branch = Vec::with_capacity(path.len() + 1);
                branch.extend_from_slice(&path);
                branch.push(next);
                pending.push(branch);
            }
        }

        None
    }
}

fn to_owned_path(path: Vec<&str>) -> Vec<String> {
    path.into_iter().map(str::to_string).collect()
}
