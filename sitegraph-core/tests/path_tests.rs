// Tests for path finding and connectivity

use sitegraph_core::{Stats, WebGraph};

/// site1 -> site2 -> site3 -> site1, site3 -> site4
fn cycle_with_tail() -> WebGraph {
    let mut g = WebGraph::new();
    for d in ["site1", "site2", "site3", "site4"] {
        g.add_vertex(d, Stats::new()).unwrap();
    }
    g.add_edge("site1", "site2", Stats::new()).unwrap();
    g.add_edge("site2", "site3", Stats::new()).unwrap();
    g.add_edge("site3", "site1", Stats::new()).unwrap();
    g.add_edge("site3", "site4", Stats::new()).unwrap();
    g
}

fn is_directed_path(g: &WebGraph, path: &[String]) -> bool {
    path.windows(2).all(|w| g.adjacent(&w[0], &w[1]))
}

fn is_undirected_path(g: &WebGraph, path: &[String]) -> bool {
    path.windows(2)
        .all(|w| g.adjacent(&w[0], &w[1]) || g.adjacent(&w[1], &w[0]))
}

// ============================================================================
// Directed Path Tests
// ============================================================================

#[test]
fn test_path_directed_follows_cycle() {
    let g = cycle_with_tail();
    assert_eq!(
        g.path_directed("site1", "site3"),
        Some(vec![
            "site1".to_string(),
            "site2".to_string(),
            "site3".to_string()
        ])
    );
}

#[test]
fn test_path_directed_into_tail() {
    let g = cycle_with_tail();
    assert_eq!(
        g.path_directed("site2", "site4"),
        Some(vec![
            "site2".to_string(),
            "site3".to_string(),
            "site4".to_string()
        ])
    );
}

#[test]
fn test_path_directed_from_sink_is_none() {
    let g = cycle_with_tail();
    assert_eq!(g.path_directed("site4", "site1"), None);
}

#[test]
fn test_path_directed_to_self() {
    let g = cycle_with_tail();
    assert_eq!(g.path_directed("site1", "site1"), Some(vec!["site1".to_string()]));
}

#[test]
fn test_path_directed_unknown_ids() {
    let g = cycle_with_tail();
    assert_eq!(g.path_directed("site1", "ghost"), None);
    assert_eq!(g.path_directed("ghost", "site1"), None);
}

#[test]
fn test_path_directed_finds_branch_after_dead_end() {
    // hub -> dead1 -> dead2, hub -> mid -> target: whichever branch is tried
    // first, the target must still be found.
    let mut g = WebGraph::new();
    for d in ["hub", "dead1", "dead2", "mid", "target"] {
        g.add_vertex(d, Stats::new()).unwrap();
    }
    g.add_edge("hub", "dead1", Stats::new()).unwrap();
    g.add_edge("dead1", "dead2", Stats::new()).unwrap();
    g.add_edge("hub", "mid", Stats::new()).unwrap();
    g.add_edge("mid", "target", Stats::new()).unwrap();

    let path = g.path_directed("hub", "target").unwrap();
    assert_eq!(path, vec!["hub", "mid", "target"]);
}

#[test]
fn test_path_directed_long_chain() {
    let mut g = WebGraph::new();
    let domains: Vec<String> = (0..5_000).map(|i| format!("site{}.com", i)).collect();
    for d in &domains {
        g.add_vertex(d.as_str(), Stats::new()).unwrap();
    }
    for pair in domains.windows(2) {
        g.add_edge(&pair[0], &pair[1], Stats::new()).unwrap();
    }

    let path = g.path_directed("site0.com", "site4999.com").unwrap();
    assert_eq!(path.len(), 5_000);
}

// ============================================================================
// Undirected Path Tests
// ============================================================================

#[test]
fn test_path_undirected_against_direction() {
    let g = cycle_with_tail();
    let path = g.path_undirected("site4", "site1").unwrap();

    assert_eq!(path.first().map(String::as_str), Some("site4"));
    assert_eq!(path.last().map(String::as_str), Some("site1"));
    assert!(is_undirected_path(&g, &path));
}

#[test]
fn test_path_undirected_disconnected() {
    let mut g = cycle_with_tail();
    g.add_vertex("island", Stats::new()).unwrap();
    assert_eq!(g.path_undirected("site1", "island"), None);
}

#[test]
fn test_path_undirected_unknown_ids() {
    let g = cycle_with_tail();
    assert_eq!(g.path_undirected("ghost", "site1"), None);
}

#[test]
fn test_path_has_no_repeated_vertices() {
    let g = cycle_with_tail();
    let path = g.path_undirected("site1", "site4").unwrap();
    let mut seen = path.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), path.len());
}

// ============================================================================
// Bounded Path Tests
// ============================================================================

#[test]
fn test_bounded_path_exact_length() {
    let g = cycle_with_tail();
    assert!(g.bounded_path_directed_exists("site1", "site4", 3));
    assert!(!g.bounded_path_directed_exists("site1", "site4", 2));
}

#[test]
fn test_bounded_path_shorter_than_limit() {
    let g = cycle_with_tail();
    assert!(g.bounded_path_directed_exists("site1", "site2", 5));
}

#[test]
fn test_bounded_path_zero_depth() {
    let g = cycle_with_tail();
    assert!(g.bounded_path_directed_exists("site1", "site1", 0));
    assert!(!g.bounded_path_directed_exists("site1", "site2", 0));
}

#[test]
fn test_bounded_path_unknown_ids() {
    let g = cycle_with_tail();
    assert!(!g.bounded_path_directed_exists("site1", "ghost", 10));
}

#[test]
fn test_bounded_path_not_pruned_by_failed_sibling() {
    // a -> b -> c -> d -> target, and a -> c directly. A shared visited set
    // would mark c (and d) as seen when the long branch runs out of depth,
    // and then refuse the short branch a -> c -> d -> target.
    let mut g = WebGraph::new();
    for d in ["a", "b", "c", "d", "target"] {
        g.add_vertex(d, Stats::new()).unwrap();
    }
    g.add_edge("a", "b", Stats::new()).unwrap();
    g.add_edge("b", "c", Stats::new()).unwrap();
    g.add_edge("c", "d", Stats::new()).unwrap();
    g.add_edge("d", "target", Stats::new()).unwrap();
    g.add_edge("a", "c", Stats::new()).unwrap();

    assert!(g.bounded_path_directed_exists("a", "target", 3));
    assert!(!g.bounded_path_directed_exists("a", "target", 2));
}

#[test]
fn test_repeated_searches_are_independent() {
    let g = cycle_with_tail();
    for _ in 0..3 {
        assert!(g.path_directed("site1", "site4").is_some());
        assert!(g.path_directed("site4", "site1").is_none());
    }
}

// ============================================================================
// Strong Connectivity Tests
// ============================================================================

#[test]
fn test_strongly_connected_within_cycle() {
    let g = cycle_with_tail();
    let (forward, back) = g.strongly_connected("site1", "site3");

    let forward = forward.unwrap();
    let back = back.unwrap();
    assert!(is_directed_path(&g, &forward));
    assert!(is_directed_path(&g, &back));
    assert_eq!(back, vec!["site3", "site1"]);
}

#[test]
fn test_strongly_connected_one_way() {
    let g = cycle_with_tail();
    let (forward, back) = g.strongly_connected("site1", "site4");

    assert!(forward.is_some());
    assert!(back.is_none());
}
