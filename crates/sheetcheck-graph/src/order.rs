use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Display;

use tracing::trace;

use crate::error::{GraphError, Result};

/// A dependency graph: each node maps to its ordered parents.
///
/// The reverse graph produced by [`reverse_graph`] uses the same shape but
/// maps each node to its ordered children instead.
pub type Graph<N> = BTreeMap<N, Vec<N>>;

/// Order every declared node so that it appears after all of its parents.
///
/// Uses Kahn's algorithm: a node's in-degree is its number of parents, nodes
/// with no remaining parents are queued, and emitting a node decrements each
/// of its children. A parent that is referenced but never declared can never
/// be emitted, so its dependents are reported as unresolved.
pub fn topological_order<N>(graph: &Graph<N>) -> Result<Vec<N>>
where
    N: Ord + Clone + Display,
{
    let mut remaining: BTreeMap<&N, usize> = graph.keys().map(|node| (node, 0)).collect();
    let mut children: BTreeMap<&N, Vec<&N>> = BTreeMap::new();

    for (node, parents) in graph {
        for parent in parents {
            children.entry(parent).or_default().push(node);
            *remaining.entry(node).or_insert(0) += 1;
        }
    }

    let mut ready: VecDeque<&N> = remaining
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut sorted = Vec::with_capacity(graph.len());

    while let Some(current) = ready.pop_front() {
        trace!(node = %current, "emitting node");
        sorted.push(current.clone());

        let Some(kids) = children.get(current) else {
            continue;
        };
        for &child in kids {
            if let Some(degree) = remaining.get_mut(child) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.push_back(child);
                }
            }
        }
    }

    if sorted.len() != graph.len() {
        let unresolved = remaining
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(node, _)| node.to_string())
            .collect();
        return Err(GraphError::CycleDetected {
            emitted: sorted.len(),
            declared: graph.len(),
            unresolved,
        });
    }

    Ok(sorted)
}

/// Reverse edge direction: map every node to the nodes that declared it as a
/// parent, in declaration order.
///
/// Every declared node gets an entry (possibly empty). Parents that are
/// referenced but not declared also get an entry listing their children.
pub fn reverse_graph<N>(graph: &Graph<N>) -> Graph<N>
where
    N: Ord + Clone,
{
    let mut reverse: Graph<N> = graph.keys().map(|node| (node.clone(), Vec::new())).collect();

    for (node, parents) in graph {
        for parent in parents {
            reverse.entry(parent.clone()).or_default().push(node.clone());
        }
    }

    reverse
}

/// Direct children of `node` in a reverse graph.
pub fn children<'a, N>(node: &N, reverse: &'a Graph<N>) -> &'a [N]
where
    N: Ord,
{
    reverse.get(node).map(Vec::as_slice).unwrap_or(&[])
}

/// Every node transitively reachable from `start` in a reverse graph.
///
/// `start` itself is never part of the result, and each node is expanded at
/// most once so diamond-shaped inheritance does not re-walk shared subtrees.
pub fn descendants<N>(start: &N, reverse: &Graph<N>) -> BTreeSet<N>
where
    N: Ord + Clone,
{
    let mut found = BTreeSet::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for child in children(current, reverse) {
            if child != start && found.insert(child.clone()) {
                queue.push_back(child);
            }
        }
    }

    found
}
