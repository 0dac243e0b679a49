// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::{Graph, Route, UnknownCityError};

#[derive(Debug, Clone)]
struct QueueItem<'a> {
    at: &'a str,
    cost: f64,
    score: f64,
    path: Vec<&'a str>,
}

impl QueueItem<'_> {
    /// Ordering where lower is better: by score, then cost, then city name,
    /// then the path leading to the city.
    fn precedence(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| self.at.cmp(other.at))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialEq for QueueItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.precedence(other) == Ordering::Equal
    }
}

impl Eq for QueueItem<'_> {}

impl PartialOrd for QueueItem<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.precedence(self)
    }
}

/// Route search over a borrowed [Graph] using the
/// [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm),
/// with the great-circle distance to the goal ([Graph::heuristic]) as the estimate.
///
/// The graph is never modified, so one graph may back any number of searches.
#[derive(Debug, Clone, Copy)]
pub struct AStar<'a> {
    g: &'a Graph,
}

impl<'a> AStar<'a> {
    pub fn new(g: &'a Graph) -> Self {
        Self { g }
    }

    /// Finds the shortest route from `start` to `goal`.
    ///
    /// Returns a [Route] with an empty path and infinite cost if `goal` is not reachable
    /// from `start`. Cities missing from the coordinate table, and expanded cities missing
    /// from the adjacency table, result in an [UnknownCityError].
    ///
    /// Among several routes of equal cost, the returned one is chosen deterministically:
    /// queued candidates with equal estimates are ordered by accumulated cost,
    /// then by city name, then by the path leading to them.
    pub fn search(&self, start: &str, goal: &str) -> Result<Route, UnknownCityError> {
        log::debug!("searching for a route from {} to {}", start, goal);

        let mut queue: BinaryHeap<QueueItem<'_>> = BinaryHeap::default();
        let mut known_costs: HashMap<&str, f64> = HashMap::default();
        let mut visited: HashSet<&str> = HashSet::default();

        queue.push(QueueItem {
            at: start,
            cost: 0.0,
            score: self.g.heuristic(start, goal)?,
            path: vec![start],
        });
        known_costs.insert(start, 0.0);

        while let Some(item) = queue.pop() {
            if item.at == goal {
                log::debug!(
                    "found a route from {} to {} of {:.2} miles after expanding {} cities",
                    start,
                    goal,
                    item.cost,
                    visited.len()
                );
                return Ok(Route {
                    path: item.path.into_iter().map(str::to_string).collect(),
                    cost: item.cost,
                });
            }

            // Multiple items for the same city may be queued; only the first one is expanded.
            if !visited.insert(item.at) {
                continue;
            }

            for (neighbor, &edge_cost) in self.g.neighbors(item.at)? {
                let neighbor = neighbor.as_str();
                if visited.contains(neighbor) {
                    continue;
                }

                // Check if this is the cheapest way to the neighbor
                let neighbor_cost = item.cost + edge_cost;
                if neighbor_cost >= known_costs.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                    continue;
                }

                let mut path = Vec::with_capacity(item.path.len() + 1);
                path.extend_from_slice(&item.path);
                path.push(neighbor);

                known_costs.insert(neighbor, neighbor_cost);
                queue.push(QueueItem {
                    at: neighbor,
                    cost: neighbor_cost,
                    score: neighbor_cost + self.g.heuristic(neighbor, goal)?,
                    path,
                });
            }
        }

        log::debug!(
            "no route from {} to {} after expanding {} cities",
            start,
            goal,
            visited.len()
        );
        Ok(Route::not_found())
    }
}

/// Shorthand for [AStar::new]`(g).`[search](AStar::search)`(start, goal)`.
pub fn find_route(g: &Graph, start: &str, goal: &str) -> Result<Route, UnknownCityError> {
    AStar::new(g).search(start, goal)
}
