// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest road routes between named cities.
//!
//! Cities with their positions and the roads between them are loaded from two simple
//! [text tables](crate::text) into a [Graph], and [A*](crate::AStar) finds shortest routes,
//! using the great-circle distance to the goal as the heuristic.
//!
//! # Example
//!
//! ```no_run
//! let g = cityroute::text::load_graph("coordinates.txt", "map.txt")
//!     .expect("failed to load the road network");
//!
//! let route = cityroute::find_route(&g, "SanJose", "Sacramento")
//!     .expect("unknown city");
//!
//! if route.is_found() {
//!     println!("{} ({:.2} miles)", route.path.join(" -> "), route.cost);
//! }
//! ```

mod astar;
mod distance;
mod error;
mod graph;
pub mod text;

pub use astar::{find_route, AStar};
pub use distance::{earth_distance, EARTH_RADIUS_MILES};
pub use error::UnknownCityError;
pub use graph::{Graph, Neighbors};

/// Position of a city, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Result of a route search.
///
/// If no route exists, `path` is empty and `cost` is [f64::INFINITY].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Visited cities, starting with the start city and ending with the goal.
    pub path: Vec<String>,

    /// Total road distance, in miles.
    pub cost: f64,
}

impl Route {
    pub fn not_found() -> Self {
        Self {
            path: Vec::default(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}
