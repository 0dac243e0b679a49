// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::{earth_distance, Coordinates, UnknownCityError};

/// Outgoing roads of a single city: neighbor name to distance in miles.
pub type Neighbors = BTreeMap<String, f64>;

/// Represents a road network as a table of named cities with their [Coordinates]
/// and a table of directed, weighted roads between them.
///
/// Both tables are ordered by city name, so all iteration (and thus route search)
/// is deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    coordinates: BTreeMap<String, Coordinates>,
    adjacency: BTreeMap<String, Neighbors>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cities with known coordinates.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Returns an iterator over all cities with known coordinates, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinates)> {
        self.coordinates.iter().map(|(name, &c)| (name.as_str(), c))
    }

    /// Returns an iterator over the adjacency table, in name order.
    pub fn iter_adjacency(&self) -> impl Iterator<Item = (&str, &Neighbors)> {
        self.adjacency.iter().map(|(name, n)| (name.as_str(), n))
    }

    /// Retrieves the [Coordinates] of a city.
    pub fn get_coordinates(&self, city: &str) -> Option<Coordinates> {
        self.coordinates.get(city).copied()
    }

    /// Creates or replaces the [Coordinates] of a city.
    ///
    /// Moving a city might break the requirement that road distances are not
    /// shorter than the crow-flies distance, and thus route optimality.
    pub fn set_coordinates<S: Into<String>>(&mut self, city: S, coordinates: Coordinates) {
        self.coordinates.insert(city.into(), coordinates);
    }

    /// Gets all outgoing roads from a city.
    pub fn neighbors(&self, city: &str) -> Result<&Neighbors, UnknownCityError> {
        self.adjacency
            .get(city)
            .ok_or_else(|| UnknownCityError::new(city))
    }

    /// Replaces all outgoing roads of a city. Previous roads are dropped, not merged.
    pub fn set_neighbors<S: Into<String>>(&mut self, city: S, neighbors: Neighbors) {
        self.adjacency.insert(city.into(), neighbors);
    }

    /// Gets the distance of a road from one city to another.
    /// If such a road doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from: &str, to: &str) -> f64 {
        self.adjacency
            .get(from)
            .and_then(|n| n.get(to))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or updates a road from one city to another.
    pub fn set_edge<S: Into<String>, T: Into<String>>(&mut self, from: S, to: T, cost: f64) {
        debug_assert!(cost >= 0.0);
        self.adjacency
            .entry(from.into())
            .or_default()
            .insert(to.into(), cost);
    }

    /// Sums road distances along consecutive cities of `path`.
    /// Returns [f64::INFINITY] if any of the roads doesn't exist.
    pub fn path_cost<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        path.windows(2)
            .map(|pair| self.get_edge(pair[0].as_ref(), pair[1].as_ref()))
            .sum()
    }

    /// Great-circle distance between two cities, in miles. Used as the A* heuristic.
    pub fn heuristic(&self, a: &str, b: &str) -> Result<f64, UnknownCityError> {
        let a = self
            .get_coordinates(a)
            .ok_or_else(|| UnknownCityError::new(a))?;
        let b = self
            .get_coordinates(b)
            .ok_or_else(|| UnknownCityError::new(b))?;
        Ok(earth_distance(a.lat, a.lon, b.lat, b.lon))
    }
}
