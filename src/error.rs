// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Returned by [Graph::neighbors](crate::Graph::neighbors), [Graph::heuristic](crate::Graph::heuristic)
/// and route searches when a city is absent from the coordinate or the adjacency table.
///
/// This is always a programmer or data error. Unreachable cities are reported through
/// [Route::is_found](crate::Route::is_found) instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown city: {0}")]
pub struct UnknownCityError(pub String);

impl UnknownCityError {
    pub(crate) fn new(city: &str) -> Self {
        Self(city.to_string())
    }
}
