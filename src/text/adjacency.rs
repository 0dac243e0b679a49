// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::{parse_number, MalformedLine};
use crate::{Graph, Neighbors};

/// Parses a `City-Neighbor1(dist1),Neighbor2(dist2)` line.
/// `City-` alone declares a city without outgoing roads.
pub(super) fn parse_line(line: &str) -> Result<(String, Neighbors), MalformedLine> {
    let (city, roads) = line
        .trim()
        .split_once('-')
        .ok_or(MalformedLine::MissingSeparator('-'))?;

    let city = city.trim();
    if city.is_empty() {
        return Err(MalformedLine::EmptyCityName);
    }

    let mut neighbors = Neighbors::default();
    let roads = roads.trim();
    if roads.is_empty() {
        return Ok((city.to_string(), neighbors));
    }

    for road in roads.split(',') {
        let road = road.trim();
        let (neighbor, distance) = road
            .split_once('(')
            .and_then(|(neighbor, rest)| Some((neighbor.trim(), rest.strip_suffix(')')?)))
            .ok_or_else(|| MalformedLine::MissingParentheses(road.to_string()))?;

        if neighbor.is_empty() {
            return Err(MalformedLine::EmptyCityName);
        }

        let distance = parse_number(distance)?;
        if distance < 0.0 {
            return Err(MalformedLine::NegativeDistance(distance));
        }

        neighbors.insert(neighbor.to_string(), distance);
    }

    Ok((city.to_string(), neighbors))
}

pub(super) fn insert(g: &mut Graph, records: Vec<(String, Neighbors)>) {
    for (city, neighbors) in records {
        if g.neighbors(&city).is_ok() {
            log::warn!("roads from {} are given more than once, using the last ones", city);
        }
        g.set_neighbors(city, neighbors);
    }
}

pub(super) fn write<W: io::Write>(g: &Graph, mut w: W) -> io::Result<()> {
    for (city, neighbors) in g.iter_adjacency() {
        write!(w, "{}-", city)?;

        let mut roads = neighbors.iter().peekable();
        while let Some((neighbor, distance)) = roads.next() {
            let suffix = if roads.peek().is_some() { "," } else { "" };
            write!(w, "{}({}){}", neighbor, distance, suffix)?;
        }

        writeln!(w)?;
    }
    w.flush()
}
