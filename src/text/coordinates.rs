// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::{parse_number, MalformedLine};
use crate::{Coordinates, Graph};

/// Parses a `City:(lat,lon)` line.
pub(super) fn parse_line(line: &str) -> Result<(String, Coordinates), MalformedLine> {
    let (city, position) = line
        .trim()
        .split_once(':')
        .ok_or(MalformedLine::MissingSeparator(':'))?;

    let city = city.trim();
    if city.is_empty() {
        return Err(MalformedLine::EmptyCityName);
    }

    let parts: Vec<&str> = position
        .trim()
        .trim_matches(|c: char| c == '(' || c == ')')
        .split(',')
        .collect();
    if parts.len() != 2 {
        return Err(MalformedLine::CoordinateCount(parts.len()));
    }

    let lat = parse_number(parts[0])?;
    let lon = parse_number(parts[1])?;
    Ok((city.to_string(), Coordinates::new(lat, lon)))
}

pub(super) fn insert(g: &mut Graph, records: Vec<(String, Coordinates)>) {
    for (city, coordinates) in records {
        if g.get_coordinates(&city).is_some() {
            log::warn!("coordinates of {} are given more than once, using the last ones", city);
        }
        g.set_coordinates(city, coordinates);
    }
}

pub(super) fn write<W: io::Write>(g: &Graph, mut w: W) -> io::Result<()> {
    for (city, c) in g.iter() {
        writeln!(w, "{}:({},{})", city, c.lat, c.lon)?;
    }
    w.flush()
}
