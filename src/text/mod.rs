// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading and writing the two plain-text tables describing a road network.
//!
//! The coordinates table has one city per line:
//!
//! ```text
//! SanJose:(37.3382,-121.8863)
//! ```
//!
//! The adjacency table lists all outgoing roads (with distances in miles) of one city per line:
//!
//! ```text
//! SanJose-SanFrancisco(48.4),Monterey(71.7),SantaCruz(32.7)
//! ```
//!
//! Blank lines are ignored. Every function parses its whole input before touching the [Graph],
//! so a malformed table never leaves a partially loaded graph behind.

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::Graph;

mod adjacency;
mod coordinates;

/// Compression of an input table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Guess the compression from the file extension (`.gz` or `.bz2`);
    /// readers without a file name are assumed to be uncompressed.
    #[default]
    Unknown,

    /// Plain text
    None,

    /// [gzip](https://en.wikipedia.org/wiki/Gzip) compressed text
    Gzip,

    /// [bzip2](https://en.wikipedia.org/wiki/Bzip2) compressed text
    Bzip2,
}

impl Compression {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Unknown => match path.extension().and_then(OsStr::to_str) {
                Some("gz") => Self::Gzip,
                Some("bz2") => Self::Bzip2,
                _ => Self::None,
            },
            other => other,
        }
    }
}

/// Describes why a line of a table couldn't be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedLine {
    #[error("missing {0:?} separator")]
    MissingSeparator(char),

    #[error("empty city name")]
    EmptyCityName,

    #[error("expected 2 coordinates, got {0}")]
    CoordinateCount(usize),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("expected Neighbor(distance), got {0:?}")]
    MissingParentheses(String),

    #[error("negative distance: {0}")]
    NegativeDistance(f64),
}

/// Error which can occur when reading a table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {kind}")]
    Malformed { line: usize, kind: MalformedLine },
}

/// [Error] with the path of the offending table, returned by [load_graph].
#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
pub struct LoadError(pub PathBuf, #[source] pub Error);

/// Parses a finite number, ignoring surrounding whitespace.
fn parse_number(s: &str) -> Result<f64, MalformedLine> {
    match s.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(MalformedLine::InvalidNumber(s.to_string())),
    }
}

fn parse_lines<B, T, F>(reader: B, parse: F) -> Result<Vec<T>, Error>
where
    B: io::BufRead,
    F: Fn(&str) -> Result<T, MalformedLine>,
{
    let mut records = Vec::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse(&line).map_err(|kind| Error::Malformed {
            line: idx + 1,
            kind,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn read_records<R, T, F>(compression: Compression, reader: R, parse: F) -> Result<Vec<T>, Error>
where
    R: io::Read,
    F: Fn(&str) -> Result<T, MalformedLine>,
{
    match compression {
        Compression::Unknown | Compression::None => parse_lines(io::BufReader::new(reader), parse),

        Compression::Gzip => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            parse_lines(io::BufReader::new(d), parse)
        }

        Compression::Bzip2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            parse_lines(io::BufReader::new(d), parse)
        }
    }
}

/// Parse the coordinates table from a reader into a [Graph].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_coordinates_from_io<R: io::Read>(
    g: &mut Graph,
    compression: Compression,
    reader: R,
) -> Result<(), Error> {
    let records = read_records(compression, reader, coordinates::parse_line)?;
    coordinates::insert(g, records);
    Ok(())
}

/// Parse the coordinates table from a file at the provided path into a [Graph].
pub fn add_coordinates_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    compression: Compression,
    path: P,
) -> Result<(), Error> {
    let path = path.as_ref();
    let f = File::open(path)?;
    add_coordinates_from_io(g, compression.resolve(path), f)
}

/// Parse the uncompressed coordinates table from a static buffer into a [Graph].
pub fn add_coordinates_from_buffer(g: &mut Graph, data: &[u8]) -> Result<(), Error> {
    let records = parse_lines(data, coordinates::parse_line)?;
    coordinates::insert(g, records);
    Ok(())
}

/// Parse the adjacency table from a reader into a [Graph].
///
/// Roads of a city listed on a later line (or already present in the graph) replace
/// the earlier ones instead of being merged with them.
pub fn add_adjacency_from_io<R: io::Read>(
    g: &mut Graph,
    compression: Compression,
    reader: R,
) -> Result<(), Error> {
    let records = read_records(compression, reader, adjacency::parse_line)?;
    adjacency::insert(g, records);
    Ok(())
}

/// Parse the adjacency table from a file at the provided path into a [Graph].
pub fn add_adjacency_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    compression: Compression,
    path: P,
) -> Result<(), Error> {
    let path = path.as_ref();
    let f = File::open(path)?;
    add_adjacency_from_io(g, compression.resolve(path), f)
}

/// Parse the uncompressed adjacency table from a static buffer into a [Graph].
pub fn add_adjacency_from_buffer(g: &mut Graph, data: &[u8]) -> Result<(), Error> {
    let records = parse_lines(data, adjacency::parse_line)?;
    adjacency::insert(g, records);
    Ok(())
}

/// Loads a new [Graph] from a coordinates table and an adjacency table.
/// Compression of both files is guessed from their extensions.
pub fn load_graph<P: AsRef<Path>, Q: AsRef<Path>>(
    coordinates_path: P,
    adjacency_path: Q,
) -> Result<Graph, LoadError> {
    let coordinates_path = coordinates_path.as_ref();
    let adjacency_path = adjacency_path.as_ref();
    let mut g = Graph::default();

    add_coordinates_from_file(&mut g, Compression::Unknown, coordinates_path)
        .map_err(|e| LoadError(coordinates_path.to_path_buf(), e))?;
    add_adjacency_from_file(&mut g, Compression::Unknown, adjacency_path)
        .map_err(|e| LoadError(adjacency_path.to_path_buf(), e))?;

    warn_about_missing_coordinates(&g);
    log::info!(
        "loaded {} cities with coordinates and roads from {} cities",
        g.len(),
        g.iter_adjacency().count()
    );
    Ok(g)
}

/// Roads to or from cities without coordinates are kept, but
/// any search touching them fails on the heuristic.
fn warn_about_missing_coordinates(g: &Graph) {
    for (city, neighbors) in g.iter_adjacency() {
        if g.get_coordinates(city).is_none() {
            log::warn!("{} has roads, but no coordinates", city);
        }

        for neighbor in neighbors.keys() {
            if g.get_coordinates(neighbor).is_none() {
                log::warn!("road {} -> {} leads to a city without coordinates", city, neighbor);
            }
        }
    }
}

/// Writes all cities of the [Graph] as a coordinates table, in name order.
pub fn write_coordinates<W: io::Write>(g: &Graph, w: W) -> io::Result<()> {
    coordinates::write(g, w)
}

/// Writes all roads of the [Graph] as an adjacency table, in name order.
pub fn write_adjacency<W: io::Write>(g: &Graph, w: W) -> io::Result<()> {
    adjacency::write(g, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinates;

    const COORDINATES: &[u8] = include_bytes!("test_fixtures/california.coordinates.txt");
    const COORDINATES_BZ2: &[u8] = include_bytes!("test_fixtures/california.coordinates.txt.bz2");
    const ADJACENCY: &[u8] = include_bytes!("test_fixtures/california.map.txt");
    const ADJACENCY_GZ: &[u8] = include_bytes!("test_fixtures/california.map.txt.gz");

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-6),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    macro_rules! assert_malformed {
        ($result:expr, $line:expr, $kind:expr) => {
            match $result {
                Err(Error::Malformed { line, kind }) => {
                    assert_eq!(line, $line);
                    assert_eq!(kind, $kind);
                }
                other => panic!("expected a malformed line error, got {:?}", other),
            }
        };
    }

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src/text/test_fixtures")
            .join(name)
    }

    fn check_california(g: &Graph) {
        assert_eq!(g.len(), 15);
        assert_eq!(g.iter_adjacency().count(), 15);

        assert_eq!(
            g.get_coordinates("SanJose"),
            Some(Coordinates::new(37.3382, -121.8863))
        );
        assert_eq!(
            g.get_coordinates("Hilo"),
            Some(Coordinates::new(19.7241, -155.0868))
        );

        assert_eq!(g.get_edge("SanJose", "SanFrancisco"), 48.4);
        assert_eq!(g.get_edge("SanJose", "Fresno"), 149.0);
        assert_eq!(g.get_edge("Honolulu", "Hilo"), 216.0);
        assert!(g.get_edge("SanJose", "LosAngeles").is_infinite());
        assert_eq!(g.neighbors("SanJose").unwrap().len(), 6);
    }

    fn california() -> Graph {
        let mut g = Graph::default();
        add_coordinates_from_buffer(&mut g, COORDINATES).unwrap();
        add_adjacency_from_buffer(&mut g, ADJACENCY).unwrap();
        g
    }

    #[test]
    fn load_buffers() {
        check_california(&california());
    }

    #[test]
    fn load_compressed_io() {
        let mut g = Graph::default();
        add_coordinates_from_io(&mut g, Compression::Bzip2, COORDINATES_BZ2).unwrap();
        add_adjacency_from_io(&mut g, Compression::Gzip, ADJACENCY_GZ).unwrap();
        check_california(&g);
        assert_eq!(g, california());
    }

    #[test]
    fn load_graph_from_files() {
        let g = load_graph(
            fixture_path("california.coordinates.txt"),
            fixture_path("california.map.txt"),
        )
        .unwrap();
        check_california(&g);
    }

    #[test]
    fn load_graph_guesses_compression() {
        let g = load_graph(
            fixture_path("california.coordinates.txt.bz2"),
            fixture_path("california.map.txt.gz"),
        )
        .unwrap();
        assert_eq!(g, california());
    }

    #[test]
    fn load_graph_error_message() {
        let malformed = fixture_path("malformed.coordinates.txt");
        let err = load_graph(&malformed, fixture_path("california.map.txt")).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{}: line 2: missing ':' separator", malformed.display())
        );
    }

    #[test]
    fn load_graph_missing_file() {
        let missing = fixture_path("does-not-exist.txt");
        let err = load_graph(fixture_path("california.coordinates.txt"), &missing).unwrap_err();
        assert_eq!(err.0, missing);
        assert!(matches!(err.1, Error::Io(_)));
    }

    #[test]
    fn malformed_coordinates() {
        const DATA: &[u8] = b"SanJose:(37.3,-121.9)\n\nOakland (37.8,-122.2)\n";

        let mut g = Graph::default();
        assert_malformed!(
            add_coordinates_from_buffer(&mut g, DATA),
            3,
            MalformedLine::MissingSeparator(':')
        );
        assert!(g.is_empty());
    }

    #[test]
    fn malformed_adjacency() {
        const DATA: &[u8] = b"SanJose-SanFrancisco(48.4)\nSanFrancisco-SanJose(48.4),Oakland12.1\n";

        let mut g = Graph::default();
        assert_malformed!(
            add_adjacency_from_buffer(&mut g, DATA),
            2,
            MalformedLine::MissingParentheses("Oakland12.1".to_string())
        );
        assert!(g.neighbors("SanJose").is_err());
    }

    #[test]
    fn repeated_city_overwrites_roads() {
        const DATA: &[u8] = b"SanJose-SanFrancisco(48.4),Oakland(41.0)\nSanJose-Monterey(71.7)\n";

        let mut g = Graph::default();
        add_adjacency_from_buffer(&mut g, DATA).unwrap();
        assert_eq!(g.neighbors("SanJose").unwrap().len(), 1);
        assert_eq!(g.get_edge("SanJose", "Monterey"), 71.7);
        assert!(g.get_edge("SanJose", "SanFrancisco").is_infinite());
    }

    #[test]
    fn windows_line_endings() {
        const DATA: &[u8] = b"SanJose:(37.3,-121.9)\r\nSanFrancisco:(37.7,-122.4)\r\n";

        let mut g = Graph::default();
        add_coordinates_from_buffer(&mut g, DATA).unwrap();
        assert_eq!(
            g.get_coordinates("SanFrancisco"),
            Some(Coordinates::new(37.7, -122.4))
        );
    }

    #[test]
    fn write_round_trip() {
        let g = california();

        let mut coordinates = Vec::default();
        write_coordinates(&g, &mut coordinates).unwrap();
        let mut adjacency = Vec::default();
        write_adjacency(&g, &mut adjacency).unwrap();

        let mut reloaded = Graph::default();
        add_coordinates_from_buffer(&mut reloaded, &coordinates).unwrap();
        add_adjacency_from_buffer(&mut reloaded, &adjacency).unwrap();

        check_california(&reloaded);
        for (city, c) in g.iter() {
            let r = reloaded.get_coordinates(city).unwrap();
            assert_almost_eq!(c.lat, r.lat);
            assert_almost_eq!(c.lon, r.lon);
        }
        for (city, neighbors) in g.iter_adjacency() {
            assert_eq!(reloaded.neighbors(city).unwrap().len(), neighbors.len());
            for (neighbor, &cost) in neighbors {
                assert_almost_eq!(reloaded.get_edge(city, neighbor), cost);
            }
        }
    }
}
