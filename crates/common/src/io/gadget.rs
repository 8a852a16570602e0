use clap::ValueEnum;
use std::fs::File;
use std::io::BufRead;
use std::num::{ParseFloatError, ParseIntError};
use std::path::Path;
use thiserror::Error;

/// The two gadget types of the lower-bound construction.
///
/// In catalogue keys a type I gadget is written as `C` and a type II gadget as
/// `L`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, ValueEnum)]
pub enum GadgetKind {
    /// Chained through a single join vertex `0`.
    #[value(name = "I")]
    TypeI,
    /// Chained through the vertex pair `0`, `1`, tracking `2`, `3`.
    #[value(name = "II")]
    TypeII,
}

impl GadgetKind {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "C" => Some(GadgetKind::TypeI),
            "L" => Some(GadgetKind::TypeII),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            GadgetKind::TypeI => 'C',
            GadgetKind::TypeII => 'L',
        }
    }

    pub fn roman(&self) -> &'static str {
        match self {
            GadgetKind::TypeI => "I",
            GadgetKind::TypeII => "II",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GadgetCounts {
    /// Number of connected sets containing the join vertex.
    Sets(u64),
    /// Transfer matrix between consecutive type II gadgets.
    Matrix([[u64; 3]; 3]),
}

/// One gadget of the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct GadgetRecord {
    pub kind: GadgetKind,
    pub degree: usize,
    pub n: usize,
    pub bound: f64,
    pub flags: Vec<String>,
    pub counts: Option<GadgetCounts>,
    pub edges: Vec<(usize, usize)>,
}

impl GadgetRecord {
    /// The catalogue key, e.g. `C-3-10`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.kind.letter(), self.degree, self.n)
    }
}

#[derive(Error, Debug)]
pub enum ReadGadgetError {
    #[error("invalid key (got {0})")]
    InvalidKey(String),
    #[error("missing bound")]
    MissingBound,
    #[error("unknown attribute (got {0})")]
    UnknownAttribute(String),
    #[error("invalid edge (got {0})")]
    InvalidEdge(String),
    #[error("invalid matrix (got {0})")]
    InvalidMatrix(String),
    #[error("missing edge list")]
    MissingEdges,
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("parse float error")]
    ParseFloat(#[from] ParseFloatError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

fn parse_edge(token: &str) -> Result<(usize, usize), ReadGadgetError> {
    let (u, v) = token.split_once('-').ok_or_else(|| ReadGadgetError::InvalidEdge(token.to_owned()))?;
    Ok((u.parse()?, v.parse()?))
}

fn parse_matrix(value: &str) -> Result<[[u64; 3]; 3], ReadGadgetError> {
    let err = || ReadGadgetError::InvalidMatrix(value.to_owned());
    let rows = value
        .split('|')
        .map(|row| -> Result<[u64; 3], ReadGadgetError> {
            let row = row.split(',').map(str::parse).collect::<Result<Vec<u64>, _>>()?;
            <[u64; 3]>::try_from(row).map_err(|_| err())
        })
        .collect::<Result<Vec<_>, ReadGadgetError>>()?;
    <[[u64; 3]; 3]>::try_from(rows).map_err(|_| err())
}

/// Parses a catalogue line of the form
/// `KEY BOUND [FLAGS...] c:COUNT|m:A,B,C|D,E,F|G,H,I :U-V,U-V,...`.
pub fn parse_gadget(line: &str) -> Result<GadgetRecord, ReadGadgetError> {
    let mut parts = line.split_ascii_whitespace();
    let key = parts.next().ok_or_else(|| ReadGadgetError::InvalidKey(line.to_owned()))?;
    let (kind, degree, n) = {
        let err = || ReadGadgetError::InvalidKey(key.to_owned());
        let mut iter = key.split('-');
        let kind = iter.next().and_then(GadgetKind::from_letter).ok_or_else(err)?;
        let degree: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let n: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if iter.next().is_some() {
            return Err(err());
        }
        (kind, degree, n)
    };
    let bound: f64 = parts.next().ok_or(ReadGadgetError::MissingBound)?.parse()?;

    let mut flags = vec![];
    let mut counts = None;
    let mut edges = None;
    for part in parts {
        let Some((attr, value)) = part.split_once(':') else {
            flags.push(part.to_owned());
            continue;
        };
        match attr {
            "c" => counts = Some(GadgetCounts::Sets(value.parse()?)),
            "m" => counts = Some(GadgetCounts::Matrix(parse_matrix(value)?)),
            "" if value.is_empty() => edges = Some(vec![]),
            "" => edges = Some(value.split(',').map(parse_edge).collect::<Result<_, _>>()?),
            _ => return Err(ReadGadgetError::UnknownAttribute(attr.to_owned())),
        }
    }
    let edges = edges.ok_or(ReadGadgetError::MissingEdges)?;

    Ok(GadgetRecord { kind, degree, n, bound, flags, counts, edges })
}

/// Reads all gadgets of a catalogue file, ignoring lines that do not start
/// with a gadget key.
pub fn read_gadgets<P>(path: P) -> Result<Vec<GadgetRecord>, ReadGadgetError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let mut gadgets = vec![];
    for line in std::io::BufReader::new(file).lines() {
        let line = line?;
        if !(line.starts_with("C-") || line.starts_with("L-")) {
            continue;
        }
        gadgets.push(parse_gadget(&line)?);
    }
    gadgets.sort_by_key(|g| (g.kind.letter(), g.degree, g.n));
    Ok(gadgets)
}
