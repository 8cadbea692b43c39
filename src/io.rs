use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::*;
use crate::CliqueReport;

/// Reads a graph in flagser's text format:
/// ```text
/// dim 0:
/// 1 1 1 1
/// dim 1:
/// 0 1 1
/// 2 3 1
/// ```
/// The second line has one entry per vertex, every line after `dim 1:` is an edge `i j [weight]`.
/// Edge directions are ignored and an edge listed in both directions is added once.
pub fn read_flag_file<G: UndirectedGraphNew, P: AsRef<Path>>(fname: P) -> Result<G> {
    let fcontents = std::fs::read_to_string(fname)?;
    parse_flag(&fcontents)
}

pub fn parse_flag<G: UndirectedGraphNew>(fcontents: &str) -> Result<G> {
    let mut lines = fcontents.lines().enumerate().map(|(i, l)| (i + 1, l));
    expect_header(lines.next(), "dim 0:")?;
    let nnodes = match lines.next() {
        Some((_, l)) => l.split_whitespace().count(),
        None => return Err(Error::Parse { line: 2, message: "missing vertex line".to_string() }),
    };
    let mut graph = G::new_disconnected(nnodes);
    expect_header(lines.next(), "dim 1:")?;
    for (line, content) in lines {
        let mut ijw = content.split_whitespace();
        let (i, j) = match (ijw.next(), ijw.next()) {
            (Some(i), Some(j)) => (parse_vertex(i, nnodes, line)?, parse_vertex(j, nnodes, line)?),
            (None, _) => continue, // blank line
            (Some(_), None) => return Err(Error::Parse { line, message: "edge needs two vertices".to_string() }),
        };
        if i == j {
            return Err(Error::Parse { line, message: format!("self loop at vertex {}", i) });
        }
        if !graph.has_edge(i, j) {
            graph.add_edge(i, j);
        }
    }
    Ok(graph)
}

fn expect_header(line: Option<(usize, &str)>, header: &str) -> Result<()> {
    match line {
        Some((_, l)) if l.trim() == header => Ok(()),
        Some((n, l)) => Err(Error::Parse { line: n, message: format!("expected {:?}, found {:?}", header, l) }),
        None => Err(Error::Parse { line: 0, message: format!("missing {:?}", header) }),
    }
}

fn parse_vertex(s: &str, nnodes: usize, line: usize) -> Result<Node> {
    let v: Node = s.parse().map_err(|e| Error::Parse { line, message: format!("{:?}: {}", s, e) })?;
    if v as usize >= nnodes {
        return Err(Error::Parse { line, message: format!("vertex {} out of range, graph has {} vertices", v, nnodes) });
    }
    Ok(v)
}

/// Writes every undirected edge once, from the smaller to the larger vertex.
pub fn save_flag_file<G: UndirectedGraph + ?Sized, P: AsRef<Path>>(fname: P, graph: &G) -> Result<()> {
    let mut out = BufWriter::new(File::create(fname)?);
    writeln!(out, "dim 0:")?;
    writeln!(out, "{}", "1 ".repeat(graph.nnodes()).trim_end())?; // add vertices
    writeln!(out, "dim 1:")?;
    for [i, j] in graph.edges() {
        writeln!(out, "{} {} 1", i, j)?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_report<P: AsRef<Path>>(fname: P, report: &CliqueReport) -> Result<()> {
    let mut out = BufWriter::new(File::create(fname)?);
    bincode::serialize_into(&mut out, report)?;
    out.flush()?;
    Ok(())
}

pub fn load_report<P: AsRef<Path>>(fname: P) -> Result<CliqueReport> {
    let input = BufReader::new(File::open(fname)?);
    Ok(bincode::deserialize_from(input)?)
}
