//! Line-oriented test fixtures.
//!
//! A fixture file holds any number of cases. Each case starts with a line
//! reading `begin` and is followed by four sections, each closed by `done`:
//!
//! ```text
//! begin
//! // nodes
//! a
//! b
//! c
//! done
//! // edges: from to weight
//! a b 1
//! b c 1
//! done
//! // terminals
//! a
//! c
//! done
//! // expected paths
//! a b c
//! done
//! ```
//!
//! Blank lines are ignored everywhere, and so is any line whose first token
//! starts with `//`. Lines outside a case that are not `begin` are skipped.

use core::fmt;
use std::num::ParseIntError;
use std::time::Instant;

use serde::Serialize;

use crate::graph::{Graph, NodeId, Path, Weight};
use crate::solver::{SearchStats, SolveError, Solver, SolverConfig};

/// Errors raised while reading or running a fixture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixtureError {
    /// An edge line ended before all three fields were read.
    #[error("line {line}: missing {field} in edge definition")]
    MissingToken {
        /// 1-based line number.
        line: usize,
        /// The absent field.
        field: &'static str,
    },

    /// An edge weight is not a non-negative integer.
    #[error("line {line}: invalid weight `{value}`: {source}")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        value: String,
        /// Why it failed to parse.
        source: ParseIntError,
    },

    /// The input ended inside a case.
    #[error("case at line {line}: input ended inside the {section} section")]
    UnexpectedEof {
        /// 1-based line number of the case's `begin`.
        line: usize,
        /// The section left open.
        section: Section,
    },

    /// A terminal name does not match any node of the case.
    #[error("unknown node `{name}`")]
    UnknownNode {
        /// The unmatched name.
        name: String,
    },

    /// The solver rejected the case.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// The four sections of a case, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Node names.
    Nodes,
    /// `from to weight` triples.
    Edges,
    /// Terminal names.
    Terminals,
    /// Expected path node sequences.
    Expected,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nodes => "nodes",
            Self::Edges => "edges",
            Self::Terminals => "terminals",
            Self::Expected => "expected paths",
        })
    }
}

/// One `from to weight` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSpec {
    /// First endpoint name.
    pub from: String,
    /// Second endpoint name.
    pub to: String,
    /// Edge weight.
    pub weight: Weight,
}

/// A single `begin` .. `done` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixtureCase {
    /// 1-based line number of the `begin` line.
    pub line: usize,
    /// Node names, in insertion order.
    pub nodes: Vec<String>,
    /// Edge definitions.
    pub edges: Vec<EdgeSpec>,
    /// Terminal names.
    pub terminals: Vec<String>,
    /// Expected paths as node-name sequences.
    pub expected: Vec<Vec<String>>,
}

/// A parsed fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// The cases, in file order.
    pub cases: Vec<FixtureCase>,
}

impl Fixture {
    /// Parses fixture text.
    ///
    /// # Errors
    /// Returns a [`FixtureError`] carrying the offending line number when an
    /// edge line is malformed or the input ends inside a case.
    pub fn parse(input: &str) -> Result<Self, FixtureError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text))
            .filter(|(_, text)| {
                text.split_whitespace()
                    .next()
                    .is_some_and(|token| !token.starts_with("//"))
            });

        let mut cases = Vec::new();
        while let Some((line, text)) = lines.next() {
            if text.split_whitespace().next() != Some("begin") {
                continue;
            }

            let mut case = FixtureCase {
                line,
                ..FixtureCase::default()
            };
            for section in [Section::Nodes, Section::Edges, Section::Terminals, Section::Expected] {
                let mut closed = false;
                for (number, text) in lines.by_ref() {
                    let mut tokens = text.split_whitespace();
                    let Some(first) = tokens.next() else {
                        continue;
                    };
                    if first == "done" {
                        closed = true;
                        break;
                    }
                    match section {
                        Section::Nodes => case.nodes.push(first.to_owned()),
                        Section::Terminals => case.terminals.push(first.to_owned()),
                        Section::Edges => case.edges.push(parse_edge(number, first, tokens)?),
                        Section::Expected => {
                            let mut names = vec![first.to_owned()];
                            names.extend(tokens.map(str::to_owned));
                            case.expected.push(names);
                        }
                    }
                }
                if !closed {
                    return Err(FixtureError::UnexpectedEof { line, section });
                }
            }
            cases.push(case);
        }

        Ok(Self { cases })
    }
}

fn parse_edge<'a>(
    line: usize,
    from: &str,
    mut rest: impl Iterator<Item = &'a str>,
) -> Result<EdgeSpec, FixtureError> {
    let to = rest.next().ok_or(FixtureError::MissingToken { line, field: "target" })?;
    let raw = rest.next().ok_or(FixtureError::MissingToken { line, field: "weight" })?;
    let weight = raw.parse::<Weight>().map_err(|source| FixtureError::InvalidWeight {
        line,
        value: raw.to_owned(),
        source,
    })?;
    Ok(EdgeSpec {
        from: from.to_owned(),
        to: to.to_owned(),
        weight,
    })
}

/// Pass or fail, with the reason for a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The solver matched every expected path.
    Passed,
    /// The solver's answer differs from the expectation.
    Failed {
        /// What differed first.
        reason: String,
    },
}

impl Verdict {
    /// Returns `true` for [`Verdict::Passed`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// The result of running one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    /// The solver's paths rendered as `Path: a b c (w)`.
    pub paths: Vec<String>,
    /// Total weight of the solution.
    pub weight: Weight,
    /// Search counters.
    pub stats: SearchStats,
    /// Wall-clock solve time in milliseconds.
    pub elapsed_ms: f64,
    /// Comparison against the expected paths.
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl FixtureCase {
    /// Builds the case's graph and resolves its terminals.
    ///
    /// Nodes are inserted in listed order; edge endpoints that were not
    /// listed are added as they are met.
    ///
    /// # Errors
    /// [`FixtureError::UnknownNode`] if a terminal names no node.
    pub fn build(&self) -> Result<(Graph<String>, Vec<NodeId>), FixtureError> {
        let mut graph = Graph::with_capacity(self.nodes.len());
        for name in &self.nodes {
            graph.add_node(name.clone());
        }
        for edge in &self.edges {
            graph.connect(edge.from.clone(), edge.to.clone(), edge.weight);
        }

        let terminals = self
            .terminals
            .iter()
            .map(|name| {
                graph
                    .find(name.as_str())
                    .ok_or_else(|| FixtureError::UnknownNode { name: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((graph, terminals))
    }

    /// Builds and solves the case, then compares against the expected paths.
    ///
    /// # Errors
    /// Build errors, or [`FixtureError::Solve`] if the solver fails.
    pub fn run(&self, config: &SolverConfig) -> Result<CaseOutcome, FixtureError> {
        let (graph, terminals) = self.build()?;
        self.evaluate(&graph, &terminals, config)
    }

    /// Solves an already built case and compares against the expected paths.
    ///
    /// # Errors
    /// [`FixtureError::Solve`] if the solver fails.
    pub fn evaluate(
        &self,
        graph: &Graph<String>,
        terminals: &[NodeId],
        config: &SolverConfig,
    ) -> Result<CaseOutcome, FixtureError> {
        let start = Instant::now();
        let solution = Solver::new(graph).with_config(config.clone()).solve(terminals)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

        let verdict = self.compare(graph, &solution.paths);
        tracing::debug!(line = self.line, passed = verdict.is_pass(), elapsed_ms, "fixture case evaluated");

        Ok(CaseOutcome {
            paths: solution.paths.iter().map(|p| p.display(graph).to_string()).collect(),
            weight: solution.weight,
            stats: solution.stats,
            elapsed_ms,
            verdict,
        })
    }

    fn compare(&self, graph: &Graph<String>, paths: &[Path]) -> Verdict {
        if paths.len() != self.expected.len() {
            return Verdict::Failed {
                reason: format!("expected {} paths, found {}", self.expected.len(), paths.len()),
            };
        }
        for (index, (path, expected)) in paths.iter().zip(&self.expected).enumerate() {
            let actual = path.display_without_weight(graph).to_string();
            let wanted = format!("Path: {}", expected.join(" "));
            if actual != wanted {
                return Verdict::Failed {
                    reason: format!("path {index}: expected `{wanted}`, found `{actual}`"),
                };
            }
        }
        Verdict::Passed
    }
}

/// Renders paths in the fixture's expected-path line format.
pub fn render_paths<T: fmt::Display>(graph: &Graph<T>, paths: &[Path]) -> String {
    let mut out = String::new();
    for path in paths {
        out.push_str(&path.names(graph).join(" "));
        out.push('\n');
    }
    out
}
