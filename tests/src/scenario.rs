//! Scenario definition.
//!
//! A scenario pairs one graph with an operations file of named queries and
//! an assertion per step:
//!
//! ```ignore
//! Scenario::new("brackets")
//!     .graph("two_cycles/graph.txt")
//!     .operations("two_cycles/queries.pq")
//!     .step("brackets", |a| a.targets_of(0, [0, 3]).targets_of(3, []))
//!     .run()
//!     .unwrap();
//! ```

use std::path::{Path, PathBuf};

use pathq_graph::{two_cycles, LabeledGraph};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Operations;
use crate::runner::Runner;

/// Directory fixture paths are resolved against.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[derive(Debug)]
enum GraphSource {
    File(PathBuf),
    Inline(LabeledGraph),
}

#[derive(Debug)]
enum OperationsSource {
    File(PathBuf),
    Inline(Operations),
}

/// A named step and the assertion its result must satisfy.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub assertion: Assertion,
}

#[derive(Debug)]
pub struct Scenario {
    name: String,
    graph: Option<GraphSource>,
    operations: Option<OperationsSource>,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: None,
            operations: None,
            steps: Vec::new(),
        }
    }

    /// Edge-list file, relative to the fixtures directory.
    pub fn graph(mut self, path: impl AsRef<Path>) -> Self {
        self.graph = Some(GraphSource::File(fixtures_dir().join(path)));
        self
    }

    pub fn with_graph(mut self, graph: LabeledGraph) -> Self {
        self.graph = Some(GraphSource::Inline(graph));
        self
    }

    pub fn edges<L: Into<pathq_core::Symbol>>(self, edges: impl IntoIterator<Item = (u64, L, u64)>) -> Self {
        self.with_graph(LabeledGraph::from_edges(edges))
    }

    /// Cycles of `n + 1` and `m + 1` edges sharing node 0.
    pub fn two_cycles(self, n: u64, m: u64, labels: (&str, &str)) -> Self {
        self.with_graph(two_cycles(n, m, labels))
    }

    /// Operations file, relative to the fixtures directory.
    pub fn operations(mut self, path: impl AsRef<Path>) -> Self {
        self.operations = Some(OperationsSource::File(fixtures_dir().join(path)));
        self
    }

    pub fn operations_source(mut self, source: &str) -> ScenarioResult<Self> {
        self.operations = Some(OperationsSource::Inline(Operations::parse(source)?));
        Ok(self)
    }

    /// Add a step checked by the assertion `build` constructs.
    pub fn step<F>(mut self, name: &str, build: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.to_string(),
            assertion: build(AssertionBuilder::new()).build(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn load_graph(&self) -> ScenarioResult<LabeledGraph> {
        match &self.graph {
            Some(GraphSource::File(path)) => {
                LabeledGraph::load(path).map_err(|e| ScenarioError::graph_load(path, e.to_string()))
            }
            Some(GraphSource::Inline(graph)) => Ok(graph.clone()),
            None => Err(ScenarioError::Missing("graph")),
        }
    }

    pub fn load_operations(&self) -> ScenarioResult<Operations> {
        match &self.operations {
            Some(OperationsSource::File(path)) => Operations::load(path),
            Some(OperationsSource::Inline(ops)) => Ok(ops.clone()),
            None => Err(ScenarioError::Missing("operations")),
        }
    }

    /// Run every step and check its assertion.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self)?.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parts_are_reported() {
        let err = Scenario::new("empty").run().unwrap_err();
        assert!(matches!(err, ScenarioError::Missing("operations")));

        let err = Scenario::new("no graph")
            .operations_source("--# a\na")
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, ScenarioError::Missing("graph")));
    }

    #[test]
    fn test_fixture_paths() {
        let scenario = Scenario::new("x").graph("nowhere.txt");
        let err = scenario.load_graph().unwrap_err();
        assert!(err.to_string().contains("nowhere.txt"));
    }
}
