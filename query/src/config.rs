//! Query configuration.

use std::fmt;
use std::str::FromStr;

/// Which engine answers context-free queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CfpqAlgorithm {
    /// Hellings-style worklist over (node, variable, node) triples.
    #[default]
    Worklist,
    /// Fixpoint of boolean matrix products, one matrix per variable.
    Matrix,
    /// Kronecker products of the grammar's recursive automaton with the graph.
    Tensor,
}

impl CfpqAlgorithm {
    pub const ALL: [CfpqAlgorithm; 3] = [
        CfpqAlgorithm::Worklist,
        CfpqAlgorithm::Matrix,
        CfpqAlgorithm::Tensor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CfpqAlgorithm::Worklist => "worklist",
            CfpqAlgorithm::Matrix => "matrix",
            CfpqAlgorithm::Tensor => "tensor",
        }
    }
}

impl fmt::Display for CfpqAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CfpqAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown algorithm '{}', expected worklist, matrix or tensor", s))
    }
}

/// How frontier reachability results are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachabilityMode {
    /// One set of nodes reachable from any source.
    #[default]
    AnySource,
    /// A set of reachable nodes per source.
    PerSource,
}

/// Order in which the worklist engine pops triples. Does not change the
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorklistOrder {
    #[default]
    Fifo,
    Lifo,
}

/// Settings shared by every query an engine runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
    pub cfpq_algorithm: CfpqAlgorithm,
    pub reachability: ReachabilityMode,
    pub worklist_order: WorklistOrder,
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfpq_algorithm(mut self, algorithm: CfpqAlgorithm) -> Self {
        self.cfpq_algorithm = algorithm;
        self
    }

    pub fn with_reachability(mut self, mode: ReachabilityMode) -> Self {
        self.reachability = mode;
        self
    }

    pub fn with_worklist_order(mut self, order: WorklistOrder) -> Self {
        self.worklist_order = order;
        self
    }
}
