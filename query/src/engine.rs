//! Exported query surface.

use crate::bfs::{reachable_from, Reachability};
use crate::cfpq::{cfpq_matrix, cfpq_tensor, cfpq_worklist, group_by_source, Triple};
use crate::config::{CfpqAlgorithm, QueryConfig, ReachabilityMode};
use crate::rpq::regular_pairs;
use crate::QueryResult;
use pathq_automata::compile_regex;
use pathq_core::NodeId;
use pathq_grammar::{normalize, Ecfg, Grammar, Variable};
use pathq_graph::EdgeSource;
use std::collections::{BTreeMap, BTreeSet};

/// Runs path queries under one configuration.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: QueryConfig,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Pairs `(s, f)` connected by a non-empty path whose labels match
    /// `pattern`.
    pub fn query_regular<G: EdgeSource>(
        &self,
        pattern: &str,
        graph: &G,
        starts: &BTreeSet<NodeId>,
        finals: &BTreeSet<NodeId>,
    ) -> QueryResult<BTreeSet<(NodeId, NodeId)>> {
        let automaton = compile_regex(pattern)?;
        Ok(regular_pairs(&automaton, graph, starts, finals))
    }

    /// Final nodes reachable from the sources along paths matching
    /// `pattern`, grouped as the configured reachability mode says.
    pub fn query_reachability<G: EdgeSource>(
        &self,
        pattern: &str,
        graph: &G,
        starts: &BTreeSet<NodeId>,
        finals: &BTreeSet<NodeId>,
    ) -> QueryResult<Reachability> {
        let automaton = compile_regex(pattern)?;
        let per_source = self.config.reachability == ReachabilityMode::PerSource;
        Ok(reachable_from(&automaton, graph, starts, finals, per_source))
    }

    /// For every start node the graph contains, the final nodes it reaches
    /// along a path spelling a word `start_var` derives.
    pub fn query_context_free<G: EdgeSource>(
        &self,
        grammar: &Grammar,
        graph: &G,
        start_var: &Variable,
        starts: &BTreeSet<NodeId>,
        finals: &BTreeSet<NodeId>,
    ) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
        let triples = self.context_free_triples(grammar, graph, start_var);
        group_by_source(&triples, graph, start_var, starts, finals)
    }

    /// Every fact the configured engine derives, with `start_var` as the
    /// grammar's start symbol.
    pub fn context_free_triples<G: EdgeSource>(
        &self,
        grammar: &Grammar,
        graph: &G,
        start_var: &Variable,
    ) -> BTreeSet<Triple> {
        let grammar = grammar.with_start(start_var.clone());
        log::debug!(
            "cfpq: {} engine, start variable {}",
            self.config.cfpq_algorithm,
            start_var
        );
        match self.config.cfpq_algorithm {
            CfpqAlgorithm::Worklist => {
                cfpq_worklist(&normalize(&grammar), graph, self.config.worklist_order)
            }
            CfpqAlgorithm::Matrix => cfpq_matrix(&normalize(&grammar), graph),
            CfpqAlgorithm::Tensor => cfpq_tensor(&Ecfg::from_grammar(&grammar).to_rfa(), graph),
        }
    }
}

/// [`QueryEngine::query_regular`] with the default configuration.
pub fn query_regular<G: EdgeSource>(
    pattern: &str,
    graph: &G,
    starts: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
) -> QueryResult<BTreeSet<(NodeId, NodeId)>> {
    QueryEngine::new().query_regular(pattern, graph, starts, finals)
}

/// [`QueryEngine::query_reachability`] with the mode chosen by `per_source`.
pub fn query_reachability<G: EdgeSource>(
    pattern: &str,
    graph: &G,
    starts: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
    per_source: bool,
) -> QueryResult<Reachability> {
    let mode = if per_source {
        ReachabilityMode::PerSource
    } else {
        ReachabilityMode::AnySource
    };
    QueryEngine::with_config(QueryConfig::new().with_reachability(mode))
        .query_reachability(pattern, graph, starts, finals)
}

/// [`QueryEngine::query_context_free`] with the given algorithm.
pub fn query_context_free<G: EdgeSource>(
    grammar: &Grammar,
    graph: &G,
    start_var: &Variable,
    starts: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
    algorithm: CfpqAlgorithm,
) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    QueryEngine::with_config(QueryConfig::new().with_cfpq_algorithm(algorithm))
        .query_context_free(grammar, graph, start_var, starts, finals)
}
