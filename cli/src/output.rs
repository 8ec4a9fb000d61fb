//! Result rendering for the command line.

use pathq_core::NodeId;
use pathq_graph::GraphInfo;
use pathq_query::Reachability;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Anything a subcommand can print.
#[derive(Debug)]
pub enum Report {
    Pairs(BTreeSet<(NodeId, NodeId)>),
    Nodes(BTreeSet<NodeId>),
    PerSource(BTreeMap<NodeId, BTreeSet<NodeId>>),
    Info(GraphInfo),
    Dot(String),
}

impl From<Reachability> for Report {
    fn from(reachability: Reachability) -> Self {
        match reachability {
            Reachability::AnySource(nodes) => Report::Nodes(nodes),
            Reachability::PerSource(map) => Report::PerSource(map),
        }
    }
}

#[derive(Serialize)]
struct InfoJson<'a> {
    node_count: usize,
    edge_count: usize,
    labels: Vec<&'a str>,
}

impl Report {
    /// Plain text: one `src -> dst` pair or one node per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            Report::Pairs(pairs) => {
                for (from, to) in pairs {
                    out.push_str(&format!("{} -> {}\n", from, to));
                }
            }
            Report::Nodes(nodes) => {
                for node in nodes {
                    out.push_str(&format!("{}\n", node));
                }
            }
            Report::PerSource(map) => {
                for (from, targets) in map {
                    for to in targets {
                        out.push_str(&format!("{} -> {}\n", from, to));
                    }
                }
            }
            Report::Info(info) => {
                let labels: Vec<&str> = info.labels.iter().map(|l| l.as_str()).collect();
                out.push_str(&format!("nodes: {}\n", info.node_count));
                out.push_str(&format!("edges: {}\n", info.edge_count));
                out.push_str(&format!("labels: {}\n", labels.join(", ")));
            }
            Report::Dot(dot) => out.push_str(dot),
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let raw = |nodes: &BTreeSet<NodeId>| -> Vec<u64> { nodes.iter().map(NodeId::raw).collect() };
        match self {
            Report::Pairs(pairs) => {
                let pairs: Vec<(u64, u64)> = pairs.iter().map(|(a, b)| (a.raw(), b.raw())).collect();
                serde_json::to_string_pretty(&pairs)
            }
            Report::Nodes(nodes) => serde_json::to_string_pretty(&raw(nodes)),
            Report::PerSource(map) => {
                let map: BTreeMap<u64, Vec<u64>> =
                    map.iter().map(|(source, nodes)| (source.raw(), raw(nodes))).collect();
                serde_json::to_string_pretty(&map)
            }
            Report::Info(info) => serde_json::to_string_pretty(&InfoJson {
                node_count: info.node_count,
                edge_count: info.edge_count,
                labels: info.labels.iter().map(|l| l.as_str()).collect(),
            }),
            Report::Dot(dot) => serde_json::to_string_pretty(dot),
        }
    }
}
