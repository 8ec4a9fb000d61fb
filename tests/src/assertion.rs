//! Assertion types and builders for verifying step results.

use pathq_core::NodeId;
use pathq_query::Reachability;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ScenarioError, ScenarioResult};

/// What a query step produced, with node ids as plain integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `(source, target)` pairs.
    Pairs(BTreeSet<(u64, u64)>),
    /// Reachable nodes, sources forgotten.
    Nodes(BTreeSet<u64>),
    /// Reachable nodes per source; every source is present.
    PerSource(BTreeMap<u64, BTreeSet<u64>>),
}

impl Outcome {
    pub fn from_pairs(pairs: &BTreeSet<(NodeId, NodeId)>) -> Self {
        Outcome::Pairs(pairs.iter().map(|(a, b)| (a.raw(), b.raw())).collect())
    }

    pub fn from_map(map: &BTreeMap<NodeId, BTreeSet<NodeId>>) -> Self {
        Outcome::PerSource(
            map.iter()
                .map(|(source, nodes)| (source.raw(), nodes.iter().map(NodeId::raw).collect()))
                .collect(),
        )
    }

    /// `(source, target)` pairs; empty for `Nodes`.
    pub fn pairs(&self) -> BTreeSet<(u64, u64)> {
        match self {
            Outcome::Pairs(pairs) => pairs.clone(),
            Outcome::Nodes(_) => BTreeSet::new(),
            Outcome::PerSource(map) => map
                .iter()
                .flat_map(|(source, nodes)| nodes.iter().map(move |n| (*source, *n)))
                .collect(),
        }
    }

    /// Every target node.
    pub fn nodes(&self) -> BTreeSet<u64> {
        match self {
            Outcome::Nodes(nodes) => nodes.clone(),
            _ => self.pairs().into_iter().map(|(_, n)| n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Outcome::Nodes(nodes) => nodes.len(),
            _ => self.pairs().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Reachability> for Outcome {
    fn from(reachability: Reachability) -> Self {
        match reachability {
            Reachability::AnySource(nodes) => Outcome::Nodes(nodes.iter().map(NodeId::raw).collect()),
            Reachability::PerSource(map) => Outcome::from_map(&map),
        }
    }
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    pub pairs: Option<BTreeSet<(u64, u64)>>,
    pub contains: Vec<(u64, u64)>,
    pub excludes: Vec<(u64, u64)>,
    pub nodes: Option<BTreeSet<u64>>,
    pub targets: Vec<(u64, BTreeSet<u64>)>,
    pub count: Option<usize>,
    pub empty: Option<bool>,

    pub error: Option<String>,
    pub error_pattern: Option<String>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Outcome) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("pairs", &self.pairs)
            .field("contains", &self.contains)
            .field("excludes", &self.excludes)
            .field("nodes", &self.nodes)
            .field("targets", &self.targets)
            .field("count", &self.count)
            .field("empty", &self.empty)
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result.
    pub fn verify(&self, step: &str, result: &Result<Outcome, String>) -> ScenarioResult<()> {
        if let Some(ref expected) = self.error {
            return match result {
                Err(msg) if msg.contains(expected) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(outcome) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        self.verify_outcome(step, outcome)
    }

    fn verify_outcome(&self, step: &str, outcome: &Outcome) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(step, message));

        if let Some(ref expected) = self.pairs {
            let actual = outcome.pairs();
            if actual != *expected {
                return fail(format!(
                    "pair mismatch:\n  expected: {}\n  actual:   {}\n  missing:  {}\n  extra:    {}",
                    format_pairs(expected),
                    format_pairs(&actual),
                    format_pairs(&expected.difference(&actual).copied().collect()),
                    format_pairs(&actual.difference(expected).copied().collect()),
                ));
            }
        }

        if !self.contains.is_empty() || !self.excludes.is_empty() {
            let actual = outcome.pairs();
            for pair in &self.contains {
                if !actual.contains(pair) {
                    return fail(format!(
                        "expected pair {} -> {}, got: {}",
                        pair.0,
                        pair.1,
                        format_pairs(&actual)
                    ));
                }
            }
            for pair in &self.excludes {
                if actual.contains(pair) {
                    return fail(format!("unexpected pair {} -> {}", pair.0, pair.1));
                }
            }
        }

        if let Some(ref expected) = self.nodes {
            let actual = outcome.nodes();
            if actual != *expected {
                return fail(format!(
                    "node mismatch:\n  expected: {:?}\n  actual:   {:?}",
                    expected, actual
                ));
            }
        }

        if !self.targets.is_empty() {
            let Outcome::PerSource(map) = outcome else {
                return fail(format!("targets_of() needs a per-source result, got {:?}", outcome));
            };
            for (source, expected) in &self.targets {
                match map.get(source) {
                    Some(actual) if actual == expected => {}
                    Some(actual) => {
                        return fail(format!(
                            "targets of {} mismatch:\n  expected: {:?}\n  actual:   {:?}",
                            source, expected, actual
                        ))
                    }
                    None => return fail(format!("source {} missing from result", source)),
                }
            }
        }

        if let Some(expected) = self.count {
            if outcome.len() != expected {
                return fail(format!("expected {} results, got {}", expected, outcome.len()));
            }
        }

        if let Some(expected) = self.empty {
            if outcome.is_empty() != expected {
                return fail(if expected {
                    format!("expected no results, got {:?}", outcome)
                } else {
                    "expected results, got none".to_string()
                });
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Pairs ==========

    /// Assert exactly these `(source, target)` pairs.
    pub fn pairs(mut self, pairs: impl IntoIterator<Item = (u64, u64)>) -> Self {
        self.assertion.pairs = Some(pairs.into_iter().collect());
        self
    }

    /// Assert that the pair is in the result.
    pub fn contains(mut self, from: u64, to: u64) -> Self {
        self.assertion.contains.push((from, to));
        self
    }

    /// Assert that the pair is not in the result.
    pub fn excludes(mut self, from: u64, to: u64) -> Self {
        self.assertion.excludes.push((from, to));
        self
    }

    // ========== Nodes ==========

    /// Assert exactly these target nodes.
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = u64>) -> Self {
        self.assertion.nodes = Some(nodes.into_iter().collect());
        self
    }

    /// Assert the exact targets of one source in a per-source result.
    ///
    /// # Example
    /// ```ignore
    /// .step("brackets", |a| a.targets_of(0, [0, 3]).targets_of(3, []))
    /// ```
    pub fn targets_of<const N: usize>(mut self, source: u64, targets: [u64; N]) -> Self {
        self.assertion.targets.push((source, targets.into_iter().collect()));
        self
    }

    // ========== Size ==========

    pub fn count(mut self, n: usize) -> Self {
        self.assertion.count = Some(n);
        self
    }

    pub fn empty(mut self) -> Self {
        self.assertion.empty = Some(true);
        self
    }

    pub fn not_empty(mut self) -> Self {
        self.assertion.empty = Some(false);
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Outcome) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn format_pairs(pairs: &BTreeSet<(u64, u64)>) -> String {
    let parts: Vec<String> = pairs.iter().map(|(a, b)| format!("{}->{}", a, b)).collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_source() -> Outcome {
        Outcome::PerSource(BTreeMap::from([
            (0, BTreeSet::from([0, 3])),
            (3, BTreeSet::new()),
        ]))
    }

    #[test]
    fn test_per_source_views() {
        let outcome = per_source();
        assert_eq!(outcome.pairs(), BTreeSet::from([(0, 0), (0, 3)]));
        assert_eq!(outcome.nodes(), BTreeSet::from([0, 3]));
        assert_eq!(outcome.len(), 2);
    }

    #[test]
    fn test_from_assertion() {
        let ok = AssertionBuilder::new().targets_of(0, [0, 3]).targets_of(3, []).build();
        assert!(ok.verify("s", &Ok(per_source())).is_ok());

        let wrong = AssertionBuilder::new().targets_of(0, [3]).build();
        let err = wrong.verify("s", &Ok(per_source())).unwrap_err();
        assert!(err.to_string().contains("targets of 0 mismatch"));
    }

    #[test]
    fn test_pair_mismatch_lists_missing_and_extra() {
        let assertion = AssertionBuilder::new().pairs([(0, 0), (1, 1)]).build();
        let err = assertion.verify("s", &Ok(per_source())).unwrap_err().to_string();
        assert!(err.contains("missing:  {1->1}"));
        assert!(err.contains("extra:    {0->3}"));
    }

    #[test]
    fn test_error_assertions() {
        let failed: Result<Outcome, String> = Err("Parse error at line 1, column 3: expected ')'".into());

        let contains = AssertionBuilder::new().error("expected ')'").build();
        assert!(contains.verify("s", &failed).is_ok());

        let matches = AssertionBuilder::new().error_matches(r"line \d+, column \d+").build();
        assert!(matches.verify("s", &failed).is_ok());

        assert!(contains.verify("s", &Ok(Outcome::Nodes(BTreeSet::new()))).is_err());
        assert!(AssertionBuilder::new().build().verify("s", &failed).is_err());
    }
}
