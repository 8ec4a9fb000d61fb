//! Loader for operations files.
//!
//! An operations file holds named query bodies, each introduced by a step
//! marker (`--# step_name`). The body is a regular expression or grammar
//! text. Lines of the form `-- @name value` attach parameters to the current
//! step; other `--` lines are comments.
//!
//! ```text
//! --# brackets
//! -- @query cfpq
//! -- @start_var S
//! S -> A B | A S1
//! S1 -> S B
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// A parsed operations file.
#[derive(Debug, Clone, Default)]
pub struct Operations {
    /// Map of step name to query body.
    steps: HashMap<String, String>,
    /// Steps in order of appearance.
    step_order: Vec<String>,
    /// Parameters per step (step name -> (param name -> value)).
    step_params: HashMap<String, HashMap<String, String>>,
}

impl Operations {
    /// Parse an operations file from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        let mut ops = Operations::default();
        let mut current: Option<String> = None;
        let mut body = String::new();

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some(name) = current.take() {
                    ops.finish_step(name, &body);
                }
                let name = suffix.trim();
                if name.is_empty() {
                    return Err(ScenarioError::operations_parse("<inline>", "empty step name after --#"));
                }
                if ops.step_order.iter().any(|s| s == name) {
                    return Err(ScenarioError::operations_parse(
                        "<inline>",
                        format!("duplicate step '{}'", name),
                    ));
                }
                ops.step_order.push(name.to_string());
                current = Some(name.to_string());
                body.clear();
            } else if let Some(step) = &current {
                if let Some(param) = trimmed.strip_prefix("-- @") {
                    let (name, value) = param.split_once(char::is_whitespace).unwrap_or((param, ""));
                    ops.step_params
                        .entry(step.clone())
                        .or_default()
                        .insert(name.to_string(), value.trim().to_string());
                } else if !trimmed.starts_with("--") {
                    body.push_str(line);
                    body.push('\n');
                }
            }
            // Lines before the first marker are file-level comments.
        }

        if let Some(name) = current {
            ops.finish_step(name, &body);
        }
        Ok(ops)
    }

    fn finish_step(&mut self, name: String, body: &str) {
        let body = body.trim();
        if !body.is_empty() {
            self.steps.insert(name, body.to_string());
        }
    }

    /// Load and parse an operations file from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse(&source).map_err(|e| ScenarioError::operations_parse(path, e.to_string()))
    }

    /// The query body of a step.
    pub fn get_step(&self, name: &str) -> Option<&str> {
        self.steps.get(name).map(|s| s.as_str())
    }

    /// A parameter of a step, if set.
    pub fn param(&self, step: &str, name: &str) -> Option<&str> {
        self.step_params
            .get(step)
            .and_then(|params| params.get(name))
            .map(|s| s.as_str())
    }

    /// All step names in order.
    pub fn step_names(&self) -> &[String] {
        &self.step_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_and_params() {
        let source = r#"
-- Queries over a small chain

--# ab
-- @query rpq
-- @starts 0, 1
a b

--# brackets
-- @query cfpq
-- a comment, not a parameter
S -> a S b | a b
"#;

        let ops = Operations::parse(source).unwrap();

        assert_eq!(ops.step_names(), ["ab", "brackets"]);
        assert_eq!(ops.get_step("ab"), Some("a b"));
        assert_eq!(ops.param("ab", "query"), Some("rpq"));
        assert_eq!(ops.param("ab", "starts"), Some("0, 1"));
        assert_eq!(ops.param("brackets", "starts"), None);
        assert_eq!(ops.get_step("brackets"), Some("S -> a S b | a b"));
    }

    #[test]
    fn test_multiline_body_is_kept() {
        let source = "--# g\nS -> A B\nA -> a\nB -> b\n";
        let ops = Operations::parse(source).unwrap();
        assert_eq!(ops.get_step("g"), Some("S -> A B\nA -> a\nB -> b"));
    }

    #[test]
    fn test_empty_and_duplicate_step_names() {
        assert!(Operations::parse("--#\na").is_err());
        assert!(Operations::parse("--# a\nx\n--# a\ny").is_err());
    }
}
