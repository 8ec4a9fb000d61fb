//! Weak Chomsky normal form.
//!
//! Unlike strict CNF, epsilon productions are kept for any variable (not
//! only the start), which is what path queries need: a variable deriving ε
//! relates every node to itself.

use crate::binarized::BinarizedGrammar;
use crate::cfg::{Grammar, Production};
use crate::symbol::{GrammarSymbol, Variable};
use std::collections::{BTreeMap, BTreeSet};

/// Normalize a grammar to weak CNF.
///
/// Removes useless symbols, eliminates unit productions, removes the symbols
/// that became useless, then lifts terminals out of long bodies and splits
/// bodies longer than two into chains of fresh variables. The result derives
/// exactly the words the input derives.
pub fn normalize(grammar: &Grammar) -> BinarizedGrammar {
    let start = grammar.start().clone();
    let mut productions = remove_useless(&start, grammar.productions().clone());
    productions = eliminate_units(productions);
    productions = remove_useless(&start, productions);
    productions = lift_terminals(productions);
    productions = split_long_bodies(productions);

    let normal = Grammar::with_productions(start, productions);
    log::debug!(
        "normalized grammar: {} productions -> {} productions",
        grammar.productions().len(),
        normal.productions().len()
    );
    // Every remaining body is ε, a terminal, or two variables by construction.
    match BinarizedGrammar::try_from(&normal) {
        Ok(binarized) => binarized,
        Err(e) => unreachable!("normal form produced a non-binarized grammar: {e}"),
    }
}

/// Variables that derive some terminal string.
fn generating(productions: &BTreeSet<Production>) -> BTreeSet<Variable> {
    let mut generating = BTreeSet::new();
    loop {
        let before = generating.len();
        for p in productions {
            let body_generates = p.body.iter().all(|symbol| match symbol {
                GrammarSymbol::Terminal(_) => true,
                GrammarSymbol::Variable(v) => generating.contains(v),
            });
            if body_generates {
                generating.insert(p.head.clone());
            }
        }
        if generating.len() == before {
            return generating;
        }
    }
}

/// Variables reachable from `start`.
fn reachable(start: &Variable, productions: &BTreeSet<Production>) -> BTreeSet<Variable> {
    let mut seen = BTreeSet::from([start.clone()]);
    let mut stack = vec![start.clone()];
    while let Some(head) = stack.pop() {
        for p in productions.iter().filter(|p| p.head == head) {
            for v in p.body.iter().filter_map(GrammarSymbol::as_variable) {
                if seen.insert(v.clone()) {
                    stack.push(v.clone());
                }
            }
        }
    }
    seen
}

fn remove_useless(start: &Variable, productions: BTreeSet<Production>) -> BTreeSet<Production> {
    let generating = generating(&productions);
    let mentions_only = |p: &Production, allowed: &BTreeSet<Variable>| {
        allowed.contains(&p.head)
            && p.body
                .iter()
                .filter_map(GrammarSymbol::as_variable)
                .all(|v| allowed.contains(v))
    };

    let productive: BTreeSet<Production> = productions
        .into_iter()
        .filter(|p| mentions_only(p, &generating))
        .collect();
    let reachable = reachable(start, &productive);
    productive
        .into_iter()
        .filter(|p| mentions_only(p, &reachable))
        .collect()
}

/// Replace unit productions `A -> B` by `A -> α` for every non-unit
/// `B -> α` with `A =>* B`.
fn eliminate_units(productions: BTreeSet<Production>) -> BTreeSet<Production> {
    let mut unit_edges: BTreeMap<&Variable, BTreeSet<&Variable>> = BTreeMap::new();
    for p in productions.iter().filter(|p| p.is_unit()) {
        if let [GrammarSymbol::Variable(target)] = p.body.as_slice() {
            unit_edges.entry(&p.head).or_default().insert(target);
        }
    }

    let mut out = BTreeSet::new();
    let heads: BTreeSet<&Variable> = productions.iter().map(|p| &p.head).collect();
    for head in heads {
        // Variables reachable from `head` through unit productions, itself included.
        let mut closure = BTreeSet::from([head]);
        let mut stack = vec![head];
        while let Some(v) = stack.pop() {
            for next in unit_edges.get(v).into_iter().flatten() {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }
        for p in productions.iter().filter(|p| !p.is_unit() && closure.contains(&p.head)) {
            out.insert(Production::new(head.clone(), p.body.clone()));
        }
    }
    out
}

/// Replace each terminal `t` inside a body of length ≥ 2 by a fresh
/// variable with the single production `-> t`.
fn lift_terminals(productions: BTreeSet<Production>) -> BTreeSet<Production> {
    let mut out = BTreeSet::new();
    for p in productions {
        if p.body.len() < 2 {
            out.insert(p);
            continue;
        }
        let body = p
            .body
            .into_iter()
            .map(|symbol| match symbol {
                GrammarSymbol::Terminal(t) => {
                    let lifted = Variable::new(format!("T#CNF#{}", t));
                    out.insert(Production::new(
                        lifted.clone(),
                        vec![GrammarSymbol::Terminal(t)],
                    ));
                    GrammarSymbol::Variable(lifted)
                }
                variable => variable,
            })
            .collect();
        out.insert(Production::new(p.head, body));
    }
    out
}

/// Split `A -> X1 X2 ... Xk` (k > 2) into `A -> X1 C1`, `C1 -> X2 C2`, ...,
/// `C(k-2) -> X(k-1) Xk` with fresh variables `Ci`.
fn split_long_bodies(productions: BTreeSet<Production>) -> BTreeSet<Production> {
    let mut out = BTreeSet::new();
    let mut fresh = 0usize;
    for p in productions {
        if p.body.len() <= 2 {
            out.insert(p);
            continue;
        }
        let mut head = p.head;
        let mut rest = p.body.as_slice();
        while let [first, tail @ ..] = rest {
            if tail.len() == 1 {
                out.insert(Production::new(head, vec![first.clone(), tail[0].clone()]));
                break;
            }
            let next = Variable::new(format!("C#CNF#{}", fresh));
            fresh += 1;
            out.insert(Production::new(
                head,
                vec![first.clone(), GrammarSymbol::Variable(next.clone())],
            ));
            head = next;
            rest = tail;
        }
    }
    out
}
