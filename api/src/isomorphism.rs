//! I define [`isomorphic_graphs`],
//! comparing two graphs modulo blank node renaming.
//!
//! The search is exact: ground statements are compared as sets, then a
//! bijection between blank node labels is looked for by backtracking.
//! This is exponential in the worst case, but perfectly fine for the
//! graph sizes it is meant for (tests, round-trip checks).

use std::collections::{HashMap, HashSet};

use crate::graph::Graph;
use crate::term::Term;
use crate::triple::Statement;

/// Check whether two graphs are isomorphic,
/// i.e. identical modulo a renaming of their blank nodes.
pub fn isomorphic_graphs(g1: &Graph, g2: &Graph) -> bool {
    if g1.len() != g2.len() {
        return false;
    }
    let (ground1, open1) = split(g1);
    let (ground2, open2) = split(g2);
    if ground1 != ground2 || open1.len() != open2.len() {
        return false;
    }
    let mut mapping = HashMap::new();
    let mut used = vec![false; open2.len()];
    find_mapping(&open1, &open2, 0, &mut used, &mut mapping)
}

/// Split a graph into ground statements (no blank node) and the rest.
fn split(g: &Graph) -> (HashSet<&Statement>, Vec<&Statement>) {
    let mut ground = HashSet::new();
    let mut open = Vec::new();
    for t in g {
        if t.s().is_blank_node() || t.o().is_blank_node() {
            open.push(t);
        } else {
            ground.insert(t);
        }
    }
    (ground, open)
}

fn find_mapping<'a>(
    open1: &[&'a Statement],
    open2: &[&'a Statement],
    i: usize,
    used: &mut Vec<bool>,
    mapping: &mut HashMap<&'a str, &'a str>,
) -> bool {
    let Some(&t1) = open1.get(i) else {
        return true;
    };
    for (j, &t2) in open2.iter().enumerate() {
        if used[j] {
            continue;
        }
        let mut added = Vec::new();
        if statements_match(t1, t2, mapping, &mut added) {
            used[j] = true;
            if find_mapping(open1, open2, i + 1, used, mapping) {
                return true;
            }
            used[j] = false;
        }
        for k in added {
            mapping.remove(k);
        }
    }
    false
}

fn statements_match<'a>(
    t1: &'a Statement,
    t2: &'a Statement,
    mapping: &mut HashMap<&'a str, &'a str>,
    added: &mut Vec<&'a str>,
) -> bool {
    terms_match(t1.s(), t2.s(), mapping, added)
        && terms_match(t1.p(), t2.p(), mapping, added)
        && terms_match(t1.o(), t2.o(), mapping, added)
}

fn terms_match<'a>(
    t1: &'a Term,
    t2: &'a Term,
    mapping: &mut HashMap<&'a str, &'a str>,
    added: &mut Vec<&'a str>,
) -> bool {
    match (t1.bnode_id(), t2.bnode_id()) {
        (Some(b1), Some(b2)) => match mapping.get(b1) {
            Some(mapped) => *mapped == b2,
            None => {
                // the mapping must stay injective
                if mapping.values().any(|v| *v == b2) {
                    false
                } else {
                    mapping.insert(b1, b2);
                    added.push(b1);
                    true
                }
            }
        },
        (None, None) => t1 == t2,
        _ => false,
    }
}
