//! Generic epsilon-NFA / DFA engine: epsilon-closure, subset construction, minimization by
//! pairwise equivalence refinement, and simulation. These are the algorithms the rest of the
//! crate's [`crate::nfa::Nfa`] and [`crate::dfa::Dfa`] types are concrete instantiations of, with
//! `S`/`Q` and `A` fixed to dense `usize` indices / interned graphemes and with names, parsing and
//! pretty-printing layered on top. This module works over any totally ordered, cloneable state and
//! symbol type and has no notion of names, files or presentation.

use std::collections::{BTreeMap, BTreeSet};

/// An epsilon-NFA: a set of states, one start state, a set of accepting states, and a transition
/// relation from a state and an optional symbol (`None` meaning an epsilon move) to a set of
/// target states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpsilonNfa<S: Ord + Clone, A: Ord + Clone> {
    pub states: BTreeSet<S>,
    pub start: S,
    pub finals: BTreeSet<S>,
    pub trans: BTreeMap<S, BTreeMap<Option<A>, BTreeSet<S>>>,
}

/// The epsilon-closure of every state of an epsilon-NFA: for each state, the set of states
/// reachable by zero or more epsilon transitions (always including the state itself).
pub type ClosureTable<S> = BTreeMap<S, BTreeSet<S>>;

impl<S: Ord + Clone, A: Ord + Clone> EpsilonNfa<S, A> {
    /// The set of non-epsilon symbols mentioned anywhere in this automaton's transitions.
    pub fn alphabet(&self) -> BTreeSet<A> {
        self.trans
            .values()
            .flat_map(|row| row.keys())
            .filter_map(|label| label.clone())
            .collect()
    }

    /// Computes the epsilon-closure of every state reachable via epsilon moves, one entry per
    /// state in `self.states`.
    pub fn closure_table(&self) -> ClosureTable<S> {
        self.states
            .iter()
            .map(|s| (s.clone(), self.closure_of(s)))
            .collect()
    }

    fn closure_of(&self, start: &S) -> BTreeSet<S> {
        let mut visited = BTreeSet::new();
        visited.insert(start.clone());
        let mut frontier = vec![start.clone()];
        while let Some(state) = frontier.pop() {
            let Some(eps_targets) = self.trans.get(&state).and_then(|row| row.get(&None)) else {
                continue;
            };
            for target in eps_targets {
                if visited.insert(target.clone()) {
                    frontier.push(target.clone());
                }
            }
        }
        visited
    }
}

/// A deterministic finite automaton over state type `Q` and symbol type `A`. `trans` need not be
/// total: a missing `(q, a)` entry means "no transition", and [`simulate`] treats that as
/// immediate rejection rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<Q: Ord + Clone, A: Ord + Clone> {
    pub trans: BTreeMap<(Q, A), Q>,
    pub start: Q,
    pub finals: BTreeSet<Q>,
}

impl<Q: Ord + Clone, A: Ord + Clone> Dfa<Q, A> {
    /// Every state mentioned by this DFA: the start state, every accepting state, and every state
    /// appearing on either side of a transition.
    pub fn states(&self) -> BTreeSet<Q> {
        let mut states = BTreeSet::new();
        states.insert(self.start.clone());
        states.extend(self.finals.iter().cloned());
        for (p, a) in self.trans.keys() {
            let _ = a;
            states.insert(p.clone());
        }
        for q in self.trans.values() {
            states.insert(q.clone());
        }
        states
    }

    /// The set of symbols this DFA has a transition for, from any state.
    pub fn alphabet(&self) -> BTreeSet<A> {
        self.trans.keys().map(|(_, a)| a.clone()).collect()
    }

    fn step(&self, state: &Q, symbol: &A) -> Option<Q> {
        self.trans.get(&(state.clone(), symbol.clone())).cloned()
    }
}

/// Builds a DFA from an epsilon-NFA by the subset construction: DFA states are sets of epsilon-NFA
/// states, reached by closing the image of each symbol transition under epsilon moves. The dead
/// state (the empty set) is a legitimate, explicitly represented DFA state when it is reachable.
pub fn subset<S: Ord + Clone, A: Ord + Clone>(enfa: &EpsilonNfa<S, A>) -> Dfa<BTreeSet<S>, A> {
    let closures = enfa.closure_table();
    let alphabet = enfa.alphabet();
    let empty = BTreeSet::new();

    let start = closures.get(&enfa.start).cloned().unwrap_or_else(|| {
        let mut singleton = BTreeSet::new();
        singleton.insert(enfa.start.clone());
        singleton
    });

    let mut processed: BTreeSet<BTreeSet<S>> = BTreeSet::new();
    let mut worklist = vec![start.clone()];
    let mut trans = BTreeMap::new();

    while let Some(current) = worklist.pop() {
        if !processed.insert(current.clone()) {
            continue;
        }
        for symbol in &alphabet {
            let mut target = BTreeSet::new();
            for s in &current {
                let Some(row) = enfa.trans.get(s) else {
                    continue;
                };
                let Some(direct) = row.get(&Some(symbol.clone())) else {
                    continue;
                };
                for t in direct {
                    target.extend(closures.get(t).unwrap_or(&empty).iter().cloned());
                }
            }
            trans.insert((current.clone(), symbol.clone()), target.clone());
            if !processed.contains(&target) {
                worklist.push(target);
            }
        }
    }

    let finals = processed
        .into_iter()
        .filter(|q| q.iter().any(|s| enfa.finals.contains(s)))
        .collect();

    Dfa {
        trans,
        start,
        finals,
    }
}

/// Minimizes a DFA by the positive-pair-refinement algorithm: start from the coarse relation
/// "same acceptance status", then repeatedly drop any pair whose successors on some symbol are no
/// longer (possibly) related, until a fixed point. Surviving pairs are collapsed by rewriting the
/// smaller member of each pair to the larger, which — because the relation is transitively closed
/// at the fixed point — resolves every member of a class onto that class's maximum element
/// regardless of class size.
pub fn minimize<Q: Ord + Clone, A: Ord + Clone>(dfa: &Dfa<Q, A>) -> Dfa<Q, A> {
    let states: Vec<Q> = dfa.states().into_iter().collect();
    let alphabet = dfa.alphabet();

    let mut related: BTreeSet<(usize, usize)> = BTreeSet::new();
    for i in 0..states.len() {
        for j in (i + 1)..states.len() {
            let i_final = dfa.finals.contains(&states[i]);
            let j_final = dfa.finals.contains(&states[j]);
            if i_final == j_final {
                related.insert((i, j));
            }
        }
    }

    let related_idx = |rel: &BTreeSet<(usize, usize)>, x: usize, y: usize| -> bool {
        x == y || rel.contains(&(x.min(y), x.max(y)))
    };

    loop {
        let next: BTreeSet<(usize, usize)> = related
            .iter()
            .copied()
            .filter(|&(i, j)| {
                alphabet.iter().all(|a| {
                    let di = dfa.step(&states[i], a);
                    let dj = dfa.step(&states[j], a);
                    match (di, dj) {
                        (None, None) => true,
                        (Some(x), Some(y)) => {
                            let xi = states.iter().position(|s| s == &x);
                            let yi = states.iter().position(|s| s == &y);
                            match (xi, yi) {
                                (Some(xi), Some(yi)) => related_idx(&related, xi, yi),
                                _ => x == y,
                            }
                        }
                        _ => false,
                    }
                })
            })
            .collect();
        if next == related {
            break;
        }
        related = next;
    }

    // Aggregation rule: key by the smaller index of each surviving pair, value the largest
    // partner seen for that key.
    let mut rewrite: BTreeMap<usize, usize> = BTreeMap::new();
    for &(lo, hi) in &related {
        rewrite
            .entry(lo)
            .and_modify(|v| *v = (*v).max(hi))
            .or_insert(hi);
    }
    let representative = |mut idx: usize| -> usize {
        while let Some(&next) = rewrite.get(&idx) {
            if next == idx {
                break;
            }
            idx = next;
        }
        idx
    };

    let rw = |q: &Q| -> Q {
        let idx = states.iter().position(|s| s == q).expect("state in table");
        states[representative(idx)].clone()
    };

    let mut new_trans = BTreeMap::new();
    for ((p, a), q) in &dfa.trans {
        new_trans.insert((rw(p), a.clone()), rw(q));
    }

    Dfa {
        trans: new_trans,
        start: rw(&dfa.start),
        finals: dfa.finals.iter().map(rw).collect(),
    }
}

/// Simulates a DFA against a sequence of symbols, starting at `dfa.start` and following
/// transitions one symbol at a time. Rejects immediately if a symbol has no transition from the
/// current state (there is no way back into the accepted language from an undefined step).
pub fn simulate<Q: Ord + Clone, A: Ord + Clone>(input: &[A], dfa: &Dfa<Q, A>) -> bool {
    let mut state = dfa.start.clone();
    for symbol in input {
        match dfa.step(&state, symbol) {
            Some(next) => state = next,
            None => return false,
        }
    }
    dfa.finals.contains(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nfa_ab() -> EpsilonNfa<u32, char> {
        // (a|b): 0 --eps--> 1 --a--> 3, 0 --eps--> 2 --b--> 3, 3 is final
        let mut trans = BTreeMap::new();
        trans.insert(0, BTreeMap::from([(None, BTreeSet::from([1, 2]))]));
        trans.insert(1, BTreeMap::from([(Some('a'), BTreeSet::from([3]))]));
        trans.insert(2, BTreeMap::from([(Some('b'), BTreeSet::from([3]))]));
        EpsilonNfa {
            states: BTreeSet::from([0, 1, 2, 3]),
            start: 0,
            finals: BTreeSet::from([3]),
            trans,
        }
    }

    #[test]
    fn closure_includes_self() {
        let nfa = nfa_ab();
        let table = nfa.closure_table();
        for s in &nfa.states {
            assert!(table[s].contains(s));
        }
    }

    #[test]
    fn closure_of_start_reaches_both_branches() {
        let nfa = nfa_ab();
        let table = nfa.closure_table();
        assert_eq!(table[&0], BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn subset_construction_simulates_same_language() {
        let nfa = nfa_ab();
        let dfa = subset(&nfa);
        assert!(simulate(&['a'], &dfa));
        assert!(simulate(&['b'], &dfa));
        assert!(!simulate(&['c'], &dfa));
        assert!(!simulate(&[], &dfa));
    }

    #[test]
    fn subset_construction_has_explicit_dead_state() {
        let nfa = nfa_ab();
        let dfa = subset(&nfa);
        // from the start, 'c' leads to the empty set, which must be a stored, non-accepting state
        let dead = dfa.step(&dfa.start, &'c');
        assert_eq!(dead, Some(BTreeSet::new()));
        assert!(!dfa.finals.contains(&BTreeSet::new()));
        // the dead state self-loops on every symbol
        assert_eq!(dfa.step(&BTreeSet::new(), &'a'), Some(BTreeSet::new()));
        assert_eq!(dfa.step(&BTreeSet::new(), &'b'), Some(BTreeSet::new()));
        assert_eq!(dfa.step(&BTreeSet::new(), &'c'), Some(BTreeSet::new()));
    }

    fn redundant_dfa() -> Dfa<u32, char> {
        // two states per "class": {0,2} non-final, {1,3} final, both pairs behave identically
        let mut trans = BTreeMap::new();
        trans.insert((0, 'a'), 1);
        trans.insert((1, 'a'), 0);
        trans.insert((2, 'a'), 3);
        trans.insert((3, 'a'), 2);
        Dfa {
            trans,
            start: 0,
            finals: BTreeSet::from([1, 3]),
        }
    }

    #[test]
    fn minimize_collapses_equivalent_states() {
        let dfa = redundant_dfa();
        let min = minimize(&dfa);
        assert_eq!(min.states().len(), 2);
    }

    #[test]
    fn minimize_preserves_language() {
        let dfa = redundant_dfa();
        let min = minimize(&dfa);
        for input in [vec![], vec!['a'], vec!['a', 'a'], vec!['a', 'a', 'a']] {
            assert_eq!(simulate(&input, &dfa), simulate(&input, &min));
        }
    }

    #[test]
    fn minimize_is_idempotent() {
        let dfa = redundant_dfa();
        let once = minimize(&dfa);
        let twice = minimize(&once);
        assert_eq!(once.states().len(), twice.states().len());
        for input in [vec![], vec!['a'], vec!['a', 'a']] {
            assert_eq!(simulate(&input, &once), simulate(&input, &twice));
        }
    }

    #[test]
    fn minimize_resolves_classes_larger_than_two() {
        // four mutually equivalent non-accepting sink states, plus one accepting state reached
        // from all of them
        let mut trans = BTreeMap::new();
        for &s in &[0u32, 1, 2, 3] {
            trans.insert((s, 'a'), s);
        }
        trans.insert((4, 'a'), 0);
        let mut finals = BTreeSet::new();
        finals.insert(4);
        let dfa = Dfa {
            trans,
            start: 4,
            finals,
        };
        let min = minimize(&dfa);
        // 0,1,2,3 are all non-accepting with identical (self-looping) behavior on 'a', so they
        // collapse to their maximum (3); 4 is accepting, so it's distinguished from that class by
        // acceptance status alone and survives on its own
        assert_eq!(min.states().len(), 2);
    }

    #[test]
    fn simulate_empty_input_checks_start_state() {
        let mut trans = BTreeMap::new();
        trans.insert((0u32, 'a'), 0);
        let accepting_start = Dfa {
            trans: trans.clone(),
            start: 0,
            finals: BTreeSet::from([0]),
        };
        let rejecting_start = Dfa {
            trans,
            start: 0,
            finals: BTreeSet::new(),
        };
        assert!(simulate::<u32, char>(&[], &accepting_start));
        assert!(!simulate::<u32, char>(&[], &rejecting_start));
    }
}
