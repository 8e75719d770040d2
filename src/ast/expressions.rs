use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Search Expression
///
/// A parsed boolean search. Leaves hold resolved predicates only; the raw
/// key text never survives parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchExpression<P> {
    /// Exactly one resolved predicate.
    Variable(P),
    Not(Box<SearchExpression<P>>),
    And(Box<SearchExpression<P>>, Box<SearchExpression<P>>),
    Or(Box<SearchExpression<P>>, Box<SearchExpression<P>>),
}

impl<P> SearchExpression<P> {
    pub fn variable(predicate: P) -> Self {
        SearchExpression::Variable(predicate)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(body: Self) -> Self {
        SearchExpression::Not(Box::new(body))
    }

    pub fn and(left: Self, right: Self) -> Self {
        SearchExpression::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Self, right: Self) -> Self {
        SearchExpression::Or(Box::new(left), Box::new(right))
    }

    /// Number of nodes on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        match self {
            SearchExpression::Variable(_) => 1,
            SearchExpression::Not(body) => 1 + body.depth(),
            SearchExpression::And(left, right) | SearchExpression::Or(left, right) => {
                1 + left.depth().max(right.depth())
            }
        }
    }

    /// Leaf predicates in left to right order.
    pub fn predicates(&self) -> Vec<&P> {
        let mut out = vec![];
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a P>) {
        match self {
            SearchExpression::Variable(predicate) => out.push(predicate),
            SearchExpression::Not(body) => body.collect_predicates(out),
            SearchExpression::And(left, right) | SearchExpression::Or(left, right) => {
                left.collect_predicates(out);
                right.collect_predicates(out);
            }
        }
    }

    /// Rebuilds the tree with every predicate passed through `f`.
    pub fn map<Q, F>(self, f: F) -> SearchExpression<Q>
    where
        F: Fn(P) -> Q,
    {
        self.map_ref(&f)
    }

    fn map_ref<Q, F>(self, f: &F) -> SearchExpression<Q>
    where
        F: Fn(P) -> Q,
    {
        match self {
            SearchExpression::Variable(predicate) => SearchExpression::Variable(f(predicate)),
            SearchExpression::Not(body) => SearchExpression::not(body.map_ref(f)),
            SearchExpression::And(left, right) => {
                SearchExpression::and(left.map_ref(f), right.map_ref(f))
            }
            SearchExpression::Or(left, right) => {
                SearchExpression::or(left.map_ref(f), right.map_ref(f))
            }
        }
    }
}

/// Renders the expression as fully parenthesised query text.
impl<P: Display> Display for SearchExpression<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchExpression::Variable(predicate) => write!(f, "{}", predicate),
            SearchExpression::Not(body) => write!(f, "!{}", body),
            SearchExpression::And(left, right) => write!(f, "({} & {})", left, right),
            SearchExpression::Or(left, right) => write!(f, "({} | {})", left, right),
        }
    }
}
