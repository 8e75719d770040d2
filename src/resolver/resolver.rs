/// Turns the literal text of a KEY token into validated predicates.
///
/// Returning an empty vector means the text is not a valid search key and
/// fails the parse. Only the first predicate of a non-empty result ends up
/// in the expression tree.
pub trait PredicateResolver {
    type Predicate;

    fn resolve(&self, text: &str) -> Vec<Self::Predicate>;
}

impl<P, F> PredicateResolver for F
where
    F: Fn(&str) -> Vec<P>,
{
    type Predicate = P;

    fn resolve(&self, text: &str) -> Vec<P> {
        self(text)
    }
}
