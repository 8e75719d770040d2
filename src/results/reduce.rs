use tracing::debug;

use super::partial::PartialResult;

/// Folds any number of partial results into one.
///
/// Total over its input: an empty list yields the zero result. Everything
/// except `items` is independent of shard order. `invalid_keys` of the
/// reduced result is always empty, whatever the shards reported.
pub fn reduce<I, S>(shards: S) -> PartialResult<I>
where
    S: IntoIterator<Item = PartialResult<I>>,
{
    let mut shard_count = 0usize;
    let mut reduced = shards
        .into_iter()
        .fold(PartialResult::default(), |acc, shard| {
            shard_count += 1;
            acc.merge(shard)
        });

    if !reduced.invalid_keys.is_empty() {
        debug!(
            dropped = reduced.invalid_keys.len(),
            "dropping invalid keys reported by shards"
        );
    }
    reduced.invalid_keys.clear();

    debug!(
        shards = shard_count,
        count = reduced.count,
        items = reduced.items.len(),
        "reduced partial results"
    );
    reduced
}

impl<I> FromIterator<PartialResult<I>> for PartialResult<I> {
    fn from_iter<T: IntoIterator<Item = PartialResult<I>>>(iter: T) -> Self {
        reduce(iter)
    }
}
