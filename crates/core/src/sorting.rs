//! Comparator helpers used for every board ordering.

use std::cmp::Ordering;

/// Build a comparator that orders values by a projected key.
///
/// ```
/// use kanban_core::sorting::by_key;
///
/// let mut names = vec!["beta", "Alpha", "gamma"];
/// names.sort_by(by_key(|n: &&str| n.to_lowercase()));
/// assert_eq!(names, ["Alpha", "beta", "gamma"]);
/// ```
pub fn by_key<T, K, F>(mapping: F) -> impl Fn(&T, &T) -> Ordering
where
    K: Ord,
    F: Fn(&T) -> K,
{
    move |left, right| mapping(left).cmp(&mapping(right))
}
