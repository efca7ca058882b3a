use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

/// Maps every key to the positions of the items that produce it, in slice order.
pub fn group_positions<'a, T, K, F>(items: &'a [T], key_fn: F) -> HashMap<K, Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut groups: HashMap<K, Vec<usize>> = HashMap::new();
    for (pos, item) in items.iter().enumerate() {
        groups.entry(key_fn(item)).or_default().push(pos);
    }
    groups
}

/// Same as [`group_positions`] but with keys in ascending order.
pub fn sorted_group_positions<'a, T, K, F>(items: &'a [T], key_fn: F) -> BTreeMap<K, Vec<usize>>
where
    K: Ord,
    F: Fn(&'a T) -> K,
{
    let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (pos, item) in items.iter().enumerate() {
        groups.entry(key_fn(item)).or_default().push(pos);
    }
    groups
}

/// Positions whose key occurs more than once, ascending.
pub fn repeated_positions<'a, T, K, F>(items: &'a [T], key_fn: F) -> Vec<usize>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut positions: Vec<usize> = group_positions(items, key_fn)
        .into_values()
        .filter(|group| group.len() > 1)
        .flatten()
        .collect();
    positions.sort_unstable();
    positions
}

/// Positions of the first item for each distinct key, ascending.
pub fn first_positions<'a, T, K, F>(items: &'a [T], key_fn: F) -> Vec<usize>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| seen.insert(key_fn(*item)))
        .map(|(pos, _)| pos)
        .collect()
}
