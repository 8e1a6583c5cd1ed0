//! Four-way directional container.

use std::ops::Index;

use super::Orientation;

/// Exactly four ordered lists, one per cardinal direction, indexed by
/// [`Orientation`] (`Up`, `Right`, `Down`, `Left`).
///
/// Order inside each list is significant: it is the order the map reported
/// candidates in, and action keys are assigned from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct D4<T> {
    lists: [Vec<T>; 4],
}

impl<T> D4<T> {
    pub fn new(lists: [Vec<T>; 4]) -> Self {
        Self { lists }
    }

    /// Builds each direction's list by calling `f` in [`Orientation::ALL`] order.
    pub fn from_fn(mut f: impl FnMut(Orientation) -> Vec<T>) -> Self {
        Self {
            lists: std::array::from_fn(|index| f(Orientation::from_index(index))),
        }
    }

    pub fn get(&self, direction: Orientation) -> &[T] {
        &self.lists[direction.index()]
    }

    /// Iterates `(direction, list)` pairs in [`Orientation::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &[T])> {
        Orientation::ALL
            .into_iter()
            .zip(self.lists.iter().map(Vec::as_slice))
    }

    /// Keeps only the entries for which `keep(direction, entry)` holds.
    pub fn filter(self, mut keep: impl FnMut(Orientation, &T) -> bool) -> Self {
        let [up, right, down, left] = self.lists;
        let mut filter_one = |direction: Orientation, list: Vec<T>| -> Vec<T> {
            list.into_iter()
                .filter(|entry| keep(direction, entry))
                .collect()
        };
        Self::new([
            filter_one(Orientation::Up, up),
            filter_one(Orientation::Right, right),
            filter_one(Orientation::Down, down),
            filter_one(Orientation::Left, left),
        ])
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> D4<U> {
        D4::new(
            self.lists
                .map(|list| list.into_iter().map(&mut f).collect::<Vec<U>>()),
        )
    }

    /// Elementwise concatenation: each direction becomes `self ++ other`.
    pub fn concat(self, other: D4<T>) -> Self {
        let mut lists = self.lists;
        for (list, extra) in lists.iter_mut().zip(other.lists) {
            list.extend(extra);
        }
        Self { lists }
    }

    /// Flattens into a single list: Up, then Right, then Down, then Left.
    pub fn flatten(self) -> Vec<T> {
        self.lists.into_iter().flatten().collect()
    }

    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    pub fn into_inner(self) -> [Vec<T>; 4] {
        self.lists
    }
}

impl<T> Default for D4<T> {
    fn default() -> Self {
        Self::from_fn(|_| Vec::new())
    }
}

impl<T> Index<Orientation> for D4<T> {
    type Output = [T];

    fn index(&self, direction: Orientation) -> &Self::Output {
        self.get(direction)
    }
}
