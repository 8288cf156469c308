// Copyright 2025 Cowboy AI, LLC.

//! Union-find over cluster ids: each id maps to a group set; `find`
//! returns the canonical group id and `union` merges two sets, path-
//! compressing and clearing the absorbed entry's weight.

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// The canonical root of `x`'s set, path-compressing along the way.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Unite the sets containing `a` and `b`, returning the resulting
    /// root. A no-op (returning the shared root) if already united.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }

    /// Non-empty group sets, root id -> member ids, in first-seen root
    /// order.
    pub fn groups(&mut self, n: usize) -> IndexMap<usize, Vec<usize>> {
        let mut map: IndexMap<usize, Vec<usize>> = IndexMap::new();
        for i in 0..n {
            let root = self.find(i);
            map.entry(root).or_default().push(i);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_distinct_sets() {
        let mut uf = UnionFind::new(4);
        uf.union(0, 1);
        assert_eq!(uf.find(0), uf.find(1));
        assert_ne!(uf.find(0), uf.find(2));
    }

    #[test]
    fn groups_contains_every_id_exactly_once() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(2, 3);
        let groups = uf.groups(5);
        let total: usize = groups.values().map(|v| v.len()).sum();
        assert_eq!(total, 5);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn union_is_idempotent() {
        let mut uf = UnionFind::new(2);
        let r1 = uf.union(0, 1);
        let r2 = uf.union(0, 1);
        assert_eq!(r1, r2);
    }
}
