//! Disjoint-set forest tracking cluster membership.
//!
//! Union by size keeps trees shallow and `find` compresses paths as it walks,
//! so both operations run in near-constant amortised time. When two clusters
//! of equal size merge, the lower representative id becomes the root, which
//! keeps representatives deterministic for a given merge history.

use crate::points::PointId;

/// Disjoint-set structure over point identifiers `0..len`.
///
/// # Examples
/// ```
/// use junction_core::ClusterForest;
///
/// let mut forest = ClusterForest::new(4);
/// assert!(forest.union(0, 1));
/// assert!(!forest.union(1, 0));
/// assert_eq!(forest.cluster_count(), 3);
/// assert_eq!(forest.cluster_sizes(), vec![2, 1, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct ClusterForest {
    parent: Vec<PointId>,
    size: Vec<usize>,
    clusters: usize,
}

impl ClusterForest {
    /// Creates a forest of `len` singleton clusters.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            clusters: len,
        }
    }

    /// Returns the number of points tracked by the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the forest tracks no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of distinct clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters
    }

    /// Returns the representative of the cluster containing `point`.
    ///
    /// # Panics
    /// Panics when `point >= self.len()`.
    pub fn find(&mut self, point: PointId) -> PointId {
        let mut root = point;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = point;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the clusters containing `left` and `right`.
    ///
    /// Returns `false` without changing anything when both points already
    /// share a cluster.
    ///
    /// # Panics
    /// Panics when either id is out of range.
    pub fn union(&mut self, left: PointId, right: PointId) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let (parent, child) = choose_parent_child(
            left_root,
            right_root,
            self.size[left_root],
            self.size[right_root],
        );
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        self.clusters -= 1;
        true
    }

    /// Returns `true` when both points belong to the same cluster.
    ///
    /// # Panics
    /// Panics when either id is out of range.
    pub fn same_cluster(&mut self, left: PointId, right: PointId) -> bool {
        self.find(left) == self.find(right)
    }

    /// Returns the size of the cluster containing `point`.
    ///
    /// # Panics
    /// Panics when `point >= self.len()`.
    pub fn size_of(&mut self, point: PointId) -> usize {
        let root = self.find(point);
        self.size[root]
    }

    /// Returns one size per distinct cluster, largest first.
    ///
    /// The sizes always sum to [`Self::len`].
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .parent
            .iter()
            .zip(&self.size)
            .enumerate()
            .filter(|(id, (parent, _))| *id == **parent)
            .map(|(_, (_, size))| *size)
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    /// Groups member ids by cluster.
    ///
    /// Clusters are ordered by their smallest member and members ascend
    /// within each cluster.
    pub fn clusters(&mut self) -> Vec<Vec<PointId>> {
        let mut slot_of_root = vec![None; self.len()];
        let mut groups: Vec<Vec<PointId>> = Vec::with_capacity(self.clusters);
        for point in 0..self.len() {
            let root = self.find(point);
            let slot = *slot_of_root[root].get_or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(point);
        }
        groups
    }
}

fn choose_parent_child(
    left_root: PointId,
    right_root: PointId,
    left_size: usize,
    right_size: usize,
) -> (PointId, PointId) {
    if left_size > right_size {
        return (left_root, right_root);
    }
    if right_size > left_size {
        return (right_root, left_root);
    }

    if left_root <= right_root {
        (left_root, right_root)
    } else {
        (right_root, left_root)
    }
}
