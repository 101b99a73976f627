//! Three-dimensional k-d tree over RGB coordinates.
//!
//! Nodes live in a flat arena and link to their children by index. The
//! split dimension cycles R, G, B with depth and every node holds the median
//! point of its subtree, so the tree is balanced by construction. Build sorts
//! each level fully (O(n log² n)), which is fine at catalog scale; a
//! catalog of many thousands of entries would want median selection
//! instead.

/// Number of coordinates per point.
pub const DIM: usize = 3;

/// A point in RGB space.
pub type Point = [f64; DIM];

#[derive(Debug, Clone)]
struct Node<T> {
    point: Point,
    item: T,
    dim: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of a nearest or range search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, T> {
    pub item: &'a T,
    pub point: Point,
    /// Euclidean distance to the query point
    pub distance: f64,
}

/// Immutable k-d tree. Rebuilding means constructing a new tree.
#[derive(Debug, Clone)]
pub struct KdTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for KdTree<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> KdTree<T> {
    /// Build a tree from `(point, item)` pairs.
    pub fn build(entries: Vec<(Point, T)>) -> Self {
        let mut nodes = Vec::with_capacity(entries.len());
        build_recursive(&mut nodes, entries, 0);
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every point and item, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &T)> {
        self.nodes.iter().map(|node| (&node.point, &node.item))
    }

    /// Closest point whose item is not excluded.
    ///
    /// Excluded nodes are still traversed for pruning but never become the
    /// answer. Returns `None` on an empty tree or when every item is
    /// excluded.
    pub fn nearest<F>(&self, target: &Point, exclude: F) -> Option<Neighbor<'_, T>>
    where
        F: Fn(&T) -> bool,
    {
        let root = self.root()?;
        let mut best: Option<(usize, f64)> = None;
        self.nearest_recursive(root, target, &exclude, &mut best);

        best.map(|(idx, distance)| self.neighbor(idx, distance))
    }

    fn nearest_recursive<F>(
        &self,
        node_idx: usize,
        target: &Point,
        exclude: &F,
        best: &mut Option<(usize, f64)>,
    ) where
        F: Fn(&T) -> bool,
    {
        let node = &self.nodes[node_idx];

        if !exclude(&node.item) {
            let d = distance(target, &node.point);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                *best = Some((node_idx, d));
            }
        }

        let diff = target[node.dim] - node.point[node.dim];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.nearest_recursive(near, target, exclude, best);
        }

        if let Some(far) = far {
            let best_d = best.map_or(f64::INFINITY, |(_, d)| d);
            if diff.abs() < best_d {
                self.nearest_recursive(far, target, exclude, best);
            }
        }
    }

    /// Every non-excluded point within `max_distance` of `target`,
    /// sorted ascending by distance. Ties keep traversal order.
    pub fn within<F>(&self, target: &Point, max_distance: f64, exclude: F) -> Vec<Neighbor<'_, T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut hits = Vec::new();
        if let Some(root) = self.root() {
            self.within_recursive(root, target, max_distance, &exclude, &mut hits);
        }

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter()
            .map(|(idx, distance)| self.neighbor(idx, distance))
            .collect()
    }

    fn within_recursive<F>(
        &self,
        node_idx: usize,
        target: &Point,
        max_distance: f64,
        exclude: &F,
        hits: &mut Vec<(usize, f64)>,
    ) where
        F: Fn(&T) -> bool,
    {
        let node = &self.nodes[node_idx];

        if !exclude(&node.item) {
            let d = distance(target, &node.point);
            if d <= max_distance {
                hits.push((node_idx, d));
            }
        }

        let diff = target[node.dim] - node.point[node.dim];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.within_recursive(near, target, max_distance, exclude, hits);
        }

        if let Some(far) = far {
            if diff.abs() <= max_distance {
                self.within_recursive(far, target, max_distance, exclude, hits);
            }
        }
    }

    fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn neighbor(&self, idx: usize, distance: f64) -> Neighbor<'_, T> {
        let node = &self.nodes[idx];
        Neighbor {
            item: &node.item,
            point: node.point,
            distance,
        }
    }
}

/// Appends the subtree for `entries` to `nodes`, returning its root index.
fn build_recursive<T>(
    nodes: &mut Vec<Node<T>>,
    mut entries: Vec<(Point, T)>,
    depth: usize,
) -> Option<usize> {
    let dim = depth % DIM;
    entries.sort_by(|a, b| a.0[dim].total_cmp(&b.0[dim]));

    let median = entries.len() / 2;
    let right = entries.split_off((median + 1).min(entries.len()));
    let (point, item) = entries.pop()?;

    let idx = nodes.len();
    nodes.push(Node {
        point,
        item,
        dim,
        left: None,
        right: None,
    });

    let left = build_recursive(nodes, entries, depth + 1);
    let right = build_recursive(nodes, right, depth + 1);
    nodes[idx].left = left;
    nodes[idx].right = right;

    Some(idx)
}

#[inline]
fn distance(a: &Point, b: &Point) -> f64 {
    let mut sum = 0.0;
    for d in 0..DIM {
        let diff = a[d] - b[d];
        sum += diff * diff;
    }
    sum.sqrt()
}
