//! Spatial index over colors
//!
//! A balanced 3-d tree over the RGB cube. Level `d` splits on channel
//! `d mod 3` (red, green, blue, red, ...) at the median of the colors
//! below it, so the tree depth is `ceil(log2(n + 1))` whatever the
//! input order.
//!
//! Nodes live in a flat arena and refer to their children by index.
//! Construction uses an explicit work stack; the nearest-neighbor
//! search recurses, bounded by the tree depth.

use imtool_core::{Channel, Color};

#[derive(Debug, Clone)]
struct Node {
    color: Color,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of a nearest-neighbor query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nearest {
    /// Closest color in the tree
    pub color: Color,
    /// Squared Euclidean distance from the query color
    pub distance: u64,
}

/// Balanced k-d tree of colors
#[derive(Debug, Clone, Default)]
pub struct ColorTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    depth: usize,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Pending subtree: a range of the working buffer and where to hang it
struct Task {
    start: usize,
    end: usize,
    depth: usize,
    parent: Option<(usize, Side)>,
}

impl ColorTree {
    /// Build a tree over `colors`.
    ///
    /// At each level the range is sorted on that level's channel and
    /// the element at `len / 2` (the lower median for even lengths)
    /// becomes the node; the elements before it form the left subtree
    /// and those after it the right. Duplicate colors are kept.
    pub fn build(colors: &[Color]) -> Self {
        let mut points = colors.to_vec();
        let mut nodes = Vec::with_capacity(points.len());
        let mut root = None;
        let mut max_depth = 0;

        let mut stack = vec![Task {
            start: 0,
            end: points.len(),
            depth: 0,
            parent: None,
        }];
        while let Some(task) = stack.pop() {
            if task.start >= task.end {
                continue;
            }
            let channel = Channel::for_depth(task.depth);
            let range = &mut points[task.start..task.end];
            range.sort_by_key(|c| c.channel(channel));
            let mid = task.start + range.len() / 2;

            let id = nodes.len();
            nodes.push(Node {
                color: points[mid],
                left: None,
                right: None,
            });
            match task.parent {
                None => root = Some(id),
                Some((parent, Side::Left)) => nodes[parent].left = Some(id),
                Some((parent, Side::Right)) => nodes[parent].right = Some(id),
            }
            max_depth = max_depth.max(task.depth + 1);

            stack.push(Task {
                start: mid + 1,
                end: task.end,
                depth: task.depth + 1,
                parent: Some((id, Side::Right)),
            });
            stack.push(Task {
                start: task.start,
                end: mid,
                depth: task.depth + 1,
                parent: Some((id, Side::Left)),
            });
        }

        Self {
            nodes,
            root,
            depth: max_depth,
        }
    }

    /// Number of colors in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels (0 for an empty tree)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Color at the root, if any
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|id| self.nodes[id].color)
    }

    /// Find the color closest to `target` under squared Euclidean
    /// distance, or `None` if the tree is empty.
    ///
    /// When several colors are equally close, which one is returned
    /// depends on the tree shape; the distance is always the minimum.
    pub fn nearest(&self, target: Color) -> Option<Nearest> {
        self.search(self.root, target, 0)
    }

    fn search(&self, node: Option<usize>, target: Color, depth: usize) -> Option<Nearest> {
        let node = &self.nodes[node?];
        let channel = Channel::for_depth(depth);
        let diff = i64::from(target.channel(channel)) - i64::from(node.color.channel(channel));
        let (near, far) = if diff < 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        let here = Nearest {
            color: node.color,
            distance: target.distance_squared(node.color),
        };
        let mut best = match self.search(near, target, depth + 1) {
            Some(candidate) if candidate.distance < here.distance => candidate,
            _ => here,
        };

        // The far side can only hold a closer color if the splitting
        // plane is nearer than the current best.
        if ((diff * diff) as u64) < best.distance {
            if let Some(candidate) = self.search(far, target, depth + 1) {
                if candidate.distance < best.distance {
                    best = candidate;
                }
            }
        }
        Some(best)
    }
}
