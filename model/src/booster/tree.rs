use super::artifact::TreeArtifact;
use crate::{ModelErr, Result};

/// Marks a node without children in `left_children`.
const LEAF: i64 = -1;

/// A single regression tree stored as flat node arrays.
///
/// Node `0` is the root. For a leaf, `conditions[i]` holds the leaf value instead of a
/// threshold.
#[derive(Debug, Clone)]
pub struct Tree {
    left: Vec<usize>,
    right: Vec<usize>,
    features: Vec<usize>,
    conditions: Vec<f32>,
    default_left: Vec<bool>,
    is_leaf: Vec<bool>,
}

impl Tree {
    /// Validates the raw arrays of a serialized tree and builds a `Tree`.
    ///
    /// # Arguments
    /// * `idx` - The position of the tree in the ensemble, used for error messages.
    /// * `raw` - The deserialized tree.
    /// * `num_features` - The amount of input columns of the ensemble.
    ///
    /// # Returns
    /// The tree or an error describing the first inconsistency found.
    pub(super) fn from_artifact(idx: usize, raw: TreeArtifact, num_features: usize) -> Result<Self> {
        let ctx = |msg: String| ModelErr::InvalidModel(format!("tree {idx}: {msg}"));
        let n = raw.left_children.len();

        if n == 0 {
            return Err(ctx("has no nodes".into()));
        }

        let lens = [
            ("right_children", raw.right_children.len()),
            ("split_indices", raw.split_indices.len()),
            ("split_conditions", raw.split_conditions.len()),
            ("default_left", raw.default_left.len()),
        ];
        for (name, len) in lens {
            if len != n {
                return Err(ctx(format!("{name} has {len} entries, expected {n}")));
            }
        }

        if raw.split_type.iter().any(|&t| t != 0) {
            return Err(ctx("categorical splits are not supported".into()));
        }

        let mut tree = Self {
            left: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            features: Vec::with_capacity(n),
            conditions: raw.split_conditions,
            default_left: raw.default_left.iter().map(|f| f.is_set()).collect(),
            is_leaf: Vec::with_capacity(n),
        };

        for i in 0..n {
            let (l, r) = (raw.left_children[i], raw.right_children[i]);

            if l == LEAF {
                tree.left.push(0);
                tree.right.push(0);
                tree.features.push(0);
                tree.is_leaf.push(true);
                continue;
            }

            // Children always come after their parent, which rules out cycles.
            let child = |c: i64| -> Result<usize> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| ctx(format!("node {i} has invalid child {c}")))
            };

            let feature = usize::try_from(raw.split_indices[i])
                .ok()
                .filter(|&f| f < num_features)
                .ok_or_else(|| {
                    ctx(format!(
                        "node {i} splits on feature {} but the model has {num_features}",
                        raw.split_indices[i]
                    ))
                })?;

            tree.left.push(child(l)?);
            tree.right.push(child(r)?);
            tree.features.push(feature);
            tree.is_leaf.push(false);
        }

        Ok(tree)
    }

    /// Returns the amount of nodes in the tree.
    pub fn len(&self) -> usize {
        self.is_leaf.len()
    }

    /// Walks the tree for a single sample and returns the reached leaf value.
    pub fn leaf_value(&self, x: &[f32]) -> f32 {
        let mut i = 0;

        while !self.is_leaf[i] {
            let v = x[self.features[i]];
            let go_left = if v.is_nan() {
                self.default_left[i]
            } else {
                v < self.conditions[i]
            };

            i = if go_left { self.left[i] } else { self.right[i] };
        }

        self.conditions[i]
    }
}
