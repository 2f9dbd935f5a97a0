//! Depth-first induction loop shared by every [`SplitStrategy`].
//!
//! Pending nodes live in an arena and are resolved from an explicit work
//! stack, so tree height is bounded by memory rather than the call stack.
//! Children are always allocated after their parent, which lets the final
//! tree be assembled by walking the arena backwards.
use crate::data::dataset::{Dataset, DatasetView};
use crate::error::TreeError;
use crate::trees::node::{Branch, BranchKey, SplitTest, TreeNode};
use crate::trees::params::TreeParams;
use crate::trees::selector::select_attribute;
use crate::trees::split::{SplitCandidate, SplitRule};
use crate::trees::strategy::SplitStrategy;
use tracing::{debug, instrument, trace};

enum Slot {
    Pending,
    Leaf(usize),
    Decision {
        test: SplitTest,
        branches: Vec<(BranchKey, usize)>,
    },
}

struct Task<'d> {
    view: DatasetView<'d>,
    attributes: Vec<usize>,
    depth: usize,
    slot: usize,
}

pub struct TreeBuilder<S: SplitStrategy> {
    strategy: S,
    min_samples_split: usize,
    max_depth: Option<usize>,
}

impl<S: SplitStrategy> TreeBuilder<S> {
    pub fn new(strategy: S, params: &TreeParams) -> Self {
        Self {
            strategy,
            min_samples_split: params.min_samples_split().into(),
            max_depth: params.max_depth().map(usize::from),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Induces a tree over every row and attribute of `dataset`.
    #[instrument(skip_all, fields(algorithm = %self.strategy.algorithm(), rows = dataset.n_rows()))]
    pub fn build(&self, dataset: &Dataset) -> Result<TreeNode, TreeError> {
        let mut arena = vec![Slot::Pending];
        let mut stack = vec![Task {
            view: dataset.view(),
            attributes: (0..dataset.n_attributes()).collect(),
            depth: 0,
            slot: 0,
        }];

        while let Some(task) = stack.pop() {
            let slot = task.slot;
            let resolved = self.resolve(task, &mut arena, &mut stack)?;
            arena[slot] = resolved;
        }

        let tree = assemble(dataset, arena)?;
        debug!(
            depth = tree.depth(),
            nodes = tree.n_nodes(),
            leaves = tree.n_leaves(),
            "tree built"
        );
        Ok(tree)
    }

    /// Decides one node, queueing its children on `stack` in pre-order.
    fn resolve<'d>(
        &self,
        task: Task<'d>,
        arena: &mut Vec<Slot>,
        stack: &mut Vec<Task<'d>>,
    ) -> Result<Slot, TreeError> {
        let Task {
            view,
            attributes,
            depth,
            ..
        } = task;

        if let Some(label) = view.pure_label() {
            trace!(depth, rows = view.len(), "pure leaf");
            return Ok(Slot::Leaf(label));
        }
        if attributes.is_empty()
            || view.len() < self.min_samples_split
            || self.max_depth.is_some_and(|max| depth >= max)
        {
            return majority_leaf(&view);
        }
        let Some(candidate) = select_attribute(&self.strategy, &view, &attributes) else {
            trace!(depth, rows = view.len(), "no usable attribute");
            return majority_leaf(&view);
        };

        let dataset = view.dataset();
        let name = dataset.attribute(candidate.attribute).name().to_string();
        debug!(
            depth,
            rows = view.len(),
            attribute = %name,
            score = candidate.score,
            "split selected"
        );

        let child_attributes = if self.strategy.retains_attribute(&candidate.rule) {
            attributes
        } else {
            attributes
                .into_iter()
                .filter(|&attribute| attribute != candidate.attribute)
                .collect()
        };

        let SplitCandidate {
            attribute, rule, ..
        } = candidate;
        let (test, children) = match rule {
            SplitRule::Multiway => {
                let children = view
                    .partition_by_value(attribute)
                    .into_iter()
                    .map(|(value, child)| (BranchKey::Value(value), child))
                    .collect::<Vec<_>>();
                (SplitTest::Multiway { attribute: name }, children)
            }
            SplitRule::Threshold(threshold) => {
                let (left, right) = view.split_on_threshold(attribute, threshold);
                if left.is_empty() || right.is_empty() {
                    return majority_leaf(&view);
                }
                let test = SplitTest::LessOrEqual {
                    attribute: name,
                    threshold,
                };
                (test, vec![(BranchKey::Yes, left), (BranchKey::No, right)])
            }
            SplitRule::Equals(value) => {
                let (same, other) = view.split_on_value(attribute, &value);
                if same.is_empty() || other.is_empty() {
                    return majority_leaf(&view);
                }
                let test = SplitTest::Equals {
                    attribute: name,
                    value,
                };
                (test, vec![(BranchKey::Yes, same), (BranchKey::No, other)])
            }
        };

        let mut branches = Vec::with_capacity(children.len());
        let mut queued = Vec::with_capacity(children.len());
        for (key, child) in children {
            let child_slot = arena.len();
            if child.is_empty() {
                // an empty partition inherits the parent's majority
                arena.push(majority_leaf(&view)?);
            } else {
                arena.push(Slot::Pending);
                queued.push(Task {
                    view: child,
                    attributes: child_attributes.clone(),
                    depth: depth + 1,
                    slot: child_slot,
                });
            }
            branches.push((key, child_slot));
        }
        stack.extend(queued.into_iter().rev());

        Ok(Slot::Decision { test, branches })
    }
}

fn majority_leaf(view: &DatasetView<'_>) -> Result<Slot, TreeError> {
    view.majority_label()
        .map(Slot::Leaf)
        .ok_or(TreeError::EmptyDataset)
}

fn assemble(dataset: &Dataset, arena: Vec<Slot>) -> Result<TreeNode, TreeError> {
    let mut built: Vec<Option<TreeNode>> = (0..arena.len()).map(|_| None).collect();
    for (index, slot) in arena.into_iter().enumerate().rev() {
        let node = match slot {
            Slot::Leaf(class) => TreeNode::leaf(dataset.class_name(class)),
            Slot::Decision { test, branches } => {
                let branches = branches
                    .into_iter()
                    .map(|(key, child)| {
                        built[child]
                            .take()
                            .map(|node| Branch::new(key, node))
                            .ok_or(TreeError::TreeNotBuilt)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                TreeNode::decision(test, branches)?
            }
            Slot::Pending => return Err(TreeError::TreeNotBuilt),
        };
        built[index] = Some(node);
    }
    built
        .into_iter()
        .next()
        .flatten()
        .ok_or(TreeError::TreeNotBuilt)
}
