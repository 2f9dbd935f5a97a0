use crate::error::TreeError;
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// Formats a threshold the way it is printed in test descriptions: shortest
/// round-trip form, with `.0` kept on integral values.
pub fn format_threshold(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// The test a decision node applies to a row.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitTest {
    /// One branch per observed value of the attribute.
    Multiway { attribute: String },
    /// `attribute <= threshold`.
    LessOrEqual { attribute: String, threshold: f64 },
    /// `attribute == value`.
    Equals { attribute: String, value: String },
}

impl SplitTest {
    pub fn attribute(&self) -> &str {
        match self {
            SplitTest::Multiway { attribute }
            | SplitTest::LessOrEqual { attribute, .. }
            | SplitTest::Equals { attribute, .. } => attribute,
        }
    }

    pub fn is_binary(&self) -> bool {
        !matches!(self, SplitTest::Multiway { .. })
    }
}

impl Display for SplitTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SplitTest::Multiway { attribute } => write!(f, "{}", attribute),
            SplitTest::LessOrEqual {
                attribute,
                threshold,
            } => write!(f, "{} <= {}", attribute, format_threshold(*threshold)),
            SplitTest::Equals { attribute, value } => write!(f, "{} == {}", attribute, value),
        }
    }
}

/// Outcome labelling a branch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BranchKey {
    /// A categorical value of a multiway split.
    Value(String),
    /// The row satisfies a binary test.
    Yes,
    /// The row does not satisfy a binary test.
    No,
}

impl Display for BranchKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BranchKey::Value(value) => write!(f, "{}", value),
            BranchKey::Yes => write!(f, "yes"),
            BranchKey::No => write!(f, "no"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    outcome: BranchKey,
    child: TreeNode,
}

impl Branch {
    pub fn new(outcome: BranchKey, child: TreeNode) -> Self {
        Self { outcome, child }
    }

    pub fn outcome(&self) -> &BranchKey {
        &self.outcome
    }

    pub fn child(&self) -> &TreeNode {
        &self.child
    }
}

/// An internal node. Always has at least one branch and unique branch keys.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionNode {
    test: SplitTest,
    branches: Vec<Branch>,
}

impl DecisionNode {
    pub fn test(&self) -> &SplitTest {
        &self.test
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Child reached through `outcome`.
    pub fn branch(&self, outcome: &BranchKey) -> Option<&TreeNode> {
        self.branches
            .iter()
            .find(|branch| &branch.outcome == outcome)
            .map(Branch::child)
    }
}

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf(String),
    Decision(DecisionNode),
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode::Leaf(label.into())
    }

    /// Builds a decision node, rejecting empty branch lists and repeated keys.
    pub fn decision(test: SplitTest, branches: Vec<Branch>) -> Result<Self, TreeError> {
        if branches.is_empty() {
            return Err(TreeError::EmptyDecision {
                test: test.to_string(),
            });
        }
        let mut seen = HashSet::new();
        for branch in &branches {
            if !seen.insert(&branch.outcome) {
                return Err(TreeError::DuplicateBranch {
                    test: test.to_string(),
                    key: branch.outcome.to_string(),
                });
            }
        }
        Ok(TreeNode::Decision(DecisionNode { test, branches }))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf(label) => Some(label),
            TreeNode::Decision(_) => None,
        }
    }

    pub fn as_decision(&self) -> Option<&DecisionNode> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Decision(node) => Some(node),
        }
    }

    /// Every node in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let TreeNode::Decision(decision) = node {
                stack.extend(decision.branches.iter().rev().map(Branch::child));
            }
            Some(node)
        })
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let TreeNode::Decision(decision) = node {
                stack.extend(decision.branches.iter().map(|b| (&b.child, depth + 1)));
            }
        }
        deepest
    }

    pub fn n_nodes(&self) -> usize {
        self.iter().count()
    }

    pub fn n_leaves(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }

    /// Leaf labels in pre-order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter().filter_map(TreeNode::label).collect()
    }

    /// The nested `{test: {branch: child}}` form as JSON.
    ///
    /// Written from an explicit stack, so arbitrarily deep trees export
    /// without recursion. The pretty layout matches `serde_json`'s.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, TreeError> {
        let colon = if pretty { ": " } else { ":" };
        let mut out = String::new();
        let mut stack = vec![JsonStep::Node(self, 0)];
        while let Some(step) = stack.pop() {
            match step {
                JsonStep::Node(TreeNode::Leaf(label), _) => out.push_str(&quote(label)?),
                JsonStep::Node(TreeNode::Decision(decision), depth) => {
                    out.push('{');
                    newline(&mut out, pretty, depth + 1);
                    out.push_str(&quote(&decision.test.to_string())?);
                    out.push_str(colon);
                    out.push('{');
                    stack.push(JsonStep::Close(depth));
                    stack.push(JsonStep::Close(depth + 1));
                    for (index, branch) in decision.branches.iter().enumerate().rev() {
                        stack.push(JsonStep::Node(&branch.child, depth + 2));
                        stack.push(JsonStep::Key(&branch.outcome, depth + 2, index == 0));
                    }
                }
                JsonStep::Key(outcome, depth, first) => {
                    if !first {
                        out.push(',');
                    }
                    newline(&mut out, pretty, depth);
                    out.push_str(&quote(&outcome.to_string())?);
                    out.push_str(colon);
                }
                JsonStep::Close(depth) => {
                    newline(&mut out, pretty, depth);
                    out.push('}');
                }
            }
        }
        Ok(out)
    }
}

enum JsonStep<'a> {
    Node(&'a TreeNode, usize),
    Key(&'a BranchKey, usize, bool),
    Close(usize),
}

fn quote(text: &str) -> Result<String, TreeError> {
    serde_json::to_string(text).map_err(|source| TreeError::Serialize { source })
}

fn newline(out: &mut String, pretty: bool, depth: usize) {
    if pretty {
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
    }
}

/// Leaves serialize as their label; decisions as a one-entry map from the
/// test description to the branch map.
///
/// The text comes from [`TreeNode::to_json_string`] and is validated by
/// `serde_json` on the way through, so trees nested past its recursion limit
/// report an error here; export those with `to_json_string` directly.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = self.to_json_string(false).map_err(S::Error::custom)?;
        RawValue::from_string(json)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Dismantles deep subtrees from an explicit stack instead of the
/// compiler's recursive drop glue.
impl Drop for DecisionNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.branches);
        while let Some(mut branch) = pending.pop() {
            if let TreeNode::Decision(child) = &mut branch.child {
                pending.append(&mut child.branches);
            }
        }
    }
}
