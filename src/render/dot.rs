//! Graphviz rendering of an induced tree.
//!
//! Every (test, branch) pair becomes a node; terminal labels become boxed
//! nodes carrying the pair and the predicted class. Node identifiers are
//! generated, so equal labels in different subtrees stay distinct.
use crate::error::TreeError;
use crate::trees::node::{BranchKey, DecisionNode, SplitTest, TreeNode};
use crate::trees::strategy::Algorithm;
use std::fmt::{self, Write};

/// How a (test, branch) pair is labelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeLabelStyle {
    /// `Outlook = Sunny`
    Equals,
    /// `Outlook [Sunny]`, `Humidity <= 75.0 [yes]`
    Bracketed,
}

impl EdgeLabelStyle {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Id3 => EdgeLabelStyle::Equals,
            Algorithm::C45 | Algorithm::Cart => EdgeLabelStyle::Bracketed,
        }
    }

    pub fn label(self, test: &SplitTest, outcome: &BranchKey) -> String {
        match self {
            EdgeLabelStyle::Equals => format!("{} = {}", test, outcome),
            EdgeLabelStyle::Bracketed => format!("{} [{}]", test, outcome),
        }
    }
}

fn escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

struct DotWriter {
    out: String,
    next_id: usize,
}

impl DotWriter {
    fn node(&mut self, label: &str, boxed: bool) -> Result<String, fmt::Error> {
        let id = format!("n{}", self.next_id);
        self.next_id += 1;
        let shape = if boxed { " shape=box" } else { "" };
        writeln!(self.out, "\t{} [label=\"{}\"{}]", id, escape(label), shape)?;
        Ok(id)
    }

    fn edge(&mut self, from: &str, to: &str) -> fmt::Result {
        writeln!(self.out, "\t{} -> {}", from, to)
    }
}

/// Renders `tree` as a Graphviz `digraph`.
pub fn to_dot(tree: &TreeNode, style: EdgeLabelStyle) -> Result<String, TreeError> {
    write_dot(tree, style).map_err(|source| TreeError::Render { source })
}

fn write_dot(tree: &TreeNode, style: EdgeLabelStyle) -> Result<String, fmt::Error> {
    let mut writer = DotWriter {
        out: String::from("digraph {\n"),
        next_id: 0,
    };

    let mut stack: Vec<(&DecisionNode, Option<String>)> = Vec::new();
    match tree {
        TreeNode::Leaf(label) => {
            writer.node(&format!("→ {}", label), true)?;
        }
        TreeNode::Decision(root) => stack.push((root, None)),
    }

    while let Some((decision, parent)) = stack.pop() {
        let mut pending = Vec::new();
        for branch in decision.branches() {
            let pair = style.label(decision.test(), branch.outcome());
            let id = match branch.child() {
                TreeNode::Decision(child) => {
                    let id = writer.node(&pair, false)?;
                    pending.push((child, Some(id.clone())));
                    id
                }
                TreeNode::Leaf(label) => writer.node(&format!("{}\n→ {}", pair, label), true)?,
            };
            if let Some(parent) = &parent {
                writer.edge(parent, &id)?;
            }
        }
        stack.extend(pending.into_iter().rev());
    }

    writer.out.push_str("}\n");
    Ok(writer.out)
}
