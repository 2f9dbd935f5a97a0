//! Decision Tree Classifier
use crate::data::dataset::Dataset;
use crate::error::TreeError;
use crate::render::dot::{to_dot, EdgeLabelStyle};
use crate::trees::builder::TreeBuilder;
use crate::trees::node::TreeNode;
use crate::trees::params::TreeParams;
use crate::trees::strategy::{Algorithm, C45Strategy, CartStrategy, Id3Strategy};
use tracing::info;

/// Induces and holds one classification tree.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier {
    algorithm: Algorithm,
    params: TreeParams,
    root: Option<TreeNode>,
}

impl DecisionTreeClassifier {
    /// Creates a new classifier with default parameters.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            params: TreeParams::new(),
            root: None,
        }
    }

    /// Creates a new classifier with custom stopping rules.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - The splitting strategy.
    /// * `min_samples_split` - The minimum number of rows required to split a node.
    /// * `max_depth` - The maximum depth of the tree.
    ///
    /// # Errors
    ///
    /// This method will return an error if the minimum number of rows to split is less than 2 or if the maximum depth is less than 1.
    pub fn with_params(
        algorithm: Algorithm,
        min_samples_split: Option<u16>,
        max_depth: Option<u16>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::new(algorithm);
        tree.set_min_samples_split(min_samples_split.unwrap_or(2))?;
        tree.set_max_depth(max_depth)?;
        Ok(tree)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        self.params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        self.params.set_max_depth(max_depth)
    }

    pub fn set_c45_categorical_gain_ratio(&mut self, enabled: bool) {
        self.params.set_c45_categorical_gain_ratio(enabled);
    }

    /// Builds the tree from a dataset, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Only returns an error if the induced tree violates a node invariant,
    /// which the builder never produces for a loaded [`Dataset`].
    pub fn fit(&mut self, dataset: &Dataset) -> Result<&TreeNode, TreeError> {
        let tree = match self.algorithm {
            Algorithm::Id3 => TreeBuilder::new(Id3Strategy, &self.params).build(dataset)?,
            Algorithm::C45 => {
                let strategy = C45Strategy::with_categorical_gain_ratio(
                    self.params.c45_categorical_gain_ratio(),
                );
                TreeBuilder::new(strategy, &self.params).build(dataset)?
            }
            Algorithm::Cart => TreeBuilder::new(CartStrategy, &self.params).build(dataset)?,
        };
        info!(
            algorithm = %self.algorithm,
            depth = tree.depth(),
            leaves = tree.n_leaves(),
            "finished building the tree"
        );
        Ok(self.root.insert(tree))
    }

    /// The tree built by the last [`fit`](Self::fit).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::TreeNotBuilt`] before the first `fit`.
    pub fn tree(&self) -> Result<&TreeNode, TreeError> {
        self.root.as_ref().ok_or(TreeError::TreeNotBuilt)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, TreeError> {
        self.tree()?.to_json_string(pretty)
    }

    /// Graphviz source for the built tree, labelled in this algorithm's style.
    pub fn to_dot(&self) -> Result<String, TreeError> {
        to_dot(self.tree()?, EdgeLabelStyle::for_algorithm(self.algorithm))
    }
}
