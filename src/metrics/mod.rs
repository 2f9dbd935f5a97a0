/// Entropy, Gini impurity and majority voting
pub mod impurity;
