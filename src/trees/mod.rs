/// Depth-first induction loop
pub mod builder;
/// Decision tree classifier
pub mod classifier;
/// Tree nodes, split tests and tree queries
pub mod node;
/// Stopping rules
pub mod params;
/// Best-attribute selection
pub mod selector;
/// Split scoring and threshold search
pub mod split;
/// ID3, C4.5 and CART split strategies
pub mod strategy;
