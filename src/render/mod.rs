/// Graphviz output
pub mod dot;
