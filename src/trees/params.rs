use crate::error::TreeError;

/// Stopping rules and algorithm options shared by every induction run.
///
/// The defaults impose no limits beyond the algorithms' own stopping rules.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    min_samples_split: u16,
    max_depth: Option<u16>,
    c45_categorical_gain_ratio: bool,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            min_samples_split: 2,
            max_depth: None,
            c45_categorical_gain_ratio: false,
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        if min_samples_split < 2 {
            return Err(TreeError::InvalidMinSamplesSplit { min_samples_split });
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        if let Some(depth) = max_depth.filter(|&depth| depth < 1) {
            return Err(TreeError::InvalidMaxDepth { max_depth: depth });
        }
        self.max_depth = max_depth;
        Ok(())
    }

    /// Score C4.5's categorical multiway splits by gain ratio rather than information gain.
    pub fn set_c45_categorical_gain_ratio(&mut self, enabled: bool) {
        self.c45_categorical_gain_ratio = enabled;
    }

    pub fn min_samples_split(&self) -> u16 {
        self.min_samples_split
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }

    pub fn c45_categorical_gain_ratio(&self) -> bool {
        self.c45_categorical_gain_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TreeParams::default();
        assert_eq!(params.min_samples_split(), 2);
        assert_eq!(params.max_depth(), None);
        assert!(!params.c45_categorical_gain_ratio());
    }

    #[test]
    fn test_set_min_samples_split() {
        let mut params = TreeParams::new();
        assert!(params.set_min_samples_split(5).is_ok());
        assert_eq!(params.min_samples_split(), 5);
        assert!(matches!(
            params.set_min_samples_split(1),
            Err(TreeError::InvalidMinSamplesSplit {
                min_samples_split: 1
            })
        ));
        assert_eq!(params.min_samples_split(), 5);
    }

    #[test]
    fn test_set_max_depth() {
        let mut params = TreeParams::new();
        assert!(params.set_max_depth(Some(3)).is_ok());
        assert_eq!(params.max_depth(), Some(3));
        assert!(matches!(
            params.set_max_depth(Some(0)),
            Err(TreeError::InvalidMaxDepth { max_depth: 0 })
        ));
        assert!(params.set_max_depth(None).is_ok());
        assert_eq!(params.max_depth(), None);
    }
}
