//! The three splitting strategies and the capability they share.
use crate::data::dataset::DatasetView;
use crate::error::TreeError;
use crate::trees::split::{
    gain_ratio, information_gain, scan_thresholds, split_information, weighted_gini,
    SplitCandidate, SplitRule,
};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use tracing::trace;

/// Tree induction algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Id3,
    C45,
    Cart,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Id3 => "ID3",
            Algorithm::C45 => "C4.5",
            Algorithm::Cart => "CART",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id3" => Ok(Algorithm::Id3),
            "c45" | "c4.5" => Ok(Algorithm::C45),
            "cart" => Ok(Algorithm::Cart),
            _ => Err(TreeError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Direction in which a strategy's scores improve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Strict improvement; equal scores never replace the incumbent.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }
}

/// Scoring function, partition shape and attribute-retention rule of one algorithm.
pub trait SplitStrategy: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn objective(&self) -> Objective;

    /// Best split of `view` on `attribute`, or `None` when no usable split exists.
    fn evaluate(&self, view: &DatasetView<'_>, attribute: usize) -> Option<SplitCandidate>;

    /// Whether children may split again on the attribute consumed by `rule`.
    ///
    /// Multiway splits exhaust their attribute; binary splits do not.
    fn retains_attribute(&self, rule: &SplitRule) -> bool {
        !matches!(rule, SplitRule::Multiway)
    }
}

/// Multiway info-gain split, shared by ID3 and C4.5's categorical branch.
fn multiway(view: &DatasetView<'_>, attribute: usize, use_ratio: bool) -> Option<SplitCandidate> {
    if view.is_empty() {
        return None;
    }
    let children = view
        .partition_by_value(attribute)
        .into_iter()
        .map(|(_, child)| child.class_counts())
        .collect::<Vec<_>>();
    let gain = information_gain(&view.class_counts(), &children);
    let score = if use_ratio {
        let sizes = children
            .iter()
            .map(|counts| counts.iter().sum())
            .collect::<Vec<usize>>();
        gain_ratio(gain, split_information(&sizes))
    } else {
        gain
    };
    Some(SplitCandidate::new(attribute, SplitRule::Multiway, score))
}

/// Best midpoint threshold under `score`, first one winning ties.
fn best_threshold<F>(
    view: &DatasetView<'_>,
    attribute: usize,
    objective: Objective,
    score: F,
) -> Option<SplitCandidate>
where
    F: Fn(&[usize], &[usize]) -> f64,
{
    let mut pairs = view.numeric_pairs(attribute);
    let mut best: Option<(f64, f64)> = None;
    scan_thresholds(&mut pairs, view.dataset().n_classes(), |threshold, left, right| {
        let value = score(left, right);
        trace!(attribute, threshold, score = value, "threshold scored");
        match best {
            Some((_, incumbent)) if !objective.improves(value, incumbent) => {}
            _ => best = Some((threshold, value)),
        }
    });
    best.map(|(threshold, value)| {
        SplitCandidate::new(attribute, SplitRule::Threshold(threshold), value)
    })
}

/// ID3: multiway information gain on every attribute, numeric or not.
#[derive(Clone, Copy, Debug, Default)]
pub struct Id3Strategy;

impl SplitStrategy for Id3Strategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Id3
    }

    fn objective(&self) -> Objective {
        Objective::Maximize
    }

    fn evaluate(&self, view: &DatasetView<'_>, attribute: usize) -> Option<SplitCandidate> {
        multiway(view, attribute, false)
    }
}

/// C4.5: multiway split on categorical attributes, gain-ratio threshold on continuous ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct C45Strategy {
    categorical_gain_ratio: bool,
}

impl C45Strategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score categorical multiway splits by gain ratio instead of information gain.
    pub fn with_categorical_gain_ratio(categorical_gain_ratio: bool) -> Self {
        Self {
            categorical_gain_ratio,
        }
    }
}

impl SplitStrategy for C45Strategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::C45
    }

    fn objective(&self) -> Objective {
        Objective::Maximize
    }

    fn evaluate(&self, view: &DatasetView<'_>, attribute: usize) -> Option<SplitCandidate> {
        if !view.dataset().attribute(attribute).is_continuous() {
            return multiway(view, attribute, self.categorical_gain_ratio);
        }
        let parent = view.class_counts();
        best_threshold(view, attribute, Objective::Maximize, |left, right| {
            let gain = information_gain(&parent, &[left.to_vec(), right.to_vec()]);
            let sizes = [left.iter().sum::<usize>(), right.iter().sum::<usize>()];
            gain_ratio(gain, split_information(&sizes))
        })
    }
}

/// CART: binary splits scored by weighted Gini, value-vs-rest for categorical attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartStrategy;

impl SplitStrategy for CartStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cart
    }

    fn objective(&self) -> Objective {
        Objective::Minimize
    }

    fn evaluate(&self, view: &DatasetView<'_>, attribute: usize) -> Option<SplitCandidate> {
        if view.dataset().attribute(attribute).is_continuous() {
            return best_threshold(view, attribute, Objective::Minimize, |left, right| {
                weighted_gini(&[left.to_vec(), right.to_vec()])
            });
        }

        let mut best: Option<SplitCandidate> = None;
        for value in view.distinct_values(attribute) {
            let (same, other) = view.split_on_value(attribute, value);
            // value-vs-rest with nothing on the rest side makes no progress
            if other.is_empty() {
                continue;
            }
            let score = weighted_gini(&[same.class_counts(), other.class_counts()]);
            trace!(attribute, value, score, "value scored");
            match &best {
                Some(incumbent) if !Objective::Minimize.improves(score, incumbent.score) => {}
                _ => {
                    best = Some(SplitCandidate::new(
                        attribute,
                        SplitRule::Equals(value.to_string()),
                        score,
                    ))
                }
            }
        }
        best
    }
}
