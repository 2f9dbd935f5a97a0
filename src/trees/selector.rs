use crate::data::dataset::DatasetView;
use crate::trees::split::SplitCandidate;
use crate::trees::strategy::SplitStrategy;
use rayon::prelude::*;
use tracing::trace;

/// Picks the winning attribute among `attributes`.
///
/// Attributes are scored in parallel, then compared in the order given with a
/// strict improvement test, so on exact ties the earlier attribute wins.
/// Returns `None` when no attribute yields a usable split.
pub fn select_attribute<S>(
    strategy: &S,
    view: &DatasetView<'_>,
    attributes: &[usize],
) -> Option<SplitCandidate>
where
    S: SplitStrategy + ?Sized,
{
    let scored = attributes
        .par_iter()
        .map(|&attribute| strategy.evaluate(view, attribute))
        .collect::<Vec<_>>();

    let objective = strategy.objective();
    let mut best: Option<SplitCandidate> = None;
    for candidate in scored.into_iter().flatten() {
        trace!(
            attribute = candidate.attribute,
            score = candidate.score,
            "attribute scored"
        );
        match &best {
            Some(incumbent) if !objective.improves(candidate.score, incumbent.score) => {}
            _ => best = Some(candidate),
        }
    }
    best
}
