use crate::shared::utterance::Utterance;

/// Merges each run of consecutive utterances from the same speaker into one.
///
/// Speakers match by exact string equality, so placeholder speakers merge
/// with each other. The merged text is the run's texts joined by single
/// spaces; the timestamp is the first one of the run. Order is preserved and
/// nothing else changes, which makes the operation idempotent.
pub fn normalize(utterances: &[Utterance]) -> Vec<Utterance> {
    let mut merged: Vec<Utterance> = Vec::with_capacity(utterances.len());
    for utterance in utterances {
        match merged.last_mut() {
            Some(current) if current.speaker() == utterance.speaker() => {
                *current = current.merged_with(utterance);
            }
            _ => merged.push(utterance.clone()),
        }
    }
    merged
}
