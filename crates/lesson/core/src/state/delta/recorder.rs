use super::{LessonUpdate, ReasonKind, UpdateKind, UpdateReason, apply_update};
use crate::state::types::Lesson;

/// Stamps updates with provenance and keeps a live fold of them.
///
/// Every recorded update is applied immediately, so later steps of the same
/// transition observe the effects of earlier ones.
#[derive(Clone, Debug)]
pub struct UpdateRecorder {
    lesson: Lesson,
    updates: Vec<LessonUpdate>,
    next_result_index: u32,
}

impl UpdateRecorder {
    /// Starts recording on top of `lesson`, numbering from `next_result_index`.
    pub fn new(lesson: Lesson, next_result_index: u32) -> Self {
        Self {
            lesson,
            updates: Vec::new(),
            next_result_index,
        }
    }

    /// Live lesson including every update recorded so far.
    #[inline]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    /// Updates recorded so far.
    pub fn updates(&self) -> &[LessonUpdate] {
        &self.updates
    }

    /// Number of updates recorded so far. Useful as a mark for [`Self::since`].
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Updates recorded after `mark`.
    pub fn since(&self, mark: usize) -> &[LessonUpdate] {
        &self.updates[mark.min(self.updates.len())..]
    }

    /// Result index the next recorded update will receive.
    pub fn next_result_index(&self) -> u32 {
        self.next_result_index
    }

    pub fn record(&mut self, reason: ReasonKind, kind: UpdateKind) {
        let reason = UpdateReason {
            turn_number: self.lesson.turn_number,
            result_index: self.next_result_index,
            kind: reason,
        };
        apply_update(&mut self.lesson, &kind);
        self.updates.push(LessonUpdate { kind, reason });
        self.next_result_index += 1;
    }

    pub fn record_all(&mut self, reason: ReasonKind, kinds: impl IntoIterator<Item = UpdateKind>) {
        for kind in kinds {
            self.record(reason, kind);
        }
    }

    /// Consumes the recorder and returns the recorded updates.
    pub fn into_updates(self) -> Vec<LessonUpdate> {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{Idol, IdolDataId};

    #[test]
    fn records_contiguous_indices_and_folds_live() {
        let lesson = Lesson::new(Idol::new(IdolDataId::new("idol"), 10, 10), Vec::new());
        let mut recorder = UpdateRecorder::new(lesson, 4);

        recorder.record(ReasonKind::TurnStart, UpdateKind::TurnNumberIncrease);
        recorder.record(ReasonKind::TurnStart, UpdateKind::score(7));

        assert_eq!(recorder.lesson().turn_number, 1);
        assert_eq!(recorder.lesson().score, 7);

        let updates = recorder.into_updates();
        assert_eq!(updates[0].reason.result_index, 4);
        assert_eq!(updates[0].reason.turn_number, 0);
        assert_eq!(updates[1].reason.result_index, 5);
        assert_eq!(updates[1].reason.turn_number, 1);
    }
}
