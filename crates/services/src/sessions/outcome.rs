/// Whether a recorded answer arrived inside the per-question time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    WithinLimit,
    Exceeded,
}

/// Result of a single answer submission.
///
/// `Correct` and `Incorrect` mean the question is now answered. `InvalidChoice` and
/// `ParseFailure` leave it unanswered and the caller should prompt again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The chosen option matches the correct one. Credited only within the limit.
    Correct { timing: Timing },
    /// A valid option that is not the correct one.
    Incorrect { timing: Timing },
    /// A number that does not name any of the `option_count` options.
    InvalidChoice { option_count: usize },
    /// The text was not a number.
    ParseFailure,
}

impl AnswerOutcome {
    /// True when the submission marked the question answered.
    #[must_use]
    pub fn is_recorded(self) -> bool {
        matches!(self, Self::Correct { .. } | Self::Incorrect { .. })
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    /// True when the submission earned a point.
    #[must_use]
    pub fn is_credited(self) -> bool {
        matches!(
            self,
            Self::Correct {
                timing: Timing::WithinLimit
            }
        )
    }

    #[must_use]
    pub fn time_exceeded(self) -> bool {
        matches!(
            self,
            Self::Correct {
                timing: Timing::Exceeded
            } | Self::Incorrect {
                timing: Timing::Exceeded
            }
        )
    }
}
