//! Answer-choice parsing and range validation.

/// True iff `candidate_index` is a valid zero-based index into `option_count` options.
///
/// Total over every integer: negative and oversized candidates simply return false.
#[must_use]
pub fn validate(candidate_index: i64, option_count: usize) -> bool {
    usize::try_from(candidate_index).is_ok_and(|index| index < option_count)
}

/// Parses a 1-based numeric choice into a zero-based candidate index.
///
/// The text must be a plain 32-bit signed integer with an optional sign; surrounding
/// whitespace is not accepted. Returns `None` when the text is not a number.
#[must_use]
pub fn parse_choice(raw: &str) -> Option<i64> {
    raw.parse::<i32>().ok().map(|choice| i64::from(choice) - 1)
}
