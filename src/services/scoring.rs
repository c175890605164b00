/// Comparison form of an answer: surrounding whitespace dropped, lowercased.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

pub fn is_correct(submitted: &str, correct_answer: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(correct_answer)
}

/// Running count of graded answers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// `100 × correct / total`, or `None` when nothing was graded.
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.correct as f64 / self.total as f64 * 100.0)
    }
}
