//! Ship computer quiz
//!
//! A run draws a shuffled subset of the question bank. Each question takes
//! exactly one answer; after a short pause the next question comes up, and
//! when the last one is done the run ends. Only a perfect run counts as a
//! win, but an imperfect one is never punished.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Built-in question bank
const BANK_JSON: &str = include_str!("../../assets/questions.json");

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    pub fn new(question: &str, options: &[&str], answer: &str) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }
}

/// Parse a bank from JSON (an array of questions)
pub fn parse_bank(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The bank compiled into the game
pub fn default_bank() -> Vec<Question> {
    match parse_bank(BANK_JSON) {
        Ok(bank) => bank,
        Err(e) => {
            log::warn!("Built-in question bank is malformed: {}", e);
            Vec::new()
        }
    }
}

/// Feedback for a submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerResult {
    Correct,
    Wrong,
}

/// What a quiz tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Waiting for an answer or for the pause to run out
    Waiting,
    /// Moved to the next question
    Advanced,
    /// The last question was answered; call [`Quiz::end`]
    Finished,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub won: bool,
}

/// One quiz run
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub active: bool,
    pub questions: Vec<Question>,
    pub current: usize,
    pub score: usize,
    pub selected: Option<String>,
    pub completed: bool,
    pub can_retry: bool,
    pub has_won: bool,
    /// Ticks until the next question after an answer
    advance_in: Option<u32>,
    answer_delay: u32,
}

impl Quiz {
    /// Shuffle the bank and take `size` questions
    pub fn start(bank: &[Question], size: usize, answer_delay: u32, rng: &mut Pcg32) -> Self {
        let mut questions = bank.to_vec();
        questions.shuffle(rng);
        questions.truncate(size);
        log::info!("Quiz started with {} questions", questions.len());
        Self::with_questions(questions, answer_delay)
    }

    /// A run over exactly these questions, in order
    pub fn with_questions(questions: Vec<Question>, answer_delay: u32) -> Self {
        Self {
            active: true,
            questions,
            current: 0,
            score: 0,
            selected: None,
            completed: false,
            can_retry: false,
            has_won: false,
            advance_in: None,
            answer_delay,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        if !self.active {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Submit an answer. Ignored once this question already has one.
    pub fn select_answer(&mut self, option: &str) -> Option<AnswerResult> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.current_question()?;
        let correct = question.answer == option;
        self.selected = Some(option.to_string());
        if correct {
            self.score += 1;
        }
        self.advance_in = Some(self.answer_delay);
        Some(if correct {
            AnswerResult::Correct
        } else {
            AnswerResult::Wrong
        })
    }

    /// Submit the option at `index` of the current question
    pub fn select_option(&mut self, index: usize) -> Option<AnswerResult> {
        let option = self.current_question()?.options.get(index)?.clone();
        self.select_answer(&option)
    }

    /// Run down the post-answer pause
    pub fn tick(&mut self) -> QuizStep {
        if !self.active {
            return QuizStep::Waiting;
        }
        if self.questions.is_empty() {
            return QuizStep::Finished;
        }
        let Some(remaining) = self.advance_in else {
            return QuizStep::Waiting;
        };
        if remaining > 0 {
            self.advance_in = Some(remaining - 1);
            return QuizStep::Waiting;
        }
        self.advance_in = None;
        self.current += 1;
        self.selected = None;
        if self.current >= self.questions.len() {
            QuizStep::Finished
        } else {
            QuizStep::Advanced
        }
    }

    pub fn end(&mut self) -> QuizOutcome {
        self.active = false;
        self.completed = true;
        self.can_retry = true;
        self.has_won = !self.questions.is_empty() && self.score == self.questions.len();
        log::info!(
            "Quiz finished: {}/{}{}",
            self.score,
            self.questions.len(),
            if self.has_won { " (perfect)" } else { "" }
        );
        QuizOutcome {
            score: self.score,
            total: self.questions.len(),
            won: self.has_won,
        }
    }
}

/// Outcome of the latest finished run, kept after the quiz scene closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizRecord {
    pub completed: bool,
    pub can_retry: bool,
    pub has_won: bool,
    pub last_score: usize,
    pub last_total: usize,
}

impl QuizRecord {
    pub fn record(&mut self, outcome: QuizOutcome) {
        self.completed = true;
        self.can_retry = true;
        // A later imperfect run does not take a win away
        self.has_won |= outcome.won;
        self.last_score = outcome.score;
        self.last_total = outcome.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn two_questions() -> Vec<Question> {
        vec![
            Question::new("A?", &["x", "y"], "x"),
            Question::new("B?", &["p", "q"], "q"),
        ]
    }

    fn run_until_step(quiz: &mut Quiz) -> QuizStep {
        loop {
            match quiz.tick() {
                QuizStep::Waiting => continue,
                step => return step,
            }
        }
    }

    #[test]
    fn test_perfect_two_question_run() {
        let mut quiz = Quiz::with_questions(two_questions(), 12);
        assert_eq!(quiz.select_answer("x"), Some(AnswerResult::Correct));
        assert_eq!(run_until_step(&mut quiz), QuizStep::Advanced);
        assert_eq!(quiz.select_answer("q"), Some(AnswerResult::Correct));
        assert_eq!(run_until_step(&mut quiz), QuizStep::Finished);
        let outcome = quiz.end();
        assert_eq!(quiz.score, 2);
        assert!(quiz.has_won && quiz.completed && quiz.can_retry);
        assert!(outcome.won);
    }

    #[test]
    fn test_double_answer_is_ignored() {
        let mut quiz = Quiz::with_questions(two_questions(), 12);
        assert_eq!(quiz.select_answer("x"), Some(AnswerResult::Correct));
        assert_eq!(quiz.select_answer("y"), None);
        assert_eq!(quiz.select_answer("x"), None);
        assert_eq!(quiz.score, 1);
        assert_eq!(quiz.selected.as_deref(), Some("x"));
    }

    #[test]
    fn test_imperfect_run_does_not_win() {
        let mut quiz = Quiz::with_questions(two_questions(), 0);
        quiz.select_option(1);
        run_until_step(&mut quiz);
        quiz.select_option(1);
        assert_eq!(run_until_step(&mut quiz), QuizStep::Finished);
        let outcome = quiz.end();
        assert_eq!(outcome.score, 1);
        assert!(!quiz.has_won);
        assert!(quiz.completed && quiz.can_retry);
    }

    #[test]
    fn test_answer_delay_in_ticks() {
        let mut quiz = Quiz::with_questions(two_questions(), 12);
        quiz.select_answer("y");
        for _ in 0..12 {
            assert_eq!(quiz.tick(), QuizStep::Waiting);
        }
        assert_eq!(quiz.tick(), QuizStep::Advanced);
        assert_eq!(quiz.current, 1);
        assert!(quiz.selected.is_none());
    }

    #[test]
    fn test_start_draws_subset_from_bank() {
        let bank = default_bank();
        assert!(bank.len() >= 5);
        assert!(bank.iter().all(|q| q.options.contains(&q.answer)));
        let mut rng = Pcg32::seed_from_u64(9);
        let quiz = Quiz::start(&bank, 5, 12, &mut rng);
        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.score, 0);
        assert_eq!(quiz.current, 0);
    }

    #[test]
    fn test_empty_run_is_not_a_win() {
        let mut quiz = Quiz::with_questions(Vec::new(), 12);
        assert_eq!(quiz.tick(), QuizStep::Finished);
        let outcome = quiz.end();
        assert!(!outcome.won);
        assert!(!quiz.has_won);
        assert!(quiz.completed);

        let mut rng = Pcg32::seed_from_u64(10);
        let mut quiz = Quiz::start(&two_questions(), 0, 12, &mut rng);
        assert!(quiz.questions.is_empty());
        assert!(!quiz.end().won);
    }

    #[test]
    fn test_record_keeps_earlier_win() {
        let mut record = QuizRecord::default();
        record.record(QuizOutcome { score: 5, total: 5, won: true });
        record.record(QuizOutcome { score: 3, total: 5, won: false });
        assert!(record.has_won);
        assert_eq!(record.last_score, 3);
    }
}
