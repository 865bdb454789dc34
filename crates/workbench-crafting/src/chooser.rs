//! The disambiguation hook.
//!
//! Selection asks a [`Chooser`] only when the choice is genuinely ambiguous.
//! Indices are 0-based; answers past the end are clamped to the last option.
//! [`FirstOption`] is the non-interactive default for harnesses and tests.

use tracing::info;

/// Picks among options and receives failure notices.
pub trait Chooser {
    /// Pick one of `options` (never empty) for `prompt`.
    fn choose(&mut self, prompt: &str, options: &[String]) -> usize;

    /// Receive a message, such as a requirement that could not be consumed.
    fn notify(&mut self, message: &str) {
        info!(message, "Crafting notice");
    }
}

/// Clamp a chooser's answer into range.
pub fn clamp_choice(choice: usize, options: usize) -> usize {
    choice.min(options.saturating_sub(1))
}

/// Always picks the first option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOption;

impl Chooser for FirstOption {
    fn choose(&mut self, _prompt: &str, _options: &[String]) -> usize {
        0
    }
}

/// Wraps a closure as a chooser.
#[derive(Debug, Clone, Copy)]
pub struct FnChooser<F>(pub F);

impl<F> Chooser for FnChooser<F>
where
    F: FnMut(&str, &[String]) -> usize,
{
    fn choose(&mut self, prompt: &str, options: &[String]) -> usize {
        (self.0)(prompt, options)
    }
}

/// Replays scripted answers and records what it was asked.
///
/// Once the script runs out it picks the first option.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    answers: Vec<usize>,
    next: usize,
    /// Every prompt received, with its options.
    pub prompts: Vec<(String, Vec<String>)>,
    /// Every notice received.
    pub notices: Vec<String>,
}

impl ScriptedChooser {
    /// A chooser answering `answers` in order.
    pub const fn new(answers: Vec<usize>) -> Self {
        Self {
            answers,
            next: 0,
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, prompt: &str, options: &[String]) -> usize {
        self.prompts.push((prompt.to_owned(), options.to_vec()));
        let answer = self.answers.get(self.next).copied().unwrap_or(0);
        self.next = self.next.saturating_add(1);
        answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(clamp_choice(7, 3), 2);
        assert_eq!(clamp_choice(1, 3), 1);
        assert_eq!(clamp_choice(0, 1), 0);
    }

    #[test]
    fn scripted_answers_then_first() {
        let mut chooser = ScriptedChooser::new(vec![2]);
        let options = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        assert_eq!(chooser.choose("pick", &options), 2);
        assert_eq!(chooser.choose("again", &options), 0);
        assert_eq!(chooser.prompts.len(), 2);
    }

    #[test]
    fn closures_are_choosers() {
        let mut chooser = FnChooser(|_: &str, options: &[String]| options.len().saturating_sub(1));
        let options = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(chooser.choose("pick", &options), 1);
    }
}
