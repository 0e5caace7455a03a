//! Synchronous prompts for auxiliary toolbar input
//!
//! Answering `None` cancels; the caller treats an empty answer the same way.
//! The toolbar never offers a default, so an empty line on a
//! [`StdioPrompt`] abandons the action too.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Blocks until the user answers or cancels
pub trait Prompt {
    fn ask(&mut self, message: &str, default: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn ask(&mut self, message: &str, default: &str) -> Option<String> {
        self(message, default)
    }
}

/// Cancels every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelPrompt;

impl Prompt for CancelPrompt {
    fn ask(&mut self, _message: &str, _default: &str) -> Option<String> {
        None
    }
}

/// Replays canned answers in order and records the questions asked.
/// Runs out by cancelling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            asked: Vec::new(),
        }
    }

    /// Queue a cancellation
    pub fn then_cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }
}

/// Prompts on a writer and reads one line per answer.
/// End of input cancels; an empty line accepts the default.
pub struct StdioPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for StdioPrompt<R, W> {
    fn ask(&mut self, message: &str, default: &str) -> Option<String> {
        let written = if default.is_empty() {
            write!(self.output, "{} ", message)
        } else {
            write!(self.output, "{} [{}] ", message, default)
        };
        if let Err(e) = written.and_then(|_| self.output.flush()) {
            tracing::warn!("Failed to write prompt: {}", e);
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.is_empty() {
                    Some(default.to_string())
                } else {
                    Some(answer.to_string())
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read prompt answer: {}", e);
                None
            }
        }
    }
}
