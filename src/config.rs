use crate::errors::{DraftPrError, Result};
use crate::git::DraftPrConfig;
use crate::github::TOKEN_ENV;
use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Values for a single run, after flags, git config and prompts are merged
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub title: String,
    pub base: String,
    pub branch: String,
    pub remote: String,
}

/// What was given on the command line
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub title: Option<String>,
    pub base: Option<String>,
    pub branch: Option<String>,
}

pub trait Prompter {
    /// Ask a question and return the trimmed answer
    fn ask(&self, question: &str) -> Result<String>;
}

/// Writes the question to `output` and reads one line of `input`
///
/// End of input reads as an empty answer.
pub struct LinePrompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&self, question: &str) -> Result<String> {
        let mut output = self.output.borrow_mut();
        write!(output, "{}", question)?;
        output.flush()?;

        let mut answer = String::new();
        self.input.borrow_mut().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

impl RunConfig {
    pub fn resolve(
        flags: &Flags,
        settings: &DraftPrConfig,
        prompter: &impl Prompter,
    ) -> Result<Self> {
        let branch = match given(&flags.branch) {
            Some(branch) => branch,
            None => prompter.ask("Branch name to create: ")?,
        };
        if branch.is_empty() {
            return Err(DraftPrError::MissingBranch);
        }

        let title = match given(&flags.title) {
            Some(title) => title,
            None => prompter.ask("Pull request title: ")?,
        };
        if title.is_empty() {
            return Err(DraftPrError::MissingTitle);
        }

        let base = given(&flags.base).unwrap_or_else(|| settings.base_or_default().to_string());

        Ok(Self {
            title,
            base,
            branch,
            remote: settings.remote.clone(),
        })
    }
}

/// Validate the token read from the environment
pub fn token_from(value: Option<String>) -> Result<String> {
    match value.map(|token| token.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(DraftPrError::MissingToken(TOKEN_ENV)),
    }
}

fn given(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub struct MockPrompter {
    pub answers: std::sync::Mutex<std::collections::VecDeque<String>>,
    pub questions: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: std::sync::Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            questions: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn get_questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Prompter for MockPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        // An exhausted queue behaves like an empty line on stdin
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or_default())
    }
}
