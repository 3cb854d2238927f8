//! Terminal I/O behind a trait so menus can be driven by a script in tests.

use anyhow::{anyhow, bail};
use dialoguer::{Input, Password, Select};
use std::collections::VecDeque;

pub trait Console {
    fn say(&mut self, line: &str);

    /// Index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize>;

    /// Free text; may be empty.
    fn input(&mut self, prompt: &str) -> anyhow::Result<String>;

    /// Hidden input.
    fn password(&mut self, prompt: &str) -> anyhow::Result<String>;
}

/// Interactive console backed by `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn password(&mut self, prompt: &str) -> anyhow::Result<String> {
        Ok(Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    }
}

/// Replays canned answers and records everything said.
///
/// A `select` answer may be the item label or its index. Running out of
/// answers is an error, which ends the session.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted at prompt {:?}", prompt))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        let answer = self.next_answer(prompt)?;
        if let Some(index) = items.iter().position(|item| *item == answer) {
            return Ok(index);
        }
        match answer.parse::<usize>() {
            Ok(index) if index < items.len() => Ok(index),
            _ => bail!("{:?} is not an option of {:?}", answer, prompt),
        }
    }

    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.next_answer(prompt)
    }

    fn password(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.next_answer(prompt)
    }
}
