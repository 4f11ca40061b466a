//! Period input collection
//!
//! The user describes their week once per run: for each of the seven
//! periods of an `M` day and a `T` day, which class meets and where.
//! Input comes either from an interactive text form or from a TOML plan
//! file. Either way the result is a [`FormOutcome`], and a cancelled form
//! means no calendar is written.

use anyhow::{bail, Context, Result};
use classcal_core::{Bucket, Period, WeekPlan};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Result of running a period input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The user submitted the form
    Submitted(WeekPlan),
    /// The user exited without submitting
    Cancelled,
}

/// Anything that can supply the week's period plan
pub trait PeriodInputSource {
    /// Collect the plan, blocking until the user submits or cancels
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input cannot be read or is invalid.
    fn collect(&mut self) -> Result<FormOutcome>;
}

/// Interactive line-based form
///
/// Prompts for `M1`..`M7` then `T1`..`T7`. The location is only asked for
/// periods that have a class. After the last period the user can submit,
/// clear everything and start over, or exit. End of input counts as exit.
pub struct PromptForm<R, W> {
    input: R,
    output: W,
}

enum Action {
    Submit,
    Clear,
    Exit,
}

impl<R: BufRead, W: Write> PromptForm<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a prompt and read one trimmed answer; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read form input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn fill(&mut self) -> Result<Option<WeekPlan>> {
        let mut plan = WeekPlan::new();
        for bucket in Bucket::ALL {
            for period in Period::all() {
                let label = format!("{bucket}{period}");
                let Some(class_name) = self.ask(&format!("{label:<3} class: "))? else {
                    return Ok(None);
                };
                if class_name.is_empty() {
                    continue;
                }
                let Some(location) = self.ask(&format!("{label:<3} location: "))? else {
                    return Ok(None);
                };
                plan.set(bucket, period, class_name, location);
            }
        }
        Ok(Some(plan))
    }

    fn choose_action(&mut self) -> Result<Action> {
        loop {
            let Some(answer) = self.ask("[s]ubmit, [c]lear, e[x]it: ")? else {
                return Ok(Action::Exit);
            };
            match answer.to_lowercase().as_str() {
                "" | "s" | "submit" => return Ok(Action::Submit),
                "c" | "clear" => return Ok(Action::Clear),
                "x" | "exit" | "q" | "quit" => return Ok(Action::Exit),
                other => writeln!(self.output, "Unknown action {other:?}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> PeriodInputSource for PromptForm<R, W> {
    fn collect(&mut self) -> Result<FormOutcome> {
        loop {
            writeln!(self.output, "Please fill out the following fields:")?;
            writeln!(self.output, "(leave a class blank if no class meets that period)")?;

            let Some(plan) = self.fill()? else {
                return Ok(FormOutcome::Cancelled);
            };
            match self.choose_action()? {
                Action::Submit => return Ok(FormOutcome::Submitted(plan)),
                Action::Clear => {
                    log::debug!("Form cleared");
                }
                Action::Exit => return Ok(FormOutcome::Cancelled),
            }
        }
    }
}

/// Period plan read from a TOML file
///
/// ```toml
/// [[m]]
/// period = 1
/// class = "Algebra"
/// location = "Rm 5"
///
/// [[t]]
/// period = 3
/// class = "Chemistry"
/// location = "Lab 1"
/// ```
///
/// Periods that are not listed have no class.
#[derive(Debug, Clone)]
pub struct PlanFile {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlanDocument {
    m: Vec<PlanEntry>,
    t: Vec<PlanEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanEntry {
    period: u8,
    #[serde(default)]
    class: String,
    #[serde(default)]
    location: String,
}

impl PlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse plan text
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, a period outside 1-7, or a period
    /// listed twice for the same day.
    pub fn parse_str(content: &str) -> Result<WeekPlan> {
        let doc: PlanDocument = toml::from_str(content).context("Invalid period plan")?;

        let mut plan = WeekPlan::new();
        for (bucket, entries) in [(Bucket::A, doc.m), (Bucket::B, doc.t)] {
            let mut seen = BTreeSet::new();
            for entry in entries {
                let period = Period::new(entry.period)
                    .with_context(|| format!("Invalid period in [[{}]]", bucket.label().to_lowercase()))?;
                if !seen.insert(period) {
                    bail!("Period {bucket}{period} is listed more than once");
                }
                plan.set(
                    bucket,
                    period,
                    entry.class.trim(),
                    entry.location.trim(),
                );
            }
        }
        Ok(plan)
    }
}

impl PeriodInputSource for PlanFile {
    fn collect(&mut self) -> Result<FormOutcome> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read plan file: {}", self.path.display()))?;
        let plan = Self::parse_str(&content)
            .with_context(|| format!("In plan file {}", self.path.display()))?;
        log::info!(
            "Loaded {} classes from {}",
            plan.class_count(),
            self.path.display()
        );
        Ok(FormOutcome::Submitted(plan))
    }
}

/// One-line summary of a bucket's classes, `-` for empty periods
#[must_use]
pub fn describe_bucket(plan: &WeekPlan, bucket: Bucket) -> String {
    plan.bucket(bucket)
        .iter()
        .map(|p| {
            if p.has_class() {
                p.class_name.as_str()
            } else {
                "-"
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
