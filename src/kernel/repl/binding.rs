use crate::core::EvalError;
use crate::kernel::environment::ShadowedEnv;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub const PROMPT: &str = ">> ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvalValue {
    Nil,
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for EvalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalValue::Nil => write!(f, "nil"),
            EvalValue::Int(n) => write!(f, "{}", n),
            EvalValue::Float(x) => write!(f, "{:?}", x),
            EvalValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// State carried between evaluations of one REPL document.
#[derive(Debug, Clone, Default)]
pub struct BindingContext {
    pub vars: FxHashMap<String, EvalValue>,
    pub env: ShadowedEnv,
}

/// How source text gets executed. The binding does not care which language
/// sits behind it.
pub trait EvalStrategy {
    fn name(&self) -> &str;

    /// Whether `cx.env` should be filled with the shadowed tool environment
    /// before each evaluation.
    fn wants_environment(&self) -> bool {
        false
    }

    fn evaluate(&self, source: &str, cx: &mut BindingContext) -> Result<EvalValue, EvalError>;
}

pub struct FnStrategy<F> {
    name: String,
    f: F,
}

impl<F> FnStrategy<F>
where
    F: Fn(&str, &mut BindingContext) -> Result<EvalValue, EvalError>,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> EvalStrategy for FnStrategy<F>
where
    F: Fn(&str, &mut BindingContext) -> Result<EvalValue, EvalError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, source: &str, cx: &mut BindingContext) -> Result<EvalValue, EvalError> {
        (self.f)(source, cx)
    }
}

pub struct EvalBinding {
    strategy: Rc<dyn EvalStrategy>,
    context: BindingContext,
    /// Byte offset right after the prompt this binding last wrote.
    prompt_end: Option<usize>,
}

impl EvalBinding {
    pub fn new(strategy: Rc<dyn EvalStrategy>) -> Self {
        Self {
            strategy,
            context: BindingContext::default(),
            prompt_end: None,
        }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn wants_environment(&self) -> bool {
        self.strategy.wants_environment()
    }

    pub fn context(&self) -> &BindingContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BindingContext {
        &mut self.context
    }

    pub fn evaluate(&mut self, source: &str) -> Result<EvalValue, EvalError> {
        self.strategy.evaluate(source, &mut self.context)
    }

    /// Initial text of a REPL document.
    pub fn banner(&self) -> String {
        format!("# {} REPL\n\n{}", self.strategy.name(), PROMPT)
    }

    /// Evaluates the input after the last prompt of `transcript` and returns
    /// the transcript extended with the result (or the error) and a new prompt.
    pub fn submit(&mut self, transcript: &str) -> String {
        let (history, input) = self.split_input(transcript);
        let input = input.trim();
        if input.is_empty() {
            let out = format!("{}{}", history, PROMPT);
            self.prompt_end = Some(out.len());
            return out;
        }

        let line = match self.evaluate(input) {
            Ok(value) => format!("=> {}", value),
            Err(err) => {
                tracing::warn!(strategy = self.strategy.name(), error = %err, "evaluation failed");
                format!("!! {}", err)
            }
        };

        let mut out = String::with_capacity(transcript.len() + line.len() + 8);
        out.push_str(history);
        out.push_str(PROMPT);
        out.push_str(input);
        out.push('\n');
        out.push_str(&line);
        out.push('\n');
        out.push_str(PROMPT);
        self.prompt_end = Some(out.len());
        out
    }

    /// Splits `transcript` into history and pending input. The prompt this
    /// binding wrote last wins while it is still in place; otherwise the
    /// last prompt that starts a line.
    fn split_input<'t>(&self, transcript: &'t str) -> (&'t str, &'t str) {
        let recorded = self.prompt_end.filter(|&end| {
            end >= PROMPT.len() && transcript.get(end - PROMPT.len()..end) == Some(PROMPT)
        });
        match recorded.or_else(|| last_line_prompt(transcript)) {
            Some(end) => (&transcript[..end - PROMPT.len()], &transcript[end..]),
            None => ("", transcript),
        }
    }
}

fn last_line_prompt(transcript: &str) -> Option<usize> {
    transcript
        .match_indices(PROMPT)
        .filter(|(ix, _)| *ix == 0 || transcript[..*ix].ends_with('\n'))
        .last()
        .map(|(ix, _)| ix + PROMPT.len())
}
