use super::binding::{BindingContext, EvalStrategy, EvalValue};
use crate::core::EvalError;
use std::io::{self, Write};
use std::process::{Command as ProcessCommand, Stdio};

/// Hands the source to an external interpreter on stdin and returns its
/// stdout. The binding's shadowed environment is applied to the child only.
#[derive(Debug, Clone)]
pub struct ShellEval {
    program: String,
    args: Vec<String>,
}

impl ShellEval {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn sh() -> Self {
        Self::new("sh", vec!["-s".to_string()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ShellEval {
    fn default() -> Self {
        Self::sh()
    }
}

impl EvalStrategy for ShellEval {
    fn name(&self) -> &str {
        "shell"
    }

    fn wants_environment(&self) -> bool {
        true
    }

    fn evaluate(&self, source: &str, cx: &mut BindingContext) -> Result<EvalValue, EvalError> {
        let mut cmd = ProcessCommand::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cx.env.configure(&mut cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| EvalError::Process(format!("{}: {}", self.program, e)))?;
        // Feed stdin from its own thread so a child that fills its stdout pipe
        // before reading all input cannot deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = format!("{}\n", source);
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child
            .wait_with_output()
            .map_err(|e| EvalError::Process(e.to_string()))?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit without reading everything.
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(EvalError::Process(e.to_string())),
                Err(_) => return Err(EvalError::Process("stdin writer panicked".to_string())),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim_end();
            return Err(EvalError::Process(if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr.to_string()
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim_end_matches('\n');
        if stdout.is_empty() {
            Ok(EvalValue::Nil)
        } else {
            Ok(EvalValue::Text(stdout.to_string()))
        }
    }
}
