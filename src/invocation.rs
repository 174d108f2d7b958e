use crate::domain::envelope::{Envelope, ErrorPayload, Response};
use std::io;
use std::io::Write;
use std::process::ExitCode;

/// Terminal result of one invocation.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Succeed(Response),
    Fail(Envelope<ErrorPayload>),
}

/// The runtime that delivered an event. Completing consumes it, so an invocation ends exactly once.
pub trait Invocation {
    type Output;

    fn complete(self, outcome: Outcome) -> Self::Output;
}

/// Writes the outcome as JSON and maps it onto a process exit code.
pub struct ConsoleInvocation<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleInvocation<W> {
    pub fn new(writer: W) -> Self {
        ConsoleInvocation { writer }
    }
}

impl<W: Write> Invocation for ConsoleInvocation<W> {
    type Output = io::Result<ExitCode>;

    fn complete(mut self, outcome: Outcome) -> Self::Output {
        let exit_code = match &outcome {
            Outcome::Succeed(response) => {
                serde_json::to_writer_pretty(&mut self.writer, response)?;
                ExitCode::SUCCESS
            }
            Outcome::Fail(envelope) => {
                serde_json::to_writer_pretty(&mut self.writer, envelope)?;
                ExitCode::FAILURE
            }
        };
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(exit_code)
    }
}
