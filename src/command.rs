use anyhow::Result;
use std::io::Write;

/// Continuation flag produced by every dispatch path.
///
/// The read-eval loop keeps going while commands return [`Status::Continue`];
/// only the `exit` built-in returns [`Status::Exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Prompt again.
    Continue,
    /// Leave the loop.
    Exit,
}

impl Status {
    /// Whether the read-eval loop should prompt again.
    pub fn should_continue(self) -> bool {
        self == Status::Continue
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// Implemented by built-ins via a blanket impl and by external programs.
/// Built-ins write to the provided streams; external programs inherit the
/// process's own standard streams.
pub trait ExecutableCommand {
    /// Executes the command.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Status>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn only_exit_stops_the_loop() {
        assert!(Status::Continue.should_continue());
        assert!(!Status::Exit.should_continue());
    }
}
