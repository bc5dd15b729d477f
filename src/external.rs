use crate::command::{CommandFactory, ExecutableCommand, Status};
use crate::interpreter::Factory;
use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitStatus;
use tracing::debug;

/// Command that is not a builtin.
///
/// The program is resolved against the inherited `PATH` and runs in the
/// foreground with the shell's standard streams, working directory and
/// environment.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name.is_empty() {
            return None;
        }
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawns the program and blocks until it exits or is killed by a signal.
    ///
    /// The child's status is not inspected: a successfully launched program
    /// always yields [`Status::Continue`]. Spawn failures are returned as errors.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> Result<Status> {
        // Anything a builtin printed must reach the terminal before the child does.
        stdout.flush()?;

        let mut child = std::process::Command::new(&self.name)
            .args(&self.args)
            .spawn()?;
        debug!(pid = child.id(), program = ?self.name, "spawned child");

        let exit_status = child.wait()?;
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        debug!(code, "child finished");
        Ok(Status::Continue)
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
