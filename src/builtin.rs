use crate::command::{CommandFactory, ExecutableCommand, Status};
use crate::interpreter::Factory;
use anyhow::{Result, anyhow};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use tracing::debug;

/// Built-in commands known to the shell at compile time.
///
/// Builtins collect their arguments with the [`argh`] crate (`FromArgs`) and run
/// directly in the shell process without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command using the provided output streams.
    fn execute(self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Status>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Status> {
        BuiltinCommand::execute(*self, stdout, stderr)
    }
}

/// Arguments `argh` refused; reported as an ordinary command error.
struct RejectedArgs {
    output: String,
}

impl ExecutableCommand for RejectedArgs {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> Result<Status> {
        Err(anyhow!("{}", self.output.trim_end()))
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        // Tokens are passed verbatim, so end option parsing before the first one.
        let mut positional = Vec::with_capacity(args.len() + 1);
        positional.push("--");
        positional.extend_from_slice(args);

        debug!(builtin = name, "dispatching to builtin");
        Some(match T::from_args(&[name], &positional) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => Box::new(RejectedArgs { output }),
        })
    }
}

/// Names of the built-ins, in dispatch order.
pub(crate) fn builtin_names() -> [&'static str; 3] {
    [Cd::name(), Help::name(), Exit::name()]
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// target directory followed by arguments that are ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<Status> {
        let target = self
            .args
            .first()
            .ok_or_else(|| anyhow!("expected argument to \"cd\""))?;
        env::set_current_dir(target)?;
        debug!(dir = %target, "changed directory");
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Print a short description of the shell and its built-ins.
pub struct Help {
    #[argh(positional)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<Status> {
        writeln!(stdout, "FSH shell by Syed Faraz Abrar")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in builtin_names() {
            writeln!(stdout, "\t{}", name)?;
        }
        writeln!(
            stdout,
            "Use the man command for information regarding other programs."
        )?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional)]
    /// ignored; the shell always exits with status 0.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<Status> {
        Ok(Status::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock_current_dir;
    use std::env as stdenv;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_unique_temp_dir() -> io::Result<PathBuf> {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("fsh_test_cd_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn create<T: BuiltinCommand + 'static>(args: &[&str]) -> Box<dyn ExecutableCommand> {
        Factory::<T>::default()
            .try_create(T::name(), args)
            .expect("factory should recognize its own name")
    }

    #[test]
    fn factory_ignores_other_names() {
        assert!(Factory::<Cd>::default().try_create("ls", &[]).is_none());
        assert!(Factory::<Exit>::default().try_create("EXIT", &[]).is_none());
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = make_unique_temp_dir().unwrap();
        let canonical_temp = fs::canonicalize(&temp).unwrap();

        let target = canonical_temp.to_string_lossy().to_string();
        let cmd = create::<Cd>(&[target.as_str()]);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let res = cmd.execute(&mut out, &mut err);

        assert_eq!(res.unwrap(), Status::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
        let new_canonical = fs::canonicalize(stdenv::current_dir().unwrap()).unwrap();
        assert_eq!(new_canonical, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_ignores_extra_arguments() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = make_unique_temp_dir().unwrap();
        let canonical_temp = fs::canonicalize(&temp).unwrap();

        let target = canonical_temp.to_string_lossy().to_string();
        let cmd = create::<Cd>(&[target.as_str(), "-x", "ignored"]);
        let res = cmd.execute(&mut Vec::new(), &mut Vec::new());

        assert_eq!(res.unwrap(), Status::Continue);
        let new_canonical = fs::canonicalize(stdenv::current_dir().unwrap()).unwrap();
        assert_eq!(new_canonical, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_without_target_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let res = create::<Cd>(&[]).execute(&mut Vec::new(), &mut Vec::new());

        let e = res.unwrap_err();
        assert_eq!(e.to_string(), "expected argument to \"cd\"");
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let name = format!("/nonexistent_dir_for_fsh_test_{}", std::process::id());
        let res = create::<Cd>(&[name.as_str()]).execute(&mut Vec::new(), &mut Vec::new());

        let e = res.unwrap_err();
        let io = e.downcast_ref::<io::Error>().expect("chdir error is an io::Error");
        assert_eq!(io.kind(), io::ErrorKind::NotFound);
        assert!(!format!("{:#}", e).contains(&name));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_help_lists_builtins() {
        let mut out = Vec::new();
        let res = create::<Help>(&["whatever"]).execute(&mut out, &mut Vec::new());
        assert_eq!(res.unwrap(), Status::Continue);

        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("FSH shell by Syed Faraz Abrar\n"));
        assert!(s.contains("The following are built in:\n\tcd\n\thelp\n\texit\n"));
        assert!(s.ends_with("regarding other programs.\n"));
    }

    #[test]
    fn test_exit_ignores_arguments() {
        let res = create::<Exit>(&[]).execute(&mut Vec::new(), &mut Vec::new());
        assert_eq!(res.unwrap(), Status::Exit);

        let res = create::<Exit>(&["1", "2", "3"]).execute(&mut Vec::new(), &mut Vec::new());
        assert_eq!(res.unwrap(), Status::Exit);

        let res = create::<Exit>(&["--help", "-5"]).execute(&mut Vec::new(), &mut Vec::new());
        assert_eq!(res.unwrap(), Status::Exit);
    }

    #[test]
    fn test_rejected_args_become_command_errors() {
        let cmd: Box<dyn ExecutableCommand> = Box::new(RejectedArgs {
            output: "Unrecognized argument: -x\n".to_string(),
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let e = cmd.execute(&mut out, &mut err).unwrap_err();
        assert_eq!(e.to_string(), "Unrecognized argument: -x");
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_flag_like_tokens_are_positional() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let res = create::<Cd>(&["--help"]).execute(&mut Vec::new(), &mut Vec::new());
        let e = res.unwrap_err();
        assert!(e.downcast_ref::<io::Error>().is_some(), "got {e:#}");
        assert_eq!(stdenv::current_dir().unwrap(), orig);

        let res = create::<Help>(&["-x"]).execute(&mut Vec::new(), &mut Vec::new());
        assert_eq!(res.unwrap(), Status::Continue);
    }

    #[test]
    fn test_builtin_names_in_dispatch_order() {
        assert_eq!(builtin_names(), ["cd", "help", "exit"]);
    }
}
