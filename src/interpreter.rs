use crate::command::{CommandFactory, Status};
use crate::config::Config;
use crate::lexer;
use crate::reader::LineReader;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, trace};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: the builtins and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The read-eval loop of the shell.
///
/// The interpreter holds an ordered list of [`CommandFactory`] objects that are
/// queried to create commands by name. See [`Default`] for the factories
/// included out of the box.
///
/// Example
/// ```
/// use fsh::{Interpreter, Status};
/// let mut sh = Interpreter::default();
/// let status = sh.execute(&["exit".to_string()], &mut Vec::new(), &mut Vec::new());
/// assert_eq!(status, Status::Exit);
/// ```
pub struct Interpreter {
    config: Config,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(config: Config, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { config, commands }
    }

    /// Create an interpreter with the default factories and the given settings.
    pub fn with_config(config: Config) -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(
            config,
            vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    /// Execute one tokenized command line.
    ///
    /// An empty token list does nothing. Otherwise the first factory that
    /// recognizes the command name wins. Command errors are reported on
    /// `stderr` and never stop the loop.
    pub fn execute(
        &mut self,
        tokens: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Status {
        let Some((name, rest)) = tokens.split_first() else {
            return Status::Continue;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let Some(cmd) = self
            .commands
            .iter()
            .find_map(|factory| factory.try_create(name, &args))
        else {
            report(stderr, format_args!("{}: command not found", name));
            return Status::Continue;
        };

        match cmd.execute(stdout, stderr) {
            Ok(status) => status,
            Err(e) => {
                debug!(command = %name, error = %e, "command failed");
                report(stderr, format_args!("{:#}", e));
                Status::Continue
            }
        }
    }

    /// Run the read-eval loop until `exit` or end of input.
    ///
    /// Each iteration prints the prompt, reads one line, tokenizes and executes
    /// it. Failures of the input stream are returned to the caller.
    pub fn repl<R: BufRead>(
        &mut self,
        input: R,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let mut reader = LineReader::new(input);
        loop {
            write!(stdout, "{}", self.config.prompt)?;
            stdout.flush()?;

            let Some(line) = reader.read_line()? else {
                debug!("input exhausted");
                break;
            };
            let tokens = lexer::split_into_tokens(&line);
            trace!(?tokens, "tokenized line");

            let status = self.execute(&tokens, stdout, stderr);
            stdout.flush()?;
            if !status.should_continue() {
                debug!("exit requested");
                break;
            }
        }
        Ok(())
    }

    /// Run the read-eval loop on the process's standard streams.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        self.repl(stdin.lock(), &mut io::stdout(), &mut io::stderr())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with default settings and the default commands:
    /// - built-ins: `cd`, `help`, `exit`
    /// - external command launcher
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

fn report(stderr: &mut dyn Write, msg: std::fmt::Arguments<'_>) {
    // Nothing sensible is left to do if stderr itself is broken.
    let _ = writeln!(stderr, "fsh: {}", msg);
}
