//! Turning unrecoverable settings errors into process termination.
//!
//! Library calls return [`SettingsError`] values. The caller that owns the
//! process holds an [`Escalator`] and decides, per [`ErrorKind`], whether an
//! error ends the run or is logged and survived. The default [`Policy`]
//! terminates on every kind.
use std::collections::HashMap;
use std::fmt::Display;

use crate::error::{ErrorKind, SettingsError};

/// Exit status used when an error is escalated.
pub const FATAL_EXIT_CODE: u8 = 1;

/// Exit status of a run that ended on an error the policy let through.
pub const CONTINUE_EXIT_CODE: u8 = 2;

/// Target of the tracing event emitted before termination.
pub const FATAL_TARGET: &str = "realize::fatal";

/// What to do with an error of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Log the error and terminate the process.
    Terminate,
    /// Log the error as a warning and keep going.
    Continue,
}

impl Action {
    /// Exit status for a run that ended on an error handled this way.
    ///
    /// Neither action maps to success.
    #[must_use]
    pub const fn exit_status(self) -> u8 {
        match self {
            Self::Terminate => FATAL_EXIT_CODE,
            Self::Continue => CONTINUE_EXIT_CODE,
        }
    }
}

/// Per-kind escalation decisions.
///
/// # Examples
///
/// ```
/// use realize_cli::error::ErrorKind;
/// use realize_cli::escalation::{Action, Policy};
///
/// let policy = Policy::default().with(ErrorKind::NotFound, Action::Continue);
/// assert_eq!(policy.action_for(ErrorKind::NotFound), Action::Continue);
/// assert_eq!(policy.action_for(ErrorKind::Io), Action::Terminate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    fallback: Action,
    overrides: HashMap<ErrorKind, Action>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::fatal_by_default()
    }
}

impl Policy {
    /// Terminate on every error kind.
    #[must_use]
    pub fn fatal_by_default() -> Self {
        Self {
            fallback: Action::Terminate,
            overrides: HashMap::new(),
        }
    }

    /// Override the action for `kind`.
    #[must_use]
    pub fn with(mut self, kind: ErrorKind, action: Action) -> Self {
        self.overrides.insert(kind, action);
        self
    }

    /// Return the action for `kind`.
    #[must_use]
    pub fn action_for(&self, kind: ErrorKind) -> Action {
        self.overrides.get(&kind).copied().unwrap_or(self.fallback)
    }
}

/// Ends the process. Swapped out in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Exit {
    /// Terminate with `code`.
    fn exit(&self, code: i32);
}

/// [`Exit`] through [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Exit for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Applies a [`Policy`] to errors and terminates through an [`Exit`].
#[derive(Debug)]
pub struct Escalator<X: Exit = ProcessExit> {
    policy: Policy,
    exit: X,
}

impl Escalator {
    /// Create an escalator that terminates the real process.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            policy,
            exit: ProcessExit,
        }
    }
}

impl<X: Exit> Escalator<X> {
    /// Create an escalator with a custom exit.
    #[must_use]
    pub const fn with_exit(policy: Policy, exit: X) -> Self {
        Self { policy, exit }
    }

    /// Return the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Log `err` with optional context and terminate.
    ///
    /// Does nothing, and logs nothing, when `err` is `None`.
    pub fn fatal<E: Display + ?Sized>(&self, err: Option<&E>, context: &[&str]) {
        let Some(err) = err else {
            return;
        };
        tracing::error!(target: FATAL_TARGET, "{}", fatal_message(err, context, true));
        self.exit.exit(i32::from(FATAL_EXIT_CODE));
    }

    /// Apply the policy to `err` and return the action taken.
    #[must_use]
    pub fn escalate(&self, err: &SettingsError, context: &[&str]) -> Action {
        let action = self.policy.action_for(err.kind());
        match action {
            Action::Terminate => self.fatal(Some(err), context),
            Action::Continue => tracing::warn!("{}", fatal_message(err, context, false)),
        }
        action
    }

    /// Pass `Ok` values through; escalate errors without extra context.
    ///
    /// Returns `None` when an error was escalated and the policy let the
    /// process continue.
    #[must_use]
    pub fn validate<T>(&self, result: Result<T, SettingsError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let _ = self.escalate(&err, &[]);
                None
            }
        }
    }
}

/// Format an escalated error: context messages first, then the error text.
///
/// With `highlight`, the context is wrapped in red ANSI escapes.
///
/// # Examples
///
/// ```
/// use realize_cli::escalation::fatal_message;
///
/// assert_eq!(fatal_message("disk full", &["saving settings"], false), "saving settings disk full");
/// assert_eq!(fatal_message("disk full", &[], false), "disk full");
/// ```
#[must_use]
pub fn fatal_message<E: Display + ?Sized>(err: &E, context: &[&str], highlight: bool) -> String {
    let context = context
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    match (context.is_empty(), highlight) {
        (true, _) => err.to_string(),
        (false, true) => format!("\x1b[31m{context}\x1b[0m {err}"),
        (false, false) => format!("{context} {err}"),
    }
}
