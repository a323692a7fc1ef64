//! Command: print a random letter token.
use crate::cli::TokenOpts;
use crate::random;

/// Print a token of `opts.length` letters to stdout.
#[allow(clippy::print_stdout)]
pub fn run(opts: &TokenOpts) {
    println!("{}", random::token(opts.length));
}
