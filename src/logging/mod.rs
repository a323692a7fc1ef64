//! Logging infrastructure for console output and resource log files.

mod subscriber;
mod utils;

use std::io::{self, Write};

pub use subscriber::{LogHandle, STAGE_TARGET, SinkLayer, init_subscriber};

/// Write a session header to an output sink.
///
/// # Errors
///
/// Returns an error if the sink cannot be written.
pub fn write_session_header(sink: &mut impl Write, command: &str) -> io::Result<()> {
    let version =
        option_env!("REALIZE_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    write!(
        sink,
        "==========================================\n\
         realize {version} {command} {}\n\
         ==========================================\n",
        utils::format_utc_datetime(),
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_header_names_command() {
        let mut buf = Vec::new();
        write_session_header(&mut buf, "open").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("=========="));
        assert!(text.contains("realize "));
        assert!(text.contains(" open "));
        assert_eq!(text.lines().count(), 3);
    }
}
