use clap::Parser;

/// Launch the prebuilt Binary Quest game for this platform.
///
/// Run from the directory that contains `src/`. The launcher takes no
/// arguments; it picks `src/BinaryGame.exe` on Windows and
/// `src/BinaryQuestGUI` on Linux and macOS.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {}

/// Parses command-line arguments using `clap`.
///
/// Only `--help` and `--version` are recognized; clap exits on its own for
/// those and for any unexpected argument.
pub fn run() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Args::try_parse_from(["binary-quest", "extra"]).is_err());
        assert!(Args::try_parse_from(["binary-quest"]).is_ok());
    }
}
