use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cliphist")]
#[command(about = "Keeps the last few clipboard texts and copies them back on demand", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture the current clipboard text into the history
    Capture,
    /// Print the history, newest first
    List,
    /// Copy a history entry back to the clipboard
    Copy {
        /// Entry number as shown by `list` (1 is the newest)
        index: usize,
    },
    /// Remove every entry from the history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_opens_popup() {
        let cli = Cli::try_parse_from(["cliphist"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_copy_takes_index() {
        let cli = Cli::try_parse_from(["cliphist", "copy", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Copy { index: 3 })));
    }

    #[test]
    fn test_clear_yes_flag() {
        let cli = Cli::try_parse_from(["cliphist", "clear", "-y"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Clear { yes: true })));
    }

    #[test]
    fn test_copy_rejects_non_number() {
        assert!(Cli::try_parse_from(["cliphist", "copy", "first"]).is_err());
    }
}
