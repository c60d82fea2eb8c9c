//! Parsing of the line-oriented terminal commands.

use tama_types::ActionType;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Perform a care action.
    Perform(ActionType),
    /// Print the current snapshot.
    Status,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// A line that is not a known command.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown command \"{input}\", type \"help\" for the list")]
pub struct UnknownCommand {
    /// The offending input, trimmed.
    pub input: String,
}

/// Short usage text printed by `help`.
pub const HELP: &str = "commands: feed | play | clean | rest | status | help | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Input>, UnknownCommand> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return Ok(None),
        "feed" | "eat" => Input::Perform(ActionType::Feed),
        "play" => Input::Perform(ActionType::Play),
        "clean" | "wash" => Input::Perform(ActionType::Clean),
        "rest" | "sleep" => Input::Perform(ActionType::Rest),
        "status" | "s" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => {
            return Err(UnknownCommand {
                input: line.trim().to_owned(),
            });
        }
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_and_aliases() {
        assert_eq!(parse("feed"), Ok(Some(Input::Perform(ActionType::Feed))));
        assert_eq!(parse("  Sleep \n"), Ok(Some(Input::Perform(ActionType::Rest))));
        assert_eq!(parse("wash"), Ok(Some(Input::Perform(ActionType::Clean))));
        assert_eq!(parse("PLAY"), Ok(Some(Input::Perform(ActionType::Play))));
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse("status"), Ok(Some(Input::Status)));
        assert_eq!(parse("?"), Ok(Some(Input::Help)));
        assert_eq!(parse("q"), Ok(Some(Input::Quit)));
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn unknown_word_is_reported() {
        let err = parse(" dance ").err();
        assert_eq!(
            err,
            Some(UnknownCommand {
                input: "dance".to_owned()
            })
        );
        assert!(err.is_some_and(|e| e.to_string().contains("dance")));
    }
}
