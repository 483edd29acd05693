use crate::CommandError;
use facts_sdk::{CategoryFilter, FactId, VoteKind};

pub const HELP: &str = "\
Commands:
  all                               show facts of every category
  filter <category|all>             show facts of one category
  refresh                           reload the current list
  form                              show or hide the submission form
  text <text>                       set the fact text
  source <url>                      set the fact source
  category <category>               set the fact category
  post                              submit the fact
  vote <id> <interesting|mindblowing|false>
  help                              show this message
  quit                              leave";

/// A line of input from the terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(CategoryFilter),
    Refresh,
    ToggleForm,
    SetText(String),
    SetSource(String),
    SetCategory(String),
    Post,
    Vote(FactId, VoteKind),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        let command = match name {
            "all" => Self::Filter(CategoryFilter::All),
            "filter" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("filter <category|all>"));
                }
                Self::Filter(
                    rest.parse()
                        .map_err(|err| CommandError::InvalidArgument(format!("{err}")))?,
                )
            }
            "refresh" => Self::Refresh,
            "form" => Self::ToggleForm,
            "text" => Self::SetText(rest.to_string()),
            "source" => Self::SetSource(rest.to_string()),
            "category" => Self::SetCategory(rest.to_string()),
            "post" => Self::Post,
            "vote" => parse_vote(rest)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_vote(args: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "vote <id> <interesting|mindblowing|false>";
    let mut args = args.split_whitespace();
    let (Some(id), Some(kind), None) = (args.next(), args.next(), args.next()) else {
        return Err(CommandError::Usage(USAGE));
    };
    let id = id
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidArgument(format!("not a fact id: {id:?}")))?;
    let kind = kind.parse::<VoteKind>().map_err(CommandError::InvalidArgument)?;
    Ok(Command::Vote(FactId(id), kind))
}
