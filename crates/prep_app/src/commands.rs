use prep_core::{ChecklistKey, Msg};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  upcoming                         refresh upcoming interviews
  open <n>                         open the checklist for upcoming entry n
  open <job_id> <stage> [company]  open a checklist directly
  toggle <row>                     mark a row done / not done
  retry                            reload a checklist that failed to load
  close                            close the checklist
  help                             show this text
  quit                             exit";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Msg),
    /// 1-based row number; resolved to an item id against the current view.
    ToggleRow(usize),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a positive number")]
    NotANumber(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "upcoming" | "u" => Command::Send(Msg::UpcomingRequested),
        "open" | "o" => match args.as_slice() {
            [n] => Command::Send(Msg::UpcomingSelected {
                index: parse_position(n)? - 1,
            }),
            [job_id, stage, company @ ..] => Command::Send(Msg::ChecklistOpened {
                key: ChecklistKey::new(*job_id, *stage, company.join(" ")),
                days_until: None,
            }),
            [] => return Err(CommandError::Usage("open <n> | open <job_id> <stage> [company]")),
        },
        "toggle" | "t" => match args.as_slice() {
            [n] => Command::ToggleRow(parse_position(n)?),
            _ => return Err(CommandError::Usage("toggle <row>")),
        },
        "retry" | "r" => Command::Send(Msg::RetryClicked),
        "close" | "c" => Command::Send(Msg::ChecklistClosed),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::NotANumber(raw.to_string())),
    }
}
