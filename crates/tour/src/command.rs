use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::zone::{BuildingId, ZoneId};

/// UI command surface as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourCommand {
    /// Building plus the optional interior model asset to load with it.
    Enter(BuildingId, Option<u64>),
    Exit,
    Entrance,
    GoTo(ZoneId),
    Start,
    Stop,
    PauseResume,
    Pause,
    Resume,
    Next,
    Previous,
    FreeRoam,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid building id `{0}`")]
    InvalidBuilding(String),
    #[error("invalid model asset id `{0}`")]
    InvalidModel(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),
}

impl FromStr for TourCommand {
    type Err = CommandParseError;

    /// Parses lines such as `enter 1`, `enter 1 4242`, `goto 3`, `next` or `pause`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(CommandParseError::Empty);
        }

        let bare = |cmd: &'static str, value: TourCommand| {
            if rest.is_empty() {
                Ok(value)
            } else {
                Err(CommandParseError::UnexpectedArgument(cmd))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "enter" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument("enter"));
                }
                let mut args = rest.split_whitespace();
                let building = args.next().unwrap_or_default();
                let building = building
                    .parse::<i64>()
                    .map_err(|_| CommandParseError::InvalidBuilding(building.to_string()))?;
                let model = args
                    .next()
                    .map(|m| {
                        m.parse::<u64>()
                            .map_err(|_| CommandParseError::InvalidModel(m.to_string()))
                    })
                    .transpose()?;
                if args.next().is_some() {
                    return Err(CommandParseError::UnexpectedArgument("enter"));
                }
                Ok(TourCommand::Enter(BuildingId(building), model))
            }
            "goto" | "go" | "zone" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument("goto"));
                }
                let id = match rest.parse::<ZoneId>() {
                    Ok(id) => id,
                    Err(never) => match never {},
                };
                Ok(TourCommand::GoTo(id))
            }
            "exit" => bare("exit", TourCommand::Exit),
            "entrance" => bare("entrance", TourCommand::Entrance),
            "start" => bare("start", TourCommand::Start),
            "stop" => bare("stop", TourCommand::Stop),
            "toggle" => bare("toggle", TourCommand::PauseResume),
            "pause" => bare("pause", TourCommand::Pause),
            "resume" => bare("resume", TourCommand::Resume),
            "next" | "n" => bare("next", TourCommand::Next),
            "previous" | "prev" | "p" => bare("previous", TourCommand::Previous),
            "roam" | "freeroam" => bare("roam", TourCommand::FreeRoam),
            _ => Err(CommandParseError::Unknown(word.to_string())),
        }
    }
}

impl fmt::Display for TourCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourCommand::Enter(b, None) => write!(f, "enter {b}"),
            TourCommand::Enter(b, Some(model)) => write!(f, "enter {b} {model}"),
            TourCommand::Exit => f.write_str("exit"),
            TourCommand::Entrance => f.write_str("entrance"),
            TourCommand::GoTo(id) => write!(f, "goto {id}"),
            TourCommand::Start => f.write_str("start"),
            TourCommand::Stop => f.write_str("stop"),
            TourCommand::PauseResume => f.write_str("toggle"),
            TourCommand::Pause => f.write_str("pause"),
            TourCommand::Resume => f.write_str("resume"),
            TourCommand::Next => f.write_str("next"),
            TourCommand::Previous => f.write_str("previous"),
            TourCommand::FreeRoam => f.write_str("roam"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandParseError, TourCommand};
    use crate::zone::{BuildingId, ZoneId};

    #[test]
    fn parses_bare_commands() {
        assert_eq!("next".parse(), Ok(TourCommand::Next));
        assert_eq!("  PREV ".parse(), Ok(TourCommand::Previous));
        assert_eq!("toggle".parse(), Ok(TourCommand::PauseResume));
        assert_eq!("exit".parse(), Ok(TourCommand::Exit));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            "enter 12".parse(),
            Ok(TourCommand::Enter(BuildingId(12), None))
        );
        assert_eq!(
            "enter 1 4242".parse(),
            Ok(TourCommand::Enter(BuildingId(1), Some(4242)))
        );
        assert_eq!("roam".parse(), Ok(TourCommand::FreeRoam));
        assert_eq!("goto 3".parse(), Ok(TourCommand::GoTo(ZoneId::Num(3))));
        assert_eq!(
            "goto   mihrab".parse(),
            Ok(TourCommand::GoTo(ZoneId::from("mihrab")))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<TourCommand>(), Err(CommandParseError::Empty));
        assert_eq!(
            "fly".parse::<TourCommand>(),
            Err(CommandParseError::Unknown("fly".into()))
        );
        assert_eq!(
            "enter".parse::<TourCommand>(),
            Err(CommandParseError::MissingArgument("enter"))
        );
        assert_eq!(
            "enter abc".parse::<TourCommand>(),
            Err(CommandParseError::InvalidBuilding("abc".into()))
        );
        assert_eq!(
            "enter 1 tiles".parse::<TourCommand>(),
            Err(CommandParseError::InvalidModel("tiles".into()))
        );
        assert_eq!(
            "enter 1 2 3".parse::<TourCommand>(),
            Err(CommandParseError::UnexpectedArgument("enter"))
        );
        assert_eq!(
            "next 2".parse::<TourCommand>(),
            Err(CommandParseError::UnexpectedArgument("next"))
        );
    }

    #[test]
    fn display_parses_back() {
        for cmd in [
            TourCommand::Enter(BuildingId(4), None),
            TourCommand::Enter(BuildingId(4), Some(96188)),
            TourCommand::FreeRoam,
            TourCommand::GoTo(ZoneId::Num(2)),
            TourCommand::PauseResume,
            TourCommand::Previous,
        ] {
            assert_eq!(cmd.to_string().parse(), Ok(cmd));
        }
    }
}
