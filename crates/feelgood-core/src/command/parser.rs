//! Command parsing.
//!
//! The first whitespace-separated token, case-folded, selects the command.
//! Remaining tokens are positional arguments. Unknown first tokens are not
//! commands at all and parse to `None`.

/// Prefix-qualified name of the mood command.
pub const MOOD_COMMAND: &str = "!mood";

/// Prefix-qualified name of the profile command.
pub const SET_PROFILE_COMMAND: &str = "!setprofile";

/// Usage line sent when `!mood` has no argument.
pub const MOOD_USAGE: &str = "Usage: `!mood <mood>` (try \"happy\", \"stressed\", or \"sad\")";

/// Usage line sent when `!setprofile` does not get exactly three arguments.
pub const SET_PROFILE_USAGE: &str = "Usage: `!setprofile <genre> <artist> <movieGenre>`";

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!mood <mood...>`: arguments joined with single spaces.
    Mood { mood: String },
    /// `!setprofile <genre> <artist> <movieGenre>`.
    SetProfile {
        genre: String,
        artist: String,
        movie_genre: String,
    },
    /// A known command with the wrong number of arguments.
    Usage { usage: &'static str },
}

impl Command {
    /// Parse message text. Returns `None` for anything that is not a command.
    pub fn parse(content: &str) -> Option<Self> {
        let mut tokens = content.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        match name.as_str() {
            MOOD_COMMAND => {
                if args.is_empty() {
                    Some(Command::Usage { usage: MOOD_USAGE })
                } else {
                    Some(Command::Mood {
                        mood: args.join(" "),
                    })
                }
            }
            SET_PROFILE_COMMAND => match args.as_slice() {
                [genre, artist, movie_genre] => Some(Command::SetProfile {
                    genre: genre.to_string(),
                    artist: artist.to_string(),
                    movie_genre: movie_genre.to_string(),
                }),
                _ => Some(Command::Usage {
                    usage: SET_PROFILE_USAGE,
                }),
            },
            _ => None,
        }
    }
}
