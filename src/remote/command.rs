use crate::authoring::Verb;

/// A classified inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Single-character live control code.
    Control(char),
    /// Authoring verb with the whitespace-separated tokens that follow its prefix.
    Authoring(Verb, Vec<String>),
}

impl Command {
    /// Authoring prefixes take precedence; anything else dispatches on its
    /// first character. Empty payloads yield nothing.
    pub fn parse(payload: &str) -> Option<Self> {
        let payload = payload.trim_end_matches(['\0', '\r', '\n']);

        let verb = payload.get(..Verb::PREFIX_LEN).and_then(Verb::from_prefix);
        if let Some(verb) = verb {
            let tokens = payload[Verb::PREFIX_LEN..]
                .split_whitespace()
                .map(str::to_string)
                .collect();
            return Some(Command::Authoring(verb, tokens));
        }

        payload.chars().next().map(Command::Control)
    }
}
