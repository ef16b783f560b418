use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;

// Key of a stored value. Only `from_path` builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

fn base_path() -> &'static Regex {
    static BASE_PATH: OnceLock<Regex> = OnceLock::new();
    BASE_PATH.get_or_init(|| {
        Regex::new(r"(/)?store/[A-Za-z0-9\-_.]+").expect("valid base path pattern")
    })
}

fn id_chars() -> &'static Regex {
    static ID_CHARS: OnceLock<Regex> = OnceLock::new();
    ID_CHARS.get_or_init(|| Regex::new(r"^[A-Za-z0-9\-_.]+$").expect("valid id pattern"))
}

impl Identifier {
    /// The identifier is whatever follows the last `/` of a `/store/{id}` path.
    pub fn from_path(raw: &str) -> Result<Identifier, Error> {
        let path = raw.trim();

        if !base_path().is_match(path) {
            return Err(Error::malformed_path(raw, "Could not find the base path"));
        }

        let id = match path.rfind('/') {
            Some(slash) => &path[slash + 1..],
            None => "",
        };
        if !id_chars().is_match(id) {
            return Err(Error::malformed_path(raw, "Could not find the id"));
        }

        Ok(Identifier(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
