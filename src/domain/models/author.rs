use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Model(String),
    Palaver,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Author::User => return write!(f, "You"),
            Author::Model(name) => return write!(f, "{name}"),
            Author::Palaver => return write!(f, "Palaver"),
        }
    }
}
