// src/query/mod.rs
// The locator's only view of the remote page: navigate, query, read, click.

use std::error::Error;
use std::fmt;
use std::time::Duration;

pub mod webdriver;
pub use webdriver::WebDriverPage;

/// Opaque element handle. Backends map these onto their own references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elem(pub String);

#[derive(Debug)]
pub enum QueryError {
    /// A bounded wait ran out before anything matched.
    Timeout { selector: String, waited: Duration },
    /// Transport-level failure talking to the backend.
    Transport(String),
    /// The backend answered with something we could not interpret.
    Protocol(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Timeout { selector, waited } => {
                write!(f, "timed out after {:?} waiting for {selector:?}", waited)
            }
            QueryError::Transport(msg) => write!(f, "transport error: {msg}"),
            QueryError::Protocol(msg) => write!(f, "protocol error: {msg}"),
        }
    }
}

impl Error for QueryError {}

pub trait PageQuery {
    fn goto(&mut self, url: &str) -> Result<(), QueryError>;

    /// Bounded wait for at least one element matching `css` to exist.
    fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), QueryError>;

    /// All elements matching `css`, document-scoped. Empty vec on no match.
    fn query_all(&mut self, css: &str) -> Result<Vec<Elem>, QueryError>;

    /// All elements matching `css` under `scope`.
    fn query_all_in(&mut self, scope: &Elem, css: &str) -> Result<Vec<Elem>, QueryError>;

    /// Rendered text content of an element.
    fn text(&mut self, el: &Elem) -> Result<String, QueryError>;

    fn attr(&mut self, el: &Elem, name: &str) -> Result<Option<String>, QueryError>;

    fn click(&mut self, el: &Elem) -> Result<(), QueryError>;

    /// Immediate next sibling of `el`, if any.
    fn next_sibling(&mut self, el: &Elem) -> Result<Option<Elem>, QueryError>;

    /// Fixed settle pause, so freshly clicked content can repopulate.
    fn pause(&mut self, d: Duration);
}
