//! Evaluator for the query subset emitted by the filter compiler's `source`
//! part: `#tag`, `"folder"`, `AND`, `OR` and parentheses.

use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceExpr {
    All,
    Tag(String),
    Folder(String),
    And(Box<SourceExpr>, Box<SourceExpr>),
    Or(Box<SourceExpr>, Box<SourceExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    And,
    Or,
    Tag(String),
    Folder(String),
}

impl SourceExpr {
    pub(crate) fn parse(query: &str) -> DashboardResult<Self> {
        let tokens = tokenize(query)?;
        if tokens.is_empty() {
            return Ok(Self::All);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(DashboardError::Source(format!(
                "unexpected trailing input in query: {query}"
            )));
        }
        Ok(expr)
    }

    /// Tests a note described by its tags and vault-relative path.
    pub(crate) fn matches(&self, tags: &[String], path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(wanted) => tags.iter().any(|tag| tag_matches(tag, wanted)),
            Self::Folder(folder) => folder_matches(folder, path),
            Self::And(left, right) => left.matches(tags, path) && right.matches(tags, path),
            Self::Or(left, right) => left.matches(tags, path) || right.matches(tags, path),
        }
    }
}

/// `#a` selects `#a` and nested tags like `#a/b`, case-insensitively.
fn tag_matches(tag: &str, wanted: &str) -> bool {
    let tag = tag.trim_start_matches('#').to_lowercase();
    let wanted = wanted.trim_start_matches('#').to_lowercase();
    tag == wanted
        || tag
            .strip_prefix(&wanted)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn folder_matches(folder: &str, path: &str) -> bool {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        return true;
    }
    path == folder
        || path.strip_suffix(".md") == Some(folder)
        || path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn parse_or(&mut self) -> DashboardResult<SourceExpr> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = SourceExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> DashboardResult<SourceExpr> {
        let mut left = self.parse_atom()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.parse_atom()?;
            left = SourceExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_atom(&mut self) -> DashboardResult<SourceExpr> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        match token {
            Some(Token::Tag(tag)) => Ok(SourceExpr::Tag(tag)),
            Some(Token::Folder(folder)) => Ok(SourceExpr::Folder(folder)),
            Some(Token::Open) => {
                let inner = self.parse_or()?;
                if self.peek() != Some(&Token::Close) {
                    return Err(DashboardError::Source("unbalanced parentheses".to_owned()));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(other) => Err(DashboardError::Source(format!(
                "unexpected token in query: {other:?}"
            ))),
            None => Err(DashboardError::Source("query ended early".to_owned())),
        }
    }
}

fn tokenize(query: &str) -> DashboardResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = query.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut literal = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                literal.push(escaped);
                            }
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        other => literal.push(other),
                    }
                }
                if !closed {
                    return Err(DashboardError::Source("unterminated path literal".to_owned()));
                }
                tokens.push(Token::Folder(literal));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                let token = if word.starts_with('#') && word.len() > 1 {
                    Token::Tag(word)
                } else if word.eq_ignore_ascii_case("and") {
                    Token::And
                } else if word.eq_ignore_ascii_case("or") {
                    Token::Or
                } else {
                    return Err(DashboardError::Source(format!(
                        "unsupported query term: {word}"
                    )));
                };
                tokens.push(token);
            }
        }
    }

    Ok(tokens)
}
