//! Compact move/line path geometry.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;
use thiserror::Error;

/// A single drawing instruction with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

impl PathCommand {
    /// The point this command targets.
    pub fn point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        }
    }

    fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::LineTo(_) => 'L',
        }
    }
}

/// Errors produced when reading a path-command string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,
    #[error("path must start with a move command")]
    MissingMoveTo,
    #[error("path contains more than one move command")]
    MultipleMoveTo,
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),
    #[error("command '{0}' is missing a coordinate")]
    MissingCoordinate(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Geometry of a freehand stroke: one move followed by zero or more lines.
///
/// The command list and its string encoding are appended together, so
/// extending a long stroke never re-encodes the whole path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathData {
    commands: Vec<PathCommand>,
    encoded: String,
}

impl PathData {
    /// Start a new path at `start`.
    pub fn starting_at(start: Point) -> Self {
        let mut path = Self::default();
        path.push(PathCommand::MoveTo(start));
        path
    }

    /// Append a line segment to `point`.
    ///
    /// On an empty path this becomes the initial move instead, so the
    /// geometry always begins with a move command.
    pub fn line_to(&mut self, point: Point) {
        if self.commands.is_empty() {
            self.push(PathCommand::MoveTo(point));
        } else {
            self.push(PathCommand::LineTo(point));
        }
    }

    fn push(&mut self, command: PathCommand) {
        if !self.encoded.is_empty() {
            self.encoded.push(' ');
        }
        let p = command.point();
        // Writing into a String cannot fail.
        let _ = write!(self.encoded, "{} {} {}", command.letter(), p.x, p.y);
        self.commands.push(command);
    }

    /// The commands in drawing order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The compact path-command string, e.g. `"M 10 10 L 20 10"`.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Number of commands, including the initial move.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of line commands following the initial move.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count()
    }

    /// Points visited by the path, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    /// Bounding box of every visited point. `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
    }

    /// Convert to a kurbo path for rendering.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
            }
        }
        path
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl From<PathData> for String {
    fn from(path: PathData) -> Self {
        path.encoded
    }
}

impl TryFrom<String> for PathData {
    type Error = PathParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug)]
enum Token<'a> {
    Command(char),
    Number(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                tokens.push(Token::Command(c));
                let rest = chars.as_str();
                if !rest.is_empty() {
                    tokens.push(Token::Number(rest));
                }
            }
            _ => tokens.push(Token::Number(word)),
        }
    }
    tokens
}

impl FromStr for PathData {
    type Err = PathParseError;

    /// Parse an absolute `M`/`L` path string.
    ///
    /// Coordinate pairs following a command without a new letter repeat as
    /// line commands, as in SVG path syntax.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s);
        if tokens.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut path = PathData::default();
        let mut iter = tokens.into_iter().peekable();
        let mut current: Option<char> = None;

        while let Some(token) = iter.peek() {
            let letter = match token {
                Token::Command(c) => {
                    let c = *c;
                    iter.next();
                    c
                }
                // Implicit repeat of the previous command.
                Token::Number(_) => match current {
                    Some(_) => 'L',
                    None => return Err(PathParseError::MissingMoveTo),
                },
            };

            match (letter, current) {
                ('M', None) | ('L', Some(_)) => {}
                ('M', Some(_)) => return Err(PathParseError::MultipleMoveTo),
                (_, None) => return Err(PathParseError::MissingMoveTo),
                (other, Some(_)) => return Err(PathParseError::UnsupportedCommand(other)),
            }

            let x = read_number(&mut iter, letter)?;
            let y = read_number(&mut iter, letter)?;
            let point = Point::new(x, y);
            if letter == 'M' {
                path.push(PathCommand::MoveTo(point));
            } else {
                path.push(PathCommand::LineTo(point));
            }
            current = Some(letter);
        }

        Ok(path)
    }
}

fn read_number<'a, I>(iter: &mut std::iter::Peekable<I>, command: char) -> Result<f64, PathParseError>
where
    I: Iterator<Item = Token<'a>>,
{
    match iter.next() {
        Some(Token::Number(n)) => {
            let value: f64 = n
                .parse()
                .map_err(|_| PathParseError::InvalidNumber(n.to_string()))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(PathParseError::InvalidNumber(n.to_string()))
            }
        }
        _ => Err(PathParseError::MissingCoordinate(command)),
    }
}
