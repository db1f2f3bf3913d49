mod reader;

pub use reader::Reader;

use crate::error::{ParseError, Result};
use crate::geometry::segment::{CubicSegment, LinearSegment, Segment};
use crate::math::Point2;

/// Active drawing command, carried across coordinate groups for the
/// implicit-repetition rule of the path mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    MoveRel,
    MoveAbs,
    LineRel,
    LineAbs,
    CubicRel,
    CubicAbs,
}

impl Command {
    fn from_letter(c: char) -> Option<Self> {
        match c {
            'm' => Some(Self::MoveRel),
            'M' => Some(Self::MoveAbs),
            'l' => Some(Self::LineRel),
            'L' => Some(Self::LineAbs),
            'c' => Some(Self::CubicRel),
            'C' => Some(Self::CubicAbs),
            _ => None,
        }
    }
}

/// Parses path data into an ordered segment list with absolute control
/// points.
///
/// The grammar is the `{m M l L c C z Z}` subset of SVG path data:
/// lowercase commands are relative to the current point, a command letter
/// persists for subsequent coordinate groups until replaced, whitespace
/// and commas are insignificant separators, and numbers carry an optional
/// sign and decimal point (no exponent).
///
/// # Errors
///
/// Any grammar violation aborts the whole parse with a [`ParseError`]:
/// an unexpected symbol, an unknown command letter, or a token that does
/// not convert to a number.
pub fn parse_path(src: &str) -> Result<Vec<Segment>> {
    let mut parser = PathParser::new(src);
    parser.run()?;
    Ok(parser.segments)
}

/// Parser state threaded explicitly through each token consumption:
/// the cursor, the current point, and the active command.
#[derive(Debug)]
struct PathParser<'a> {
    reader: Reader<'a>,
    current_point: Point2,
    active: Option<Command>,
    /// Set when a command letter has been read but no coordinate group
    /// has followed yet; a dangling letter at end of input is an error.
    awaiting_group: bool,
    segments: Vec<Segment>,
}

impl<'a> PathParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            reader: Reader::new(src),
            current_point: Point2::new(0.0, 0.0),
            active: None,
            awaiting_group: false,
            segments: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        self.reader.skip_separators();
        while let Some(c) = self.reader.peek() {
            if c.is_ascii_alphabetic() {
                self.read_command(c)?;
            } else if is_number_start(c) {
                let Some(command) = self.active else {
                    return Err(ParseError::UnexpectedSymbol {
                        found: c,
                        offset: self.reader.position(),
                    }
                    .into());
                };
                self.read_group(command)?;
            } else {
                return Err(ParseError::UnexpectedSymbol {
                    found: c,
                    offset: self.reader.position(),
                }
                .into());
            }
            self.reader.skip_separators();
        }
        if self.awaiting_group {
            return Err(ParseError::UnexpectedEnd.into());
        }
        Ok(())
    }

    fn read_command(&mut self, letter: char) -> Result<()> {
        let offset = self.reader.position();
        self.reader.bump();
        if letter == 'z' || letter == 'Z' {
            return self.close_path(letter, offset);
        }
        match Command::from_letter(letter) {
            Some(command) => {
                self.active = Some(command);
                self.awaiting_group = true;
                Ok(())
            }
            None => Err(ParseError::UnknownCommand {
                command: letter,
                offset,
            }
            .into()),
        }
    }

    /// Consumes one fixed-arity coordinate group for the active command
    /// and emits the resulting segment.
    fn read_group(&mut self, command: Command) -> Result<()> {
        let cp = self.current_point;
        match command {
            Command::MoveRel => {
                let (dx, dy) = self.read_pair()?;
                self.current_point = Point2::new(cp.x + dx, cp.y + dy);
                // Subsequent groups of a moveto are linetos.
                self.active = Some(Command::LineRel);
            }
            Command::MoveAbs => {
                let (x, y) = self.read_pair()?;
                self.current_point = Point2::new(x, y);
                self.active = Some(Command::LineAbs);
            }
            Command::LineRel => {
                let (dx, dy) = self.read_pair()?;
                let np = Point2::new(cp.x + dx, cp.y + dy);
                self.segments
                    .push(Segment::Linear(LinearSegment::new(cp, np)));
                self.current_point = np;
            }
            Command::LineAbs => {
                let (x, y) = self.read_pair()?;
                let np = Point2::new(x, y);
                self.segments
                    .push(Segment::Linear(LinearSegment::new(cp, np)));
                self.current_point = np;
            }
            Command::CubicRel => {
                let (d0x, d0y) = self.read_pair()?;
                let (d1x, d1y) = self.read_pair()?;
                let (dx, dy) = self.read_pair()?;
                let c0 = Point2::new(cp.x + d0x, cp.y + d0y);
                let c1 = Point2::new(cp.x + d1x, cp.y + d1y);
                let np = Point2::new(cp.x + dx, cp.y + dy);
                self.segments
                    .push(Segment::Cubic(CubicSegment::new(cp, c0, c1, np)));
                self.current_point = np;
            }
            Command::CubicAbs => {
                let (c0x, c0y) = self.read_pair()?;
                let (c1x, c1y) = self.read_pair()?;
                let (x, y) = self.read_pair()?;
                let c0 = Point2::new(c0x, c0y);
                let c1 = Point2::new(c1x, c1y);
                let np = Point2::new(x, y);
                self.segments
                    .push(Segment::Cubic(CubicSegment::new(cp, c0, c1, np)));
                self.current_point = np;
            }
        }
        self.awaiting_group = false;
        Ok(())
    }

    /// Emits the closing segment back to the first vertex of the first
    /// parsed segment and clears the active command.
    fn close_path(&mut self, letter: char, offset: usize) -> Result<()> {
        let Some(first) = self.segments.first().map(Segment::start) else {
            return Err(ParseError::UnexpectedSymbol {
                found: letter,
                offset,
            }
            .into());
        };
        self.segments
            .push(Segment::Linear(LinearSegment::new(self.current_point, first)));
        self.current_point = first;
        self.active = None;
        Ok(())
    }

    fn read_pair(&mut self) -> Result<(f64, f64)> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        Ok((x, y))
    }

    fn read_number(&mut self) -> Result<f64> {
        self.reader.skip_separators();
        let offset = self.reader.position();
        let mut text = String::new();
        while let Some(c) = self.reader.peek() {
            if is_number_start(c) {
                text.push(c);
                self.reader.bump();
            } else {
                break;
            }
        }
        if text.is_empty() {
            return match self.reader.peek() {
                Some(c) => Err(ParseError::UnexpectedSymbol { found: c, offset }.into()),
                None => Err(ParseError::UnexpectedEnd.into()),
            };
        }
        text.parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber { text, offset }.into())
    }
}

fn is_number_start(c: char) -> bool {
    matches!(c, '+' | '-' | '.' | '0'..='9')
}
