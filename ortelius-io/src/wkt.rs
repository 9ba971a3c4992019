//! Well-Known Text codec.
//!
//! The parser recognizes the eight geometry type keywords
//! case-insensitively, accepts `EMPTY` as the body of any variant, reads an
//! optional third ordinate per coordinate, and accepts both the legacy bare
//! `MULTIPOINT (1 2, 3 4)` syntax and the parenthesized per-point form. The
//! writer always emits the parenthesized form and formats numbers with the
//! shortest representation that parses back to the same value.

use crate::WktError;
use ortelius_types::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// Maximum collection nesting the parser will follow.
const MAX_NESTING: usize = 64;

/// Parses a single geometry from WKT text.
///
/// Trailing input after the first complete geometry is ignored.
pub fn parse(input: &str) -> Result<Geometry, WktError> {
    let mut lexer = Lexer::new(input);
    parse_geometry(&mut lexer, 0)
}

/// Serializes a geometry to WKT text.
pub fn write(geometry: &Geometry) -> String {
    let mut out = String::new();
    write_geometry(&mut out, geometry);
    out
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    LParen,
    RParen,
    Comma,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("{w:?}"),
            Token::Number(n) => format!("number {n}"),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    peeked: Option<(Token, usize)>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            peeked: None,
        }
    }

    fn next_token(&mut self) -> Result<(Token, usize), WktError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let at = self.pos;
        let Some(&byte) = bytes.get(self.pos) else {
            return Ok((Token::Eof, at));
        };
        match byte {
            b'(' => {
                self.pos += 1;
                Ok((Token::LParen, at))
            }
            b')' => {
                self.pos += 1;
                Ok((Token::RParen, at))
            }
            b',' => {
                self.pos += 1;
                Ok((Token::Comma, at))
            }
            b if b.is_ascii_alphabetic() => {
                while self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
                    self.pos += 1;
                }
                Ok((Token::Word(self.input[at..self.pos].to_string()), at))
            }
            b if b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.' => {
                while self.pos < bytes.len() && is_number_byte(bytes[self.pos]) {
                    self.pos += 1;
                }
                let text = &self.input[at..self.pos];
                let value: f64 = text.parse().map_err(|_| WktError::InvalidNumber {
                    text: text.to_string(),
                    at,
                })?;
                Ok((Token::Number(value), at))
            }
            _ => {
                let found = self.input[at..].chars().next().unwrap_or('\u{fffd}');
                Err(WktError::UnexpectedCharacter { found, at })
            }
        }
    }

    fn peek(&mut self) -> Result<(Token, usize), WktError> {
        let token = self.next_token()?;
        self.peeked = Some(token.clone());
        Ok(token)
    }
}

fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_digit()
        || byte == b'-'
        || byte == b'+'
        || byte == b'.'
        || byte == b'e'
        || byte == b'E'
}

enum Body {
    Empty,
    Open,
}

enum Sep {
    Comma,
    Closer,
}

fn next_empty_or_opener(lexer: &mut Lexer<'_>) -> Result<Body, WktError> {
    let (token, at) = lexer.next_token()?;
    match token {
        Token::Word(ref word) if word.eq_ignore_ascii_case("EMPTY") => Ok(Body::Empty),
        Token::LParen => Ok(Body::Open),
        other => Err(WktError::UnexpectedToken {
            expected: "EMPTY or '('",
            found: other.describe(),
            at,
        }),
    }
}

fn next_closer_or_comma(lexer: &mut Lexer<'_>) -> Result<Sep, WktError> {
    let (token, at) = lexer.next_token()?;
    match token {
        Token::Comma => Ok(Sep::Comma),
        Token::RParen => Ok(Sep::Closer),
        other => Err(WktError::UnexpectedToken {
            expected: "',' or ')'",
            found: other.describe(),
            at,
        }),
    }
}

fn expect_closer(lexer: &mut Lexer<'_>) -> Result<(), WktError> {
    let (token, at) = lexer.next_token()?;
    if token == Token::RParen {
        Ok(())
    } else {
        Err(WktError::UnexpectedToken {
            expected: "')'",
            found: token.describe(),
            at,
        })
    }
}

fn expect_number(lexer: &mut Lexer<'_>) -> Result<f64, WktError> {
    let (token, at) = lexer.next_token()?;
    match token {
        Token::Number(value) => Ok(value),
        other => Err(WktError::UnexpectedToken {
            expected: "a number",
            found: other.describe(),
            at,
        }),
    }
}

fn parse_geometry(lexer: &mut Lexer<'_>, depth: usize) -> Result<Geometry, WktError> {
    if depth > MAX_NESTING {
        return Err(WktError::NestingTooDeep {
            limit: MAX_NESTING,
            at: lexer.pos,
        });
    }
    let (token, at) = lexer.next_token()?;
    let Token::Word(word) = token else {
        return Err(WktError::UnexpectedToken {
            expected: "a geometry type keyword",
            found: token.describe(),
            at,
        });
    };
    match word.to_ascii_uppercase().as_str() {
        "POINT" => parse_point_body(lexer).map(Geometry::Point),
        "LINESTRING" => parse_line_string_body(lexer).map(Geometry::LineString),
        "LINEARRING" => parse_linear_ring_body(lexer).map(Geometry::LinearRing),
        "POLYGON" => parse_polygon_body(lexer).map(Geometry::Polygon),
        "MULTIPOINT" => parse_multi_point_body(lexer).map(Geometry::MultiPoint),
        "MULTILINESTRING" => parse_multi_line_string_body(lexer).map(Geometry::MultiLineString),
        "MULTIPOLYGON" => parse_multi_polygon_body(lexer).map(Geometry::MultiPolygon),
        "GEOMETRYCOLLECTION" => {
            parse_collection_body(lexer, depth).map(Geometry::GeometryCollection)
        }
        _ => Err(WktError::UnknownType { found: word, at }),
    }
}

fn parse_coord(lexer: &mut Lexer<'_>) -> Result<Coord, WktError> {
    let x = expect_number(lexer)?;
    let y = expect_number(lexer)?;
    if let (Token::Number(_), _) = lexer.peek()? {
        let z = expect_number(lexer)?;
        Ok(Coord::with_z(x, y, z))
    } else {
        Ok(Coord::new(x, y))
    }
}

/// Reads `coord (, coord)* )` after the opener has been consumed.
fn parse_coord_seq(lexer: &mut Lexer<'_>) -> Result<Vec<Coord>, WktError> {
    let mut coords = vec![parse_coord(lexer)?];
    loop {
        match next_closer_or_comma(lexer)? {
            Sep::Comma => coords.push(parse_coord(lexer)?),
            Sep::Closer => return Ok(coords),
        }
    }
}

fn parse_point_body(lexer: &mut Lexer<'_>) -> Result<Point, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(Point::empty()),
        Body::Open => {
            let coord = parse_coord(lexer)?;
            expect_closer(lexer)?;
            Ok(Point::new(coord))
        }
    }
}

fn parse_line_string_body(lexer: &mut Lexer<'_>) -> Result<LineString, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(LineString::empty()),
        Body::Open => Ok(LineString::new(parse_coord_seq(lexer)?)),
    }
}

fn parse_linear_ring_body(lexer: &mut Lexer<'_>) -> Result<LinearRing, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(LinearRing::empty()),
        Body::Open => Ok(LinearRing::new(parse_coord_seq(lexer)?)?),
    }
}

fn parse_polygon_body(lexer: &mut Lexer<'_>) -> Result<Polygon, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(Polygon::empty()),
        Body::Open => {
            let exterior = parse_linear_ring_body(lexer)?;
            let mut interiors = Vec::new();
            loop {
                match next_closer_or_comma(lexer)? {
                    Sep::Comma => interiors.push(parse_linear_ring_body(lexer)?),
                    Sep::Closer => return Ok(Polygon::new(exterior, interiors)),
                }
            }
        }
    }
}

fn parse_multi_point_body(lexer: &mut Lexer<'_>) -> Result<MultiPoint, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(MultiPoint::new(vec![])),
        Body::Open => {
            // the legacy form lists bare coordinates without per-point parens
            if let (Token::Number(_), _) = lexer.peek()? {
                let coords = parse_coord_seq(lexer)?;
                return Ok(MultiPoint::new(coords.into_iter().map(Point::new).collect()));
            }
            let mut points = vec![parse_point_member(lexer)?];
            loop {
                match next_closer_or_comma(lexer)? {
                    Sep::Comma => points.push(parse_point_member(lexer)?),
                    Sep::Closer => return Ok(MultiPoint::new(points)),
                }
            }
        }
    }
}

fn parse_point_member(lexer: &mut Lexer<'_>) -> Result<Point, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(Point::empty()),
        Body::Open => {
            let coord = parse_coord(lexer)?;
            expect_closer(lexer)?;
            Ok(Point::new(coord))
        }
    }
}

fn parse_multi_line_string_body(lexer: &mut Lexer<'_>) -> Result<MultiLineString, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(MultiLineString::new(vec![])),
        Body::Open => {
            let mut lines = vec![parse_line_string_body(lexer)?];
            loop {
                match next_closer_or_comma(lexer)? {
                    Sep::Comma => lines.push(parse_line_string_body(lexer)?),
                    Sep::Closer => return Ok(MultiLineString::new(lines)),
                }
            }
        }
    }
}

fn parse_multi_polygon_body(lexer: &mut Lexer<'_>) -> Result<MultiPolygon, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(MultiPolygon::new(vec![])),
        Body::Open => {
            let mut polygons = vec![parse_polygon_body(lexer)?];
            loop {
                match next_closer_or_comma(lexer)? {
                    Sep::Comma => polygons.push(parse_polygon_body(lexer)?),
                    Sep::Closer => return Ok(MultiPolygon::new(polygons)),
                }
            }
        }
    }
}

fn parse_collection_body(
    lexer: &mut Lexer<'_>,
    depth: usize,
) -> Result<GeometryCollection, WktError> {
    match next_empty_or_opener(lexer)? {
        Body::Empty => Ok(GeometryCollection::empty()),
        Body::Open => {
            let mut members = vec![parse_geometry(lexer, depth + 1)?];
            loop {
                match next_closer_or_comma(lexer)? {
                    Sep::Comma => members.push(parse_geometry(lexer, depth + 1)?),
                    Sep::Closer => return Ok(GeometryCollection::new(members)),
                }
            }
        }
    }
}

fn write_geometry(out: &mut String, geometry: &Geometry) {
    match geometry {
        Geometry::Point(point) => {
            out.push_str("POINT ");
            write_point_body(out, point);
        }
        Geometry::LineString(line) => {
            out.push_str("LINESTRING ");
            write_coord_seq(out, &line.coords);
        }
        Geometry::LinearRing(ring) => {
            out.push_str("LINEARRING ");
            write_coord_seq(out, &ring.coords);
        }
        Geometry::Polygon(polygon) => {
            out.push_str("POLYGON ");
            write_polygon_body(out, polygon);
        }
        Geometry::MultiPoint(multi) => {
            out.push_str("MULTIPOINT ");
            if multi.points.is_empty() {
                out.push_str("EMPTY");
            } else {
                out.push('(');
                for (i, point) in multi.points.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_point_body(out, point);
                }
                out.push(')');
            }
        }
        Geometry::MultiLineString(multi) => {
            out.push_str("MULTILINESTRING ");
            if multi.lines.is_empty() {
                out.push_str("EMPTY");
            } else {
                out.push('(');
                for (i, line) in multi.lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_coord_seq(out, &line.coords);
                }
                out.push(')');
            }
        }
        Geometry::MultiPolygon(multi) => {
            out.push_str("MULTIPOLYGON ");
            if multi.polygons.is_empty() {
                out.push_str("EMPTY");
            } else {
                out.push('(');
                for (i, polygon) in multi.polygons.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_polygon_body(out, polygon);
                }
                out.push(')');
            }
        }
        Geometry::GeometryCollection(collection) => {
            out.push_str("GEOMETRYCOLLECTION ");
            if collection.geometries.is_empty() {
                out.push_str("EMPTY");
            } else {
                out.push('(');
                for (i, member) in collection.geometries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_geometry(out, member);
                }
                out.push(')');
            }
        }
    }
}

fn write_point_body(out: &mut String, point: &Point) {
    match &point.coord {
        None => out.push_str("EMPTY"),
        Some(coord) => {
            out.push('(');
            write_coord(out, coord);
            out.push(')');
        }
    }
}

fn write_polygon_body(out: &mut String, polygon: &Polygon) {
    if polygon.is_empty() {
        out.push_str("EMPTY");
        return;
    }
    out.push('(');
    for (i, ring) in polygon.rings().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coord_seq(out, &ring.coords);
    }
    out.push(')');
}

fn write_coord_seq(out: &mut String, coords: &[Coord]) {
    if coords.is_empty() {
        out.push_str("EMPTY");
        return;
    }
    out.push('(');
    for (i, coord) in coords.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coord(out, coord);
    }
    out.push(')');
}

fn write_coord(out: &mut String, coord: &Coord) {
    out.push_str(&format!("{} {}", coord.x, coord.y));
    if let Some(z) = coord.z {
        out.push_str(&format!(" {z}"));
    }
}
