//! Well-Known Binary codec.
//!
//! Each geometry starts with a byte-order flag (0 big-endian, 1
//! little-endian) followed by a `u32` type code; bit 31 of the code marks the
//! presence of a third ordinate. Members of multi geometries and collections
//! carry their own flag and code. The empty point is encoded as a NaN/NaN
//! coordinate pair; other empty variants use a zero element count.
//!
//! The writer always produces little-endian output and sets the Z flag on a
//! geometry only when every vertex of the geometry carries a third ordinate.
//! Rings are written with the line string type code, so a standalone ring
//! reads back as a line string.

use crate::WkbError;
use bytes::{Buf, BufMut};
use ortelius_types::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// Maximum collection nesting the reader will follow.
const MAX_NESTING: usize = 64;

/// High bit of the type code marking three-dimensional coordinates.
const FLAG_Z: u32 = 0x8000_0000;

const CODE_POINT: u32 = 1;
const CODE_LINE_STRING: u32 = 2;
const CODE_POLYGON: u32 = 3;
const CODE_MULTI_POINT: u32 = 4;
const CODE_MULTI_LINE_STRING: u32 = 5;
const CODE_MULTI_POLYGON: u32 = 6;
const CODE_GEOMETRY_COLLECTION: u32 = 7;

/// Parses a single geometry from WKB bytes.
///
/// Trailing bytes after the first complete geometry are ignored.
pub fn parse(bytes: &[u8]) -> Result<Geometry, WkbError> {
    let mut reader = Reader::new(bytes);
    read_geometry(&mut reader, 0)
}

/// Serializes a geometry to WKB bytes.
pub fn write(geometry: &Geometry) -> Vec<u8> {
    let mut out = Vec::new();
    write_geometry(&mut out, geometry);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Big,
    Little,
}

struct Reader<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            len: buf.len(),
        }
    }

    fn pos(&self) -> usize {
        self.len - self.buf.remaining()
    }

    fn read_u8(&mut self) -> Result<u8, WkbError> {
        if self.buf.remaining() < 1 {
            return Err(WkbError::Truncated { at: self.pos() });
        }
        Ok(self.buf.get_u8())
    }

    fn read_u32(&mut self, order: ByteOrder) -> Result<u32, WkbError> {
        if self.buf.remaining() < 4 {
            return Err(WkbError::Truncated { at: self.pos() });
        }
        Ok(match order {
            ByteOrder::Big => self.buf.get_u32(),
            ByteOrder::Little => self.buf.get_u32_le(),
        })
    }

    fn read_f64(&mut self, order: ByteOrder) -> Result<f64, WkbError> {
        if self.buf.remaining() < 8 {
            return Err(WkbError::Truncated { at: self.pos() });
        }
        Ok(match order {
            ByteOrder::Big => self.buf.get_f64(),
            ByteOrder::Little => self.buf.get_f64_le(),
        })
    }
}

fn read_byte_order(reader: &mut Reader<'_>) -> Result<ByteOrder, WkbError> {
    let at = reader.pos();
    match reader.read_u8()? {
        0 => Ok(ByteOrder::Big),
        1 => Ok(ByteOrder::Little),
        flag => Err(WkbError::BadByteOrder { flag, at }),
    }
}

/// Reads the flag and type code of a member geometry whose type the
/// container constrains.
fn read_member_header(
    reader: &mut Reader<'_>,
    expected_code: u32,
    expected: &'static str,
) -> Result<(ByteOrder, bool), WkbError> {
    let order = read_byte_order(reader)?;
    let at = reader.pos();
    let raw = reader.read_u32(order)?;
    let code = raw & !FLAG_Z;
    if code != expected_code {
        return Err(WkbError::UnexpectedMemberType {
            expected,
            found: code,
            at,
        });
    }
    Ok((order, raw & FLAG_Z != 0))
}

fn read_geometry(reader: &mut Reader<'_>, depth: usize) -> Result<Geometry, WkbError> {
    if depth > MAX_NESTING {
        return Err(WkbError::NestingTooDeep {
            limit: MAX_NESTING,
            at: reader.pos(),
        });
    }
    let order = read_byte_order(reader)?;
    let at = reader.pos();
    let raw = reader.read_u32(order)?;
    let has_z = raw & FLAG_Z != 0;
    match raw & !FLAG_Z {
        CODE_POINT => Ok(Geometry::Point(read_point_body(reader, order, has_z)?)),
        CODE_LINE_STRING => {
            let coords = read_coord_seq(reader, order, has_z)?;
            Ok(Geometry::LineString(LineString::new(coords)))
        }
        CODE_POLYGON => Ok(Geometry::Polygon(read_polygon_body(reader, order, has_z)?)),
        CODE_MULTI_POINT => {
            let count = read_count(reader, order)?;
            let mut points = Vec::with_capacity(capped(count, reader));
            for _ in 0..count {
                let (order, has_z) = read_member_header(reader, CODE_POINT, "Point")?;
                points.push(read_point_body(reader, order, has_z)?);
            }
            Ok(Geometry::MultiPoint(MultiPoint::new(points)))
        }
        CODE_MULTI_LINE_STRING => {
            let count = read_count(reader, order)?;
            let mut lines = Vec::with_capacity(capped(count, reader));
            for _ in 0..count {
                let (order, has_z) = read_member_header(reader, CODE_LINE_STRING, "LineString")?;
                lines.push(LineString::new(read_coord_seq(reader, order, has_z)?));
            }
            Ok(Geometry::MultiLineString(MultiLineString::new(lines)))
        }
        CODE_MULTI_POLYGON => {
            let count = read_count(reader, order)?;
            let mut polygons = Vec::with_capacity(capped(count, reader));
            for _ in 0..count {
                let (order, has_z) = read_member_header(reader, CODE_POLYGON, "Polygon")?;
                polygons.push(read_polygon_body(reader, order, has_z)?);
            }
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        CODE_GEOMETRY_COLLECTION => {
            let count = read_count(reader, order)?;
            let mut members = Vec::with_capacity(capped(count, reader));
            for _ in 0..count {
                members.push(read_geometry(reader, depth + 1)?);
            }
            Ok(Geometry::GeometryCollection(GeometryCollection::new(
                members,
            )))
        }
        code => Err(WkbError::UnknownTypeCode { code, at }),
    }
}

fn read_count(reader: &mut Reader<'_>, order: ByteOrder) -> Result<usize, WkbError> {
    Ok(reader.read_u32(order)? as usize)
}

/// Pre-allocation cap; a hostile count must not reserve more than the
/// remaining input could possibly hold.
fn capped(count: usize, reader: &Reader<'_>) -> usize {
    count.min(reader.buf.remaining() / 5)
}

fn read_coord(reader: &mut Reader<'_>, order: ByteOrder, has_z: bool) -> Result<Coord, WkbError> {
    let x = reader.read_f64(order)?;
    let y = reader.read_f64(order)?;
    if has_z {
        let z = reader.read_f64(order)?;
        Ok(Coord::with_z(x, y, z))
    } else {
        Ok(Coord::new(x, y))
    }
}

fn read_coord_seq(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    has_z: bool,
) -> Result<Vec<Coord>, WkbError> {
    let count = read_count(reader, order)?;
    let mut coords = Vec::with_capacity(count.min(reader.buf.remaining() / 16));
    for _ in 0..count {
        coords.push(read_coord(reader, order, has_z)?);
    }
    Ok(coords)
}

fn read_point_body(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    has_z: bool,
) -> Result<Point, WkbError> {
    let coord = read_coord(reader, order, has_z)?;
    if coord.x.is_nan() && coord.y.is_nan() {
        Ok(Point::empty())
    } else {
        Ok(Point::new(coord))
    }
}

fn read_polygon_body(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    has_z: bool,
) -> Result<Polygon, WkbError> {
    let ring_count = read_count(reader, order)?;
    if ring_count == 0 {
        return Ok(Polygon::empty());
    }
    let exterior = LinearRing::new(read_coord_seq(reader, order, has_z)?)?;
    let mut interiors = Vec::with_capacity((ring_count - 1).min(reader.buf.remaining() / 4));
    for _ in 1..ring_count {
        interiors.push(LinearRing::new(read_coord_seq(reader, order, has_z)?)?);
    }
    Ok(Polygon::new(exterior, interiors))
}

fn write_header(out: &mut Vec<u8>, code: u32, has_z: bool) {
    out.put_u8(1);
    out.put_u32_le(if has_z { code | FLAG_Z } else { code });
}

fn all_have_z(coords: &[Coord]) -> bool {
    !coords.is_empty() && coords.iter().all(|coord| coord.z.is_some())
}

fn write_coord(out: &mut Vec<u8>, coord: &Coord, has_z: bool) {
    out.put_f64_le(coord.x);
    out.put_f64_le(coord.y);
    if has_z {
        out.put_f64_le(coord.z.unwrap_or(f64::NAN));
    }
}

fn write_coord_seq(out: &mut Vec<u8>, coords: &[Coord], has_z: bool) {
    out.put_u32_le(coords.len() as u32);
    for coord in coords {
        write_coord(out, coord, has_z);
    }
}

fn write_point(out: &mut Vec<u8>, point: &Point) {
    let has_z = point.coord.is_some_and(|coord| coord.z.is_some());
    write_header(out, CODE_POINT, has_z);
    match &point.coord {
        Some(coord) => write_coord(out, coord, has_z),
        None => {
            out.put_f64_le(f64::NAN);
            out.put_f64_le(f64::NAN);
        }
    }
}

fn write_line_string_coords(out: &mut Vec<u8>, coords: &[Coord]) {
    let has_z = all_have_z(coords);
    write_header(out, CODE_LINE_STRING, has_z);
    write_coord_seq(out, coords, has_z);
}

fn write_polygon(out: &mut Vec<u8>, polygon: &Polygon) {
    let vertices = polygon
        .rings()
        .flat_map(|ring| ring.coords.iter().copied())
        .collect::<Vec<_>>();
    let has_z = all_have_z(&vertices);
    write_header(out, CODE_POLYGON, has_z);
    if polygon.is_empty() {
        out.put_u32_le(0);
        return;
    }
    out.put_u32_le(1 + polygon.interiors.len() as u32);
    for ring in polygon.rings() {
        write_coord_seq(out, &ring.coords, has_z);
    }
}

fn write_geometry(out: &mut Vec<u8>, geometry: &Geometry) {
    match geometry {
        Geometry::Point(point) => write_point(out, point),
        Geometry::LineString(line) => write_line_string_coords(out, &line.coords),
        Geometry::LinearRing(ring) => write_line_string_coords(out, &ring.coords),
        Geometry::Polygon(polygon) => write_polygon(out, polygon),
        Geometry::MultiPoint(multi) => {
            write_header(out, CODE_MULTI_POINT, false);
            out.put_u32_le(multi.points.len() as u32);
            for point in &multi.points {
                write_point(out, point);
            }
        }
        Geometry::MultiLineString(multi) => {
            write_header(out, CODE_MULTI_LINE_STRING, false);
            out.put_u32_le(multi.lines.len() as u32);
            for line in &multi.lines {
                write_line_string_coords(out, &line.coords);
            }
        }
        Geometry::MultiPolygon(multi) => {
            write_header(out, CODE_MULTI_POLYGON, false);
            out.put_u32_le(multi.polygons.len() as u32);
            for polygon in &multi.polygons {
                write_polygon(out, polygon);
            }
        }
        Geometry::GeometryCollection(collection) => {
            write_header(out, CODE_GEOMETRY_COLLECTION, false);
            out.put_u32_le(collection.geometries.len() as u32);
            for member in &collection.geometries {
                write_geometry(out, member);
            }
        }
    }
}
