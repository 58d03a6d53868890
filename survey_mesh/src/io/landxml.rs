//! LandXML TIN surface reading: the point table and the declared faces.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::Point3;

/// Namespace prefix shared by every LandXML schema revision.
pub const LANDXML_NAMESPACE_PREFIX: &str = "http://www.landxml.org/schema/LandXML";

/// Largest accepted coordinate magnitude. Keeps bounding box and offset
/// arithmetic well inside the finite `f64` range.
pub const MAX_COORDINATE: f64 = 1.0e15;

/// Point id to coordinate mapping of one document, in source axis order.
pub type PointTable = HashMap<String, Point3>;

/// A declared face, exactly as written in the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    /// Point ids in declaration order. Well formed faces have three.
    pub point_ids: Vec<String>,
    /// Set when the face carries `i="1"`.
    pub invisible: bool,
    /// Neighbor face ids from the `n` attribute.
    pub neighbors: Vec<String>,
}

impl Face {
    /// Returns `true` if any neighbor id is the boundary sentinel `0`.
    pub fn is_boundary(&self) -> bool {
        self.neighbors
            .iter()
            .any(|n| n.parse::<u64>().is_ok_and(|v| v == 0))
    }
}

/// Points and faces extracted from one LandXML document.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDocument {
    pub points: PointTable,
    pub faces: Vec<Face>,
}

/// Parses whitespace separated coordinate text.
///
/// Two values get an elevation of `0`, three are taken as-is. Anything else,
/// including non-numeric tokens or values beyond [`MAX_COORDINATE`], is a
/// [`SurfaceError::MalformedPoint`].
pub fn parse_coordinate(text: &str) -> SurfaceResult<Point3> {
    coordinates(text).ok_or_else(|| SurfaceError::malformed_point("", text))
}

fn coordinates(text: &str) -> Option<Point3> {
    let mut nums = [0.0f64; 3];
    let mut count = 0;
    for token in text.split_whitespace() {
        if count == 3 {
            return None;
        }
        let v: f64 = token.parse().ok()?;
        if !v.is_finite() || v.abs() > MAX_COORDINATE {
            return None;
        }
        nums[count] = v;
        count += 1;
    }
    match count {
        2 | 3 => Some(Point3::from(nums)),
        _ => None,
    }
}

/// Returns `true` if `node` is a LandXML element with local name `name`.
///
/// Elements without a namespace are accepted as well, since hand written
/// exports frequently omit the `xmlns` declaration.
fn is_landxml(node: &Node, name: &str) -> bool {
    if !node.is_element() || node.tag_name().name() != name {
        return false;
    }
    match node.tag_name().namespace() {
        None => true,
        Some(ns) => ns.starts_with(LANDXML_NAMESPACE_PREFIX),
    }
}

/// Extracts the point table and the ordered face list from raw document bytes.
///
/// A single malformed point fails the whole document; no partial point table
/// is returned.
pub fn extract(bytes: &[u8]) -> SurfaceResult<SurfaceDocument> {
    let xml = std::str::from_utf8(bytes).map_err(|e| SurfaceError::malformed_document(e.to_string()))?;
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let doc = Document::parse(xml).map_err(|e| SurfaceError::malformed_document(e.to_string()))?;

    let mut points = PointTable::new();
    for p in doc.descendants().filter(|n| is_landxml(n, "P")) {
        let text = p.text().unwrap_or("");
        let id = p
            .attribute("id")
            .ok_or_else(|| SurfaceError::malformed_point("", text))?;
        let coord = coordinates(text).ok_or_else(|| SurfaceError::malformed_point(id, text))?;
        points.insert(id.to_string(), coord);
    }

    let faces: Vec<Face> = doc
        .descendants()
        .filter(|n| is_landxml(n, "F"))
        .map(|f| Face {
            point_ids: split_ids(f.text()),
            invisible: matches!(f.attribute("i").map(str::trim), Some("1") | Some("true")),
            neighbors: split_ids(f.attribute("n")),
        })
        .collect();

    log::debug!("extracted {} points and {} faces", points.len(), faces.len());
    Ok(SurfaceDocument { points, faces })
}

fn split_ids(text: Option<&str>) -> Vec<String> {
    text.map(|t| t.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
