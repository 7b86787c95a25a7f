//! Shape model: identifiers, points, colors, shapes, and shape mementos.
//!
//! DESIGN
//! ======
//! Shapes are plain owned values. `Clone` is a deep copy, so a `ShapeState`
//! snapshot taken before an edit can never alias the edited shape. Conflict
//! detection and undo both compare snapshots structurally, never by reference.
//!
//! Every constructor validates: a `Shape` that exists satisfies the point-count
//! rule for its kind and carries only finite coordinates.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::consts::DEFAULT_THICKNESS;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Opaque identifier of a shape. Key of the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(String);

impl ShapeId {
    /// Mint a fresh, globally unique id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a peer's user. Authors actions and owns undo history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("{kind} requires {expected} point(s), got {actual}")]
    PointCount { kind: ShapeKind, expected: &'static str, actual: usize },
    #[error("shape coordinates must be finite")]
    NonFiniteCoordinate,
    #[error("stroke thickness must be finite and non-negative, got {0}")]
    InvalidThickness(f64),
    #[error("unknown shape type: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must be #AARRGGBB or #RRGGBB, got {0:?}")]
    Malformed(String),
}

// =============================================================================
// POINT
// =============================================================================

/// Immutable point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// ARGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Wire form, `#AARRGGBB` in uppercase hex.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ColorError::Malformed(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(malformed)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
        match hex.len() {
            8 => Ok(Self::argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            _ => Err(malformed()),
        }
    }
}

// =============================================================================
// SHAPE KIND
// =============================================================================

/// The closed set of drawable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Open polyline through every recorded point.
    Freehand,
    /// Axis-aligned rectangle spanned by two diagonal corners.
    Rectangle,
    /// Ellipse inscribed in the box spanned by two diagonal corners.
    Ellipse,
    /// Isosceles triangle inscribed in the box spanned by two diagonal corners.
    Triangle,
    /// Segment between two endpoints.
    Line,
}

impl ShapeKind {
    pub const ALL: [Self; 5] = [Self::Freehand, Self::Rectangle, Self::Ellipse, Self::Triangle, Self::Line];

    /// Name used in the `Type` field on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freehand => "Freehand",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Triangle => "Triangle",
            Self::Line => "Line",
        }
    }

    /// Whether `count` points satisfy this kind's invariant.
    #[must_use]
    pub fn accepts_point_count(self, count: usize) -> bool {
        match self {
            Self::Freehand => count >= 1,
            Self::Rectangle | Self::Ellipse | Self::Triangle | Self::Line => count == 2,
        }
    }

    fn expected_points(self) -> &'static str {
        match self {
            Self::Freehand => "at least 1",
            Self::Rectangle | Self::Ellipse | Self::Triangle | Self::Line => "exactly 2",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownKind(s.to_owned()))
    }
}

// =============================================================================
// SHAPE
// =============================================================================

/// A drawable shape. Fields are private so the point-count invariant holds
/// for every value in existence.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    points: Vec<Point>,
    thickness: f64,
    color: Color,
    created_by: UserId,
    last_modified_by: UserId,
}

impl Shape {
    /// Create a shape with a fresh id, default stroke, and `created_by` as
    /// both creator and last modifier.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::PointCount`] when `points` violates the kind's
    /// invariant and [`ShapeError::NonFiniteCoordinate`] for NaN/infinite
    /// coordinates.
    pub fn new(kind: ShapeKind, points: Vec<Point>, created_by: UserId) -> Result<Self, ShapeError> {
        check_points(kind, &points)?;
        Ok(Self {
            id: ShapeId::new(),
            kind,
            points,
            thickness: DEFAULT_THICKNESS,
            color: Color::default(),
            last_modified_by: created_by.clone(),
            created_by,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: ShapeId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidThickness`] for negative or non-finite
    /// values.
    pub fn with_thickness(mut self, thickness: f64) -> Result<Self, ShapeError> {
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(ShapeError::InvalidThickness(thickness));
        }
        self.thickness = thickness;
        Ok(self)
    }

    #[must_use]
    pub fn with_last_modified_by(mut self, user: UserId) -> Self {
        self.last_modified_by = user;
        self
    }

    /// Move every point by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NonFiniteCoordinate`] if the offset would produce
    /// a non-finite coordinate; the shape is left untouched in that case.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<(), ShapeError> {
        let moved: Vec<Point> = self.points.iter().map(|p| p.translated(dx, dy)).collect();
        if !moved.iter().all(|p| p.is_finite()) {
            return Err(ShapeError::NonFiniteCoordinate);
        }
        self.points = moved;
        Ok(())
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    #[must_use]
    pub fn bounds(&self) -> (Point, Point) {
        let init = (Point::new(f64::INFINITY, f64::INFINITY), Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY));
        self.points.iter().fold(init, |(min, max), p| {
            (Point::new(min.x.min(p.x), min.y.min(p.y)), Point::new(max.x.max(p.x), max.y.max(p.y)))
        })
    }

    #[must_use]
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    #[must_use]
    pub fn last_modified_by(&self) -> &UserId {
        &self.last_modified_by
    }
}

fn check_points(kind: ShapeKind, points: &[Point]) -> Result<(), ShapeError> {
    if !kind.accepts_point_count(points.len()) {
        return Err(ShapeError::PointCount { kind, expected: kind.expected_points(), actual: points.len() });
    }
    if !points.iter().all(|p| p.is_finite()) {
        return Err(ShapeError::NonFiniteCoordinate);
    }
    Ok(())
}

// =============================================================================
// SHAPE STATE
// =============================================================================

/// Memento of one shape at one point in time.
///
/// Two states are equal only if every field, including the full shape, is
/// equal. `Option<ShapeState>::None` stands for "not created yet".
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    pub shape: Shape,
    pub is_deleted: bool,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
}

impl ShapeState {
    #[must_use]
    pub fn new(shape: Shape, is_deleted: bool, last_modified: i64) -> Self {
        Self { shape, is_deleted, last_modified }
    }

    #[must_use]
    pub fn id(&self) -> &ShapeId {
        self.shape.id()
    }

    /// Same shape, flagged deleted at `timestamp`.
    #[must_use]
    pub fn deleted_copy(&self, timestamp: i64) -> Self {
        Self { shape: self.shape.clone(), is_deleted: true, last_modified: timestamp }
    }
}
