use geo::Polygon;
use tracing::{debug, warn};

use super::{openings, split_around_openings};
use crate::error::Result;
use crate::geometry::boolean::{difference, union};
use crate::geometry::predicates::{
    contains_segment, intersects, shared_boundary, touches, validate,
};
use crate::geometry::{ellipse, polygon_from_points, Rectangle};
use crate::math::{points_coincide, Point2};
use crate::state::DungeonState;

/// A user-drawn region.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
    Rectangle(Rectangle),
    Polygon(Vec<Point2>),
    /// Ellipse inscribed in the bounding box.
    Ellipse(Rectangle),
    /// Pointer samples of a freehand stroke; repeated samples are dropped.
    Freehand(Vec<Point2>),
}

impl RegionShape {
    /// Builds and validates the shape's polygon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the shape is not a valid
    /// simple polygon.
    pub fn to_polygon(&self) -> Result<Polygon<f64>> {
        let polygon = match self {
            Self::Rectangle(rect) => rect.to_polygon()?,
            Self::Polygon(points) => polygon_from_points(points)?,
            Self::Ellipse(bounds) => ellipse(bounds)?,
            Self::Freehand(samples) => {
                let mut points: Vec<Point2> = Vec::with_capacity(samples.len());
                for p in samples {
                    if !points.last().is_some_and(|last| points_coincide(last, p)) {
                        points.push(*p);
                    }
                }
                polygon_from_points(&points)?
            }
        };
        validate(&polygon)?;
        Ok(polygon)
    }
}

/// Adds floor area.
///
/// A shape that only touches the existing floor gets seam walls along the
/// shared boundary, so the two areas stay separated until a door is drawn.
/// A shape that overlaps the floor opens it up: interior walls inside the
/// shape are removed.
pub struct AddRegion {
    shape: RegionShape,
}

impl AddRegion {
    #[must_use]
    pub fn new(shape: RegionShape) -> Self {
        Self { shape }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` for an invalid shape or
    /// `GeometryError::Kernel` if the union fails.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let shape = self.shape.to_polygon().inspect_err(|e| {
            warn!(error = %e, "rejected region");
        })?;

        let mut next = state.clone();
        let Some(old) = &state.geometry else {
            next.geometry = Some(shape.into());
            return Ok(Some(next));
        };

        if touches(old, &shape) {
            let contact = shared_boundary(old, &shape);
            let count = contact.coordinate_count();
            if count > 1 && count % 2 == 0 {
                for seam in contact.segments {
                    let pieces = split_around_openings(seam, openings(state));
                    for piece in pieces {
                        if !next.interior_walls.iter().any(|w| w.contains(&piece)) {
                            next.interior_walls.push(piece);
                        }
                    }
                }
            } else {
                debug!(count, "ambiguous contact, no seam walls added");
            }
        } else {
            next.interior_walls
                .retain(|wall| !contains_segment(&shape, wall));
        }

        next.geometry = union(old, &shape)?;
        Ok(Some(next))
    }
}

/// Removes floor area.
///
/// Subtracting from an empty dungeon, or with a shape that does not reach
/// into the floor, changes nothing.
pub struct SubtractRegion {
    shape: RegionShape,
}

impl SubtractRegion {
    #[must_use]
    pub fn new(shape: RegionShape) -> Self {
        Self { shape }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` for an invalid shape or
    /// `GeometryError::Kernel` if the difference fails.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let shape = self.shape.to_polygon().inspect_err(|e| {
            warn!(error = %e, "rejected region");
        })?;

        let Some(old) = &state.geometry else {
            return Ok(None);
        };
        if !intersects(old, &shape) || touches(old, &shape) {
            return Ok(None);
        }

        let mut next = state.clone();
        next.geometry = difference(old, &shape)?;
        Ok(Some(next))
    }
}
