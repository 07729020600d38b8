use super::{segments_intersect, Position, Segment};
use crate::{PlanError, PlanResult};

/// The geometry of an [`Obstacle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// a single point
    Point([Position; 1]),
    /// a straight line between two distinct points
    Segment([Position; 2]),
    /// a closed loop of at least 3 vertices. The last vertex connects back to the first.
    Polygon(Vec<Position>),
}

/// Something placed on a [`Plane`](crate::Plane) that Paths have to go around.
///
/// Every Obstacle derives a set of via points from its geometry (see
/// [`bounding_points`](Obstacle::bounding_points)). Those are the only places where a Path
/// through the Plane may bend.
///
/// Non-solid Obstacles still contribute via points, but never block visibility.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let wall = Obstacle::segment(Position::new(2.0, 2.0), Position::new(2.0, 8.0)).unwrap();
/// assert_eq!(wall.vertex_points().len(), 2);
/// assert_eq!(wall.edges().count(), 1);
/// assert_eq!(wall.centroid(), Position::new(2.0, 5.0));
///
/// let marker = Obstacle::point(Position::new(1.0, 1.0)).non_solid();
/// assert!(!marker.is_solid());
///
/// assert!(Obstacle::polygon(vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    shape: Shape,
    solid: bool,
}

impl Obstacle {
    /// Creates a solid point Obstacle
    pub fn point(position: Position) -> Obstacle {
        Obstacle {
            shape: Shape::Point([position]),
            solid: true,
        }
    }

    /// Creates a solid segment Obstacle between `a` and `b`.
    ///
    /// ## Errors
    /// [`PlanError::DegenerateSegment`] if `a` and `b` are the same point.
    pub fn segment(a: Position, b: Position) -> PlanResult<Obstacle> {
        if a == b {
            return Err(PlanError::DegenerateSegment { x: a.x, y: a.y });
        }
        Ok(Obstacle {
            shape: Shape::Segment([a, b]),
            solid: true,
        })
    }

    /// Creates a solid polygon Obstacle from its vertices, in order.
    ///
    /// ## Errors
    /// [`PlanError::InvalidGeometry`] if there are less than 3 vertices.
    pub fn polygon(vertices: Vec<Position>) -> PlanResult<Obstacle> {
        if vertices.len() < 3 {
            return Err(PlanError::InvalidGeometry {
                kind: "polygon",
                required: 3,
                actual: vertices.len(),
            });
        }
        Ok(Obstacle {
            shape: Shape::Polygon(vertices),
            solid: true,
        })
    }

    /// Picks the kind of Obstacle from the number of vertices: 1 is a point, 2 a segment and
    /// anything above a polygon.
    ///
    /// ## Errors
    /// [`PlanError::InvalidGeometry`] if `vertices` is empty, and everything the specific
    /// constructors return.
    pub fn from_vertices(vertices: Vec<Position>) -> PlanResult<Obstacle> {
        match vertices.len() {
            0 => Err(PlanError::InvalidGeometry {
                kind: "any",
                required: 1,
                actual: 0,
            }),
            1 => Ok(Obstacle::point(vertices[0])),
            2 => Obstacle::segment(vertices[0], vertices[1]),
            _ => Obstacle::polygon(vertices),
        }
    }

    /// Marks the Obstacle as non-solid
    pub fn non_solid(self) -> Obstacle {
        self.with_solid(false)
    }

    /// Sets whether the Obstacle blocks visibility
    pub fn with_solid(mut self, solid: bool) -> Obstacle {
        self.solid = solid;
        self
    }

    /// `true` if the Obstacle blocks visibility
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// the geometry of the Obstacle
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// the name of the kind of Obstacle, for messages
    pub fn kind(&self) -> &'static str {
        match self.shape {
            Shape::Point(_) => "point",
            Shape::Segment(_) => "segment",
            Shape::Polygon(_) => "polygon",
        }
    }

    /// The corners or endpoints of the geometry itself
    pub fn vertex_points(&self) -> &[Position] {
        match &self.shape {
            Shape::Point(p) => &p[..],
            Shape::Segment(s) => &s[..],
            Shape::Polygon(v) => &v[..],
        }
    }

    /// The edges of the Obstacle.
    ///
    /// A point has none, a segment one and a polygon one per vertex.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let vertices = self.vertex_points();
        let count = match self.shape {
            Shape::Point(_) => 0,
            Shape::Segment(_) => 1,
            Shape::Polygon(ref v) => v.len(),
        };
        (0..count).map(move |i| Segment::new(vertices[i], vertices[(i + 1) % vertices.len()]))
    }

    /// The via points of the Obstacle, pushed `magnitude` away from its geometry.
    ///
    /// - Point: the 4 cardinal offsets.
    /// - Segment: an extension past both endpoints along the segment, and a point on either side
    ///   of the midpoint.
    /// - Polygon: one point per vertex, along the bisector of its two edges and pointing away
    ///   from the interior.
    pub fn bounding_points(&self, magnitude: f64) -> Vec<Position> {
        match &self.shape {
            Shape::Point([p]) => vec![
                *p + Position::new(magnitude, 0.0),
                *p - Position::new(magnitude, 0.0),
                *p + Position::new(0.0, magnitude),
                *p - Position::new(0.0, magnitude),
            ],
            Shape::Segment([a, b]) => {
                let dir = (*b - *a).normalized();
                let normal = Position::new(-dir.y, dir.x);
                let mid = Segment::new(*a, *b).midpoint();
                vec![
                    *a - dir * magnitude,
                    *b + dir * magnitude,
                    mid + normal * magnitude,
                    mid - normal * magnitude,
                ]
            }
            Shape::Polygon(vertices) => polygon_via_points(vertices, magnitude),
        }
    }

    /// The center of the Obstacle. For polygons this is the area centroid, or the average of the
    /// vertices if the polygon has no area.
    pub fn centroid(&self) -> Position {
        match &self.shape {
            Shape::Point([p]) => *p,
            Shape::Segment([a, b]) => Segment::new(*a, *b).midpoint(),
            Shape::Polygon(vertices) => {
                let area = signed_area(vertices);
                if area == 0.0 {
                    let sum = vertices.iter().fold(Position::default(), |acc, &v| acc + v);
                    return sum * (1.0 / vertices.len() as f64);
                }
                let mut c = Position::default();
                for (i, &a) in vertices.iter().enumerate() {
                    let b = vertices[(i + 1) % vertices.len()];
                    c = c + (a + b) * a.cross(b);
                }
                c * (1.0 / (6.0 * area))
            }
        }
    }

    /// `true` if the Obstacle is solid and `sight` touches any of its edges.
    ///
    /// Points have no edges and only block when `point_obstacles_block` is set, in which case
    /// they block any sight line passing exactly through them.
    pub fn blocks(&self, sight: &Segment, point_obstacles_block: bool) -> bool {
        if !self.solid {
            return false;
        }
        match self.shape {
            Shape::Point([p]) => point_obstacles_block && sight.contains(p),
            _ => self.edges().any(|edge| segments_intersect(&edge, sight)),
        }
    }
}

/// half of the shoelace sum: positive for counter-clockwise vertex order
fn signed_area(vertices: &[Position]) -> f64 {
    let mut sum = 0.0;
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.cross(b);
    }
    sum / 2.0
}

fn polygon_via_points(vertices: &[Position], magnitude: f64) -> Vec<Position> {
    let n = vertices.len();
    let orientation = signed_area(vertices).signum();
    let mut ret = Vec::with_capacity(n);

    for (i, &vertex) in vertices.iter().enumerate() {
        let prev = vertices[(i + n - 1) % n];
        let next = vertices[(i + 1) % n];

        let incoming = vertex - prev;
        let outgoing = next - vertex;
        let bisector = incoming.normalized() + (vertex - next).normalized();

        let dir = if bisector.length() < 1e-12 {
            // straight angle: use the outward edge normal
            let d = if incoming.length() > 0.0 {
                incoming.normalized()
            } else {
                outgoing.normalized()
            };
            if orientation < 0.0 {
                Position::new(-d.y, d.x)
            } else {
                Position::new(d.y, -d.x)
            }
        } else if incoming.cross(outgoing) * orientation < 0.0 {
            // reflex vertex: the bisector points into the polygon
            -bisector.normalized()
        } else {
            bisector.normalized()
        };

        ret.push(vertex + dir * magnitude);
    }
    ret
}
