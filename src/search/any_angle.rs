use super::{reconstruct, Key, OpenList, SegmentSearch};
use crate::{Cost, Path, Plane, PlanResult, Position};
use log::{debug, trace};

/// A* over the visibility graph of a [`Plane`].
///
/// The nodes of the graph are the via points of all Obstacles plus both endpoints. Two nodes
/// are connected if they can see each other, weighted by their Euclidean distance. The graph is
/// never built explicitly: edges are tested with [`Plane::visible`] as they are needed.
///
/// Candidates are numbered by putting `start` first, the via points in ascending order after
/// it and `end` last. Entries with the same `f` are expanded by lower `g`, then by lower number.
#[derive(Clone, Copy, Debug)]
pub struct AnyAngleSearch<'a> {
    plane: &'a Plane,
}

impl<'a> AnyAngleSearch<'a> {
    /// Creates a new search over `plane`
    pub fn new(plane: &'a Plane) -> AnyAngleSearch<'a> {
        AnyAngleSearch { plane }
    }

    /// Searches the shortest Path from `start` to `end` that only bends at via points.
    ///
    /// If `end` is visible from `start`, the Path is the straight line between them.
    ///
    /// ## Errors
    /// [`PlanError::OutOfBounds`](crate::PlanError::OutOfBounds) if either endpoint is not on
    /// the Plane.
    pub fn search(&self, start: Position, end: Position) -> PlanResult<Option<Path<Position>>> {
        let plane = self.plane;
        plane.bounds().check_position(start)?;
        plane.bounds().check_position(end)?;

        if start == end {
            return Ok(Some(Path::single(start)));
        }
        if plane.visible(start, end) {
            return Ok(Some(Path::new(vec![start, end], start.distance(end))));
        }

        let mut nodes = Vec::with_capacity(2);
        nodes.push(start);
        nodes.extend(
            plane
                .sorted_via_points()
                .into_iter()
                .filter(|&p| p != start && p != end),
        );
        nodes.push(end);
        let goal = nodes.len() - 1;

        let mut g = vec![Cost::INFINITY; nodes.len()];
        let mut parent: Vec<usize> = (0..nodes.len()).collect();
        let mut closed = vec![false; nodes.len()];
        let mut next = OpenList::with_capacity(nodes.len());
        g[0] = 0.0;
        next.push_or_update(0, Key(start.distance(end), 0.0));

        let mut expanded = 0;
        let mut visibility_checks = 0;
        while let Some((current, Key(_, current_cost))) = next.pop() {
            if current == goal {
                break;
            }
            closed[current] = true;
            expanded += 1;

            for other in 0..nodes.len() {
                if closed[other] {
                    continue;
                }
                let other_cost = current_cost + nodes[current].distance(nodes[other]);
                if other_cost >= g[other] {
                    continue;
                }
                visibility_checks += 1;
                if !plane.visible(nodes[current], nodes[other]) {
                    continue;
                }
                g[other] = other_cost;
                parent[other] = current;
                let heuristic = nodes[other].distance(end);
                next.push_or_update(other, Key(other_cost + heuristic, other_cost));
            }
        }
        trace!(
            "any-angle search expanded {} of {} candidates, {} visibility checks",
            expanded,
            nodes.len(),
            visibility_checks
        );

        if g[goal].is_infinite() {
            debug!("no via points connect {} and {}", start, end);
            return Ok(None);
        }
        let steps = reconstruct(0, goal, |i| parent[i]);
        let points = steps.into_iter().map(|i| nodes[i]).collect();
        Ok(Some(Path::new(points, g[goal])))
    }
}

impl SegmentSearch for AnyAngleSearch<'_> {
    type Point = Position;

    fn search_segment(
        &self,
        start: Position,
        end: Position,
        _include_diagonals: bool,
    ) -> PlanResult<Option<Path<Position>>> {
        self.search(start, end)
    }

    fn name(&self) -> &'static str {
        "line of sight"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Obstacle, PlanError, PlannerConfig};

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    fn length(path: &Path<Position>) -> Cost {
        path.as_slice()
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    #[test]
    fn straight_line_when_visible() {
        let plane = Plane::new(10, 10).unwrap();
        let path = AnyAngleSearch::new(&plane)
            .search(p(1.0, 1.0), p(4.0, 5.0))
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![p(1.0, 1.0), p(4.0, 5.0)]);
        assert_eq!(path.cost(), 5.0);
    }

    #[test]
    fn around_a_wall() {
        let mut plane = Plane::new(100, 100).unwrap();
        plane
            .add_obstacle(Obstacle::segment(p(50.0, 20.0), p(50.0, 90.0)).unwrap())
            .unwrap();
        let path = AnyAngleSearch::new(&plane)
            .search(p(20.0, 50.0), p(80.0, 50.0))
            .unwrap()
            .unwrap();

        // around the lower end, which is closer
        assert_eq!(path, vec![p(20.0, 50.0), p(50.0, 19.0), p(80.0, 50.0)]);
        assert!((length(&path) - path.cost()).abs() < 1e-9);
        for pair in path.as_slice().windows(2) {
            assert!(plane.visible(pair[0], pair[1]));
        }
    }

    #[test]
    fn around_a_box() {
        let mut plane = Plane::with_config(
            100,
            100,
            PlannerConfig::default().with_propagation_magnitude(2.0),
        )
        .unwrap();
        plane
            .add_obstacle(
                Obstacle::polygon(vec![
                    p(40.0, 30.0),
                    p(60.0, 30.0),
                    p(60.0, 70.0),
                    p(40.0, 70.0),
                ])
                .unwrap(),
            )
            .unwrap();
        let path = AnyAngleSearch::new(&plane)
            .search(p(10.0, 50.0), p(90.0, 50.0))
            .unwrap()
            .unwrap();

        assert_eq!(path.len(), 4);
        assert!((length(&path) - path.cost()).abs() < 1e-9);
        for pair in path.as_slice().windows(2) {
            assert!(plane.visible(pair[0], pair[1]));
        }
    }

    #[test]
    fn enclosed_goal() {
        let mut plane = Plane::new(20, 20).unwrap();
        plane
            .add_obstacle(
                Obstacle::polygon(vec![p(5.0, 5.0), p(15.0, 5.0), p(15.0, 15.0), p(5.0, 15.0)])
                    .unwrap(),
            )
            .unwrap();
        let search = AnyAngleSearch::new(&plane);
        assert_eq!(search.search(p(1.0, 1.0), p(10.0, 10.0)), Ok(None));
        assert!(matches!(
            search.search(p(1.0, 1.0), p(30.0, 10.0)),
            Err(PlanError::OutOfBounds { .. })
        ));
    }
}
