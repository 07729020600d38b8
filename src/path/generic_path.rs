use super::Cost;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc as Arc;

/// A Path through a workspace
///
/// Stores a non-empty sequence of points and the total Cost of walking along them. On a Grid the
/// points are [`Coordinate`](crate::Coordinate)s, on a Plane they are
/// [`Position`](crate::Position)s.
///
/// Cloning a Path is cheap, the points are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    path: Arc<[P]>,
    cost: Cost,
}

impl<P> Path<P> {
    /// creates a new Path with the given sequence of points and total Cost
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        debug_assert!(!path.is_empty(), "a Path needs at least one point");
        Path {
            path: path.into(),
            cost,
        }
    }

    /// creates a new Path by copying the given points
    pub fn from_slice(path: &[P], cost: Cost) -> Path<P>
    where
        P: Clone,
    {
        Path::new(path.to_vec(), cost)
    }

    /// a Path that consists of a single point and costs nothing
    pub fn single(point: P) -> Path<P> {
        Path::new(vec![point], 0.0)
    }

    /// the total Cost of the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// the number of points in the Path
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// always `false` for Paths created by this crate
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// the first point of the Path
    pub fn start(&self) -> &P {
        &self.path[0]
    }

    /// the last point of the Path
    pub fn end(&self) -> &P {
        &self.path[self.path.len() - 1]
    }

    /// Returns an Iterator over the points of the Path
    pub fn iter(&self) -> std::slice::Iter<P> {
        self.path.iter()
    }

    /// the points of the Path as a slice
    pub fn as_slice(&self) -> &[P] {
        &self.path
    }

    /// copies the points into a Vec
    pub fn to_vec(&self) -> Vec<P>
    where
        P: Clone,
    {
        self.path.to_vec()
    }
}

use std::ops::Index;

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.path[..] == rhs[..]
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        &self.path[..] == *rhs
    }
}

use std::cmp::Ordering;

impl<P: PartialEq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

use std::fmt;
impl<P: fmt::Debug> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{:?}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {:?}", p)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {

    use super::Path;
    #[test]
    fn index() {
        let path = Path::new(vec![(4, 0), (2, 0), (0, 0)], 4.0);

        assert_eq!(path[0], (4, 0));
        assert_eq!(path[1], (2, 0));
        assert_eq!(path[2], (0, 0));
        assert_eq!(*path.start(), (4, 0));
        assert_eq!(*path.end(), (0, 0));
    }

    #[test]
    fn display() {
        let path = Path::new(vec![(4, 0), (2, 0), (0, 0)], 4.5);

        assert_eq!(
            &format!("{}", path),
            "Path[Cost = 4.5]: (4, 0) -> (2, 0) -> (0, 0)"
        );
    }

    #[test]
    fn single() {
        let path = Path::single((1, 1));

        assert_eq!(path.len(), 1);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(path, vec![(1, 1)]);
    }
}
