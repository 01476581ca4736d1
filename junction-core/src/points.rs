//! Immutable point storage and coordinate ingestion.
//!
//! A [`PointStore`] owns an ordered set of 3-D points. Identifiers are the
//! zero-based input position and never change. Every constructor validates
//! arity and finiteness up front so the rest of the pipeline can assume
//! well-formed coordinates.

use std::io::BufRead;

use crate::error::PointError;

/// Stable identifier assigned to a point by its input position.
pub type PointId = usize;

/// Names one of the three coordinate axes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    /// The first coordinate.
    X,
    /// The second coordinate.
    Y,
    /// The third coordinate.
    Z,
}

/// A single validated point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    id: PointId,
    coords: [f64; 3],
}

impl Point {
    /// Returns the point identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> PointId { self.id }

    /// Returns the x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub fn x(&self) -> f64 { self.coords[0] }

    /// Returns the y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub fn y(&self) -> f64 { self.coords[1] }

    /// Returns the z coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub fn z(&self) -> f64 { self.coords[2] }

    /// Returns the coordinate along `axis`.
    #[must_use]
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x(),
            Axis::Y => self.y(),
            Axis::Z => self.z(),
        }
    }

    /// Returns all three coordinates in `x, y, z` order.
    #[must_use]
    #[rustfmt::skip]
    pub fn coords(&self) -> [f64; 3] { self.coords }
}

/// Ordered, immutable collection of points.
///
/// # Examples
/// ```
/// use junction_core::PointStore;
///
/// let points = PointStore::parse_str("0,0,0\n0,0,3\n").expect("input is valid");
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.get(1).map(|p| p.z()), Some(3.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    /// Builds a store from coordinate triples.
    ///
    /// # Errors
    /// Returns [`PointError::NonFinite`] when any coordinate is NaN or infinite.
    pub fn from_coordinates<I>(coordinates: I) -> Result<Self, PointError>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let points = coordinates
            .into_iter()
            .enumerate()
            .map(|(id, coords)| validated_point(id, coords))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    /// Builds a store from rows of arbitrary length, rejecting any row that
    /// does not hold exactly three coordinates.
    ///
    /// # Errors
    /// Returns [`PointError::WrongArity`] for rows with the wrong number of
    /// values and [`PointError::NonFinite`] for NaN or infinite values.
    pub fn try_from_rows<I, R>(rows: I) -> Result<Self, PointError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let points = rows
            .into_iter()
            .enumerate()
            .map(|(id, row)| {
                let coords: [f64; 3] =
                    row.as_ref()
                        .try_into()
                        .map_err(|_| PointError::WrongArity {
                            entry: id.saturating_add(1),
                            found: row.as_ref().len(),
                        })?;
                validated_point(id, coords)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    /// Parses one point per non-blank line. Fields may be separated by commas,
    /// whitespace, or both.
    ///
    /// # Errors
    /// Returns a [`PointError`] describing the first malformed line.
    pub fn parse_str(text: &str) -> Result<Self, PointError> {
        Self::from_reader(text.as_bytes())
    }

    /// Reads one point per non-blank line from `reader`.
    ///
    /// # Errors
    /// Returns [`PointError::Read`] when the reader fails and the parse errors
    /// documented on [`Self::parse_str`] for malformed lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, PointError> {
        let mut points = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let entry = index.saturating_add(1);
            let line = line.map_err(|err| PointError::Read {
                entry,
                message: err.to_string(),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let coords = parse_line(&line, entry)?;
            points.push(validated_point_at(points.len(), coords, entry)?);
        }
        Ok(Self { points })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point with identifier `id`, if present.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Returns the points in identifier order.
    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over the points in identifier order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_line(line: &str, entry: usize) -> Result<[f64; 3], PointError> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect();

    let [x, y, z] = fields.as_slice() else {
        return Err(PointError::WrongArity {
            entry,
            found: fields.len(),
        });
    };

    Ok([
        parse_field(x, entry, 1)?,
        parse_field(y, entry, 2)?,
        parse_field(z, entry, 3)?,
    ])
}

fn parse_field(raw: &str, entry: usize, field: usize) -> Result<f64, PointError> {
    raw.parse::<f64>().map_err(|_| PointError::NotANumber {
        entry,
        field,
        value: raw.to_owned(),
    })
}

fn validated_point(id: PointId, coords: [f64; 3]) -> Result<Point, PointError> {
    validated_point_at(id, coords, id.saturating_add(1))
}

fn validated_point_at(id: PointId, coords: [f64; 3], entry: usize) -> Result<Point, PointError> {
    for (index, value) in coords.iter().enumerate() {
        if !value.is_finite() {
            return Err(PointError::NonFinite {
                entry,
                field: index.saturating_add(1),
                value: *value,
            });
        }
    }
    Ok(Point { id, coords })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::commas("1,2,3\n4,5,6\n")]
    #[case::whitespace("1 2 3\n4\t5\t6\n")]
    #[case::mixed_with_blank_lines("\n1, 2, 3\n\n  4,5 ,6  \n\n")]
    fn parse_str_accepts_supported_layouts(#[case] text: &str) {
        let points = PointStore::parse_str(text).expect("input must parse");
        assert_eq!(points.len(), 2);
        assert_eq!(points.get(0).map(Point::coords), Some([1.0, 2.0, 3.0]));
        assert_eq!(points.get(1).map(Point::coords), Some([4.0, 5.0, 6.0]));
        assert_eq!(points.get(1).map(Point::id), Some(1));
    }

    #[rstest]
    #[case::too_few("1,2\n", 1, 2)]
    #[case::too_many("1,2,3\n1,2,3,4\n", 2, 4)]
    fn parse_str_rejects_wrong_arity(
        #[case] text: &str,
        #[case] entry: usize,
        #[case] found: usize,
    ) {
        let err = PointStore::parse_str(text).expect_err("arity must be checked");
        assert_eq!(err, PointError::WrongArity { entry, found });
    }

    #[test]
    fn parse_str_reports_line_numbers_across_blank_lines() {
        let err = PointStore::parse_str("1,2,3\n\n4,x,6\n").expect_err("x is not a number");
        assert_eq!(
            err,
            PointError::NotANumber {
                entry: 3,
                field: 2,
                value: "x".to_owned(),
            }
        );
    }

    #[test]
    fn parse_str_rejects_non_finite_values() {
        let err = PointStore::parse_str("1,2,inf\n").expect_err("inf is rejected");
        assert!(matches!(
            err,
            PointError::NonFinite {
                entry: 1,
                field: 3,
                ..
            }
        ));
    }

    #[test]
    fn try_from_rows_checks_arity() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0]];
        let err = PointStore::try_from_rows(rows).expect_err("second row is short");
        assert_eq!(err, PointError::WrongArity { entry: 2, found: 2 });
    }

    #[test]
    fn from_coordinates_assigns_ids_in_order() {
        let points =
            PointStore::from_coordinates([[3.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 0.0, 0.0]])
                .expect("coordinates are finite");
        let ids: Vec<_> = points.iter().map(Point::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(points.get(2).map(|p| p.coordinate(Axis::X)), Some(1.0));
    }

    #[test]
    fn from_coordinates_rejects_nan() {
        let err = PointStore::from_coordinates([[0.0, 0.0, 0.0], [0.0, f64::NAN, 0.0]])
            .expect_err("NaN is rejected");
        assert!(matches!(
            err,
            PointError::NonFinite {
                entry: 2,
                field: 2,
                ..
            }
        ));
    }
}
