use geo_types::{Line, LineString, MultiLineString};

/// Calculation of the length of a linear geometry.
pub trait EuclideanLength {
    /// The sum of the lengths of the geometry's segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_planar::line_string;
    /// use geo_planar::EuclideanLength;
    ///
    /// let line_string = line_string![
    ///     (x: 0.0, y: 0.0),
    ///     (x: 3.0, y: 4.0),
    ///     (x: 3.0, y: 5.0),
    /// ];
    /// assert_eq!(line_string.euclidean_length(), 6.0);
    /// ```
    fn euclidean_length(&self) -> f64;
}

impl EuclideanLength for Line<f64> {
    fn euclidean_length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }
}

impl EuclideanLength for LineString<f64> {
    fn euclidean_length(&self) -> f64 {
        self.lines().map(|line| line.euclidean_length()).sum()
    }
}

impl EuclideanLength for MultiLineString<f64> {
    fn euclidean_length(&self) -> f64 {
        self.0.iter().map(|line| line.euclidean_length()).sum()
    }
}
