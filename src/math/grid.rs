use nalgebra::DVector;
use serde::Serialize;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// GridError
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("a grid needs at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("grid bounds must be finite, got [{0}, {1}]")]
    NonFiniteBounds(f64, f64),

    #[error("a grid cannot be empty")]
    Empty,

    #[error("sample lengths differ: {x} grid points but {y} values")]
    LengthMismatch { x: usize, y: usize }
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid
// ─────────────────────────────────────────────────────────────────────────────

/// 繪圖用的自變數取樣點，依序排列。
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    points: DVector<f64>
}

impl Grid {
    /// 等距取樣 `count` 個點，包含兩端點。
    pub fn linspace(start: f64, end: f64, count: usize) -> Result<Grid, GridError> {
        if count < 2 {
            return Err(GridError::TooFewPoints(count));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(GridError::NonFiniteBounds(start, end));
        }
        let step = (end - start) / (count - 1) as f64;
        let points = DVector::from_fn(count, |i, _| {
            if i == count - 1 {
                end
            } else {
                start + step * i as f64
            }
        });
        Ok(Grid { points })
    }

    pub fn from_points(points: Vec<f64>) -> Result<Grid, GridError> {
        if points.is_empty() {
            return Err(GridError::Empty);
        }
        Ok(Grid {
            points: DVector::from_vec(points)
        })
    }

    pub fn points(&self) -> &DVector<f64> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn evaluate<F>(&self, f: F) -> Samples
    where
        F: Fn(f64) -> f64
    {
        Samples {
            x: self.points.clone(),
            y: self.points.map(f)
        }
    }

    /// Index of the grid point closest to `x`.
    pub fn nearest_index(&self, x: f64) -> usize {
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (i, point) in self.points.iter().enumerate() {
            let distance = (point - x).abs();
            if distance < best_distance {
                best_distance = distance;
                best_index = i;
            }
        }
        best_index
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extremum
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    index: usize,
    x: f64,
    value: f64
}

impl Extremum {
    pub fn new(index: usize, x: f64, value: f64) -> Extremum {
        Extremum { index, x, value }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Samples
// ─────────────────────────────────────────────────────────────────────────────

/// 取樣點與對應函數值，兩者長度必須一致。
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    x: DVector<f64>,
    y: DVector<f64>
}

impl Samples {
    pub fn new(x: DVector<f64>, y: DVector<f64>) -> Result<Samples, GridError> {
        if x.len() != y.len() {
            return Err(GridError::LengthMismatch {
                x: x.len(),
                y: y.len()
            });
        }
        Ok(Samples { x, y })
    }

    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn at(&self, index: usize) -> (f64, f64) {
        (self.x[index], self.y[index])
    }

    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.argmax().map(|extremum| extremum.value())
    }

    pub fn argmax(&self) -> Option<Extremum> {
        self.find_extremum(|candidate, best| candidate > best)
    }

    pub fn argmin(&self) -> Option<Extremum> {
        self.find_extremum(|candidate, best| candidate < best)
    }

    fn find_extremum(&self, better: fn(f64, f64) -> bool) -> Option<Extremum> {
        let mut best: Option<Extremum> = None;
        for (i, (&x, &y)) in self.x.iter().zip(self.y.iter()).enumerate() {
            if y.is_nan() {
                continue;
            }
            match best {
                Some(current) if !better(y, current.value) => {}
                _ => best = Some(Extremum::new(i, x, y))
            }
        }
        best
    }

    /// 梯形法數值積分。
    pub fn trapezoid(&self) -> f64 {
        let n = self.x.len();
        (1..n)
            .map(|i| 0.5 * (self.x[i] - self.x[i - 1]) * (self.y[i] + self.y[i - 1]))
            .sum()
    }
}
