use super::{Vector2, TOLERANCE};

/// Determinant of the 2×2 matrix with columns `a` and `b`.
#[must_use]
pub fn det2(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Adjugate-based solve of the 2×2 linear system `A·x = rhs`,
/// where `A` has columns `a` and `b`.
///
/// Returns `None` when the system is singular (`|det| < TOLERANCE`),
/// which callers must treat as "no intersection" for parallel or
/// coincident lines.
#[must_use]
pub fn solve2(a: &Vector2, b: &Vector2, rhs: &Vector2) -> Option<(f64, f64)> {
    let det = det2(a, b);
    if det.abs() < TOLERANCE {
        return None;
    }
    // adj(A)·rhs, with A = [a.x b.x; a.y b.y].
    let t = (b.y * rhs.x - b.x * rhs.y) / det;
    let h = (-a.y * rhs.x + a.x * rhs.y) / det;
    Some((t, h))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn det2_columns() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((det2(&a, &b) - (-2.0)).abs() < TOLERANCE);
    }

    #[test]
    fn solve2_identity() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        let rhs = Vector2::new(3.0, 7.0);
        let (t, h) = solve2(&a, &b, &rhs).unwrap();
        assert!((t - 3.0).abs() < TOLERANCE);
        assert!((h - 7.0).abs() < TOLERANCE);
    }

    #[test]
    fn solve2_general() {
        // [2 1; 1 3]·(t,h) = (5, 10) has the solution t = 1, h = 3.
        let a = Vector2::new(2.0, 1.0);
        let b = Vector2::new(1.0, 3.0);
        let rhs = Vector2::new(5.0, 10.0);
        let (t, h) = solve2(&a, &b, &rhs).unwrap();
        assert!((t - 1.0).abs() < TOLERANCE);
        assert!((h - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn solve2_singular_returns_none() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(2.0, 4.0);
        let rhs = Vector2::new(1.0, 1.0);
        assert!(solve2(&a, &b, &rhs).is_none());
    }
}
