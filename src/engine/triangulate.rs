use egui::{Pos2, Vec2};

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area; the sign gives the winding
fn signed_area(ring: &[Pos2]) -> f32 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Whether `p` lies inside or on the triangle `abc` of the given winding
fn in_triangle(a: Pos2, b: Pos2, c: Pos2, p: Pos2, winding: f32) -> bool {
    cross(b - a, p - a) * winding >= 0.0
        && cross(c - b, p - b) * winding >= 0.0
        && cross(a - c, p - c) * winding >= 0.0
}

/// Ear-clipping triangulation of a simple polygon ring.
///
/// Returns triangle indices into `ring`. A repeated closing vertex is
/// ignored. Self-intersecting rings may come back partially covered.
pub(crate) fn triangulate(ring: &[Pos2]) -> Vec<u32> {
    let ring = match ring {
        [first, rest @ .., last] if first == last && !rest.is_empty() => &ring[..ring.len() - 1],
        _ => ring,
    };
    if ring.len() < 3 {
        return Vec::new();
    }
    let winding = signed_area(ring).signum();
    if winding == 0.0 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..ring.len()).collect();
    let mut indices = Vec::with_capacity((ring.len() - 2) * 3);
    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let (prev, cur, next) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
            let (a, b, c) = (ring[prev], ring[cur], ring[next]);
            cross(b - a, c - b) * winding > 0.0
                && !remaining
                    .iter()
                    .filter(|&&j| j != prev && j != cur && j != next)
                    .any(|&j| in_triangle(a, b, c, ring[j], winding))
        });
        let Some(i) = ear else {
            break;
        };
        indices.extend([remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]].map(|v| v as u32));
        remaining.remove(i);
    }
    if remaining.len() == 3 {
        indices.extend(remaining.iter().map(|&v| v as u32));
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f32, f32)]) -> Vec<Pos2> {
        points.iter().map(|&(x, y)| Pos2::new(x, y)).collect()
    }

    fn triangle_area(a: Pos2, b: Pos2, c: Pos2) -> f32 {
        cross(b - a, c - a).abs() / 2.0
    }

    #[test]
    fn concave_ring_does_not_cover_its_notch() {
        // Closed "M"-like ring with a notch cut down from the top edge
        let points = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0), (0.0, 0.0)]);
        let indices = triangulate(&points);
        assert_eq!(indices.len(), 9);

        let triangles: Vec<[Pos2; 3]> = indices
            .chunks_exact(3)
            .map(|t| [points[t[0] as usize], points[t[1] as usize], points[t[2] as usize]])
            .collect();
        let area: f32 = triangles.iter().map(|[a, b, c]| triangle_area(*a, *b, *c)).sum();
        assert!((area - 10.0).abs() < 1e-4);

        let notch = Pos2::new(2.0, 3.0);
        assert!(!triangles.iter().any(|[a, b, c]| {
            let w = cross(*b - *a, *c - *b).signum();
            in_triangle(*a, *b, *c, notch, w)
        }));
        let inside = Pos2::new(3.0, 2.0);
        assert!(triangles.iter().any(|[a, b, c]| {
            let w = cross(*b - *a, *c - *b).signum();
            in_triangle(*a, *b, *c, inside, w)
        }));
    }

    #[test]
    fn square_is_two_triangles_either_winding() {
        let square = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(triangulate(&square).len(), 6);
        let reversed: Vec<Pos2> = square.iter().rev().copied().collect();
        assert_eq!(triangulate(&reversed).len(), 6);
    }

    #[test]
    fn degenerate_rings_yield_nothing() {
        assert!(triangulate(&ring(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).is_empty());
        assert!(triangulate(&ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).is_empty());
    }
}
