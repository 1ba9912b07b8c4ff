use nalgebra::{Point3, Vector3};

/// Regular `(2n+1)²` grid on the plane through `origin` spanned by `u`, `v`.
pub fn plane_grid(
    origin: Point3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    n: i32,
    step: f64,
) -> Vec<Point3<f64>> {
    assert!(n > 0 && step > 0.0, "grid must be non-empty");
    let mut pts = Vec::with_capacity(((2 * n + 1) * (2 * n + 1)) as usize);
    for i in -n..=n {
        for j in -n..=n {
            pts.push(origin + u * (i as f64 * step) + v * (j as f64 * step));
        }
    }
    pts
}

/// Rings of samples on a sphere of `radius` centred at the origin, around the
/// north pole, up to polar angle `max_polar`. The pole itself comes first.
pub fn sphere_cap(radius: f64, max_polar: f64, rings: usize, per_ring: usize) -> Vec<Point3<f64>> {
    assert!(rings > 0 && per_ring >= 3, "cap needs rings of at least three points");
    let mut pts = vec![Point3::new(0.0, 0.0, radius)];
    for ring in 1..=rings {
        let polar = max_polar * ring as f64 / rings as f64;
        // Stagger alternate rings so no two rings share an azimuth.
        let offset = if ring % 2 == 0 { 0.5 } else { 0.0 };
        for step in 0..per_ring {
            let azimuth = (step as f64 + offset) * std::f64::consts::TAU / per_ring as f64;
            pts.push(Point3::new(
                radius * polar.sin() * azimuth.cos(),
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
            ));
        }
    }
    pts
}

/// Grid samples of `z = ½(a·x² − b·y²)`.
pub fn saddle_grid(a: f64, b: f64, n: i32, step: f64) -> Vec<Point3<f64>> {
    let mut pts = Vec::new();
    for i in -n..=n {
        for j in -n..=n {
            let x = i as f64 * step;
            let y = j as f64 * step;
            pts.push(Point3::new(x, y, 0.5 * (a * x * x - b * y * y)));
        }
    }
    pts
}

/// Indices of the `k` points closest to `points[query]` (brute force).
pub fn knn(points: &[Point3<f64>], query: usize, k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let da = (points[a] - points[query]).norm_squared();
        let db = (points[b] - points[query]).norm_squared();
        da.total_cmp(&db).then(a.cmp(&b))
    });
    order.truncate(k);
    order
}

/// Near-uniform samples over a full sphere of `radius` (golden-angle spiral).
pub fn fibonacci_sphere(radius: f64, count: usize) -> Vec<Point3<f64>> {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - z * z).sqrt();
            let theta = golden * i as f64;
            Point3::new(radius * r * theta.cos(), radius * r * theta.sin(), radius * z)
        })
        .collect()
}
