use jet_normals::weighting::UniformWeights;
use jet_normals::{EstimatorParams, JetEstimator, OrientationRule, PointNeighborhood};
use nalgebra::Point3;

fn main() {
    // Demo stub: samples a cap of a unit sphere around the north pole and
    // estimates normal and curvature at the pole.
    let radius = 1.0;
    let mut pts = Vec::new();
    for ring in 1..=4 {
        let polar = 0.02 * ring as f64;
        for step in 0..12 {
            let azimuth = step as f64 * std::f64::consts::TAU / 12.0;
            pts.push(Point3::new(
                radius * polar.sin() * azimuth.cos(),
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
            ));
        }
    }
    let pole = Point3::new(0.0, 0.0, radius);
    let nbhd = PointNeighborhood::new(pole, &pts);

    let det = JetEstimator::new(
        EstimatorParams::default().with_orientation(OrientationRule::TowardPoint(Point3::origin())),
    );
    match det.estimate_with(&nbhd, &UniformWeights) {
        Ok(est) => println!(
            "normal=[{:.4}, {:.4}, {:.4}] k1={:.4} k2={:.4} residual={:.2e}",
            est.normal.x,
            est.normal.y,
            est.normal.z,
            est.curvature.k1,
            est.curvature.k2,
            est.residual_rms
        ),
        Err(err) => eprintln!("fit failed: {err}"),
    }
}
