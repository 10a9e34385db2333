//! Keplerian orbital mechanics.
//!
//! One conversion, `elements_to_inertial_point`, feeds both the static
//! path sampling and the live propagator.

use crate::celestial::ReferenceBody;
use crate::config::PERIAPSIS_MARGIN_KM;
use nalgebra::Vector3;
use std::f64::consts::TAU;

/// Classical orbital elements. Angles in radians; lengths in km.
/// Replaced wholesale on every reparameterization, never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_periapsis: f64,
}

impl OrbitalElements {
    pub fn periapsis_radius(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_radius(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

/// Largest eccentricity that keeps periapsis at least the configured
/// margin above the body surface for the given semi-major axis.
pub fn max_safe_eccentricity(semi_major_axis: f64, body: &ReferenceBody) -> f64 {
    (1.0 - (body.radius_km + PERIAPSIS_MARGIN_KM) / semi_major_axis).max(0.0)
}

/// Rotate perifocal-plane coordinates into the inertial frame using the
/// combined 3-1-3 matrix from RAAN, inclination, and argument of
/// periapsis. One matrix application, not three chained axis rotations.
fn perifocal_to_inertial(el: &OrbitalElements, x_orb: f64, y_orb: f64) -> Vector3<f64> {
    let (sin_raan, cos_raan) = el.raan.sin_cos();
    let (sin_i, cos_i) = el.inclination.sin_cos();
    let (sin_w, cos_w) = el.arg_periapsis.sin_cos();

    Vector3::new(
        (cos_raan * cos_w - sin_raan * sin_w * cos_i) * x_orb
            + (-cos_raan * sin_w - sin_raan * cos_w * cos_i) * y_orb,
        (sin_raan * cos_w + cos_raan * sin_w * cos_i) * x_orb
            + (-sin_raan * sin_w + cos_raan * cos_w * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    )
}

/// Inertial position (km) on the orbit at the given true anomaly.
pub fn elements_to_inertial_point(el: &OrbitalElements, true_anomaly: f64) -> Vector3<f64> {
    let a = el.semi_major_axis;
    let e = el.eccentricity;
    let r = a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());
    perifocal_to_inertial(el, r * true_anomaly.cos(), r * true_anomaly.sin())
}

/// Sample the full ellipse at `steps` equal true-anomaly increments over
/// [0, 2π). The result is an open sequence the renderer closes back to
/// its first point.
pub fn orbit_path(el: &OrbitalElements, steps: usize) -> Vec<Vector3<f64>> {
    (0..steps)
        .map(|i| elements_to_inertial_point(el, TAU * i as f64 / steps as f64))
        .collect()
}

/// Physical parameters accepted at construction. Mass and propulsion
/// limits do not influence the trajectory yet; they are displayed and
/// reserved for a powered-flight extension.
#[derive(Clone, Copy, Debug)]
pub struct SpacecraftConfig {
    pub mass_kg: f64,
    pub isp_s: f64,
    pub max_thrust_n: f64,
}

impl Default for SpacecraftConfig {
    fn default() -> Self {
        Self {
            mass_kg: 420.0,
            isp_s: 300.0,
            max_thrust_n: 0.0,
        }
    }
}

/// Satellite state advanced by closed-form mean motion.
#[derive(Clone, Debug)]
pub struct Satellite {
    pub elements: OrbitalElements,
    pub config: SpacecraftConfig,
    body: ReferenceBody,
    true_anomaly: f64,
    elapsed: f64,
}

impl Satellite {
    pub fn new(elements: OrbitalElements, config: SpacecraftConfig, body: ReferenceBody) -> Self {
        Self::with_true_anomaly(elements, config, body, 0.0)
    }

    /// Rebuild on new elements while keeping the current phase, with the
    /// internal clock reset.
    pub fn with_true_anomaly(
        elements: OrbitalElements,
        config: SpacecraftConfig,
        body: ReferenceBody,
        true_anomaly: f64,
    ) -> Self {
        Self {
            elements,
            config,
            body,
            true_anomaly: true_anomaly.rem_euclid(TAU),
            elapsed: 0.0,
        }
    }

    /// Advance by simulated seconds using mean motion. The near-circular
    /// approximation treats the mean-anomaly rate as the true-anomaly
    /// rate.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        let a = self.elements.semi_major_axis;
        let n = (self.body.mu / (a * a * a)).sqrt();
        self.true_anomaly = (self.true_anomaly + n * dt).rem_euclid(TAU);
    }

    pub fn true_anomaly(&self) -> f64 {
        self.true_anomaly
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Current inertial position, km.
    pub fn position(&self) -> Vector3<f64> {
        elements_to_inertial_point(&self.elements, self.true_anomaly)
    }

    /// Current inertial velocity, km/s.
    pub fn velocity(&self) -> Vector3<f64> {
        let el = &self.elements;
        let mu = self.body.mu;
        let h = (mu * el.semi_major_axis * (1.0 - el.eccentricity * el.eccentricity)).sqrt();
        let nu = self.true_anomaly;
        perifocal_to_inertial(
            el,
            -mu / h * nu.sin(),
            mu / h * (el.eccentricity + nu.cos()),
        )
    }

    pub fn speed(&self) -> f64 {
        self.velocity().norm()
    }

    pub fn orbital_period(&self) -> f64 {
        let a = self.elements.semi_major_axis;
        TAU * (a * a * a / self.body.mu).sqrt()
    }

    pub fn altitude(&self) -> f64 {
        self.position().norm() - self.body.radius_km
    }

    pub fn apoapsis_altitude(&self) -> f64 {
        self.elements.apoapsis_radius() - self.body.radius_km
    }

    pub fn periapsis_altitude(&self) -> f64 {
        self.elements.periapsis_radius() - self.body.radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::EARTH;
    use crate::config::PATH_STEPS;
    use approx::assert_relative_eq;

    fn elements(a: f64, e: f64, i_deg: f64, raan_deg: f64, w_deg: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: i_deg.to_radians(),
            raan: raan_deg.to_radians(),
            arg_periapsis: w_deg.to_radians(),
        }
    }

    #[test]
    fn circular_path_keeps_constant_radius() {
        let el = elements(10371.0, 0.0, 51.6, 30.0, 45.0);
        for p in orbit_path(&el, PATH_STEPS) {
            assert_relative_eq!(p.norm(), 10371.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn elliptical_path_spans_periapsis_to_apoapsis() {
        let el = elements(12000.0, 0.3, 28.5, 80.0, 120.0);
        let path = orbit_path(&el, PATH_STEPS);
        assert_eq!(path.len(), PATH_STEPS);

        let radii: Vec<f64> = path.iter().map(|p| p.norm()).collect();
        let min = radii.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = radii.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(min, el.periapsis_radius(), epsilon = 1e-6);
        assert_relative_eq!(max, el.apoapsis_radius(), epsilon = 1e-6);
        // Extremes land on the expected samples: ν = 0° and ν = 180°.
        assert_relative_eq!(radii[0], el.periapsis_radius(), epsilon = 1e-6);
        assert_relative_eq!(radii[180], el.apoapsis_radius(), epsilon = 1e-6);
    }

    #[test]
    fn path_sample_count_is_exact() {
        let el = elements(8000.0, 0.1, 10.0, 0.0, 0.0);
        assert_eq!(orbit_path(&el, 360).len(), 360);
        assert_eq!(orbit_path(&el, 90).len(), 90);
    }

    #[test]
    fn ascending_node_start_lies_on_x_axis() {
        // a = body radius + 4000 km, ν = 0 at the ascending node when
        // RAAN = ω = 0: inclination alone cannot lift the node off the
        // equatorial plane.
        let el = elements(10371.0, 0.0, 51.6, 0.0, 0.0);
        let p = elements_to_inertial_point(&el, 0.0);
        assert_relative_eq!(p.x, 10371.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn safe_eccentricity_protects_periapsis() {
        for a in [7000.0, 10371.0, 26560.0, 42164.0] {
            let e = max_safe_eccentricity(a, &EARTH);
            assert!(a * (1.0 - e) >= EARTH.radius_km + PERIAPSIS_MARGIN_KM - 1e-9);
        }
        // Semi-major axes below the protected radius leave no room at all.
        assert_eq!(max_safe_eccentricity(6000.0, &EARTH), 0.0);
    }

    #[test]
    fn advance_wraps_true_anomaly() {
        let el = elements(6779.0, 0.0, 51.6, 0.0, 0.0);
        let mut sat = Satellite::new(el, SpacecraftConfig::default(), EARTH);
        let period = sat.orbital_period();
        sat.advance(period * 7.25);
        assert!(sat.true_anomaly() >= 0.0 && sat.true_anomaly() < TAU);
        assert_relative_eq!(sat.true_anomaly(), TAU * 0.25, epsilon = 1e-6);
    }

    #[test]
    fn circular_orbit_period_matches_vis_viva() {
        let el = elements(6779.0, 0.0, 51.6, 0.0, 0.0);
        let sat = Satellite::new(el, SpacecraftConfig::default(), EARTH);
        // ISS-class orbit: a touch over 92 minutes.
        assert_relative_eq!(sat.orbital_period(), 5553.6, epsilon = 10.0);
        assert_relative_eq!(sat.speed(), EARTH.circular_speed(6779.0), epsilon = 1e-6);
    }

    #[test]
    fn propagator_position_tracks_path_builder() {
        let el = elements(9000.0, 0.2, 63.4, 40.0, 270.0);
        let mut sat = Satellite::new(el, SpacecraftConfig::default(), EARTH);
        sat.advance(1234.5);
        let from_path = elements_to_inertial_point(&el, sat.true_anomaly());
        assert_relative_eq!(sat.position(), from_path, epsilon = 1e-9);
    }

    #[test]
    fn rebuild_preserves_phase_and_resets_clock() {
        let el = elements(9000.0, 0.1, 45.0, 0.0, 0.0);
        let mut sat = Satellite::new(el, SpacecraftConfig::default(), EARTH);
        sat.advance(600.0);
        let nu = sat.true_anomaly();
        let rebuilt = Satellite::with_true_anomaly(
            elements(9000.0, 0.2, 45.0, 0.0, 0.0),
            SpacecraftConfig::default(),
            EARTH,
            nu,
        );
        assert_relative_eq!(rebuilt.true_anomaly(), nu);
        assert_eq!(rebuilt.elapsed(), 0.0);
    }
}
