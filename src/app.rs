//! Application state and the per-frame update loop.
//!
//! App owns the camera, the orbit parameters, the sampled path, the
//! propagator, and the cached star field. Input handlers mutate state
//! synchronously; the same frame's tick then propagates and redraws.

use crate::camera::CameraState;
use crate::celestial::{ReferenceBody, EARTH};
use crate::config::{ViewSettings, PATH_STEPS, TRAIL_CAPACITY};
use crate::drawing::{
    draw_body_wireframe, draw_orbit_path, draw_satellite, draw_star_field, draw_trail,
    COLOR_BACKGROUND,
};
use crate::orbital::{
    max_safe_eccentricity, orbit_path, OrbitalElements, Satellite, SpacecraftConfig,
};
use crate::starfield::StarField;
use chrono::{DateTime, Utc};
use eframe::egui;
use nalgebra::Vector3;
use std::collections::VecDeque;

pub struct App {
    pub(crate) body: ReferenceBody,
    pub(crate) camera: CameraState,
    pub(crate) elements: OrbitalElements,
    pub(crate) path: Vec<Vector3<f64>>,
    pub(crate) satellite: Option<Satellite>,
    pub(crate) trail: VecDeque<Vector3<f64>>,
    pub(crate) starfield: Option<StarField>,
    pub(crate) settings: ViewSettings,
    pub(crate) start_timestamp: DateTime<Utc>,
    pub(crate) sim_elapsed: f64,

    // Orbit parameters as edited in the panel; `elements` is rebuilt
    // from these (with eccentricity clamped) on every change.
    pub(crate) altitude_km: f64,
    pub(crate) inclination_deg: f64,
    pub(crate) eccentricity: f64,
    pub(crate) raan_deg: f64,
    pub(crate) arg_periapsis_deg: f64,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let body = EARTH;
        let altitude_km = 4000.0;
        let inclination_deg: f64 = 51.6;
        let elements = OrbitalElements {
            semi_major_axis: body.radius_km + altitude_km,
            eccentricity: 0.0,
            inclination: inclination_deg.to_radians(),
            raan: 0.0,
            arg_periapsis: 0.0,
        };
        let path = orbit_path(&elements, PATH_STEPS);
        let satellite = Satellite::new(elements, SpacecraftConfig::default(), body);

        Self {
            body,
            camera: CameraState::default(),
            elements,
            path,
            satellite: Some(satellite),
            trail: VecDeque::with_capacity(TRAIL_CAPACITY),
            starfield: None,
            settings: ViewSettings::default(),
            start_timestamp: Utc::now(),
            sim_elapsed: 0.0,
            altitude_km,
            inclination_deg,
            eccentricity: 0.0,
            raan_deg: 0.0,
            arg_periapsis_deg: 0.0,
        }
    }

    pub(crate) fn max_eccentricity(&self) -> f64 {
        max_safe_eccentricity(self.body.radius_km + self.altitude_km, &self.body)
    }

    /// Replace the orbital elements wholesale from the panel values,
    /// clamping eccentricity so periapsis stays above the body, then
    /// rebuild everything derived from them: the sampled path, the
    /// trail, and the propagator (same phase, clock reset).
    pub(crate) fn rebuild_orbit(&mut self) {
        self.eccentricity = self.eccentricity.clamp(0.0, self.max_eccentricity());
        let elements = OrbitalElements {
            semi_major_axis: self.body.radius_km + self.altitude_km,
            eccentricity: self.eccentricity,
            inclination: self.inclination_deg.to_radians(),
            raan: self.raan_deg.to_radians(),
            arg_periapsis: self.arg_periapsis_deg.to_radians(),
        };
        self.elements = elements;
        self.path = orbit_path(&elements, PATH_STEPS);
        self.trail.clear();
        let nu = self
            .satellite
            .as_ref()
            .map(|s| s.true_anomaly())
            .unwrap_or(0.0);
        self.satellite = Some(Satellite::with_true_anomaly(
            elements,
            SpacecraftConfig::default(),
            self.body,
            nu,
        ));
    }

    fn handle_view_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.drag(delta.x as f64, delta.y as f64);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll as f64);
            }
        }
    }

    fn tick(&mut self, dt: f64) {
        if !self.settings.animate {
            return;
        }
        let sim_dt = dt * self.settings.speed;
        self.sim_elapsed += sim_dt;
        if let Some(sat) = &mut self.satellite {
            sat.advance(sim_dt);
            if self.trail.len() == TRAIL_CAPACITY {
                self.trail.pop_front();
            }
            self.trail.push_back(sat.position());
        }
    }

    fn render_view(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let rect = response.rect;

        self.handle_view_input(ui, &response);

        // A resize starts a new star-field epoch; orbital state is
        // untouched.
        let needs_stars = self
            .starfield
            .as_ref()
            .map_or(true, |f| !f.fits(rect.width(), rect.height()));
        if needs_stars {
            let mut rng = rand::thread_rng();
            self.starfield = Some(StarField::generate(&mut rng, rect.width(), rect.height()));
        }

        let dt = ui.ctx().input(|i| i.stable_dt) as f64;
        self.tick(dt);

        // Fixed back-to-front order: stars, path, body, trail, marker.
        painter.rect_filled(rect, 0.0, COLOR_BACKGROUND);
        if self.settings.show_stars {
            if let Some(field) = &self.starfield {
                draw_star_field(&painter, rect, field);
            }
        }
        if self.settings.show_path {
            draw_orbit_path(&painter, rect, &self.camera, &self.path);
        }
        draw_body_wireframe(&painter, rect, &self.camera, &self.body);
        if self.settings.show_trail {
            draw_trail(&painter, rect, &self.camera, self.trail.iter().copied());
        }
        if let Some(position) = self.satellite_position() {
            draw_satellite(&painter, rect, &self.camera, position);
        }
    }

    /// World-frame satellite position, or None before the propagator
    /// exists — the marker is simply skipped that frame.
    pub(crate) fn satellite_position(&self) -> Option<Vector3<f64>> {
        self.satellite.as_ref().map(Satellite::position)
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls")
            .default_width(260.0)
            .show(ctx, |ui| self.show_settings(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(COLOR_BACKGROUND))
            .show(ctx, |ui| self.render_view(ui));

        ctx.request_repaint();
    }
}
