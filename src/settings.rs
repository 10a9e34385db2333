//! Side-panel UI for orbit parameters, camera, simulation, and display
//! options.

use crate::app::App;
use crate::camera::CameraState;
use chrono::Duration;
use eframe::egui;

impl App {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Orbit").strong());

        let mut orbit_changed = false;
        ui.horizontal(|ui| {
            ui.label("Alt:");
            if ui
                .add(
                    egui::DragValue::new(&mut self.altitude_km)
                        .range(800.0..=60000.0)
                        .speed(50.0)
                        .suffix(" km"),
                )
                .changed()
            {
                orbit_changed = true;
            }
        });
        if ui
            .add(
                egui::Slider::new(&mut self.inclination_deg, 0.0..=180.0)
                    .suffix("°")
                    .text("Inclination"),
            )
            .changed()
        {
            orbit_changed = true;
        }
        let max_e = self.max_eccentricity();
        if ui
            .add(
                egui::Slider::new(&mut self.eccentricity, 0.0..=max_e.max(1e-6))
                    .max_decimals(3)
                    .text("Eccentricity"),
            )
            .changed()
        {
            orbit_changed = true;
        }
        ui.horizontal(|ui| {
            ui.label("RAAN:");
            if ui
                .add(
                    egui::DragValue::new(&mut self.raan_deg)
                        .range(0.0..=360.0)
                        .speed(1.0)
                        .suffix("°"),
                )
                .changed()
            {
                orbit_changed = true;
            }
            ui.label("ω:");
            if ui
                .add(
                    egui::DragValue::new(&mut self.arg_periapsis_deg)
                        .range(0.0..=360.0)
                        .speed(1.0)
                        .suffix("°"),
                )
                .changed()
            {
                orbit_changed = true;
            }
        });
        if orbit_changed {
            self.rebuild_orbit();
        }

        ui.separator();
        ui.label(egui::RichText::new("Camera").strong());
        ui.label(format!(
            "Tilt: {:.0}°  Yaw: {:.0}°",
            self.camera.rotation_x.to_degrees(),
            self.camera.rotation_y.to_degrees().rem_euclid(360.0),
        ));
        ui.label(format!("Distance: {:.0}", self.camera.distance));
        if ui.button("Reset view").clicked() {
            self.camera = CameraState::default();
        }
        ui.weak("Drag to rotate, scroll to zoom");

        ui.separator();
        ui.label(egui::RichText::new("Simulation").strong());
        ui.horizontal(|ui| {
            ui.label("Speed:");
            ui.add(
                egui::DragValue::new(&mut self.settings.speed)
                    .range(1.0..=10000.0)
                    .speed(1.0)
                    .suffix("x"),
            );
            let pause_label = if self.settings.animate { "⏸" } else { "▶" };
            if ui.button(pause_label).clicked() {
                self.settings.animate = !self.settings.animate;
            }
        });
        let sim_ts = self.start_timestamp + Duration::milliseconds((self.sim_elapsed * 1000.0) as i64);
        ui.label(format!("Sim: {}", sim_ts.format("%H:%M:%S %d/%m/%Y")));

        if let Some(sat) = &self.satellite {
            ui.separator();
            ui.label(egui::RichText::new("Spacecraft").strong());
            ui.label(format!("Period: {:.1} min", sat.orbital_period() / 60.0));
            ui.label(format!("Speed: {:.2} km/s", sat.speed()));
            ui.label(format!("Altitude: {:.0} km", sat.altitude()));
            ui.label(format!(
                "Apoapsis: {:.0} km  Periapsis: {:.0} km",
                sat.apoapsis_altitude(),
                sat.periapsis_altitude(),
            ));
            ui.label(format!("Mass: {:.0} kg", sat.config.mass_kg));
        }

        ui.separator();
        ui.label(egui::RichText::new("Display").strong());
        ui.checkbox(&mut self.settings.show_stars, "Star field");
        ui.checkbox(&mut self.settings.show_path, "Orbit path");
        ui.checkbox(&mut self.settings.show_trail, "Position trail");

        ui.separator();
        ui.label(egui::RichText::new(self.body.name).strong());
        ui.label(format!("  Radius: {:.0} km", self.body.radius_km));
        ui.label(format!("  μ: {:.0} km³/s²", self.body.mu));
        ui.label(format!(
            "  Surface gravity: {:.2} m/s²",
            self.body.surface_gravity_ms2()
        ));

        ui.separator();
        ui.weak(format!("v{} {}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")));
    }
}
