//! Painter-based drawing for the orbit view.
//!
//! Everything is drawn back to front in a fixed order: star field, orbit
//! ellipse, body wireframe, satellite trail and marker. There is no depth
//! buffer; the order is the depth illusion.

use crate::camera::CameraState;
use crate::celestial::ReferenceBody;
use crate::config::{SAT_CUBE_HALF_KM, SAT_PANEL_SPAN_KM};
use crate::starfield::StarField;
use eframe::egui;
use nalgebra::Vector3;
use std::f64::consts::TAU;

pub const COLOR_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(5, 6, 12);
pub const COLOR_PATH: egui::Color32 = egui::Color32::from_rgb(120, 200, 255);
pub const COLOR_WIREFRAME: egui::Color32 = egui::Color32::from_rgb(60, 110, 80);
pub const COLOR_EQUATOR: egui::Color32 = egui::Color32::from_rgb(200, 120, 50);
pub const COLOR_SATELLITE: egui::Color32 = egui::Color32::from_rgb(230, 230, 240);
pub const COLOR_PANEL: egui::Color32 = egui::Color32::from_rgb(90, 140, 220);
pub const COLOR_TRAIL: egui::Color32 = egui::Color32::from_rgb(255, 180, 80);

const RING_SEGMENTS: usize = 64;
const LAT_RING_STEP_DEG: i32 = 15;
const LON_RING_STEP_DEG: i32 = 15;

/// Keep wireframe edges crisp at any pixel ratio.
fn snap(p: egui::Pos2) -> egui::Pos2 {
    egui::pos2(p.x.round(), p.y.round())
}

/// Project a world polyline and stroke it, splitting into runs wherever a
/// point is culled by the projection.
fn stroke_world_polyline(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &CameraState,
    points: impl Iterator<Item = Vector3<f64>>,
    stroke: egui::Stroke,
) {
    let mut run: Vec<egui::Pos2> = Vec::new();
    for world in points {
        match camera.project(world, rect) {
            Some(p) => run.push(snap(p)),
            None => {
                if run.len() > 1 {
                    painter.add(egui::Shape::line(std::mem::take(&mut run), stroke));
                } else {
                    run.clear();
                }
            }
        }
    }
    if run.len() > 1 {
        painter.add(egui::Shape::line(run, stroke));
    }
}

pub fn draw_star_field(painter: &egui::Painter, rect: egui::Rect, field: &StarField) {
    for star in field.stars() {
        let alpha = (star.opacity * 255.0) as u8;
        painter.circle_filled(
            snap(egui::pos2(rect.min.x + star.x, rect.min.y + star.y)),
            star.radius,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
        );
    }
}

/// Dashed closed polyline through the sampled ellipse. The path is an
/// open sequence; the final segment back to the first sample is drawn
/// here.
pub fn draw_orbit_path(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &CameraState,
    path: &[Vector3<f64>],
) {
    if path.is_empty() {
        return;
    }
    let stroke = egui::Stroke::new(1.0, COLOR_PATH);
    let closed = path.iter().chain(path.first()).copied();

    let mut run: Vec<egui::Pos2> = Vec::new();
    for world in closed {
        match camera.project(world, rect) {
            Some(p) => run.push(snap(p)),
            None => {
                if run.len() > 1 {
                    painter.extend(egui::Shape::dashed_line(
                        &std::mem::take(&mut run),
                        stroke,
                        6.0,
                        4.0,
                    ));
                } else {
                    run.clear();
                }
            }
        }
    }
    if run.len() > 1 {
        painter.extend(egui::Shape::dashed_line(&run, stroke, 6.0, 4.0));
    }
}

fn latitude_ring(radius: f64, lat_rad: f64) -> impl Iterator<Item = Vector3<f64>> {
    let ring_r = radius * lat_rad.cos();
    let z = radius * lat_rad.sin();
    (0..=RING_SEGMENTS).map(move |i| {
        let theta = TAU * i as f64 / RING_SEGMENTS as f64;
        Vector3::new(ring_r * theta.cos(), ring_r * theta.sin(), z)
    })
}

fn longitude_ring(radius: f64, lon_rad: f64) -> impl Iterator<Item = Vector3<f64>> {
    (0..=RING_SEGMENTS).map(move |i| {
        let theta = TAU * i as f64 / RING_SEGMENTS as f64;
        Vector3::new(
            radius * theta.cos() * lon_rad.cos(),
            radius * theta.cos() * lon_rad.sin(),
            radius * theta.sin(),
        )
    })
}

/// Wireframe sphere: latitude rings every 15°, meridians every 15°, the
/// equator picked out in its own color.
pub fn draw_body_wireframe(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &CameraState,
    body: &ReferenceBody,
) {
    let stroke = egui::Stroke::new(1.0, COLOR_WIREFRAME);
    let radius = body.radius_km;

    let mut lat = -90 + LAT_RING_STEP_DEG;
    while lat < 90 {
        if lat != 0 {
            stroke_world_polyline(
                painter,
                rect,
                camera,
                latitude_ring(radius, (lat as f64).to_radians()),
                stroke,
            );
        }
        lat += LAT_RING_STEP_DEG;
    }

    let mut lon = 0;
    while lon < 180 {
        stroke_world_polyline(
            painter,
            rect,
            camera,
            longitude_ring(radius, (lon as f64).to_radians()),
            stroke,
        );
        lon += LON_RING_STEP_DEG;
    }

    stroke_world_polyline(
        painter,
        rect,
        camera,
        latitude_ring(radius, 0.0),
        egui::Stroke::new(1.5, COLOR_EQUATOR),
    );
}

/// Recent positions, fading toward the tail.
pub fn draw_trail(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &CameraState,
    trail: impl ExactSizeIterator<Item = Vector3<f64>>,
) {
    let len = trail.len();
    if len < 2 {
        return;
    }
    let mut prev: Option<egui::Pos2> = None;
    for (i, world) in trail.enumerate() {
        let projected = camera.project(world, rect).map(snap);
        if let (Some(a), Some(b)) = (prev, projected) {
            let fade = (i as f32 / len as f32).powi(2);
            let color = egui::Color32::from_rgba_unmultiplied(
                COLOR_TRAIL.r(),
                COLOR_TRAIL.g(),
                COLOR_TRAIL.b(),
                (fade * 180.0) as u8,
            );
            painter.line_segment([a, b], egui::Stroke::new(1.0, color));
        }
        prev = projected;
    }
}

// Cube corner pairs differing in exactly one axis.
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

/// Wireframe cube with two solar-panel fins, world-axis aligned at the
/// satellite's position. Skipped entirely by the caller when the
/// propagator has no position yet.
pub fn draw_satellite(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &CameraState,
    position: Vector3<f64>,
) {
    let h = SAT_CUBE_HALF_KM;
    let corners: Vec<Option<egui::Pos2>> = (0..8)
        .map(|i| {
            let offset = Vector3::new(
                if i & 1 == 0 { -h } else { h },
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            );
            camera.project(position + offset, rect).map(snap)
        })
        .collect();

    let stroke = egui::Stroke::new(1.0, COLOR_SATELLITE);
    for (a, b) in CUBE_EDGES {
        if let (Some(pa), Some(pb)) = (corners[a], corners[b]) {
            painter.line_segment([pa, pb], stroke);
        }
    }

    let panel_stroke = egui::Stroke::new(1.0, COLOR_PANEL);
    let half_width = h * 0.75;
    for side in [-1.0, 1.0] {
        let inner = side * h;
        let outer = side * (h + SAT_PANEL_SPAN_KM);
        let quad = [
            Vector3::new(inner, -half_width, 0.0),
            Vector3::new(outer, -half_width, 0.0),
            Vector3::new(outer, half_width, 0.0),
            Vector3::new(inner, half_width, 0.0),
        ];
        let projected: Vec<Option<egui::Pos2>> = quad
            .iter()
            .map(|&offset| camera.project(position + offset, rect).map(snap))
            .collect();
        for i in 0..4 {
            if let (Some(a), Some(b)) = (projected[i], projected[(i + 1) % 4]) {
                painter.line_segment([a, b], panel_stroke);
            }
        }
        // Midrib along the fin.
        let rib = [
            Vector3::new(inner, 0.0, 0.0),
            Vector3::new(outer, 0.0, 0.0),
        ];
        if let (Some(a), Some(b)) = (
            camera.project(position + rib[0], rect).map(snap),
            camera.project(position + rib[1], rect).map(snap),
        ) {
            painter.line_segment([a, b], panel_stroke);
        }
    }
}
