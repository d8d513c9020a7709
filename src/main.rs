use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::{error, info};
use macroquad::prelude::{
    clear_background, draw_circle, draw_line, draw_text, get_fps, get_frame_time, get_time,
    is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
    next_frame, screen_height, screen_width, Color, Conf, KeyCode, MouseButton, BLACK, GRAY,
    WHITE,
};
use ultraviolet::Vec2;

use nbody_sandbox::{Gesture, SimConfig, Simulation};

const CANVAS_W: i32 = 1280;
const CANVAS_H: i32 = 960;

// Ticks allowed per frame before the backlog is dropped
const MAX_TICKS_PER_FRAME: u32 = 8;

#[derive(Parser, Debug)]
struct Args {
    /// YAML configuration file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "n-body sandbox".to_string(),
        window_width: CANVAS_W,
        window_height: CANVAS_H,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimConfig::default(),
    };

    let mut host = Host::new(config.tick);
    let mut sim = Simulation::new(config)?;

    loop {
        host.handle_input(&mut sim);
        host.sample_fps(get_time(), get_fps());
        host.advance(&mut sim, get_frame_time());
        host.render(&sim);

        next_frame().await
    }
}

/// Owns the clock and the input state; the engine only ever sees `step` and `spawn`.
struct Host {
    tick: f32,
    accumulator: f32,
    drag_start: Option<Vec2>,
    paused: bool,
    fps: i32,
    logged: u32,
}

impl Host {
    fn new(tick: f32) -> Self {
        Self {
            tick,
            accumulator: 0.0,
            drag_start: None,
            paused: false,
            fps: 0,
            logged: 0,
        }
    }

    fn handle_input(&mut self, sim: &mut Simulation) {
        if is_key_pressed(KeyCode::Space) {
            self.paused = !self.paused;
            info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag_start = Some(mouse_world());
        }

        if is_mouse_button_released(MouseButton::Left) {
            if let Some(start) = self.drag_start.take() {
                if let Err(err) = sim.spawn(Gesture::new(start, mouse_world())) {
                    error!("Spawn rejected: {err}");
                }
            }
        }
    }

    fn advance(&mut self, sim: &mut Simulation, frame_time: f32) {
        if self.paused {
            return;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.tick {
            if ticks == MAX_TICKS_PER_FRAME {
                self.accumulator = 0.0;
                break;
            }

            sim.step(self.tick);
            self.accumulator -= self.tick;
            ticks += 1;
        }
    }

    /// Runs every frame, paused or not.
    fn sample_fps(&mut self, now: f64, fps: i32) {
        // Update fps around 10 times per second
        let time = (10.0 * now) as u32;

        if time > self.logged {
            self.logged = time;
            self.fps = fps;
        }
    }

    fn render(&self, sim: &Simulation) {
        clear_background(BLACK);

        let center = screen_center();

        for body in sim.bodies() {
            let faded = Color { a: 0.4, ..body.color };

            for (a, b) in body.trail.iter().tuple_windows() {
                let (a, b) = (center + a, center + b);
                draw_line(a.x, a.y, b.x, b.y, 1.0, faded);
            }

            let pos = center + body.pos;
            draw_circle(pos.x, pos.y, body.radius, body.color);
        }

        if let Some(start) = self.drag_start {
            let (a, b) = (center + start, center + mouse_world());
            draw_line(a.x, a.y, b.x, b.y, 1.0, GRAY);
        }

        let status = if self.paused { " (paused)" } else { "" };
        draw_text(
            &format!("{} fps, {} bodies{}", self.fps, sim.len(), status),
            10.0,
            16.0,
            16.0,
            WHITE,
        );
    }
}

fn screen_center() -> Vec2 {
    Vec2::new(screen_width(), screen_height()) * 0.5
}

fn mouse_world() -> Vec2 {
    let (x, y) = mouse_position();
    Vec2::new(x, y) - screen_center()
}
