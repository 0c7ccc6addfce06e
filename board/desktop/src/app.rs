use std::time::Duration;

use egui::{Color32, RichText, Sense, Stroke, TouchId, TouchPhase};
use joystick::{JoystickZone, Point};
use log::{error, info};
use remote::{FlightMode, Notice, Rgb, Side, Stick, CALIBRATION_PROMPT};

use crate::{
    config::Config,
    link::{read, write, HttpTransport, Link},
};

const ZONE_SIZE: f32 = 220.0;
const KNOB_RADIUS: f32 = 28.0;
const KNOB_COLOR: Rgb = Rgb::new(0x00, 0xd4, 0xff);

pub struct RemoteApp {
    state: State,
    config: Config,
    link: Link,
    failure: Option<String>,

    left: StickZone,
    right: StickZone,

    confirm_calibration: bool,
    notice: Option<Notice>,
}

impl RemoteApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self {
            state: State::Initializing,
            config,
            link: Link::new(),
            failure: None,
            left: StickZone::new(Side::Left),
            right: StickZone::new(Side::Right),
            confirm_calibration: false,
            notice: None,
        }
    }

    fn connect_to_vehicle(&mut self) {
        let started = HttpTransport::new(self.config.base_url.clone())
            .and_then(|transport| self.link.connect(transport, &self.config));

        match started {
            Ok(()) => {
                info!("Link to {} started", self.config.base_url);
                self.state = State::Running;
            }
            Err(e) => {
                error!("Failed to start link: {:?}", e);
                self.failure = Some(format!("{e:#}"));
                self.state = State::Failed;
            }
        }
    }

    fn is_blocked(&self) -> bool {
        self.confirm_calibration || self.notice.is_some()
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        let panel = read(self.link.panel()).clone();

        ui.horizontal(|ui| {
            for mode in FlightMode::ALL {
                let style = panel.mode_button_style(mode);
                if styled_button(ui, mode.label(), style.fill, style.border).clicked() {
                    self.link.select_mode(mode);
                }
            }
        });

        ui.label(RichText::new(panel.mode_text()).size(24.0).strong());

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Pitch: {}", panel.pitch_text())).monospace());
            ui.add_space(12.0);
            ui.label(RichText::new(format!("Roll: {}", panel.roll_text())).monospace());
        });

        ui.horizontal(|ui| {
            let arm = panel.arm_button();
            if styled_button(ui, arm.label, arm.color, arm.color).clicked() {
                self.link.toggle_arm();
            }
            if ui.button("CALIBRATE").clicked() {
                self.confirm_calibration = true;
            }
        });
    }

    fn dialogs_ui(&mut self, ctx: &egui::Context) {
        if self.confirm_calibration {
            let mut answer = None;
            dialog("Calibration").show(ctx, |ui| {
                ui.label(CALIBRATION_PROMPT);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
            if let Some(confirmed) = answer {
                self.confirm_calibration = false;
                if confirmed {
                    self.link.calibrate();
                }
            }
        }

        if self.notice.is_none() {
            self.notice = write(self.link.panel()).take_notice();
        }
        if let Some(notice) = self.notice {
            let mut dismissed = false;
            dialog("DucRemote").show(ctx, |ui| {
                ui.label(notice.message());
                dismissed = ui.button("OK").clicked();
            });
            if dismissed {
                self.notice = None;
            }
        }
    }
}

impl eframe::App for RemoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.state {
            State::Initializing => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading(format!("Connecting to {}", self.config.base_url));
                });
                self.connect_to_vehicle();
            }
            State::Running => {
                ctx.request_repaint_after(Duration::from_millis(1000 / 50)); // 50 Hz
                let enabled = !self.is_blocked();

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.add_enabled_ui(enabled, |ui| self.controls_ui(ui));
                    ui.add_space(24.0);
                    ui.horizontal(|ui| {
                        stick_ui(ui, &mut self.left, &self.link, enabled);
                        ui.add_space((ui.available_width() - ZONE_SIZE).max(0.0));
                        stick_ui(ui, &mut self.right, &self.link, enabled);
                    });
                });

                self.dialogs_ui(ctx);
            }
            State::Failed => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("DucRemote could not start");
                    if let Some(failure) = &self.failure {
                        ui.label(failure.as_str());
                    }
                });
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initializing,
    Running,
    Failed,
}

/// A stick zone on screen. The stick geometry is captured on the first frame
/// the zone is laid out.
struct StickZone {
    side: Side,
    stick: Option<Stick>,
    touch: Option<TouchId>,
}

impl StickZone {
    fn new(side: Side) -> Self {
        StickZone {
            side,
            stick: None,
            touch: None,
        }
    }
}

fn stick_ui(ui: &mut egui::Ui, zone: &mut StickZone, link: &Link, enabled: bool) {
    let (response, painter) = ui.allocate_painter(egui::vec2(ZONE_SIZE, ZONE_SIZE), Sense::drag());
    let rect = response.rect;
    let side = zone.side;
    let stick = zone.stick.get_or_insert_with(|| {
        Stick::new(
            side,
            JoystickZone::from_rect(rect.left(), rect.top(), rect.width(), rect.height()),
        )
    });

    if !enabled {
        zone.touch = None;
        if stick.joystick().is_dragging() {
            stick.release(&mut write(link.controls()));
        }
    } else {
        // Touch screens: each zone follows its own finger so both sticks work at once
        let events = ui.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                let point = Point::new(pos.x, pos.y);
                match phase {
                    TouchPhase::Start if zone.touch.is_none() && rect.contains(pos) => {
                        zone.touch = Some(id);
                        stick.touch(point, &mut write(link.controls()));
                    }
                    TouchPhase::Move if zone.touch == Some(id) => {
                        stick.touch(point, &mut write(link.controls()));
                    }
                    TouchPhase::End | TouchPhase::Cancel if zone.touch == Some(id) => {
                        zone.touch = None;
                        stick.release(&mut write(link.controls()));
                    }
                    _ => {}
                }
            }
        }

        // Mouse
        if zone.touch.is_none() {
            if response.is_pointer_button_down_on() {
                if let Some(pos) = response.interact_pointer_pos() {
                    stick.touch(Point::new(pos.x, pos.y), &mut write(link.controls()));
                }
            } else if stick.joystick().is_dragging() {
                stick.release(&mut write(link.controls()));
            }
        }
    }

    let joystick = stick.joystick();
    let center = joystick.zone().center();
    let center = egui::pos2(center.x, center.y);
    let knob = joystick.indicator();

    painter.circle_filled(center, joystick.zone().radius(), Color32::from_gray(40));
    painter.circle_stroke(center, joystick.zone().radius(), Stroke::new(2.0, Color32::from_gray(90)));
    painter.circle_filled(center + egui::vec2(knob.x, knob.y), KNOB_RADIUS, color(KNOB_COLOR));
}

fn styled_button(ui: &mut egui::Ui, label: &str, fill: Rgb, border: Rgb) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(label).color(Color32::WHITE).strong())
            .fill(color(fill))
            .stroke(Stroke::new(2.0, color(border)))
            .min_size(egui::vec2(120.0, 36.0)),
    )
}

fn dialog(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}
