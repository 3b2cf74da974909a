use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;

use crate::engine::engine::Engine;
use crate::engine::llm_client::LlmClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::game_state::GameState;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io;

/* =========================
   UI State
   ========================= */

struct UiState {
    state: Option<GameState>,
    loading: bool,
    error: Option<String>,
    settings: UiSettings,
}

/* =========================
   App
   ========================= */

pub struct App {
    ui: UiState,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl App {
    pub fn new(client: LlmClient) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, client);
            engine.run();
        });

        Self {
            ui: UiState {
                state: None,
                loading: false,
                error: None,
                settings: settings_io::load_settings(),
            },
            cmd_tx,
            resp_rx,
        }
    }

    fn send(&mut self, cmd: EngineCommand) {
        // Input stays disabled until the matching SceneReady arrives,
        // so at most one request is ever in flight.
        self.ui.loading = true;
        self.ui.error = None;
        if self.cmd_tx.send(cmd).is_err() {
            self.ui.loading = false;
            self.ui.error = Some("The engine thread has stopped.".to_string());
        }
    }

    fn drain_responses(&mut self) {
        loop {
            match self.resp_rx.try_recv() {
                Ok(EngineResponse::SceneReady { state }) => {
                    self.ui.state = Some(state);
                    self.ui.loading = false;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if self.ui.loading {
                        self.ui.loading = false;
                        self.ui.error =
                            Some("The engine thread has stopped.".to_string());
                    }
                    break;
                }
            }
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        self.drain_responses();

        // Engine responses arrive without any input event, so keep
        // polling while a request is in flight.
        if self.ui.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        /* LEFT PANEL */
        egui::SidePanel::left("options")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("Options");
                ui.separator();
                ui.label("UI Scale");
                if ui
                    .add(egui::Slider::new(
                        &mut self.ui.settings.ui_scale,
                        0.75..=2.0,
                    ))
                    .changed()
                {
                    settings_io::save_settings(&self.ui.settings);
                }
            });

        /* CENTER */
        egui::CentralPanel::default().show(ctx, |ui| {
            draw_header(ui);

            if let Some(state) = &self.ui.state {
                if !state.is_game_over {
                    draw_status(ui, state);
                }
            }

            ui.add_space(12.0);

            if let Some(error) = &self.ui.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
                return;
            }

            if self.ui.loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label("The city holds its breath...");
                });
                return;
            }

            let Some(state) = self.ui.state.clone() else {
                self.draw_title_screen(ui);
                return;
            };

            if state.is_game_over {
                self.draw_game_over(ui, &state);
            } else {
                self.draw_scene(ui, &state);
            }
        });
    }
}

impl App {
    fn draw_title_screen(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label("The city is dead. Your story is about to begin.");
            ui.add_space(12.0);
            if ui.button("BEGIN").clicked() {
                self.send(EngineCommand::StartGame);
            }
        });
    }

    fn draw_scene(&mut self, ui: &mut egui::Ui, state: &GameState) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(egui::RichText::new(&state.story).size(16.0));
            ui.add_space(16.0);

            for choice in &state.choices {
                let button = egui::Button::new(&choice.text)
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(button).clicked() {
                    self.send(EngineCommand::Choose {
                        prompt: choice.prompt.clone(),
                    });
                }
                ui.add_space(6.0);
            }
        });
    }

    fn draw_game_over(&mut self, ui: &mut egui::Ui, state: &GameState) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading(
                egui::RichText::new("YOUR STORY ENDS")
                    .color(egui::Color32::from_rgb(190, 30, 30)),
            );
            ui.add_space(10.0);
            ui.label(&state.story);
            ui.add_space(10.0);
            ui.label(egui::RichText::new(&state.game_over_text).italics());
            ui.add_space(20.0);
            if ui.button("BEGIN AGAIN").clicked() {
                self.send(EngineCommand::StartGame);
            }
        });
    }
}

/* =========================
   UI Helpers
   ========================= */

fn draw_header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading(
            egui::RichText::new("DEAD AIR")
                .size(32.0)
                .color(egui::Color32::from_rgb(190, 30, 30)),
        );
        ui.label("Scavenge. Craft. Survive.");
    });
    ui.separator();
}

fn draw_status(ui: &mut egui::Ui, state: &GameState) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("Base:").strong());
        ui.label(format!(
            "{} (fortification {})",
            state.base.location, state.base.fortification
        ));

        ui.separator();

        ui.label(egui::RichText::new("Inventory:").strong());
        if state.inventory.is_empty() {
            ui.label("empty");
        } else {
            for (item, count) in &state.inventory {
                ui.label(format!("{}: {}", item, count));
            }
        }
    });
}
