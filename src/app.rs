//! Main application window.
//! Renders the session view and maps keys and buttons to session intents.

use card_trainer::config::Config;
use card_trainer::export::{ResultsReport, export_results_to_path};
use card_trainer::import::{FormatError, LoadError, load};
use card_trainer::models::stopwatch::format_elapsed;
use card_trainer::models::{Control, Intent, Session, SessionResult, SessionView};
use eframe::egui;
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};
use std::time::Duration;

const GREEN: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
const RED: Color32 = Color32::from_rgb(0xF4, 0x43, 0x36);
const ORANGE: Color32 = Color32::from_rgb(0xFF, 0xA5, 0x00);
const BLUE: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);

const STOPWATCH_REFRESH: Duration = Duration::from_millis(100);

/// Main application state
pub struct TrainerApp {
    config: Config,
    session: Option<Session>,
    deck_path: Option<PathBuf>,
    // Shown instead of a session when the deck could not be loaded.
    load_error: Option<String>,

    warnings: Vec<FormatError>,
    show_warnings_dialog: bool,
    status_message: Option<String>,

    shift_held: bool,
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut intents = self.read_keys(ctx);

        match self.session.as_ref().map(Session::view) {
            Some(view) => {
                self.render_session_screen(ctx, &view, &mut intents);
                if let Some(result) = &view.results {
                    self.render_results_window(ctx, &view.deck_name, result, &mut intents);
                }
                if view.results.is_none() && view.stopwatch_seconds.is_some() {
                    ctx.request_repaint_after(STOPWATCH_REFRESH);
                }
            }
            None => self.render_load_error_screen(ctx),
        }

        self.render_dialogs(ctx);

        // Execute deferred intents
        for intent in intents {
            let control = match &mut self.session {
                Some(session) => session.apply(intent),
                None if intent == Intent::Quit => Control::Quit,
                None => Control::Continue,
            };
            if control == Control::Quit {
                log::debug!("Quit requested");
                self.session = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                break;
            }
        }
    }
}

impl TrainerApp {
    /// Creates the application and loads the deck named in `config`.
    pub fn new(config: Config) -> Self {
        let deck_path = config.deck.clone();
        let shuffle = !config.in_order;
        let mut app = Self {
            config,
            session: None,
            deck_path: None,
            load_error: None,
            warnings: Vec::new(),
            show_warnings_dialog: false,
            status_message: None,
            shift_held: false,
        };
        app.open_deck(&deck_path, shuffle);
        app
    }

    /// Loads a deck file and starts a fresh session over it.
    fn open_deck(&mut self, path: &Path, shuffle: bool) {
        let loaded = match load(path, self.config.load_options()) {
            Ok(loaded) => loaded,
            Err(err) => {
                log::error!("{}", err);
                if let LoadError::EmptyDeck { warnings, .. } = &err {
                    self.warnings = warnings.clone();
                    self.show_warnings_dialog = !self.warnings.is_empty();
                }
                self.load_error = Some(err.to_string());
                self.session = None;
                return;
            }
        };

        let rng = self.config.rng();
        let started = if shuffle {
            Session::start_shuffled(loaded.deck, rng)
        } else {
            Session::new(loaded.deck, rng)
        };
        match started {
            Ok(session) => {
                log::info!(
                    "Deck '{}' loaded with {} cards",
                    session.deck().name,
                    session.deck().len()
                );
                self.session = Some(session);
                self.deck_path = Some(path.to_path_buf());
                self.load_error = None;
            }
            Err(err) => {
                log::error!("{}", err);
                self.load_error = Some(err.to_string());
                self.session = None;
            }
        }
        self.show_warnings_dialog = !loaded.warnings.is_empty();
        self.warnings = loaded.warnings;
    }

    fn pick_deck(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Deck files", &["csv", "tsv", "txt"])
            .pick_file()
        {
            self.open_deck(&path, true);
        }
    }

    fn read_keys(&mut self, ctx: &egui::Context) -> Vec<Intent> {
        let mut intents = Vec::new();
        let shift = ctx.input(|i| i.modifiers.shift);
        if shift && !self.shift_held {
            intents.push(Intent::ToggleTranslation);
        }
        self.shift_held = shift;

        let bindings = [
            (egui::Key::ArrowUp, Intent::MarkKnown),
            (egui::Key::ArrowDown, Intent::MarkUnknown),
            (egui::Key::ArrowLeft, Intent::StepBack),
            (egui::Key::ArrowRight, Intent::StepForward),
            (egui::Key::Space, Intent::ShuffleAndRestart),
            (egui::Key::T, Intent::StartTimer),
            (egui::Key::Enter, Intent::DismissResults),
            (egui::Key::Escape, Intent::Quit),
        ];
        ctx.input(|i| {
            for (key, intent) in bindings {
                if i.key_pressed(key) {
                    intents.push(intent);
                }
            }
        });
        intents
    }

    /// Renders the card, counters and navigation buttons
    fn render_session_screen(
        &mut self,
        ctx: &egui::Context,
        view: &SessionView,
        intents: &mut Vec<Intent>,
    ) {
        let mut action_open = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(&view.deck_name);
                    if ui.button("Open Deck...").clicked() {
                        action_open = true;
                    }
                });
                ui.colored_label(Color32::from_rgb(0xFF, 0x57, 0x22), "<Esc> to quit program");
                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.set_min_height(200.0);
                    ui.vertical_centered(|ui| {
                        ui.add_space(30.0);
                        let term = view.current_term.as_deref().unwrap_or("");
                        ui.label(RichText::new(term).size(28.0).strong());
                        ui.add_space(10.0);

                        match &view.translation_text {
                            Some(translation) => {
                                ui.label(RichText::new(translation).size(16.0));
                            }
                            None => {
                                ui.label("");
                            }
                        }
                        ui.add_space(10.0);

                        let (toggle_text, toggle_color) = if view.translation_visible {
                            ("Hide Translation <Shift>", RED)
                        } else {
                            ("Show Translation <Shift>", BLUE)
                        };
                        if ui
                            .link(RichText::new(toggle_text).italics().color(toggle_color))
                            .clicked()
                        {
                            intents.push(Intent::ToggleTranslation);
                        }
                        ui.add_space(20.0);
                    });
                });

                ui.add_space(20.0);
                ui.colored_label(Color32::DARK_BLUE, "<Space> to shuffle cards");
                ui.add_space(10.0);

                ui.label(format!(
                    "Opened Cards: {}/{}",
                    view.opened_count, view.total_count
                ));
                ui.colored_label(GREEN, format!("Known Words: {}", view.known_count));
                ui.colored_label(RED, format!("Unknown Words: {}", view.unknown_count));

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    match view.stopwatch_seconds {
                        Some(seconds) => {
                            ui.label(format!(
                                "Time: {}",
                                format_elapsed(Duration::from_secs_f64(seconds))
                            ));
                        }
                        None => {
                            if ui.button("Start Timer <T>").clicked() {
                                intents.push(Intent::StartTimer);
                            }
                        }
                    }
                });

                ui.add_space(20.0);
                if ui
                    .add_enabled(view.can_mark, colored_button("Known <Up>", GREEN))
                    .clicked()
                {
                    intents.push(Intent::MarkKnown);
                }
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(view.can_step_back, colored_button("Previous <Left>", ORANGE))
                        .clicked()
                    {
                        intents.push(Intent::StepBack);
                    }
                    if ui
                        .add_enabled(view.can_mark, colored_button("Unknown <Down>", RED))
                        .clicked()
                    {
                        intents.push(Intent::MarkUnknown);
                    }
                    if ui
                        .add_enabled(view.can_step_forward, colored_button("Next <Right>", ORANGE))
                        .clicked()
                    {
                        intents.push(Intent::StepForward);
                    }
                });
            });
        });

        if action_open {
            self.pick_deck();
        }
    }

    fn render_results_window(
        &mut self,
        ctx: &egui::Context,
        deck_name: &str,
        result: &SessionResult,
        intents: &mut Vec<Intent>,
    ) {
        let mut action_save = false;

        egui::Window::new("Results")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Total Cards Shown: {}", result.cards_shown)).size(16.0),
                );
                let (known_pct, unknown_pct) = match result.percentages() {
                    Ok((known, unknown)) => (format!("{:.2}%", known), format!("{:.2}%", unknown)),
                    Err(_) => ("n/a".to_string(), "n/a".to_string()),
                };
                ui.colored_label(
                    GREEN,
                    RichText::new(format!("Words Known: {} ({})", result.known, known_pct))
                        .size(16.0),
                );
                ui.colored_label(
                    RED,
                    RichText::new(format!("Words Unknown: {} ({})", result.unknown, unknown_pct))
                        .size(16.0),
                );
                if let Some(seconds) = result.duration {
                    ui.label(
                        RichText::new(format!(
                            "Time: {}",
                            format_elapsed(Duration::from_secs_f64(seconds))
                        ))
                        .size(16.0),
                    );
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Save Results...").clicked() {
                        action_save = true;
                    }
                    if ui.add(colored_button("OK <Return>", BLUE)).clicked() {
                        intents.push(Intent::DismissResults);
                    }
                });
            });

        if action_save {
            self.handle_save_results(deck_name, result);
        }
    }

    /// Shown when startup loading failed; the user can pick another file.
    fn render_load_error_screen(&mut self, ctx: &egui::Context) {
        let mut action_open = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("No deck loaded");
                ui.add_space(10.0);
                if let Some(message) = &self.load_error {
                    ui.colored_label(RED, message);
                }
                ui.add_space(20.0);
                if ui.button("Open Deck...").clicked() {
                    action_open = true;
                }
                ui.add_space(10.0);
                ui.label("<Esc> to quit program");
            });
        });

        if action_open {
            self.pick_deck();
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if self.show_warnings_dialog {
            egui::Window::new("Invalid rows in deck file")
                .collapsible(false)
                .resizable(true)
                .show(ctx, |ui| {
                    ui.label(format!("{} rows were skipped:", self.warnings.len()));
                    egui::ScrollArea::vertical()
                        .max_height(200.0)
                        .show(ui, |ui| {
                            for warning in &self.warnings {
                                ui.label(warning.to_string());
                            }
                        });
                    if ui.button("OK").clicked() {
                        self.show_warnings_dialog = false;
                    }
                });
        }

        let mut close_status = false;
        if let Some(message) = &self.status_message {
            egui::Window::new("Save Results")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        close_status = true;
                    }
                });
        }
        if close_status {
            self.status_message = None;
        }
    }

    /// Handles saving the results window to a JSON file
    fn handle_save_results(&mut self, deck_name: &str, result: &SessionResult) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}-results.json", deck_name))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            let report = ResultsReport::new(deck_name, self.deck_path.as_deref(), result.clone());
            self.status_message = Some(match export_results_to_path(&report, &path) {
                Ok(()) => format!("Results saved to {}", path.display()),
                Err(e) => {
                    log::error!("{}", e);
                    format!("Saving results failed: {}", e)
                }
            });
        }
    }
}

fn colored_button(text: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text).size(14.0).color(Color32::WHITE))
        .fill(fill)
        .min_size(egui::vec2(140.0, 28.0))
}
