//! Settings panel for the Form Checker GUI

use eframe::egui::{self, Color32, RichText, Ui};

use formcheck_app::Config;
use formcheck_gemini::{DEFAULT_MODEL, GEMINI_API_KEY_ENV};
use formcheck_prompt::PromptVariant;

/// Selectable prompt template variants
const VARIANTS: &[PromptVariant] = &[
    PromptVariant::FitnessTechnique,
    PromptVariant::BehavioralProfile,
    PromptVariant::BehavioralBalanced,
];

/// Preset model identifiers
const GEMINI_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-pro"];

/// Settings panel
pub struct SettingsPanel {
    /// API key input (session only, never persisted)
    api_key_input: String,
    /// Variant selection
    selected_variant: PromptVariant,
    /// Model input (can be custom)
    model_input: String,
    /// Whether config was modified
    modified: bool,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl SettingsPanel {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key_input: String::new(),
            selected_variant: config.variant,
            model_input: config.model.clone().unwrap_or_default(),
            modified: false,
            status_message: None,
        }
    }

    /// Current API key field contents (used by the analyze panel)
    pub fn api_key_input(&self) -> &str {
        &self.api_key_input
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &mut Config) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("הגדרות");
            ui.add_space(10.0);

            // API key (session only)
            ui.label(RichText::new("Gemini API Key").strong());
            ui.add_space(5.0);
            ui.add(
                egui::TextEdit::singleline(&mut self.api_key_input)
                    .password(true)
                    .desired_width(360.0)
                    .hint_text("אופציונלי - אם לא הוגדר כמשתנה סביבה"),
            );
            ui.add_space(5.0);
            ui.label(
                RichText::new(format!(
                    "אם השדה ריק, האפליקציה תשתמש במשתנה הסביבה {}. המפתח אינו נשמר לקובץ.",
                    GEMINI_API_KEY_ENV
                ))
                .color(Color32::GRAY)
                .small(),
            );

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            // Variant selection
            ui.label(RichText::new("תבנית ניתוח").strong());
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                for &variant in VARIANTS {
                    let selected = self.selected_variant == variant;
                    if ui.selectable_label(selected, variant.label()).clicked() {
                        self.selected_variant = variant;
                        self.modified = true;
                    }
                }
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            // Model selection
            ui.label(RichText::new("מודל").strong());
            ui.add_space(5.0);

            ui.label("מודלים מוגדרים מראש:");
            ui.horizontal_wrapped(|ui| {
                for model in GEMINI_MODELS {
                    if ui.small_button(*model).clicked() {
                        self.model_input = model.to_string();
                        self.modified = true;
                    }
                }
            });
            ui.add_space(5.0);

            // Custom model input
            ui.horizontal(|ui| {
                ui.label("מותאם אישית:");
                let response = ui.text_edit_singleline(&mut self.model_input);
                if response.changed() {
                    self.modified = true;
                }
                if ui.button("נקה").clicked() {
                    self.model_input.clear();
                    self.modified = true;
                }
            });

            ui.add_space(5.0);
            ui.label(
                RichText::new(format!("* שדה ריק משתמש במודל ברירת המחדל ({})", DEFAULT_MODEL))
                    .color(Color32::GRAY)
                    .small(),
            );

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(15.0);

            // Current config display
            ui.label(RichText::new("הגדרות נוכחיות").strong());
            ui.add_space(5.0);

            egui::Frame::new()
                .fill(Color32::from_gray(30))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    egui::Grid::new("current_config")
                        .num_columns(2)
                        .spacing([20.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("תבנית:");
                            ui.label(config.variant.label());
                            ui.end_row();

                            ui.label("מודל:");
                            ui.label(config.model.as_deref().unwrap_or("(ברירת מחדל)"));
                            ui.end_row();

                            ui.label("פורמט פלט:");
                            ui.label(config.output_format.to_string());
                            ui.end_row();
                        });
                });

            ui.add_space(20.0);

            // Save button
            ui.horizontal(|ui| {
                let save_enabled = self.modified;
                if ui
                    .add_enabled(
                        save_enabled,
                        egui::Button::new(RichText::new("שמור").size(16.0)),
                    )
                    .clicked()
                {
                    self.save_config(config);
                }

                if ui.button("אפס").clicked() {
                    self.selected_variant = config.variant;
                    self.model_input = config.model.clone().unwrap_or_default();
                    self.modified = false;
                    self.status_message = None;
                }

                if self.modified {
                    ui.label(RichText::new("* יש שינויים שלא נשמרו").color(Color32::YELLOW));
                }
            });

            // Status message
            if let Some((ref msg, is_error)) = self.status_message {
                ui.add_space(10.0);
                let color = if is_error {
                    Color32::LIGHT_RED
                } else {
                    Color32::LIGHT_GREEN
                };
                ui.label(RichText::new(msg).color(color));
            }
        });
    }

    fn save_config(&mut self, config: &mut Config) {
        config.variant = self.selected_variant;
        config.model = if self.model_input.is_empty() {
            None
        } else {
            Some(self.model_input.clone())
        };

        match config.save() {
            Ok(()) => {
                self.modified = false;
                self.status_message = Some(("ההגדרות נשמרו".to_string(), false));
            }
            Err(e) => {
                self.status_message = Some((format!("שגיאה בשמירה: {}", e), true));
            }
        }
    }
}
