//! Analyze panel for the Form Checker GUI
//!
//! Provides image selection, context question input, analysis execution,
//! and result display. The blocking model call runs on a background thread
//! that reports over an mpsc channel.

use eframe::egui::{self, Color32, RichText, Ui};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use formcheck_app::{analyze_photo, AnalyzerConfig, Config};
use formcheck_gemini::{DEFAULT_MODEL, GEMINI_API_KEY_ENV};
use formcheck_types::{AnalysisRequest, AnalysisResult, Credential, ImageMime};

/// Status message from the analysis thread
#[derive(Debug, Clone)]
pub enum AnalysisStatus {
    /// Starting analysis
    Starting,
    /// Calling the model API
    CallingModel { model: String },
    /// Completed successfully
    Completed(AnalysisResult),
    /// Failed with error
    Failed(String),
}

/// Panel for analyzing uploaded photos
pub struct AnalyzePanel {
    /// Currently selected image path
    selected_image: Option<PathBuf>,
    /// Raw bytes of the selected image (preview + request payload)
    image_bytes: Option<Vec<u8>>,
    /// Context question text
    question: String,
    /// Analysis result (if available)
    result: Option<AnalysisResult>,
    /// Error message (if any)
    error: Option<String>,
    /// Whether analysis is in progress
    is_analyzing: bool,
    /// Receiver for analysis status from background thread
    status_receiver: Option<Receiver<AnalysisStatus>>,
    /// Current status message
    current_status: Option<String>,
    /// Analysis start time
    start_time: Option<Instant>,
}

impl AnalyzePanel {
    /// Create a new analyze panel
    pub fn new() -> Self {
        Self {
            selected_image: None,
            image_bytes: None,
            question: String::new(),
            result: None,
            error: None,
            is_analyzing: false,
            status_receiver: None,
            current_status: None,
            start_time: None,
        }
    }

    /// Render the analyze panel UI
    pub fn ui(&mut self, ui: &mut Ui, config: &Config, api_key_input: &str) {
        // Check for status updates from background thread
        self.poll_status(ui.ctx());

        ui.heading("ניתוח טכניקת אימון");
        ui.label(
            RichText::new("כלי זה מיועד לניתוח כללי ואינו מחליף ייעוץ מקצועי ממאמן מוסמך.")
                .color(Color32::GRAY)
                .small(),
        );
        ui.add_space(10.0);

        // Image selection and preview
        self.render_image_selection(ui);

        ui.add_space(10.0);

        // Context question input
        self.render_question_input(ui);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // Analyze button and progress
        self.render_analyze_button(ui, config, api_key_input);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // Results section
        self.render_results(ui);

        // Error display
        self.render_error(ui);
    }

    /// Poll for status updates from the background analysis thread
    fn poll_status(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.status_receiver {
            // Drain all available messages
            loop {
                match receiver.try_recv() {
                    Ok(status) => match status {
                        AnalysisStatus::Starting => {
                            self.current_status = Some("מתחיל ניתוח...".to_string());
                        }
                        AnalysisStatus::CallingModel { model } => {
                            self.current_status =
                                Some(format!("שולח בקשה למודל {}...", model));
                        }
                        AnalysisStatus::Completed(result) => {
                            self.result = Some(result);
                            self.finish_analysis();
                            return;
                        }
                        AnalysisStatus::Failed(e) => {
                            self.error = Some(format!("שגיאה במהלך הניתוח: {}", e));
                            self.finish_analysis();
                            return;
                        }
                    },
                    Err(std::sync::mpsc::TryRecvError::Empty) => {
                        // No more messages, request repaint to check again
                        ctx.request_repaint();
                        break;
                    }
                    Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                        self.error = Some("שרשור הניתוח הסתיים באופן בלתי צפוי".to_string());
                        self.finish_analysis();
                        return;
                    }
                }
            }
        }
    }

    /// Clear the in-progress state after completion or failure
    fn finish_analysis(&mut self) {
        self.is_analyzing = false;
        self.status_receiver = None;
        self.current_status = None;
        self.start_time = None;
    }

    /// Render the image selection section
    fn render_image_selection(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let enabled = !self.is_analyzing;
            if ui
                .add_enabled(enabled, egui::Button::new("בחר תמונה..."))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("קובצי תמונה", &["jpg", "jpeg", "png"])
                    .pick_file()
                {
                    match std::fs::read(&path) {
                        Ok(bytes) => {
                            self.image_bytes = Some(bytes);
                            self.selected_image = Some(path);
                            // Clear previous results when a new image is selected
                            self.result = None;
                            self.error = None;
                        }
                        Err(e) => {
                            self.error = Some(format!("קריאת הקובץ נכשלה: {}", e));
                        }
                    }
                }
            }

            ui.add_space(10.0);

            // Display selected image path
            if let Some(ref path) = self.selected_image {
                ui.label(
                    RichText::new(path.display().to_string())
                        .monospace()
                        .color(Color32::LIGHT_BLUE),
                );
            } else {
                ui.label(
                    RichText::new("לא נבחרה תמונה")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
        });

        // Inline preview of the uploaded image
        if let (Some(path), Some(bytes)) = (&self.selected_image, &self.image_bytes) {
            ui.add_space(5.0);
            let uri = format!("bytes://{}", path.display());
            ui.add(egui::Image::from_bytes(uri, bytes.clone()).max_height(260.0));
            ui.label(
                RichText::new("התמונה שהועלתה לניתוח")
                    .color(Color32::GRAY)
                    .small(),
            );
        }
    }

    /// Render the context question input
    fn render_question_input(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("שאלת קונטקסט לניתוח").strong());
        ui.add_space(5.0);
        ui.add_enabled(
            !self.is_analyzing,
            egui::TextEdit::multiline(&mut self.question)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("לדוגמה: \"נתח את טכניקת הדדליפט. האם אני משתמש מספיק ברגליים?\""),
        );
    }

    /// Render the analyze button and progress
    fn render_analyze_button(&mut self, ui: &mut Ui, config: &Config, api_key_input: &str) {
        let can_analyze = self.image_bytes.is_some() && !self.is_analyzing;

        ui.horizontal(|ui| {
            let button_text = if self.is_analyzing {
                "מנתח..."
            } else {
                "נתח טכניקת אימון"
            };

            let button = egui::Button::new(RichText::new(button_text).size(16.0));

            if ui.add_enabled(can_analyze, button).clicked() {
                self.start_analysis(config, api_key_input);
            }

            if self.is_analyzing {
                ui.spinner();
            }
        });

        // Show detailed progress
        if self.is_analyzing {
            ui.add_space(8.0);

            egui::Frame::new()
                .fill(Color32::from_gray(30))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    // Elapsed time
                    if let Some(start) = self.start_time {
                        let elapsed = start.elapsed().as_secs_f32();
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("זמן שחלף:").strong());
                            ui.label(format!("{:.1} שניות", elapsed));
                        });
                    }

                    // Current status
                    if let Some(ref status) = self.current_status {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("מצב:").strong());
                            ui.label(RichText::new(status).color(Color32::LIGHT_BLUE));
                        });
                    }

                    // Active template variant
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("תבנית:").strong());
                        ui.label(config.variant.label());
                    });
                });
        }
    }

    /// Start analysis in a background thread
    fn start_analysis(&mut self, config: &Config, api_key_input: &str) {
        let Some(ref bytes) = self.image_bytes else {
            self.error = Some("לא הועלתה תמונה. אנא העלה קובץ JPG/PNG.".to_string());
            return;
        };

        // Explicit key from the settings tab wins over the environment
        let credential = match Credential::from_sources(
            Some(api_key_input.to_string()),
            std::env::var(GEMINI_API_KEY_ENV).ok(),
        ) {
            Ok(credential) => credential,
            Err(_) => {
                self.error = Some(
                    "לא נמצא מפתח API. יש להזין מפתח בלשונית ההגדרות או להגדיר משתנה סביבה GEMINI_API_KEY."
                        .to_string(),
                );
                return;
            }
        };

        let mime_type = self
            .selected_image
            .as_deref()
            .map(ImageMime::from_path)
            .unwrap_or_default();
        let request = AnalysisRequest::new(bytes.clone(), mime_type, self.question.clone());

        self.is_analyzing = true;
        self.error = None;
        self.result = None;
        self.start_time = Some(Instant::now());
        self.current_status = Some("מתכונן...".to_string());

        // Create channel for status updates
        let (sender, receiver): (Sender<AnalysisStatus>, Receiver<AnalysisStatus>) = channel();
        self.status_receiver = Some(receiver);

        let analyzer = AnalyzerConfig::default()
            .with_variant(config.variant)
            .with_model(config.model.clone());
        let model_label = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // Spawn analysis thread
        thread::spawn(move || {
            let _ = sender.send(AnalysisStatus::Starting);
            let _ = sender.send(AnalysisStatus::CallingModel { model: model_label });

            match analyze_photo(&request, &analyzer, &credential) {
                Ok(result) => {
                    let _ = sender.send(AnalysisStatus::Completed(result));
                }
                Err(e) => {
                    let _ = sender.send(AnalysisStatus::Failed(e.to_string()));
                }
            }
        });
    }

    /// Render the results section
    fn render_results(&mut self, ui: &mut Ui) {
        if let Some(ref result) = self.result {
            ui.label(RichText::new("תוצאות הניתוח").strong().size(16.0));
            ui.add_space(5.0);

            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                egui::Frame::new()
                    .fill(Color32::from_gray(25))
                    .inner_margin(12.0)
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.label(&result.markdown_text);
                    });
            });
        }
    }

    /// Render the error display
    fn render_error(&mut self, ui: &mut Ui) {
        if let Some(ref error) = self.error {
            ui.add_space(10.0);
            ui.label(RichText::new(error).color(Color32::LIGHT_RED));
        }
    }
}
