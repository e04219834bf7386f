//! Main application structure with tab navigation

use eframe::egui;
use formcheck_app::Config;

use crate::analyze_panel::AnalyzePanel;
use crate::settings_panel::SettingsPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyze,
    Settings,
}

impl Tab {
    /// Get the Hebrew label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Analyze => "ניתוח",
            Tab::Settings => "הגדרות",
        }
    }
}

/// Main application state
pub struct FormCheckerApp {
    /// Currently selected tab
    current_tab: Tab,
    /// Analyze panel state
    analyze_panel: AnalyzePanel,
    /// Settings panel state
    settings_panel: SettingsPanel,
    /// Application configuration
    config: Config,
}

impl FormCheckerApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Image preview support (JPEG/PNG decoding)
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Setup a font with Hebrew glyph coverage
        let mut fonts = egui::FontDefinitions::default();

        if let Some(font_data) = Self::load_system_font() {
            fonts.font_data.insert(
                "hebrew".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );

            // Add Hebrew font as primary for proportional text
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "hebrew".to_owned());

            // Also for monospace
            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .insert(0, "hebrew".to_owned());
        }

        cc.egui_ctx.set_fonts(fonts);

        // Load configuration
        let config = Config::load().unwrap_or_default();
        let settings_panel = SettingsPanel::new(&config);

        Self {
            current_tab: Tab::default(),
            analyze_panel: AnalyzePanel::new(),
            settings_panel,
            config,
        }
    }

    /// Load a system font with Hebrew glyph coverage
    fn load_system_font() -> Option<Vec<u8>> {
        let font_paths = [
            "C:/Windows/Fonts/arial.ttf",
            "C:/Windows/Fonts/segoeui.ttf",
            "/usr/share/fonts/truetype/noto/NotoSansHebrew-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    /// Render the tab bar
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            for tab in [Tab::Analyze, Tab::Settings] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for FormCheckerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel with tab bar
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        // Central panel with selected tab content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Analyze => {
                self.analyze_panel
                    .ui(ui, &self.config, self.settings_panel.api_key_input());
            }
            Tab::Settings => {
                self.settings_panel.ui(ui, &mut self.config);
            }
        });
    }
}
