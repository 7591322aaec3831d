//! Main application window.

use crate::extract;
use crate::loader;
use crate::mapper::{self, FieldSource, Mapping};
use crate::table::Table;
use anyhow::Result;
use eframe::egui;
use egui::{CentralPanel, RichText, TopBottomPanel, Vec2};
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

use super::theme::{dark_theme, Colors};

/// Rows shown in the preview grid.
const PREVIEW_ROWS: usize = 50;

/// One line of the activity log.
struct LogLine {
    is_error: bool,
    text: String,
}

/// Application state. Replaced wholesale on each load; every action runs to
/// completion inside the frame callback.
#[derive(Default)]
pub struct TableExtractorApp {
    /// Input file path (editable).
    input_path: String,
    /// Output CSV path (editable).
    output_path: String,
    /// Tables of the current load, in file order.
    tables: Vec<Table>,
    /// Mapping suggested for the first table.
    mapping: Mapping,
    /// Unique real column names across all tables, sorted.
    column_options: Vec<String>,
    /// Names of columns synthesized by the address fallback.
    derived_options: Vec<String>,
    /// Combo selections; empty string means "(none)".
    city_choice: String,
    region_choice: String,
    state_choice: String,
    /// Optional extra columns with their checked state.
    extras: Vec<(String, bool)>,
    /// Result of the last extract, if any.
    extracted: Option<Table>,
    /// Activity log shown in the bottom panel.
    log: Vec<LogLine>,
    status: String,
}

impl TableExtractorApp {
    fn log_info(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!("{}", text);
        self.status = text.clone();
        self.log.push(LogLine {
            is_error: false,
            text,
        });
    }

    fn log_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!("{}", text);
        self.status = text.clone();
        self.log.push(LogLine {
            is_error: true,
            text,
        });
    }

    /// Load the file at `input_path`, suggest a mapping, and reset the
    /// selection UI. Failed loads retain no partial state.
    fn on_load(&mut self) {
        let path_text = self.input_path.trim().to_string();
        if path_text.is_empty() {
            self.log_error("Please select a file first.");
            return;
        }
        let path = PathBuf::from(&path_text);
        if !path.exists() {
            self.log_error(format!("File does not exist: {}", path_text));
            return;
        }

        self.log_info(format!("Loading tables from {} ...", path_text));

        let tables = match loader::load_tables(&path) {
            Ok(tables) => tables,
            Err(e) => {
                self.clear_loaded_state();
                self.log_error(format!("Load error: {}", e));
                return;
            }
        };

        self.log_info(format!("Loaded {} table(s).", tables.len()));

        // Combined column set across all tables, sorted and deduplicated.
        let mut all_columns: Vec<String> = tables
            .iter()
            .flat_map(|t| t.columns().iter().cloned())
            .collect();
        all_columns.sort();
        all_columns.dedup();

        let mapping = mapper::resolve(&tables[0]);

        self.tables = tables;
        self.derived_options = mapping.derived.iter().map(|d| d.name.to_string()).collect();
        self.column_options = all_columns;
        self.city_choice = choice_of(&mapping.city);
        self.region_choice = choice_of(&mapping.region);
        self.state_choice = choice_of(&mapping.state);
        self.extras = self
            .column_options
            .iter()
            .map(|c| (c.clone(), false))
            .collect();
        self.extracted = None;
        self.mapping = mapping;

        self.report_mapping();
        self.log_info("Ready. Pick columns and click 'Extract & Preview'.");
    }

    fn report_mapping(&mut self) {
        let describe = |source: &FieldSource| match source {
            FieldSource::Column(name) => name.clone(),
            FieldSource::Derived(name) => format!("{} (parsed from address)", name),
            FieldSource::Unresolved => "(unresolved - pick manually)".to_string(),
        };
        let line = format!(
            "Suggested mapping: City -> {}, Region -> {}, State -> {}",
            describe(&self.mapping.city),
            describe(&self.mapping.region),
            describe(&self.mapping.state),
        );
        self.log_info(line);
    }

    fn clear_loaded_state(&mut self) {
        self.tables.clear();
        self.mapping = Mapping::default();
        self.column_options.clear();
        self.derived_options.clear();
        self.city_choice.clear();
        self.region_choice.clear();
        self.state_choice.clear();
        self.extras.clear();
        self.extracted = None;
    }

    /// Columns chosen for extraction, canonical fields first, no duplicates.
    fn chosen_columns(&self) -> Vec<String> {
        let mut chosen: Vec<String> = Vec::new();
        for choice in [&self.city_choice, &self.region_choice, &self.state_choice] {
            if !choice.is_empty() && !chosen.contains(choice) {
                chosen.push(choice.clone());
            }
        }
        for (name, checked) in &self.extras {
            if *checked && !chosen.contains(name) {
                chosen.push(name.clone());
            }
        }
        chosen
    }

    fn on_extract(&mut self) {
        if self.tables.is_empty() {
            self.log_error("Please load a file first.");
            return;
        }
        let chosen = self.chosen_columns();
        if chosen.is_empty() {
            self.log_error("Please choose at least one column to extract.");
            return;
        }

        self.log_info(format!("Extracting columns: {}", chosen.join(", ")));
        let result = extract::extract_columns(&self.tables, &chosen, &self.mapping);
        self.log_info(format!("Extracted {} rows.", result.row_count()));
        self.extracted = Some(result);
    }

    fn on_export(&mut self) {
        let Some(extracted) = self.extracted.as_ref() else {
            self.log_error("Nothing to export. Run 'Extract & Preview' first.");
            return;
        };
        let out_path = self.output_path.trim().to_string();
        if out_path.is_empty() {
            self.log_error("Please choose an output CSV path.");
            return;
        }

        match extract::write_csv(extracted, Path::new(&out_path)) {
            Ok(()) => self.log_info(format!("Exported CSV to: {}", out_path)),
            Err(e) => self.log_error(format!("Export error: {:#}", e)),
        }
    }

    fn file_row(&mut self, ui: &mut egui::Ui) {
        let mut load_clicked = false;
        ui.horizontal(|ui| {
            ui.label("Input file:");
            ui.add(
                egui::TextEdit::singleline(&mut self.input_path)
                    .desired_width(ui.available_width() - 160.0)
                    .hint_text("Select a CSV, Excel, HTML, or PDF file..."),
            );
            if ui.button("Browse...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Tables", loader::READABLE_EXTENSIONS)
                    .pick_file()
                {
                    self.input_path = path.display().to_string();
                }
            }
            load_clicked = ui.button("Load").clicked();
        });
        if load_clicked {
            self.on_load();
        }
    }

    fn field_combo(&mut self, ui: &mut egui::Ui, label: &str, field: Field) {
        let options: Vec<String> = self
            .column_options
            .iter()
            .chain(self.derived_options.iter())
            .cloned()
            .collect();
        let choice = match field {
            Field::City => &mut self.city_choice,
            Field::Region => &mut self.region_choice,
            Field::State => &mut self.state_choice,
        };

        ui.horizontal(|ui| {
            ui.label(format!("{}:", label));
            egui::ComboBox::from_id_salt(label)
                .width(200.0)
                .selected_text(if choice.is_empty() {
                    "(none)".to_string()
                } else {
                    choice.clone()
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(choice, String::new(), "(none)");
                    for option in &options {
                        ui.selectable_value(choice, option.clone(), option.as_str());
                    }
                });
        });
    }

    fn mapping_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Select columns to extract")
                .size(16.0)
                .color(Colors::TEXT_PRIMARY),
        );
        ui.add_space(4.0);

        self.field_combo(ui, "City", Field::City);
        self.field_combo(ui, "Region", Field::Region);
        self.field_combo(ui, "State", Field::State);

        ui.add_space(8.0);
        ui.label(
            RichText::new("Additional columns (optional):").color(Colors::TEXT_SECONDARY),
        );
        egui::ScrollArea::vertical()
            .id_salt("extras")
            .max_height(200.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (name, checked) in self.extras.iter_mut() {
                    ui.checkbox(checked, name.as_str());
                }
            });
    }

    fn preview_panel(&mut self, ui: &mut egui::Ui) {
        let mut export_clicked = false;

        ui.label(
            RichText::new("Preview")
                .size(16.0)
                .color(Colors::TEXT_PRIMARY),
        );
        ui.add_space(4.0);

        let extract_clicked = ui
            .add_enabled(!self.tables.is_empty(), egui::Button::new("Extract & Preview"))
            .clicked();

        if let Some(extracted) = self.extracted.as_ref() {
            let shown = extracted.row_count().min(PREVIEW_ROWS);
            ui.label(
                RichText::new(format!(
                    "{} rows extracted, showing first {}",
                    extracted.row_count(),
                    shown
                ))
                .size(12.0)
                .color(Colors::TEXT_SECONDARY),
            );
            preview_table(ui, extracted, shown);
        } else {
            ui.label(
                RichText::new("No preview yet.")
                    .size(12.0)
                    .color(Colors::TEXT_SECONDARY),
            );
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.output_path)
                    .desired_width(ui.available_width() - 180.0)
                    .hint_text("Output CSV path"),
            );
            if ui.button("Save As...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV files", &["csv"])
                    .save_file()
                {
                    let mut path = path;
                    if path.extension().is_none_or(|e| !e.eq_ignore_ascii_case("csv")) {
                        path.set_extension("csv");
                    }
                    self.output_path = path.display().to_string();
                }
            }
            let can_export = self
                .extracted
                .as_ref()
                .is_some_and(|t| !t.is_empty());
            export_clicked = ui
                .add_enabled(can_export, egui::Button::new("Export CSV"))
                .clicked();
        });

        if extract_clicked {
            self.on_extract();
        }
        if export_clicked {
            self.on_export();
        }
    }

    fn log_panel(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("activity_log")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.log {
                    let (icon, color) = if line.is_error {
                        ("✗", Colors::ERROR)
                    } else {
                        ("✓", Colors::SUCCESS)
                    };
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(icon).color(color));
                        ui.label(
                            RichText::new(&line.text)
                                .size(12.0)
                                .color(Colors::TEXT_SECONDARY),
                        );
                    });
                }
            });
    }
}

enum Field {
    City,
    Region,
    State,
}

fn choice_of(source: &FieldSource) -> String {
    source.column_name().unwrap_or_default().to_string()
}

fn preview_table(ui: &mut egui::Ui, table: &Table, shown: usize) {
    let ncols = table.columns().len();

    let max_scroll_height = (ui.available_height() - 60.0).max(120.0);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(max_scroll_height)
        .columns(Column::auto().at_least(60.0), ncols)
        .header(20.0, |mut header| {
            for name in table.columns() {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown, |mut row| {
                let row_idx = row.index();
                for cell in &table.rows()[row_idx] {
                    row.col(|ui| {
                        ui.label(cell.as_deref().unwrap_or(""));
                    });
                }
            });
        });
}

impl eframe::App for TableExtractorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A dropped file replaces the input path and loads immediately.
        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.input_path = path.display().to_string();
            self.on_load();
        }

        TopBottomPanel::bottom("log_panel")
            .default_height(130.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(&self.status)
                        .size(13.0)
                        .color(Colors::TEXT_PRIMARY),
                );
                ui.separator();
                self.log_panel(ui);
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 10.0);

            ui.heading(
                RichText::new("Table Extractor")
                    .size(24.0)
                    .color(Colors::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new("Load a table, map City / Region / State, export CSV")
                    .size(13.0)
                    .color(Colors::TEXT_SECONDARY),
            );
            ui.add_space(6.0);

            self.file_row(ui);
            ui.separator();

            ui.columns(2, |columns| {
                self.mapping_panel(&mut columns[0]);
                self.preview_panel(&mut columns[1]);
            });
        });
    }
}

/// Launch the application window.
pub fn run() -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 680.0])
            .with_min_inner_size([820.0, 560.0])
            .with_title("Table Extractor")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Table Extractor",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_style(dark_theme());
            Ok(Box::new(TableExtractorApp::default()))
        }),
    )
    .map_err(|e| anyhow::anyhow!("application error: {}", e))
}
