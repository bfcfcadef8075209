use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, SyncSender, channel, sync_channel};

use crate::convert::formats::SUPPORTED_INPUT_EXTENSIONS;
use crate::convert::workflow::{self, RunObserver};
use crate::convert::{CancelFlag, ConversionRequest, FileSet, OutputFormat, RunSummary, codec};
use crate::style::{self, ThemeMode};

/// Startup configuration resolved once in `main` from the platform services.
pub struct AppConfig {
    pub platform_name: &'static str,
    pub default_save_dir: PathBuf,
}

/// Events the worker thread sends back to the UI, applied in order each
/// frame.
enum WorkerEvent {
    Log(String),
    Progress { current: usize, total: usize },
    FileExists { name: String, reply: SyncSender<bool> },
    Complete(RunSummary),
}

/// Channel-backed observer handed to the workflow. The overwrite question is
/// a synchronous handoff: the worker blocks on the reply channel until the
/// user clicks a button in the dialog.
struct GuiObserver {
    events: Sender<WorkerEvent>,
}

impl RunObserver for GuiObserver {
    fn on_progress(&self, current: usize, total: usize) {
        let _ = self.events.send(WorkerEvent::Progress { current, total });
    }

    fn on_log(&self, message: &str) {
        let _ = self.events.send(WorkerEvent::Log(message.to_string()));
    }

    fn on_file_exists(&self, candidate_name: &str) -> bool {
        let (reply_tx, reply_rx) = sync_channel(1);
        let sent = self.events.send(WorkerEvent::FileExists {
            name: candidate_name.to_string(),
            reply: reply_tx,
        });
        if sent.is_err() {
            return false;
        }
        reply_rx.recv().unwrap_or(false)
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        let _ = self.events.send(WorkerEvent::Complete(summary.clone()));
    }
}

struct OverwritePrompt {
    name: String,
    reply: SyncSender<bool>,
}

struct Notice {
    title: String,
    body: String,
}

struct Preview {
    texture: Option<egui::TextureHandle>,
    details: String,
}

pub struct ImageFlowApp {
    config: AppConfig,
    theme_mode: ThemeMode,
    files: FileSet,
    selected: Option<usize>,
    preview: Option<Preview>,
    preview_for: Option<PathBuf>,
    output_format: OutputFormat,
    quality: u8,
    destination: PathBuf,
    log_lines: Vec<String>,
    progress_current: usize,
    progress_total: usize,
    is_converting: bool,
    cancel: CancelFlag,
    worker_events: Option<Receiver<WorkerEvent>>,
    pending_overwrite: Option<OverwritePrompt>,
    notice: Option<Notice>,
    last_summary: Option<RunSummary>,
    drag_hover: bool,
}

impl ImageFlowApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let theme_mode = ThemeMode::Light;
        style::apply_theme(&cc.egui_ctx, theme_mode);

        let destination = config.default_save_dir.clone();
        let mut app = Self {
            config,
            theme_mode,
            files: FileSet::new(),
            selected: None,
            preview: None,
            preview_for: None,
            output_format: OutputFormat::Jpeg,
            quality: 100,
            destination,
            log_lines: Vec::new(),
            progress_current: 0,
            progress_total: 0,
            is_converting: false,
            cancel: CancelFlag::new(),
            worker_events: None,
            pending_overwrite: None,
            notice: None,
            last_summary: None,
            drag_hover: false,
        };
        app.log(&format!("System: {}", app.config.platform_name));
        app.log(&format!(
            "Default save folder: {}",
            app.destination.display()
        ));
        app
    }

    fn log(&mut self, message: &str) {
        tracing::info!("{message}");
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log_lines.push(format!("[{stamp}] {message}"));
    }

    fn add_files(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            let display = path.display().to_string();
            if self.files.add([path]) == 1 {
                self.log(&format!("Added file: {display}"));
            }
        }
    }

    fn pick_files(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose files to convert")
            .add_filter("Image files", &SUPPORTED_INPUT_EXTENSIONS)
            .add_filter("HEIC files", &["heic"])
            .add_filter("JPG files", &["jpg", "jpeg"])
            .add_filter("PNG files", &["png"])
            .add_filter("BMP files", &["bmp"])
            .add_filter("TIFF files", &["tiff"])
            .add_filter("GIF files", &["gif"])
            .pick_files();
        if let Some(paths) = picked {
            self.add_files(paths);
        }
    }

    fn pick_destination(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose destination folder")
            .set_directory(&self.destination)
            .pick_folder();
        if let Some(folder) = picked {
            self.destination = folder;
            let display = self.destination.display().to_string();
            self.log(&format!("Destination folder: {display}"));
        }
    }

    fn remove_selected(&mut self) {
        if let Some(idx) = self.selected {
            if let Some(entry) = self.files.get(idx) {
                let name = entry.file_name();
                self.log(&format!("Removed file: {name}"));
            }
            self.files.remove(&[idx]);
        }
        self.selected = None;
        self.preview = None;
        self.preview_for = None;
    }

    fn clear_files(&mut self) {
        self.files.clear();
        self.selected = None;
        self.preview = None;
        self.preview_for = None;
    }

    fn start_conversion(&mut self) {
        let request = ConversionRequest {
            files: self.files.snapshot(),
            format: self.output_format,
            quality: self.quality,
            destination: Some(self.destination.clone()),
        };
        let total = request.files.len();

        let (tx, rx) = channel();
        match workflow::start_run(request, self.cancel.clone(), GuiObserver { events: tx }) {
            Ok(_handle) => {
                // Completion arrives as a WorkerEvent; the handle is not joined.
                self.is_converting = true;
                self.worker_events = Some(rx);
                self.progress_current = 0;
                self.progress_total = total;
                self.last_summary = None;
            }
            Err(e) => {
                let message = e.to_string();
                self.log(&message);
                self.notice = Some(Notice {
                    title: "Error".to_string(),
                    body: message,
                });
            }
        }
    }

    fn poll_worker(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.worker_events.take() else {
            return;
        };

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        let mut finished = false;
        for event in events {
            match event {
                WorkerEvent::Log(message) => self.log(&message),
                WorkerEvent::Progress { current, total } => {
                    self.progress_current = current;
                    self.progress_total = total;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "ImageFlow ({current}/{total})"
                    )));
                }
                WorkerEvent::FileExists { name, reply } => {
                    self.pending_overwrite = Some(OverwritePrompt { name, reply });
                }
                WorkerEvent::Complete(summary) => {
                    self.is_converting = false;
                    finished = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title("ImageFlow".to_string()));
                    if !summary.cancelled {
                        self.progress_current = 0;
                        self.progress_total = 0;
                        self.notice = Some(Notice {
                            title: "Done!".to_string(),
                            body: "Your files have been converted and saved.".to_string(),
                        });
                    }
                    self.last_summary = Some(summary);
                }
            }
        }

        if !finished {
            self.worker_events = Some(rx);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.drag_hover = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() && !self.is_converting {
            self.add_files(dropped);
        }
    }

    /// Decodes the selected file once and keeps the thumbnail texture until
    /// the selection changes.
    fn ensure_preview(&mut self, ctx: &egui::Context) {
        let Some(idx) = self.selected else {
            self.preview = None;
            self.preview_for = None;
            return;
        };
        let Some(entry) = self.files.get(idx) else {
            self.selected = None;
            self.preview = None;
            self.preview_for = None;
            return;
        };
        if self.preview_for.as_deref() == Some(entry.path()) {
            return;
        }

        let path = entry.path().to_path_buf();
        let preview = match codec::open_image(&path) {
            Ok(img) => {
                let size = entry
                    .size_kb()
                    .map(|kb| format!("{kb} KB"))
                    .unwrap_or_else(|| "Unknown size".to_string());
                let details = format!(
                    "Name: {}\nFormat: {}\nResolution: {}x{} px\nSize: {}",
                    entry.file_name(),
                    entry.format().unwrap_or("Unknown"),
                    img.width(),
                    img.height(),
                    size,
                );
                let rgba = codec::preview_thumbnail(&img, 200, 200).to_rgba8();
                let (w, h) = (rgba.width() as usize, rgba.height() as usize);
                let color_image = egui::ColorImage {
                    size: [w, h],
                    source_size: egui::vec2(w as f32, h as f32),
                    pixels: rgba
                        .pixels()
                        .map(|p| {
                            egui::Color32::from_rgba_unmultiplied(p.0[0], p.0[1], p.0[2], p.0[3])
                        })
                        .collect(),
                };
                let texture =
                    ctx.load_texture("file_preview", color_image, egui::TextureOptions::default());
                Preview {
                    texture: Some(texture),
                    details,
                }
            }
            Err(e) => Preview {
                texture: None,
                details: format!("Read error: {e}"),
            },
        };
        self.preview = Some(preview);
        self.preview_for = Some(path);
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("ImageFlow").size(24.0).color(t.fg));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let icon = match self.theme_mode {
                    ThemeMode::Dark => "🌙",
                    ThemeMode::Light => "☀",
                };
                let toggle = ui
                    .button(icon)
                    .on_hover_text("Switch between light and dark theme");
                if toggle.clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    style::apply_theme(ui.ctx(), self.theme_mode);
                }
            });
        });

        ui.label(
            egui::RichText::new("Convert HEIC, JPG, PNG, BMP, TIFF and GIF images")
                .size(13.0)
                .color(t.weak_fg),
        );
    }

    fn render_file_panel(&mut self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        let mut add_clicked = false;
        let mut remove_clicked = false;
        let mut clear_clicked = false;
        let mut select_change: Option<Option<usize>> = None;

        egui::Frame::new()
            .fill(t.panel_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Files ({})", self.files.len()))
                            .size(14.0)
                            .color(t.fg),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_converting, |ui| {
                            if !self.files.is_empty() && ui.button("Clear all").clicked() {
                                clear_clicked = true;
                            }
                            if self.selected.is_some() && ui.button("Remove selected").clicked() {
                                remove_clicked = true;
                            }
                            let add = ui
                                .button("Add files")
                                .on_hover_text("Supported formats: HEIC, JPG, PNG, BMP, TIFF, GIF");
                            if add.clicked() {
                                add_clicked = true;
                            }
                        });
                    });
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if self.files.is_empty() {
                    let drop_bg = if self.drag_hover { t.button_bg } else { t.entry_bg };
                    let drop_border = if self.drag_hover { t.accent } else { t.border };

                    let (rect, response) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), 150.0),
                        egui::Sense::click(),
                    );
                    ui.painter().rect_filled(rect, 6.0, drop_bg);
                    ui.painter().rect_stroke(
                        rect,
                        6.0,
                        egui::Stroke::new(2.0, drop_border),
                        egui::StrokeKind::Outside,
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Drop images here or click to browse",
                        egui::FontId::proportional(14.0),
                        t.weak_fg,
                    );
                    if response.clicked() {
                        add_clicked = true;
                    }
                } else {
                    ui.columns(2, |columns| {
                        egui::ScrollArea::vertical()
                            .id_salt("file_list")
                            .max_height(260.0)
                            .show(&mut columns[0], |ui| {
                                for (idx, entry) in self.files.iter().enumerate() {
                                    let is_selected = self.selected == Some(idx);
                                    let info = format!(
                                        "{} | {}",
                                        entry.format().unwrap_or("Unknown"),
                                        entry
                                            .size_kb()
                                            .map(|kb| format!("{kb} KB"))
                                            .unwrap_or_else(|| "Unknown size".to_string()),
                                    );

                                    let row = ui.selectable_label(
                                        is_selected,
                                        egui::RichText::new(entry.file_name())
                                            .size(13.0)
                                            .color(t.fg),
                                    );
                                    ui.label(
                                        egui::RichText::new(info).size(11.0).color(t.weak_fg),
                                    );
                                    ui.add_space(4.0);

                                    if row.clicked() {
                                        select_change =
                                            Some(if is_selected { None } else { Some(idx) });
                                    }
                                }
                            });

                        self.render_preview_pane(&mut columns[1]);
                    });
                }
            });

        if let Some(selection) = select_change {
            self.selected = selection;
        }
        if add_clicked && !self.is_converting {
            self.pick_files();
        }
        if remove_clicked {
            self.remove_selected();
        }
        if clear_clicked {
            self.clear_files();
        }
    }

    fn render_preview_pane(&self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        egui::Frame::new()
            .fill(t.entry_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(6.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_height(236.0);
                ui.vertical_centered(|ui| match &self.preview {
                    Some(preview) => {
                        if let Some(texture) = &preview.texture {
                            ui.image((texture.id(), texture.size_vec2()));
                            ui.add_space(8.0);
                        }
                        ui.label(
                            egui::RichText::new(&preview.details)
                                .size(12.0)
                                .color(t.fg),
                        );
                    }
                    None => {
                        ui.add_space(100.0);
                        ui.label(
                            egui::RichText::new("Select a file to preview it")
                                .size(12.0)
                                .color(t.weak_fg),
                        );
                    }
                });
            });
    }

    fn render_format_settings(&mut self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        egui::Frame::new()
            .fill(t.panel_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Output format").size(14.0).color(t.fg));
                ui.add_space(8.0);

                ui.horizontal_wrapped(|ui| {
                    for format in OutputFormat::all() {
                        let is_selected = self.output_format == format;
                        let (bg, fg) = if is_selected {
                            (t.accent, t.accent_fg)
                        } else {
                            (t.button_bg, t.fg)
                        };

                        let button = egui::Button::new(
                            egui::RichText::new(format.as_str()).size(13.0).color(fg),
                        )
                        .fill(bg)
                        .stroke(egui::Stroke::NONE)
                        .corner_radius(6.0)
                        .min_size(egui::vec2(70.0, 32.0));

                        if ui.add(button).clicked() {
                            self.output_format = format;
                        }
                    }
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Output quality: {}%", self.quality))
                            .color(t.fg),
                    );
                    ui.add(egui::Slider::new(&mut self.quality, 0..=100).show_value(false))
                        .on_hover_text("Only JPEG output uses the quality value");
                });
            });
    }

    fn render_destination(&mut self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        let mut browse_clicked = false;
        egui::Frame::new()
            .fill(t.panel_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Destination folder")
                        .size(14.0)
                        .color(t.fg),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.destination.display().to_string())
                            .color(t.weak_fg),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let browse = ui
                            .add_enabled(!self.is_converting, egui::Button::new("Browse"))
                            .on_hover_text("Choose where converted files are saved");
                        if browse.clicked() {
                            browse_clicked = true;
                        }
                    });
                });
            });

        if browse_clicked {
            self.pick_destination();
        }
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        egui::Frame::new()
            .fill(t.panel_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                let fraction = if self.progress_total > 0 {
                    self.progress_current as f32 / self.progress_total as f32
                } else {
                    0.0
                };

                let fill = if self.is_converting {
                    t.accent
                } else {
                    match &self.last_summary {
                        Some(summary) if summary.failed > 0 => t.danger,
                        Some(_) => t.success,
                        None => t.accent,
                    }
                };

                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 22.0),
                    egui::Sense::hover(),
                );
                ui.painter().rect_filled(rect, 4.0, t.entry_bg);
                let fill_rect = egui::Rect::from_min_size(
                    rect.min,
                    egui::vec2(rect.width() * fraction, rect.height()),
                );
                ui.painter().rect_filled(fill_rect, 4.0, fill);

                if self.progress_total > 0 {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("{}/{}", self.progress_current, self.progress_total),
                        egui::FontId::proportional(12.0),
                        t.fg,
                    );
                }
            });
    }

    fn render_log(&self, ui: &mut egui::Ui) {
        let t = style::theme(self.theme_mode);

        egui::Frame::new()
            .fill(t.entry_bg)
            .stroke(egui::Stroke::new(1.0, t.border))
            .corner_radius(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_height(120.0);
                egui::ScrollArea::vertical()
                    .id_salt("log")
                    .max_height(140.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            ui.label(
                                egui::RichText::new(line).monospace().size(11.0).color(t.fg),
                            );
                        }
                    });
            });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        let mut convert_clicked = false;
        let mut cancel_clicked = false;

        ui.horizontal(|ui| {
            let can_convert = !self.files.is_empty() && !self.is_converting;
            let convert = ui.add_enabled_ui(can_convert, |ui| {
                style::accent_button(ui, "Convert", self.theme_mode)
                    .on_hover_text("Start converting the queued files")
            });
            if convert.inner.clicked() {
                convert_clicked = true;
            }

            let cancel = ui
                .add_enabled(self.is_converting, egui::Button::new("Cancel"))
                .on_hover_text("Cancel the running conversion");
            if cancel.clicked() {
                cancel_clicked = true;
            }
        });

        if convert_clicked {
            self.start_conversion();
        }
        if cancel_clicked {
            self.cancel.cancel();
            self.log("Conversion cancel requested.");
        }
    }

    fn render_overwrite_dialog(&mut self, ctx: &egui::Context) {
        let Some(prompt) = &self.pending_overwrite else {
            return;
        };
        let t = style::theme(self.theme_mode);

        egui::Area::new(egui::Id::new("dialog_overlay"))
            .fixed_pos(egui::Pos2::ZERO)
            .order(egui::Order::Middle)
            .interactable(false)
            .show(ctx, |ui| {
                ui.painter().rect_filled(
                    ctx.content_rect(),
                    0.0,
                    egui::Color32::from_black_alpha(120),
                );
            });

        let mut decision: Option<bool> = None;
        egui::Window::new("File exists")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Tooltip)
            .frame(
                egui::Frame::new()
                    .fill(t.bg)
                    .stroke(egui::Stroke::new(1.0, t.border))
                    .corner_radius(8.0)
                    .inner_margin(24.0),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "File {} already exists. Do you want to overwrite it?",
                            prompt.name
                        ))
                        .size(14.0)
                        .color(t.fg),
                    );
                    ui.add_space(16.0);
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 12.0;
                        if style::accent_button(ui, "Yes", self.theme_mode).clicked() {
                            decision = Some(true);
                        }
                        if ui.button("No").clicked() {
                            decision = Some(false);
                        }
                    });
                });
            });

        if let Some(overwrite) = decision {
            if let Some(prompt) = self.pending_overwrite.take() {
                let _ = prompt.reply.send(overwrite);
            }
        }
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let t = style::theme(self.theme_mode);

        let mut dismissed = false;
        egui::Window::new(notice.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Tooltip)
            .frame(
                egui::Frame::new()
                    .fill(t.bg)
                    .stroke(egui::Stroke::new(1.0, t.border))
                    .corner_radius(8.0)
                    .inner_margin(24.0),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(&notice.body).size(14.0).color(t.fg));
                    if let Some(summary) = &self.last_summary {
                        if !self.is_converting {
                            ui.add_space(4.0);
                            ui.label(
                                egui::RichText::new(format!(
                                    "Succeeded: {}, failed: {}, skipped: {}",
                                    summary.converted, summary.failed, summary.skipped
                                ))
                                .size(12.0)
                                .color(t.weak_fg),
                            );
                        }
                    }
                    ui.add_space(16.0);
                    if style::accent_button(ui, "OK", self.theme_mode).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for ImageFlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);
        self.handle_dropped_files(ctx);
        self.ensure_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    self.render_header(ui);
                    ui.add_space(12.0);
                    self.render_file_panel(ui);
                    ui.add_space(12.0);
                    self.render_format_settings(ui);
                    ui.add_space(12.0);
                    self.render_destination(ui);
                    ui.add_space(12.0);
                    self.render_progress(ui);
                    ui.add_space(12.0);
                    self.render_log(ui);
                    ui.add_space(12.0);
                    self.render_actions(ui);
                    ui.add_space(16.0);
                });
        });

        self.render_overwrite_dialog(ctx);
        self.render_notice(ctx);

        if self.is_converting {
            ctx.request_repaint();
        }
    }
}
