use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{task, Alignment, Color, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod color;
mod config;
mod error;
mod i18n;
mod qr;
mod state;
mod ui;

use config::AppConfig;
use error::QrError;
use i18n::{Language, Strings};
use qr::{export, logo, RenderOptions};
use state::debounce::{Debouncer, Ticket};
use state::session::{Outcome, Session};
use state::settings::EcLevel;

/// Accent color used for headings and the save status
const ACCENT: Color = Color::from_rgb(0.0, 1.0, 0.82);

/// Logo file types offered by the open dialog
const LOGO_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Which color a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Fill,
    Background,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The text field changed
    TextChanged(String),
    /// A debounce timer elapsed
    DebounceElapsed(Ticket),
    EcLevelSelected(EcLevel),
    ShowEcInfo,
    OpenColorPicker(ColorTarget),
    ColorPicked(ColorTarget, Color),
    ColorPickerCancelled,
    PickLogo,
    RemoveLogo,
    Save,
    Reset,
    ToggleLanguage,
}

/// Main application state
///
/// A thin adapter: events are translated into `Session` operations and the
/// results are rendered back.
struct QrStudio {
    session: Session,
    /// What the text field shows; reaches the session only when the debounce fires
    input: String,
    debouncer: Debouncer<String>,
    /// Abort handle of the pending debounce timer
    timer: Option<task::Handle>,
    language: Language,
    preview: Option<Handle>,
    preview_max: u32,
    /// Save status line
    status: String,
    color_picker: Option<ColorTarget>,
}

impl QrStudio {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let debouncer = Debouncer::new(config.debounce_delay());
        tracing::info!(
            language = config.language.tag(),
            debounce_ms = debouncer.delay().as_millis() as u64,
            "QR Studio initialized"
        );

        (
            QrStudio {
                session: Session::new(RenderOptions::from(&config)),
                input: String::new(),
                debouncer,
                timer: None,
                language: config.language,
                preview: None,
                preview_max: config.preview_max,
                status: String::new(),
                color_picker: None,
            },
            Task::none(),
        )
    }

    fn strings(&self) -> &'static Strings {
        self.language.strings()
    }

    fn title(&self) -> String {
        self.strings().window_title.to_string()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TextChanged(text) => {
                self.input = text.clone();
                return self.schedule(text);
            }
            Message::DebounceElapsed(ticket) => {
                if let Some(text) = self.debouncer.fire(ticket, Instant::now()) {
                    self.timer = None;
                    self.session.settings.text = text;
                    self.regenerate();
                }
            }
            Message::EcLevelSelected(level) => {
                self.session.settings.ec_level = level;
                self.refresh();
            }
            Message::ShowEcInfo => {
                let strings = self.strings();
                MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title(strings.ec_info_title)
                    .set_description(strings.ec_info())
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
            Message::OpenColorPicker(target) => {
                self.color_picker = Some(target);
            }
            Message::ColorPicked(target, picked) => {
                self.color_picker = None;
                let value = color::from_iced(picked);
                match target {
                    ColorTarget::Fill => self.session.settings.fill = value,
                    ColorTarget::Background => self.session.settings.background = value,
                }
                self.refresh();
            }
            Message::ColorPickerCancelled => {
                self.color_picker = None;
            }
            Message::PickLogo => {
                let strings = self.strings();
                let picked = FileDialog::new()
                    .set_title(strings.logo_dialog_title)
                    .add_filter(strings.image_files, &LOGO_EXTENSIONS[..])
                    .pick_file();

                if let Some(path) = picked {
                    match logo::load_logo(&path) {
                        Ok(logo) => {
                            self.session.settings.logo = Some(logo);
                            self.refresh();
                        }
                        Err(e) => self.report(MessageLevel::Error, strings.logo_load_failed, &e),
                    }
                }
            }
            Message::RemoveLogo => {
                self.session.settings.logo = None;
                self.refresh();
            }
            Message::Save => {
                if !self.session.can_save() {
                    return Task::none();
                }

                let strings = self.strings();
                let destination = FileDialog::new()
                    .set_title(strings.save_dialog_title)
                    .set_file_name(export::DEFAULT_FILE_NAME)
                    .add_filter(strings.png_files, &["png"])
                    .add_filter(strings.all_files, &["*"])
                    .save_file();

                if let Some(path) = destination {
                    match self.session.save(&path) {
                        Ok(written) => self.status = strings.saved_message(&written),
                        Err(e) => self.report(MessageLevel::Error, strings.save_failed, &e),
                    }
                }
            }
            Message::Reset => {
                if self.debouncer.is_pending() {
                    tracing::debug!("dropping pending regeneration");
                }
                self.cancel_timer();
                self.input.clear();
                self.session.reset();
                self.preview = None;
                self.status.clear();
                self.color_picker = None;
            }
            Message::ToggleLanguage => {
                self.language = self.language.toggled();
                tracing::info!(language = self.language.tag(), "switched language");
                self.refresh();
            }
        }

        Task::none()
    }

    /// Restart the debounce timer for the latest text
    fn schedule(&mut self, text: String) -> Task<Message> {
        self.cancel_timer();

        let now = Instant::now();
        let ticket = self.debouncer.notify(text, now);
        let wait = self
            .debouncer
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or_default();

        let (timer, handle) = Task::perform(tokio::time::sleep(wait), move |_| {
            Message::DebounceElapsed(ticket)
        })
        .abortable();
        self.timer = Some(handle);
        timer
    }

    fn cancel_timer(&mut self) {
        self.debouncer.cancel();
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    /// Regenerate immediately if there is text to encode
    fn refresh(&mut self) {
        if self.session.settings.has_text() {
            self.regenerate();
        }
    }

    /// Run the pipeline and update the display from the outcome
    fn regenerate(&mut self) {
        match self.session.regenerate() {
            Outcome::Cleared => {
                self.preview = None;
            }
            Outcome::Rendered { logo_warning } => {
                self.preview = self
                    .session
                    .artifact()
                    .map(|artifact| ui::preview::handle(&artifact.preview_image));
                if let Some(warning) = logo_warning {
                    let strings = self.strings();
                    self.report(MessageLevel::Warning, strings.logo_embed_failed, &warning);
                }
            }
            Outcome::Failed(e) => {
                self.preview = None;
                let strings = self.strings();
                self.report(MessageLevel::Error, strings.encode_failed, &e);
            }
        }
    }

    /// Show a modal dialog for a non-fatal error
    fn report(&self, level: MessageLevel, prefix: &str, error: &QrError) {
        tracing::error!(error = %error, "{}", prefix);

        let strings = self.strings();
        let title = match level {
            MessageLevel::Warning => strings.warning_title,
            _ => strings.error_title,
        };

        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(format!("{}\n{}", prefix, strings.error_detail(error)))
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let strings = self.strings();
        let settings = &self.session.settings;

        let input = column![
            text(strings.input_label).size(16),
            text_input(strings.input_placeholder, &self.input)
                .on_input(Message::TextChanged)
                .padding(10)
                .size(16),
        ]
        .spacing(6);

        let colors = row![
            ui::controls::color_swatch(
                strings.fill_color,
                settings.fill,
                ColorTarget::Fill,
                self.color_picker == Some(ColorTarget::Fill),
            ),
            ui::controls::color_swatch(
                strings.background_color,
                settings.background,
                ColorTarget::Background,
                self.color_picker == Some(ColorTarget::Background),
            ),
        ]
        .spacing(10);

        let logo_buttons = row![
            button(text(strings.pick_logo)).on_press(Message::PickLogo).padding(8),
            button(text(strings.remove_logo))
                .on_press_maybe(settings.logo.is_some().then_some(Message::RemoveLogo))
                .padding(8),
        ]
        .spacing(10);

        let actions = row![
            button(text(strings.save_button))
                .on_press_maybe(self.session.can_save().then_some(Message::Save))
                .padding(10),
            button(text(strings.reset_button))
                .on_press(Message::Reset)
                .style(button::danger)
                .padding(10),
        ]
        .spacing(20);

        let caption = self.session.artifact().map(|artifact| {
            format!(
                "v{} · {}×{} px",
                artifact.version,
                artifact.full_image.width(),
                artifact.full_image.height()
            )
        });

        let content: Column<Message> = column![
            text(strings.header).size(28).color(ACCENT),
            input,
            ui::controls::ec_picker(strings, settings.ec_level),
            colors,
            logo_buttons,
            actions,
            text(strings.preview_label).size(18).color(ACCENT),
            ui::preview::panel(self.preview.as_ref(), caption, self.preview_max),
            text(&self.status).size(13).color(ACCENT),
            button(text(strings.switch_language))
                .on_press(Message::ToggleLanguage)
                .style(button::secondary)
                .padding(8),
            text(strings.footer).size(12),
        ]
        .spacing(16)
        .padding(30)
        .align_x(Alignment::Center);

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qr_studio=info")),
        )
        .init();

    let config = AppConfig::load();

    iced::application(QrStudio::title, QrStudio::update, QrStudio::view)
        .theme(QrStudio::theme)
        .window_size((520.0, 820.0))
        .centered()
        .run_with(move || QrStudio::new(config))
}
