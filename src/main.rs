use iced::widget::image::Handle as ImageHandle;
use iced::widget::{column, container, scrollable, stack, text};
use iced::{window, Element, Event, Length, Rectangle, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod catalog;
mod generate;
mod state;
mod ui;
mod upload;

use generate::GenerationClient;
use state::nav::{NavCategory, NavState, Page};
use state::run::RemixRun;
use ui::hover::{self, HoverScheduler};
use upload::UploadedPhoto;

/// Output formats offered by the download buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Png,
    Jpeg,
}

impl DownloadFormat {
    fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Png => "png",
            DownloadFormat::Jpeg => "jpeg",
        }
    }
}

/// Main application state
struct RemixStudio {
    /// Navigation drill-down and active category
    nav: NavState,
    /// Debounced hover preview state
    hover: HoverScheduler,
    /// The current generation run
    run: RemixRun,
    /// Identifies the run whose settlement we are willing to accept;
    /// bumped on every submit and every navigation so a request left
    /// behind by an abandoned screen cannot settle into a new one.
    run_token: u64,
    client: GenerationClient,
    /// Window size, tracked for hover preview placement
    viewport: Size,
    /// Decoded picked photo, for the upload zone
    photo_preview: Option<ImageHandle>,
    /// Decoded generation result, for the result panel
    result_image: Option<ImageHandle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    CategorySelected(NavCategory),
    StackSelected(&'static catalog::Stack),
    TemplateSelected(&'static catalog::Template),
    BackPressed,

    // Hover preview lifecycle
    TileHovered {
        image_url: String,
        anchor: iced::widget::container::Id,
    },
    TileUnhovered,
    HoverShowElapsed(u64),
    HoverAnchorMeasured {
        token: u64,
        image_url: String,
        anchor: Option<Rectangle>,
    },
    HoverHideElapsed(u64),

    // Photo intake
    PickPhoto,
    FileDropped(PathBuf),
    PhotoLoaded(Result<UploadedPhoto, String>),
    ClearPhoto,

    // Generation run
    RemixPressed,
    RemixSettled {
        token: u64,
        outcome: Result<String, String>,
    },
    ResetRun,

    // Download
    Download(DownloadFormat),
    DownloadFinished(Result<String, String>),

    WindowResized(Size),
}

impl RemixStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let status = format!(
            "Ready. {} stacks, {} templates.",
            catalog::stacks().len(),
            catalog::templates().len()
        );
        tracing::info!(
            stacks = catalog::stacks().len(),
            templates = catalog::templates().len(),
            "remix studio initialized"
        );

        (
            RemixStudio {
                nav: NavState::default(),
                hover: HoverScheduler::default(),
                run: RemixRun::default(),
                run_token: 0,
                client: GenerationClient::from_env(),
                viewport: Size::new(1280.0, 800.0),
                photo_preview: None,
                result_image: None,
                status,
            },
            Task::none(),
        )
    }

    /// Every navigation transition starts here: the hover preview and
    /// its outstanding timers are dropped before the page changes, and
    /// whatever run the old screen held is abandoned.
    fn leave_screen(&mut self) {
        self.hover.clear();
        self.run = RemixRun::default();
        self.run_token += 1;
        self.photo_preview = None;
        self.result_image = None;
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CategorySelected(category) => {
                self.leave_screen();
                self.nav.set_category(category);
                Task::none()
            }
            Message::StackSelected(stack) => {
                self.leave_screen();
                self.nav.select_stack(stack);
                Task::none()
            }
            Message::TemplateSelected(template) => {
                self.leave_screen();
                self.nav.select_template(template);
                Task::none()
            }
            Message::BackPressed => {
                self.leave_screen();
                self.nav.go_back();
                Task::none()
            }

            Message::TileHovered { image_url, anchor } => {
                let token = self.hover.request_show(image_url, anchor);
                Task::perform(tokio::time::sleep(hover::SHOW_DELAY), move |_| {
                    Message::HoverShowElapsed(token)
                })
            }
            Message::TileUnhovered => {
                let token = self.hover.request_hide();
                Task::perform(tokio::time::sleep(hover::HIDE_DELAY), move |_| {
                    Message::HoverHideElapsed(token)
                })
            }
            Message::HoverShowElapsed(token) => match self.hover.show_elapsed(token) {
                Some((image_url, anchor)) => {
                    iced::widget::container::visible_bounds(anchor).map(move |rect| {
                        Message::HoverAnchorMeasured {
                            token,
                            image_url: image_url.clone(),
                            anchor: rect,
                        }
                    })
                }
                None => Task::none(),
            },
            Message::HoverAnchorMeasured {
                token,
                image_url,
                anchor,
            } => {
                self.hover.anchor_measured(token, image_url, anchor);
                Task::none()
            }
            Message::HoverHideElapsed(token) => {
                self.hover.hide_elapsed(token);
                Task::none()
            }

            Message::PickPhoto => {
                if self.run.is_loading() {
                    return Task::none();
                }

                // Show the native file picker, filtered to the accepted types
                let file = FileDialog::new()
                    .set_title("Choose Your Photo")
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                    .pick_file();

                match file {
                    Some(path) => Task::perform(upload::load_photo(path), Message::PhotoLoaded),
                    None => Task::none(),
                }
            }
            Message::FileDropped(path) => {
                // Dropping a file anywhere on the window counts as an
                // upload, but only while the execution screen can take one.
                if self.nav.page() != Page::Template || self.run.is_loading() {
                    return Task::none();
                }
                Task::perform(upload::load_photo(path), Message::PhotoLoaded)
            }
            Message::PhotoLoaded(Ok(photo)) => {
                if self.run.is_loading() {
                    return Task::none();
                }
                self.photo_preview = Some(ImageHandle::from_bytes(photo.bytes.as_ref().clone()));
                self.run.set_photo(Some(photo));
                self.status = "Photo ready.".to_string();
                Task::none()
            }
            Message::PhotoLoaded(Err(message)) => {
                tracing::warn!(%message, "photo rejected");
                self.status = message;
                Task::none()
            }
            Message::ClearPhoto => {
                self.run.set_photo(None);
                self.photo_preview = None;
                Task::none()
            }

            Message::RemixPressed => {
                let Some(template) = self.nav.template() else {
                    return Task::none();
                };

                match self.run.begin() {
                    Some(photo) => {
                        self.run_token += 1;
                        let token = self.run_token;
                        let client = self.client.clone();
                        self.status = format!("Remixing with {}...", template.name);

                        Task::perform(
                            async move {
                                client
                                    .generate(template, &photo)
                                    .await
                                    .map_err(|e| e.to_string())
                            },
                            move |outcome| Message::RemixSettled { token, outcome },
                        )
                    }
                    // Either a request is already in flight or there was
                    // no photo and the run failed itself; nothing to spawn.
                    None => Task::none(),
                }
            }
            Message::RemixSettled { token, outcome } => {
                if token != self.run_token {
                    tracing::debug!("dropping settlement from an abandoned run");
                    return Task::none();
                }

                if let Ok(data_uri) = &outcome {
                    match generate::parse_data_uri(data_uri) {
                        Ok((_mime, bytes)) => {
                            self.result_image = Some(ImageHandle::from_bytes(bytes));
                            self.status = "✅ Remix complete.".to_string();
                        }
                        Err(message) => {
                            tracing::error!(%message, "service returned an undecodable image");
                        }
                    }
                }

                self.run.settle(outcome);
                Task::none()
            }
            Message::ResetRun => {
                self.run.reset();
                self.photo_preview = None;
                self.result_image = None;
                self.status = "Ready for another remix.".to_string();
                Task::none()
            }

            Message::Download(format) => {
                let Some(data_uri) = self.run.result() else {
                    return Task::none();
                };

                let file = FileDialog::new()
                    .set_title("Save Remixed Image")
                    .set_file_name(format!("remixed-image.{}", format.extension()))
                    .save_file();

                match file {
                    Some(path) => Task::perform(
                        save_image_async(data_uri.to_string(), path, format),
                        Message::DownloadFinished,
                    ),
                    None => Task::none(),
                }
            }
            Message::DownloadFinished(Ok(path)) => {
                self.status = format!("✅ Saved to {}", path);
                Task::none()
            }
            Message::DownloadFinished(Err(message)) => {
                tracing::error!(%message, "saving the remixed image failed");
                self.status = message;
                Task::none()
            }

            Message::WindowResized(size) => {
                self.viewport = size;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.nav.page() {
            Page::Home => ui::views::home_page(),
            Page::Stack => match self.nav.stack() {
                Some(stack) => ui::views::stack_page(stack),
                None => ui::views::home_page(),
            },
            Page::Template => match (self.nav.stack(), self.nav.template()) {
                (Some(stack), Some(template)) => ui::views::execution_page(
                    template,
                    stack,
                    &self.run,
                    self.photo_preview.as_ref(),
                    self.result_image.as_ref(),
                ),
                _ => ui::views::home_page(),
            },
        };

        let base = column![
            ui::views::header(self.nav.category()),
            scrollable(page).width(Length::Fill).height(Length::Fill),
            container(text(&self.status).size(13)).padding([6, 32]),
        ];

        // The floating preview is only mounted while one is published.
        match self.hover.active() {
            Some(preview) => stack![base, hover::overlay(preview, self.viewport)].into(),
            None => base.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(handle_window_event)
    }
}

fn handle_window_event(
    event: Event,
    _status: iced::event::Status,
    _window: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("remix_studio=info")),
        )
        .init();

    iced::application("Remix Studio", RemixStudio::update, RemixStudio::view)
        .theme(RemixStudio::theme)
        .subscription(RemixStudio::subscription)
        .window_size(Size::new(1280.0, 800.0))
        .centered()
        .run_with(RemixStudio::new)
}

/// Decode the held data URI and save it in the requested format.
/// Transcoding is CPU-bound, so it runs on a blocking thread; saving as
/// JPEG drops the alpha channel first.
async fn save_image_async(
    data_uri: String,
    path: PathBuf,
    format: DownloadFormat,
) -> Result<String, String> {
    let (_mime, bytes) = generate::parse_data_uri(&data_uri)?;

    tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| format!("Could not decode the generated image: {}", e))?;

        let (decoded, target) = match format {
            DownloadFormat::Png => (decoded, image::ImageFormat::Png),
            DownloadFormat::Jpeg => (
                image::DynamicImage::ImageRgb8(decoded.to_rgb8()),
                image::ImageFormat::Jpeg,
            ),
        };

        decoded
            .save_with_format(&path, target)
            .map_err(|e| format!("Could not save the image: {}", e))?;

        tracing::info!(path = %path.display(), "remixed image saved");
        Ok(path.display().to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
