use iced::widget::image as picture;
use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, slider, text, text_editor,
    text_input,
};
use iced::{Alignment, Element, Length, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task;

mod error;
mod images;
mod model;
mod prompt;
mod state;

use error::CaptionError;
use images::{LoadedImage, Thumbnail};
use model::worker::{self, CancelFlag, WorkerEvent};
use model::{ModelHandle, SamplingParams};
use prompt::{CaptionLength, CaptionType, EXTRA_OPTIONS, NAME_OPTION};
use state::batch::BatchCoordinator;
use state::cache::CaptionCache;
use state::settings::AppSettings;

/// Main application state
struct CaptionStudio {
    /// The one loaded model instance; at most one worker uses it at a time
    model: Option<ModelHandle>,
    model_loading: bool,

    /// Currently displayed image (decoded, ready for generation)
    current: Option<LoadedImage>,
    preview: Option<picture::Handle>,

    /// Batch mode: the directory's image files, in sorted order
    image_files: Vec<PathBuf>,
    batch_mode: bool,
    thumbnails: Vec<(PathBuf, picture::Handle)>,

    cache: CaptionCache,
    batch: BatchCoordinator,

    // Prompt selections
    caption_type: CaptionType,
    caption_length: CaptionLength,
    extra_toggles: Vec<bool>,
    name: String,

    // Sampling settings
    temperature: f32,
    top_p: f32,
    max_new_tokens: u32,
    log_prompt: bool,
    dark_mode: bool,

    /// Auto-built but editable; its content is what the worker receives
    prompt_content: text_editor::Content,
    caption_content: text_editor::Content,
    /// Caption text mirrored out of the editor / streamed tokens
    caption_text: String,

    generating: bool,
    cancel: Option<CancelFlag>,

    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    LoadModel,
    ModelLoaded(Result<ModelHandle, CaptionError>),

    SelectImage,
    LoadDirectory,
    ImageLoaded(Result<LoadedImage, CaptionError>),
    BatchImageLoaded(Result<LoadedImage, CaptionError>),
    ThumbnailReady(Result<Thumbnail, CaptionError>),
    ThumbnailClicked(PathBuf),

    CaptionTypeSelected(CaptionType),
    CaptionLengthSelected(CaptionLength),
    ExtraToggled(usize, bool),
    NameChanged(String),
    TemperatureChanged(f32),
    TopPChanged(f32),
    MaxTokensChanged(u32),
    LogPromptToggled(bool),
    DarkModeToggled(bool),
    PromptAction(text_editor::Action),
    CaptionAction(text_editor::Action),

    GenerateCurrent,
    GenerateBatch,
    StopGeneration,
    Generation(WorkerEvent),

    SaveCaption,
    SaveAllCaptions,
}

impl CaptionStudio {
    /// Create a new instance of the application, restoring saved settings
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load();

        let caption_type = settings
            .caption_type
            .parse()
            .unwrap_or(CaptionType::Descriptive);
        let caption_length = settings
            .caption_length
            .parse()
            .unwrap_or(CaptionLength::Long);

        let mut app = CaptionStudio {
            model: None,
            model_loading: false,
            current: None,
            preview: None,
            image_files: Vec::new(),
            batch_mode: false,
            thumbnails: Vec::new(),
            cache: CaptionCache::new(),
            batch: BatchCoordinator::new(),
            caption_type,
            caption_length,
            extra_toggles: settings.extra_options,
            name: settings.name,
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_new_tokens: settings.max_new_tokens,
            log_prompt: settings.log_prompt,
            dark_mode: settings.dark_mode,
            prompt_content: text_editor::Content::new(),
            caption_content: text_editor::Content::new(),
            caption_text: String::new(),
            generating: false,
            cancel: None,
            status: "Ready. Please load the model first.".to_string(),
        };
        app.refresh_prompt();
        println!("🖼️  Caption Studio initialized");

        (app, Task::none())
    }

    /// A generation (single or batch) is in progress
    fn is_busy(&self) -> bool {
        self.generating || self.batch.is_running()
    }

    /// Rebuild the prompt panel from the current selections
    fn refresh_prompt(&mut self) {
        let extras = prompt::selected_extras(&self.extra_toggles);
        let built =
            prompt::build_prompt(self.caption_type, self.caption_length, &extras, &self.name);
        self.prompt_content = text_editor::Content::with_text(&built);
    }

    /// Replace the caption panel content
    fn set_caption(&mut self, text: &str) {
        self.caption_text = text.to_string();
        self.caption_content = text_editor::Content::with_text(text);
    }

    /// Save the current selections so they survive restarts
    fn persist_settings(&self) {
        let mut settings = AppSettings {
            caption_type: self.caption_type.name().to_string(),
            caption_length: self.caption_length.to_string(),
            extra_options: self.extra_toggles.clone(),
            name: self.name.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
            max_new_tokens: self.max_new_tokens,
            log_prompt: self.log_prompt,
            dark_mode: self.dark_mode,
            updated_at: 0,
        };
        if let Err(e) = settings.save() {
            eprintln!("⚠️  Could not save settings: {e}");
        }
    }

    /// Kick off a generation worker for the current image.
    /// Exactly one worker can be active; callers check `is_busy` first.
    fn start_generation(&mut self) -> Task<Message> {
        let (Some(model), Some(current)) = (self.model.clone(), self.current.clone()) else {
            return Task::none();
        };

        let cancel = CancelFlag::new();
        self.cancel = Some(cancel.clone());
        self.generating = true;
        self.set_caption("");
        self.status = "Generating caption...".to_string();

        let params = SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_new_tokens: self.max_new_tokens,
        };
        let rx = worker::spawn_generation(
            model,
            current.image,
            editor_text(&self.prompt_content),
            params,
            cancel,
            self.log_prompt,
        );
        Task::run(worker_events(rx), Message::Generation)
    }

    /// Pull the next batch item, or report completion when the queue drains
    fn advance_batch(&mut self) -> Task<Message> {
        match self.batch.pop_next() {
            Some(path) => {
                let (done, total) = self.batch.progress();
                self.status = format!(
                    "Batch {}/{}: {}",
                    done + 1,
                    total,
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
                Task::perform(images::load_image(path), Message::BatchImageLoaded)
            }
            None => {
                let (done, total) = self.batch.progress();
                self.status = format!("✅ Batch complete: {done} of {total} images processed.");
                println!("📊 Batch summary: {done} of {total} images processed");
                Task::none()
            }
        }
    }

    /// Show an image and its cached (or sidecar) caption
    fn show_image(&mut self, loaded: LoadedImage) {
        self.preview = Some(picture::Handle::from_path(&loaded.path));
        let caption = self.cache.get(&loaded.path);
        self.set_caption(&caption);
        self.status = format!(
            "Image '{}' loaded.",
            loaded.path.file_name().unwrap_or_default().to_string_lossy()
        );
        self.current = Some(loaded);
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadModel => {
                if self.model.is_some() || self.model_loading {
                    return Task::none();
                }
                let picked = FileDialog::new()
                    .set_title("Select Model File")
                    .add_filter("Model", &["gguf"])
                    .pick_file();
                if let Some(path) = picked {
                    self.model_loading = true;
                    self.status =
                        format!("Loading model {}... This may take time.", path.display());
                    return Task::perform(load_model_async(path), Message::ModelLoaded);
                }
                Task::none()
            }
            Message::ModelLoaded(result) => {
                self.model_loading = false;
                match result {
                    Ok(handle) => {
                        self.model = Some(handle);
                        self.status = "✅ Model loaded successfully!".to_string();
                        println!("✅ Model loaded");
                    }
                    Err(e) => {
                        self.status = format!("❌ Failed to load model: {e}");
                        eprintln!("❌ {e}");
                    }
                }
                Task::none()
            }

            Message::SelectImage => {
                if self.is_busy() {
                    return Task::none();
                }
                let picked = FileDialog::new()
                    .set_title("Select Image")
                    .add_filter("Images", &images::SUPPORTED_EXTENSIONS)
                    .pick_file();
                if let Some(path) = picked {
                    // Single mode: drop any previous batch
                    self.image_files.clear();
                    self.batch_mode = false;
                    self.thumbnails.clear();
                    return Task::perform(images::load_image(path), Message::ImageLoaded);
                }
                Task::none()
            }
            Message::LoadDirectory => {
                if self.is_busy() {
                    return Task::none();
                }
                let picked = FileDialog::new()
                    .set_title("Select Image Directory")
                    .pick_folder();
                let Some(dir) = picked else {
                    return Task::none();
                };
                match images::list_images(&dir) {
                    Ok(found) if found.is_empty() => {
                        self.status =
                            format!("No supported image files found in {}.", dir.display());
                        self.batch_mode = false;
                        self.image_files.clear();
                        self.thumbnails.clear();
                        Task::none()
                    }
                    Ok(found) => {
                        self.status = format!("{} images loaded from directory.", found.len());
                        println!("📂 {} images found in {}", found.len(), dir.display());
                        self.image_files = found.clone();
                        self.batch_mode = true;
                        // A new directory starts a fresh caption cache
                        self.cache.clear();
                        self.thumbnails.clear();

                        let mut tasks: Vec<Task<Message>> = found
                            .iter()
                            .map(|path| {
                                Task::perform(
                                    images::generate_thumbnail(path.clone()),
                                    Message::ThumbnailReady,
                                )
                            })
                            .collect();
                        tasks.push(Task::perform(
                            images::load_image(found[0].clone()),
                            Message::ImageLoaded,
                        ));
                        Task::batch(tasks)
                    }
                    Err(e) => {
                        self.status = format!("❌ {e}");
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded(result) => {
                match result {
                    Ok(loaded) => self.show_image(loaded),
                    Err(e) => {
                        self.current = None;
                        self.preview = None;
                        self.status = format!("❌ {e}");
                        eprintln!("❌ {e}");
                    }
                }
                Task::none()
            }
            Message::BatchImageLoaded(result) => match result {
                Ok(loaded) => {
                    self.show_image(loaded);
                    self.set_caption("");
                    self.start_generation()
                }
                Err(e) => {
                    // Skip-on-error: record the marker, never start a worker
                    self.batch.record_load_error(&mut self.cache);
                    self.status = format!("Skipping image due to load error: {e}");
                    eprintln!("⚠️  {e}");
                    self.advance_batch()
                }
            },
            Message::ThumbnailReady(result) => {
                match result {
                    Ok(thumb) => {
                        let handle =
                            picture::Handle::from_rgba(thumb.width, thumb.height, thumb.rgba);
                        self.thumbnails.push((thumb.path, handle));
                        // Keep gallery order in sync with the file list
                        self.thumbnails.sort_by(|(a, _), (b, _)| a.cmp(b));
                    }
                    Err(e) => eprintln!("⚠️  Thumbnail failed: {e}"),
                }
                Task::none()
            }
            Message::ThumbnailClicked(path) => {
                if self.is_busy() {
                    return Task::none();
                }
                Task::perform(images::load_image(path), Message::ImageLoaded)
            }

            Message::CaptionTypeSelected(caption_type) => {
                self.caption_type = caption_type;
                self.refresh_prompt();
                self.persist_settings();
                Task::none()
            }
            Message::CaptionLengthSelected(length) => {
                self.caption_length = length;
                self.refresh_prompt();
                self.persist_settings();
                Task::none()
            }
            Message::ExtraToggled(index, on) => {
                if let Some(toggle) = self.extra_toggles.get_mut(index) {
                    *toggle = on;
                }
                self.refresh_prompt();
                self.persist_settings();
                Task::none()
            }
            Message::NameChanged(name) => {
                self.name = name;
                self.refresh_prompt();
                self.persist_settings();
                Task::none()
            }
            Message::TemperatureChanged(value) => {
                self.temperature = value;
                self.persist_settings();
                Task::none()
            }
            Message::TopPChanged(value) => {
                self.top_p = value;
                self.persist_settings();
                Task::none()
            }
            Message::MaxTokensChanged(value) => {
                self.max_new_tokens = value;
                self.persist_settings();
                Task::none()
            }
            Message::LogPromptToggled(on) => {
                self.log_prompt = on;
                self.persist_settings();
                Task::none()
            }
            Message::DarkModeToggled(on) => {
                self.dark_mode = on;
                self.persist_settings();
                Task::none()
            }
            Message::PromptAction(action) => {
                if !self.generating {
                    self.prompt_content.perform(action);
                }
                Task::none()
            }
            Message::CaptionAction(action) => {
                if !self.generating {
                    self.caption_content.perform(action);
                    self.caption_text = editor_text(&self.caption_content);
                }
                Task::none()
            }

            Message::GenerateCurrent => {
                if self.model.is_none() || self.current.is_none() || self.is_busy() {
                    return Task::none();
                }
                self.start_generation()
            }
            Message::GenerateBatch => {
                if self.model.is_none()
                    || !self.batch_mode
                    || self.image_files.is_empty()
                    || self.is_busy()
                {
                    return Task::none();
                }
                let confirmed = rfd::MessageDialog::new()
                    .set_title("Confirm Batch Generation")
                    .set_description(format!(
                        "Generate captions for all {} images?",
                        self.image_files.len()
                    ))
                    .set_buttons(rfd::MessageButtons::YesNo)
                    .show();
                if confirmed != rfd::MessageDialogResult::Yes {
                    return Task::none();
                }
                println!("🚀 Starting batch over {} images", self.image_files.len());
                self.batch.begin(self.image_files.clone());
                self.set_caption("");
                self.advance_batch()
            }
            Message::StopGeneration => {
                if let Some(cancel) = &self.cancel {
                    cancel.cancel();
                    self.status = "Stopping generation...".to_string();
                }
                Task::none()
            }
            Message::Generation(event) => self.on_worker_event(event),

            Message::SaveCaption => {
                let Some(current) = &self.current else {
                    return Task::none();
                };
                let path = current.path.clone();
                self.cache.put(&path, self.caption_text.clone());
                match self.cache.flush(&path) {
                    Ok(()) => {
                        self.status = format!(
                            "💾 Caption saved: {}",
                            state::cache::sidecar_path(&path)
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                        );
                    }
                    Err(e) => {
                        self.status = format!("❌ {e}");
                        eprintln!("❌ {e}");
                    }
                }
                Task::none()
            }
            Message::SaveAllCaptions => {
                if self.cache.is_empty() {
                    self.status = "No captions in cache to save.".to_string();
                    return Task::none();
                }
                let confirmed = rfd::MessageDialog::new()
                    .set_title("Confirm Save All")
                    .set_description(format!(
                        "Save all {} captions in memory to .txt files?",
                        self.cache.len()
                    ))
                    .set_buttons(rfd::MessageButtons::YesNo)
                    .show();
                if confirmed != rfd::MessageDialogResult::Yes {
                    return Task::none();
                }
                let report = self.cache.flush_all();
                self.status = if report.failed > 0 {
                    format!(
                        "💾 Saved {} captions. Failed to save {} (see console).",
                        report.saved, report.failed
                    )
                } else {
                    format!("💾 Saved {} captions.", report.saved)
                };
                Task::none()
            }
        }
    }

    /// React to one generation worker event
    fn on_worker_event(&mut self, event: WorkerEvent) -> Task<Message> {
        match event {
            WorkerEvent::Token(fragment) => {
                self.caption_text.push_str(&fragment);
                self.caption_content = text_editor::Content::with_text(&self.caption_text);
                Task::none()
            }
            WorkerEvent::Finished(caption) => {
                self.generating = false;
                self.cancel = None;
                self.set_caption(&caption);
                if self.batch.is_running() {
                    self.batch.record_success(&mut self.cache, caption);
                    self.advance_batch()
                } else {
                    if let Some(current) = &self.current {
                        self.cache.put(&current.path, caption);
                    }
                    self.status = "✅ Caption generation complete.".to_string();
                    Task::none()
                }
            }
            WorkerEvent::Cancelled => {
                self.generating = false;
                self.cancel = None;
                if self.batch.is_running() {
                    self.batch.abort();
                    self.status = "Batch generation cancelled.".to_string();
                } else {
                    self.status = "Generation cancelled.".to_string();
                }
                Task::none()
            }
            WorkerEvent::Error(message) => {
                self.generating = false;
                self.cancel = None;
                eprintln!("❌ Generation error: {message}");
                if self.batch.is_running() {
                    self.batch.record_generation_error(&mut self.cache, &message);
                    self.advance_batch()
                } else {
                    self.status = format!("❌ Generation error: {message}");
                    Task::none()
                }
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let busy = self.is_busy();

        // --- Left panel: source selection and prompt controls ---
        let top_buttons = row![
            button("Load Model").on_press_maybe(
                (self.model.is_none() && !self.model_loading).then_some(Message::LoadModel)
            ),
            button("Select Image")
                .on_press_maybe((self.model.is_some() && !busy).then_some(Message::SelectImage)),
            button("Load Directory")
                .on_press_maybe((self.model.is_some() && !busy).then_some(Message::LoadDirectory)),
        ]
        .spacing(10);

        let source_label = text(self.source_label()).size(14);

        let mut left = column![top_buttons, source_label].spacing(10);

        if self.batch_mode && !self.thumbnails.is_empty() {
            left = left.push(self.gallery(busy));
        }

        left = left
            .push(text("Caption Type:"))
            .push(pick_list(
                &CaptionType::ALL[..],
                Some(self.caption_type),
                Message::CaptionTypeSelected,
            ))
            .push(text("Caption Length:"))
            .push(pick_list(
                CaptionLength::choices(),
                Some(self.caption_length),
                Message::CaptionLengthSelected,
            ))
            .push(text("Extra Options:"))
            .push(self.extra_options(busy));

        if self.extra_toggles.first().copied().unwrap_or(false) {
            left = left.push(text("Person / Character Name:")).push(
                text_input("e.g., 'the main character'", &self.name)
                    .on_input(Message::NameChanged),
            );
        }

        left = left
            .push(text(format!("Temperature: {:.2}", self.temperature)))
            .push(slider(0.0..=2.0, self.temperature, Message::TemperatureChanged).step(0.05))
            .push(text(format!("Top-p: {:.2}", self.top_p)))
            .push(slider(0.0..=1.0, self.top_p, Message::TopPChanged).step(0.05))
            .push(text(format!("Max New Tokens: {}", self.max_new_tokens)))
            .push(slider(1u32..=2048, self.max_new_tokens, Message::MaxTokensChanged))
            .push(
                row![
                    checkbox("Log Text Query", self.log_prompt)
                        .on_toggle(Message::LogPromptToggled),
                    checkbox("Dark Mode", self.dark_mode).on_toggle(Message::DarkModeToggled),
                ]
                .spacing(20),
            );

        let left_panel = scrollable(left.padding(10)).width(Length::FillPortion(2));

        // --- Right panel: preview, prompt, caption, actions ---
        let preview: Element<Message> = match &self.preview {
            Some(handle) => picture(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("Image preview will appear here."))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let mut prompt_editor = text_editor(&self.prompt_content).height(Length::Fixed(110.0));
        if !self.generating {
            prompt_editor = prompt_editor.on_action(Message::PromptAction);
        }

        let mut caption_editor = text_editor(&self.caption_content).height(Length::Fill);
        if !self.generating {
            caption_editor = caption_editor.on_action(Message::CaptionAction);
        }

        let generate_buttons = row![
            button("Generate Current Caption").on_press_maybe(
                (self.model.is_some() && self.current.is_some() && !busy)
                    .then_some(Message::GenerateCurrent)
            ),
            button("Generate Batch Captions").on_press_maybe(
                (self.model.is_some() && self.batch_mode && !busy)
                    .then_some(Message::GenerateBatch)
            ),
            button("Stop").on_press_maybe(self.generating.then_some(Message::StopGeneration)),
        ]
        .spacing(10);

        let save_buttons = row![
            button("Save Current Caption")
                .on_press_maybe((self.current.is_some() && !busy).then_some(Message::SaveCaption)),
            button("Save All Batch Captions").on_press_maybe(
                (!self.cache.is_empty() && self.batch_mode && !busy)
                    .then_some(Message::SaveAllCaptions)
            ),
        ]
        .spacing(10);

        let right_panel = column![
            container(preview).height(Length::FillPortion(3)),
            text("Prompt (auto-generated, editable):"),
            prompt_editor,
            generate_buttons,
            text("Generated Caption (editable):"),
            caption_editor,
            save_buttons,
            text(&self.status).size(14),
        ]
        .spacing(10)
        .padding(10)
        .width(Length::FillPortion(3));

        let content = row![left_panel, right_panel].spacing(10);

        container(
            column![text("Caption Studio").size(28), content]
                .spacing(10)
                .padding(10)
                .align_x(Alignment::Start),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Label above the gallery describing what is loaded
    fn source_label(&self) -> String {
        match (&self.current, self.batch_mode) {
            (Some(current), true) => {
                let position = self
                    .image_files
                    .iter()
                    .position(|p| *p == current.path)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                format!(
                    "Batch Image {}/{}: {}",
                    position,
                    self.image_files.len(),
                    current.path.file_name().unwrap_or_default().to_string_lossy()
                )
            }
            (Some(current), false) => format!(
                "Selected: {}",
                current.path.file_name().unwrap_or_default().to_string_lossy()
            ),
            (None, _) => "No image selected.".to_string(),
        }
    }

    /// Clickable thumbnail grid for batch mode
    fn gallery(&self, busy: bool) -> Element<Message> {
        let selected_path = self.current.as_ref().map(|c| &c.path);
        let thumbs: Vec<Element<Message>> = self
            .thumbnails
            .iter()
            .map(|(path, handle)| {
                let style: fn(&Theme, button::Status) -> button::Style =
                    if selected_path == Some(path) {
                        button::primary
                    } else {
                        button::secondary
                    };
                button(picture(handle.clone()))
                    .style(style)
                    .padding(2)
                    .on_press_maybe((!busy).then(|| Message::ThumbnailClicked(path.clone())))
                    .into()
            })
            .collect();

        scrollable(Wrap::with_elements(thumbs).spacing(6.0).line_spacing(6.0))
            .height(Length::Fixed(220.0))
            .into()
    }

    /// The extra-option checkboxes, in declaration order
    fn extra_options(&self, busy: bool) -> Element<Message> {
        let mut options = column![].spacing(4);
        for (index, option_text) in EXTRA_OPTIONS.iter().enumerate() {
            let checked = self.extra_toggles.get(index).copied().unwrap_or(false);
            let label = if *option_text == NAME_OPTION {
                "Refer to any person/character by the name below."
            } else {
                *option_text
            };
            let mut cb = checkbox(label, checked).text_size(12);
            if !busy {
                cb = cb.on_toggle(move |on| Message::ExtraToggled(index, on));
            }
            options = options.push(cb);
        }
        scrollable(options).height(Length::Fixed(240.0)).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn main() -> iced::Result {
    iced::application("Caption Studio", CaptionStudio::update, CaptionStudio::view)
        .theme(CaptionStudio::theme)
        .centered()
        .run_with(CaptionStudio::new)
}

/// Load the model backend on a blocking task
async fn load_model_async(path: PathBuf) -> Result<ModelHandle, CaptionError> {
    task::spawn_blocking(move || model::load_default(&path))
        .await
        .map_err(|e| CaptionError::Generation(format!("task join error: {e}")))?
}

/// Bridge the worker's event channel into an iced task stream
fn worker_events(
    rx: UnboundedReceiver<WorkerEvent>,
) -> impl iced::futures::Stream<Item = WorkerEvent> {
    iced::futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
}

/// Editor text without the trailing newline `Content::text` appends
fn editor_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
