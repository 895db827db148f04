use iced::widget::{
    Column, Row, button, checkbox, column, container, image, pick_list, row, scrollable, text,
    text_input,
};
use iced::{Element, Length, Task};
use product_gallery_core::{
    DataSource, GalleryConfig, HttpDataSource, PageControls, Product, ProductView, ProfileField,
    ProfileForm, RenderState, StepDescriptor, TabWizard, Theme as PreferredTheme, WizardData,
    http_source, new_product_view, validate_interests, validate_profile, validate_settings,
};
use std::collections::HashMap;

const CARD_WIDTH: f32 = 200.0;
const THUMBNAIL_HEIGHT: f32 = 160.0;
const CARDS_PER_ROW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Gallery,
    Form,
    Wizard,
}

impl Screen {
    const ALL: [Screen; 3] = [Screen::Gallery, Screen::Form, Screen::Wizard];

    fn label(self) -> &'static str {
        match self {
            Screen::Gallery => "Gallery",
            Screen::Form => "Profile Form",
            Screen::Wizard => "Wizard",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ScreenSelected(Screen),

    // Gallery
    ProductsLoaded {
        generation: u64,
        products: Vec<Product>,
    },
    PageSelected(usize),
    NextPage,
    PrevPage,
    ThumbnailLoaded(String, Result<Vec<u8>, String>),

    // Profile form
    FormFieldChanged(ProfileField, String),
    NewSkillChanged(String),
    AddSkill,
    NewsletterToggled(bool),
    SubmitForm,

    // Wizard
    WizardTabSelected(usize),
    WizardNext,
    WizardPrev,
    WizardSubmit,
    WizardNameChanged(String),
    WizardAgeChanged(String),
    WizardEmailChanged(String),
    WizardInterestChanged(String),
    WizardAddInterest,
    WizardThemeChanged(PreferredTheme),
}

enum Thumbnail {
    Loading,
    Ready(image::Handle),
    Failed,
}

/// Widget builder for one wizard step.
type WizardRender = for<'a> fn(&'a AppState) -> Element<'a, Message>;

pub struct AppState {
    config: GalleryConfig,
    source: Option<HttpDataSource>,
    screen: Screen,

    // Each visit to the gallery screen gets a fresh view and generation;
    // completions tagged with an older generation are dropped.
    gallery: Option<ProductView>,
    gallery_generation: u64,
    thumbnails: HashMap<String, Thumbnail>,

    form: ProfileForm,
    form_status: Option<String>,

    wizard: TabWizard<WizardRender>,
    new_interest: String,
    wizard_status: Option<String>,
}

fn profile_wizard() -> TabWizard<WizardRender> {
    TabWizard::<WizardRender>::with_first(
        StepDescriptor {
            name: "Profile",
            render: profile_step,
            validate: validate_profile,
        },
        vec![
            StepDescriptor {
                name: "Interest",
                render: interest_step,
                validate: validate_interests,
            },
            StepDescriptor {
                name: "Setting",
                render: setting_step,
                validate: validate_settings,
            },
        ],
    )
}

impl AppState {
    pub fn new(config: GalleryConfig) -> Self {
        let source = match http_source(&config) {
            Ok(source) => Some(source),
            Err(e) => {
                log::error!("Failed to create HTTP client: {}", e);
                None
            }
        };

        Self {
            config,
            source,
            screen: Screen::Gallery,
            gallery: None,
            gallery_generation: 0,
            thumbnails: HashMap::new(),
            form: ProfileForm::new(),
            form_status: None,
            wizard: profile_wizard(),
            new_interest: String::new(),
            wizard_status: None,
        }
    }
}

/// Mount a fresh gallery view and issue its single fetch.
fn activate_gallery(state: &mut AppState) -> Task<Message> {
    if let Some(old) = state.gallery.as_mut() {
        old.teardown();
    }
    state.gallery_generation += 1;
    let generation = state.gallery_generation;

    let mut view = new_product_view(&state.config);
    let should_fetch = view.begin_initialize();
    state.gallery = Some(view);

    let Some(source) = state.source.clone() else {
        // Without a client the view stays in its loading state
        return Task::none();
    };
    if !should_fetch {
        return Task::none();
    }

    log::debug!("gallery generation {} fetching from {}", generation, source.endpoint());
    Task::perform(
        async move { source.fetch().await.into_products() },
        move |products| Message::ProductsLoaded {
            generation,
            products,
        },
    )
}

fn deactivate_gallery(state: &mut AppState) {
    if let Some(view) = state.gallery.as_mut() {
        view.teardown();
    }
}

/// Start loading thumbnails for the cards on the current page.
fn request_thumbnails(state: &mut AppState) -> Task<Message> {
    let (Some(view), Some(source)) = (state.gallery.as_ref(), state.source.as_ref()) else {
        return Task::none();
    };

    let mut tasks = Vec::new();
    for product in view.visible_items() {
        if state.thumbnails.contains_key(&product.thumbnail) {
            continue;
        }
        state
            .thumbnails
            .insert(product.thumbnail.clone(), Thumbnail::Loading);

        let client = source.client().clone();
        let url = product.thumbnail.clone();
        tasks.push(Task::perform(
            async move {
                let result = client
                    .get_thumbnail(&url)
                    .await
                    .map_err(|e| e.to_string());
                (url, result)
            },
            |(url, result)| Message::ThumbnailLoaded(url, result),
        ));
    }
    Task::batch(tasks)
}

pub fn initialize(config: GalleryConfig) -> (AppState, Task<Message>) {
    let mut state = AppState::new(config);
    let task = activate_gallery(&mut state);
    (state, task)
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::ScreenSelected(screen) => {
            if screen == state.screen {
                return Task::none();
            }
            if state.screen == Screen::Gallery {
                deactivate_gallery(state);
            }
            state.screen = screen;
            if screen == Screen::Gallery {
                return activate_gallery(state);
            }
        }
        Message::ProductsLoaded {
            generation,
            products,
        } => {
            if generation != state.gallery_generation {
                log::debug!(
                    "dropping products for stale gallery generation {} (current {})",
                    generation,
                    state.gallery_generation
                );
                return Task::none();
            }
            let stored = state
                .gallery
                .as_mut()
                .is_some_and(|view| view.complete_initialize(products));
            if stored {
                return request_thumbnails(state);
            }
        }
        Message::PageSelected(index) => {
            if let Some(view) = state.gallery.as_mut() {
                view.go_to_page(index);
                return request_thumbnails(state);
            }
        }
        Message::NextPage => {
            if state.gallery.as_mut().is_some_and(|view| view.next()) {
                return request_thumbnails(state);
            }
        }
        Message::PrevPage => {
            if state.gallery.as_mut().is_some_and(|view| view.previous()) {
                return request_thumbnails(state);
            }
        }
        Message::ThumbnailLoaded(url, result) => {
            let thumbnail = match result {
                Ok(bytes) => Thumbnail::Ready(image::Handle::from_bytes(bytes)),
                Err(e) => {
                    log::debug!("thumbnail {} failed: {}", url, e);
                    Thumbnail::Failed
                }
            };
            state.thumbnails.insert(url, thumbnail);
        }

        Message::FormFieldChanged(field, value) => {
            state.form.set_field(field, value);
        }
        Message::NewSkillChanged(value) => {
            state.form.set_new_skill(value);
        }
        Message::AddSkill => {
            state.form.add_skill();
        }
        Message::NewsletterToggled(subscribed) => {
            state.form.set_newsletter(subscribed);
        }
        Message::SubmitForm => {
            let data = state.form.submit();
            log::info!("form submitted: {:?}", data);
            state.form_status = Some("Form submitted".to_string());
        }

        Message::WizardTabSelected(index) => {
            state.wizard.select(index);
            state.wizard_status = None;
        }
        Message::WizardNext => {
            if !state.wizard.next() {
                state.wizard_status = Some(format!(
                    "Complete '{}' before continuing",
                    state.wizard.active_step().name
                ));
            } else {
                state.wizard_status = None;
            }
        }
        Message::WizardPrev => {
            state.wizard.previous();
            state.wizard_status = None;
        }
        Message::WizardSubmit => match state.wizard.submit() {
            Ok(data) => {
                log::info!("wizard submitted: {:?}", data);
                state.wizard_status = Some("Submitted".to_string());
            }
            Err(e) => {
                state.wizard_status = Some(e.to_string());
            }
        },
        Message::WizardNameChanged(value) => state.wizard.data.name = value,
        Message::WizardAgeChanged(value) => state.wizard.data.age = value,
        Message::WizardEmailChanged(value) => state.wizard.data.email = value,
        Message::WizardInterestChanged(value) => state.new_interest = value,
        Message::WizardAddInterest => {
            let interest = state.new_interest.trim();
            if !interest.is_empty() {
                state.wizard.data.interests.push(interest.to_string());
                state.new_interest.clear();
            }
        }
        Message::WizardThemeChanged(theme) => state.wizard.data.theme = theme,
    }

    Task::none()
}

pub fn view(state: &AppState) -> Element<Message> {
    let nav = Row::with_children(Screen::ALL.iter().map(|&screen| {
        button(screen.label())
            .on_press(Message::ScreenSelected(screen))
            .style(if screen == state.screen {
                button::primary
            } else {
                button::secondary
            })
            .padding(8)
            .into()
    }))
    .spacing(10);

    let body = match state.screen {
        Screen::Gallery => gallery_view(state),
        Screen::Form => form_view(state),
        Screen::Wizard => wizard_view(state),
    };

    container(column![nav, scrollable(body).height(Length::Fill)].spacing(20))
        .padding(20)
        .into()
}

fn gallery_view(state: &AppState) -> Element<Message> {
    let Some(view) = state.gallery.as_ref() else {
        return text("Loading data...").size(20).into();
    };

    match view.render_state() {
        RenderState::Loading => column![text("Loading data...").size(20)].into(),
        RenderState::Ready {
            page_number,
            items,
            controls,
        } => {
            let cards = Column::with_children(items.chunks(CARDS_PER_ROW).map(|chunk| {
                Row::with_children(chunk.iter().map(|product| product_card(state, product)))
                    .spacing(10)
                    .into()
            }))
            .spacing(10);

            let footer = text(
                view.loaded_at()
                    .map(|timestamp| {
                        format!(
                            "{} products from {}, loaded {}",
                            view.items().len(),
                            state.config.endpoint,
                            timestamp
                                .format(&time::format_description::well_known::Rfc3339)
                                .unwrap_or_else(|_| "Unknown".to_string())
                        )
                    })
                    .unwrap_or_default(),
            )
            .size(12);

            column![
                page_controls(&controls),
                text(page_number.to_string()).size(28),
                cards,
                footer,
            ]
            .spacing(15)
            .into()
        }
    }
}

fn page_controls<'a>(controls: &PageControls) -> Element<'a, Message> {
    let mut strip = row![
        button("Prev")
            .on_press_maybe(controls.previous_enabled.then_some(Message::PrevPage))
            .padding(5)
    ]
    .spacing(5);

    for marker in &controls.markers {
        strip = strip.push(
            button(text(marker.number.to_string()))
                .on_press(Message::PageSelected(marker.index))
                .style(if marker.current {
                    button::primary
                } else {
                    button::text
                })
                .padding(5),
        );
    }

    strip
        .push(
            button("Next")
                .on_press_maybe(controls.next_enabled.then_some(Message::NextPage))
                .padding(5),
        )
        .into()
}

fn product_card<'a>(state: &'a AppState, product: &'a Product) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match state.thumbnails.get(&product.thumbnail) {
        Some(Thumbnail::Ready(handle)) => image(handle.clone())
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .into(),
        Some(Thumbnail::Failed) => container(text(product.title.as_str()).size(12))
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .into(),
        Some(Thumbnail::Loading) | None => container(text("...").size(12))
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .into(),
    };

    container(
        column![
            text(product.id.to_string()).size(24),
            picture,
            text(product.title.as_str()).size(14),
        ]
        .spacing(5)
        .width(Length::Fixed(CARD_WIDTH)),
    )
    .style(container::bordered_box)
    .padding(8)
    .into()
}

fn form_view(state: &AppState) -> Element<Message> {
    let data = state.form.data();

    let summary = column![
        text(format!("name: {}", data.name)).size(14),
        text(format!("age: {}", data.age)).size(14),
        text(format!("email: {}", data.email)).size(14),
    ]
    .spacing(4);

    let skills = Column::with_children(
        data.skills
            .iter()
            .map(|skill| text(format!("- {}", skill)).size(14).into()),
    )
    .spacing(2);

    let status: Element<Message> = match &state.form_status {
        Some(status) => text(status.as_str()).size(14).into(),
        None => column![].into(),
    };

    column![
        text("Profile").size(22),
        summary,
        text_input("Name", &data.name)
            .on_input(|value| Message::FormFieldChanged(ProfileField::Name, value)),
        text_input("Email", &data.email)
            .on_input(|value| Message::FormFieldChanged(ProfileField::Email, value)),
        text_input("Age", &data.age)
            .on_input(|value| Message::FormFieldChanged(ProfileField::Age, value)),
        checkbox("Subscribe to newsletter", data.preferences.newsletter)
            .on_toggle(Message::NewsletterToggled),
        text("Skills:").size(16),
        skills,
        row![
            text_input("Add a new Skill", state.form.new_skill())
                .on_input(Message::NewSkillChanged)
                .on_submit(Message::AddSkill),
            button("Add Skill").on_press(Message::AddSkill).padding(5),
        ]
        .spacing(10),
        button("Submit").on_press(Message::SubmitForm).padding(10),
        status,
    ]
    .spacing(10)
    .max_width(600.0)
    .into()
}

fn wizard_view(state: &AppState) -> Element<Message> {
    let wizard = &state.wizard;

    let tabs = Row::with_children(wizard.steps().iter().enumerate().map(|(index, step)| {
        button(step.name)
            .on_press(Message::WizardTabSelected(index))
            .style(if index == wizard.active() {
                button::primary
            } else {
                button::secondary
            })
            .padding(8)
            .into()
    }))
    .spacing(10);

    let active = (wizard.active_step().render)(state);

    let mut actions = row![].spacing(10);
    if wizard.can_go_previous() {
        actions = actions.push(button("Prev").on_press(Message::WizardPrev).padding(5));
    }
    if wizard.can_go_next() {
        actions = actions.push(
            button("Next")
                .on_press_maybe(
                    wizard
                        .is_step_valid(wizard.active())
                        .then_some(Message::WizardNext),
                )
                .padding(5),
        );
    }
    if wizard.can_submit() {
        actions = actions.push(button("Submit").on_press(Message::WizardSubmit).padding(5));
    }

    let status: Element<Message> = match &state.wizard_status {
        Some(status) => text(status.as_str()).size(14).into(),
        None => column![].into(),
    };

    column![tabs, active, actions, status]
        .spacing(15)
        .max_width(600.0)
        .into()
}

fn profile_step(state: &AppState) -> Element<'_, Message> {
    let data: &WizardData = &state.wizard.data;
    column![
        text_input("Name", &data.name).on_input(Message::WizardNameChanged),
        text_input("Age", &data.age).on_input(Message::WizardAgeChanged),
        text_input("Email", &data.email).on_input(Message::WizardEmailChanged),
    ]
    .spacing(10)
    .into()
}

fn interest_step(state: &AppState) -> Element<'_, Message> {
    let interests = Column::with_children(
        state
            .wizard
            .data
            .interests
            .iter()
            .map(|interest| text(format!("- {}", interest)).size(14).into()),
    )
    .spacing(2);

    column![
        interests,
        row![
            text_input("Add an interest", &state.new_interest)
                .on_input(Message::WizardInterestChanged)
                .on_submit(Message::WizardAddInterest),
            button("Add").on_press(Message::WizardAddInterest).padding(5),
        ]
        .spacing(10),
    ]
    .spacing(10)
    .into()
}

fn setting_step(state: &AppState) -> Element<'_, Message> {
    row![
        text("Theme:").size(14),
        pick_list(
            PreferredTheme::all(),
            Some(state.wizard.data.theme),
            Message::WizardThemeChanged,
        ),
    ]
    .spacing(10)
    .into()
}
