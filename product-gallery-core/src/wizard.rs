//! Config-driven tab wizard.
//!
//! A wizard is nothing more than an ordered list of `StepDescriptor`s and
//! an active index. Each descriptor carries its own render capability and
//! validation predicate, so adding a step means adding a record, not a
//! branch. The render capability is generic: the core ships text renderers,
//! the GUI plugs in widget builders.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn all() -> Vec<Theme> {
        vec![Theme::Light, Theme::Dark]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

/// Values collected across all wizard steps.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WizardData {
    pub name: String,
    pub age: String,
    pub email: String,
    pub interests: Vec<String>,
    pub theme: Theme,
}

pub fn validate_profile(data: &WizardData) -> bool {
    !data.name.trim().is_empty() && email_pattern().is_match(data.email.trim())
}

pub fn validate_interests(data: &WizardData) -> bool {
    !data.interests.is_empty()
}

pub fn validate_settings(_data: &WizardData) -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct StepDescriptor<R> {
    pub name: &'static str,
    pub render: R,
    pub validate: fn(&WizardData) -> bool,
}

/// Text renderer used by the core's default step list.
pub type TextRender = fn(&WizardData) -> String;

fn render_profile(data: &WizardData) -> String {
    format!("Name: {}\nAge: {}\nEmail: {}", data.name, data.age, data.email)
}

fn render_interests(data: &WizardData) -> String {
    if data.interests.is_empty() {
        "Interests: (none selected)".to_string()
    } else {
        format!("Interests: {}", data.interests.join(", "))
    }
}

fn render_settings(data: &WizardData) -> String {
    format!("Theme: {}", data.theme)
}

/// Profile, Interest and Setting, in that order.
pub fn default_steps() -> Vec<StepDescriptor<TextRender>> {
    vec![
        StepDescriptor {
            name: "Profile",
            render: render_profile,
            validate: validate_profile,
        },
        StepDescriptor {
            name: "Interest",
            render: render_interests,
            validate: validate_interests,
        },
        StepDescriptor {
            name: "Setting",
            render: render_settings,
            validate: validate_settings,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    NotOnLastStep,
    StepInvalid(&'static str),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::NotOnLastStep => write!(f, "Submit is only available on the last step"),
            WizardError::StepInvalid(name) => write!(f, "Step '{}' is incomplete", name),
        }
    }
}

impl std::error::Error for WizardError {}

#[derive(Debug, Clone)]
pub struct TabWizard<R> {
    steps: Vec<StepDescriptor<R>>,
    active: usize,
    pub data: WizardData,
}

impl<R> TabWizard<R> {
    /// `None` for an empty step list; a wizard without steps has nothing to
    /// show.
    pub fn new(steps: Vec<StepDescriptor<R>>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            steps,
            active: 0,
            data: WizardData::default(),
        })
    }

    /// Build from a first step plus any number of following steps.
    pub fn with_first(first: StepDescriptor<R>, rest: Vec<StepDescriptor<R>>) -> Self {
        let mut steps = Vec::with_capacity(rest.len() + 1);
        steps.push(first);
        steps.extend(rest);
        Self {
            steps,
            active: 0,
            data: WizardData::default(),
        }
    }

    pub fn steps(&self) -> &[StepDescriptor<R>] {
        &self.steps
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_step(&self) -> &StepDescriptor<R> {
        &self.steps[self.active]
    }

    pub fn is_step_valid(&self, index: usize) -> bool {
        self.steps
            .get(index)
            .is_some_and(|step| (step.validate)(&self.data))
    }

    pub fn can_go_previous(&self) -> bool {
        self.active > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.active < self.steps.len() - 1
    }

    pub fn can_submit(&self) -> bool {
        self.active == self.steps.len() - 1
    }

    pub fn select(&mut self, index: usize) {
        self.active = index.min(self.steps.len() - 1);
        debug!("wizard tab selected: {}", self.active_step().name);
    }

    /// Forward one step, only when the current step validates.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() || !self.is_step_valid(self.active) {
            return false;
        }
        self.active += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.active -= 1;
        true
    }

    pub fn submit(&self) -> Result<WizardData, WizardError> {
        if !self.can_submit() {
            return Err(WizardError::NotOnLastStep);
        }
        if let Some(step) = self.steps.iter().find(|step| !(step.validate)(&self.data)) {
            return Err(WizardError::StepInvalid(step.name));
        }
        Ok(self.data.clone())
    }
}

impl TabWizard<TextRender> {
    pub fn render_active(&self) -> String {
        (self.active_step().render)(&self.data)
    }
}
