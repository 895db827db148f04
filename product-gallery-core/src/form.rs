use log::debug;
use serde::{Deserialize, Serialize};

/// The text inputs of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Age,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub newsletter: bool,
}

/// Snapshot of everything the form holds, as handed out on submit.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub name: String,
    pub email: String,
    /// Kept as typed; the form does not validate it.
    pub age: String,
    pub skills: Vec<String>,
    pub preferences: Preferences,
}

/// Controlled form state: every keystroke goes through `set_field`, and the
/// skill list grows through a separate pending buffer.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    data: ProfileData,
    new_skill: String,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &ProfileData {
        &self.data
    }

    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.data.name,
            ProfileField::Email => &self.data.email,
            ProfileField::Age => &self.data.age,
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Name => self.data.name = value,
            ProfileField::Email => self.data.email = value,
            ProfileField::Age => self.data.age = value,
        }
    }

    pub fn set_newsletter(&mut self, subscribed: bool) {
        debug!("newsletter preference set to {}", subscribed);
        self.data.preferences.newsletter = subscribed;
    }

    pub fn new_skill(&self) -> &str {
        &self.new_skill
    }

    pub fn set_new_skill(&mut self, value: impl Into<String>) {
        self.new_skill = value.into();
    }

    /// Append the pending skill, trimmed. Blank input is ignored and left in
    /// the buffer.
    pub fn add_skill(&mut self) -> bool {
        let skill = self.new_skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.data.skills.push(skill.to_string());
        self.new_skill.clear();
        true
    }

    pub fn submit(&self) -> ProfileData {
        debug!("profile form submitted");
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_controlled() {
        let mut form = ProfileForm::new();
        form.set_field(ProfileField::Name, "Ada");
        form.set_field(ProfileField::Email, "ada@example.com");
        form.set_field(ProfileField::Age, "36");
        form.set_newsletter(true);

        assert_eq!(form.field(ProfileField::Name), "Ada");
        assert_eq!(form.data().email, "ada@example.com");
        assert_eq!(form.data().age, "36");
        assert!(form.data().preferences.newsletter);
    }

    #[test]
    fn skill_is_trimmed_and_buffer_cleared() {
        let mut form = ProfileForm::new();
        form.set_new_skill("  rust  ");
        assert!(form.add_skill());
        assert_eq!(form.data().skills, vec!["rust".to_string()]);
        assert_eq!(form.new_skill(), "");
    }

    #[test]
    fn blank_skill_is_rejected() {
        let mut form = ProfileForm::new();
        form.set_new_skill("   ");
        assert!(!form.add_skill());
        assert!(form.data().skills.is_empty());
        assert_eq!(form.new_skill(), "   ");
    }

    #[test]
    fn duplicate_skills_are_kept() {
        let mut form = ProfileForm::new();
        for _ in 0..2 {
            form.set_new_skill("sql");
            form.add_skill();
        }
        assert_eq!(form.data().skills.len(), 2);
    }

    #[test]
    fn submit_returns_snapshot() {
        let mut form = ProfileForm::new();
        form.set_field(ProfileField::Name, "Grace");
        let snapshot = form.submit();
        form.set_field(ProfileField::Name, "changed");
        assert_eq!(snapshot.name, "Grace");
    }
}
