use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const IDLE_PLACEHOLDER: &str = "Enter your email";
pub const INVALID_PLACEHOLDER: &str = "Please enter a valid email";
pub const SUBSCRIBED_LABEL: &str = "Subscribed!";
pub const IDLE_LABEL: &str = "Subscribe";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Transient visual state of the newsletter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFeedback {
    #[default]
    Idle,
    Subscribed,
    Invalid,
}

impl FormFeedback {
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormFeedback::Invalid => INVALID_PLACEHOLDER,
            _ => IDLE_PLACEHOLDER,
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            FormFeedback::Subscribed => SUBSCRIBED_LABEL,
            _ => IDLE_LABEL,
        }
    }

    pub fn button_disabled(&self) -> bool {
        matches!(self, FormFeedback::Subscribed)
    }

    /// CSS modifier of the input border.
    pub fn input_class(&self) -> &'static str {
        match self {
            FormFeedback::Idle => "",
            FormFeedback::Subscribed => "input--success",
            FormFeedback::Invalid => "input--error",
        }
    }
}

/// Newsletter form state: input text plus transient feedback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsletterForm {
    pub input: String,
    pub feedback: FormFeedback,
}

impl NewsletterForm {
    /// Validates the trimmed input. A valid address clears the input.
    pub fn submit(&mut self) -> FormFeedback {
        let email = self.input.trim();
        self.feedback = if !email.is_empty() && is_valid_email(email) {
            tracing::info!("newsletter subscription accepted");
            self.input.clear();
            FormFeedback::Subscribed
        } else {
            tracing::debug!("newsletter subscription rejected");
            FormFeedback::Invalid
        };
        self.feedback
    }

    pub fn reset(&mut self) {
        self.feedback = FormFeedback::Idle;
    }
}
