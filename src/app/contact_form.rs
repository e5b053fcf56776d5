use crate::contact::ContactRequest;

use super::ui_helpers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ContactField {
    Name,
    Email,
    Subject,
    Message,
    Send,
    Reset,
}

impl ContactField {
    pub(super) const ORDER: [ContactField; 6] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
        ContactField::Send,
        ContactField::Reset,
    ];

    pub(super) fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
            ContactField::Send => "Send Message",
            ContactField::Reset => "Reset",
        }
    }

    pub(super) fn is_text(self) -> bool {
        !matches!(self, ContactField::Send | ContactField::Reset)
    }
}

#[derive(Debug, Default)]
pub(super) struct ContactForm {
    pub(super) name: String,
    pub(super) email: String,
    pub(super) subject: String,
    pub(super) message: String,
    focus: usize,
}

impl ContactForm {
    pub(super) fn focus(&self) -> ContactField {
        ContactField::ORDER[self.focus]
    }

    pub(super) fn focus_next(&mut self) {
        self.focus = ui_helpers::wrap_next_index(self.focus, ContactField::ORDER.len());
    }

    pub(super) fn focus_prev(&mut self) {
        self.focus = ui_helpers::wrap_prev_index(self.focus, ContactField::ORDER.len());
    }

    #[cfg(test)]
    pub(super) fn set_focus(&mut self, field: ContactField) {
        self.focus = ContactField::ORDER
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0);
    }

    pub(super) fn is_typing(&self) -> bool {
        self.focus().is_text()
    }

    pub(super) fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
            ContactField::Send | ContactField::Reset => "",
        }
    }

    fn focused_value_mut(&mut self) -> Option<&mut String> {
        match self.focus() {
            ContactField::Name => Some(&mut self.name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Subject => Some(&mut self.subject),
            ContactField::Message => Some(&mut self.message),
            ContactField::Send | ContactField::Reset => None,
        }
    }

    pub(super) fn push_char(&mut self, c: char) -> bool {
        let Some(value) = self.focused_value_mut() else {
            return false;
        };
        value.push(c);
        true
    }

    pub(super) fn push_newline(&mut self) -> bool {
        if self.focus() != ContactField::Message {
            return false;
        }
        self.message.push('\n');
        true
    }

    pub(super) fn pop_char(&mut self) -> bool {
        self.focused_value_mut()
            .is_some_and(|value| value.pop().is_some())
    }

    pub(super) fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
        self.focus = 0;
    }

    pub(super) fn to_request(&self) -> ContactRequest {
        ContactRequest::new(&self.name, &self.email, &self.subject, &self.message)
    }
}
