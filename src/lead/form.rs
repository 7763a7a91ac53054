use super::phone::{format_phone, is_phone_complete, phone_digits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadField {
    #[default]
    Name,
    Phone,
}

impl LeadField {
    pub fn toggled(self) -> Self {
        match self {
            LeadField::Name => LeadField::Phone,
            LeadField::Phone => LeadField::Name,
        }
    }
}

/// Contact details captured at a terminal step. The phone is kept in its
/// masked form, reformatted on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
}

impl LeadForm {
    pub fn new(name: &str, raw_phone: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: format_phone(raw_phone),
        }
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    pub fn push_char(&mut self, field: LeadField, ch: char) {
        match field {
            LeadField::Name => self.name.push(ch),
            LeadField::Phone => {
                let mut raw = self.phone.clone();
                raw.push(ch);
                self.set_phone(&raw);
            }
        }
    }

    pub fn pop_char(&mut self, field: LeadField) {
        match field {
            LeadField::Name => {
                self.name.pop();
            }
            LeadField::Phone => {
                let mut digits = phone_digits(&self.phone);
                digits.pop();
                self.set_phone(&digits);
            }
        }
    }

    /// Reason the form cannot be submitted yet, if any.
    pub fn blocking_reason(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("name is required");
        }
        if !is_phone_complete(&self.phone) {
            return Some("phone number is incomplete");
        }
        None
    }

    pub fn can_submit(&self) -> bool {
        self.blocking_reason().is_none()
    }
}
