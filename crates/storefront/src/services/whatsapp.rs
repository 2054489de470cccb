//! WhatsApp deep links.

/// Builds `wa.me` links for the business number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsApp {
    phone: String,
}

impl WhatsApp {
    /// `phone` is the international number without `+`.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    /// Link that opens a chat with no text.
    #[must_use]
    pub fn chat_link(&self) -> String {
        format!("https://wa.me/{}", self.phone)
    }

    /// Link that opens a chat pre-filled with `message`.
    #[must_use]
    pub fn message_link(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone,
            urlencoding::encode(message)
        )
    }
}
