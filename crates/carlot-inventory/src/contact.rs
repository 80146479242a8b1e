//! Contact handoff to the seller's messaging app.

use crate::catalog::Vehicle;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Why the buyer is reaching out; picks the greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactIntent {
    /// General interest, from a listing card.
    #[default]
    Inquiry,
    /// Booking a viewing, from the detail view.
    Viewing,
}

impl ContactIntent {
    /// Greeting naming the vehicle.
    pub fn greeting(&self, vehicle: &Vehicle) -> String {
        match self {
            ContactIntent::Inquiry => format!(
                "Hello, I'm interested in the {} {}.",
                vehicle.brand, vehicle.model
            ),
            ContactIntent::Viewing => format!(
                "Hello, I'd like to book a viewing: {} {}",
                vehicle.brand, vehicle.model
            ),
        }
    }
}

/// Digits of the contact handle, everything else stripped.
pub fn contact_digits(handle: &str) -> String {
    handle.chars().filter(char::is_ascii_digit).collect()
}

/// Message-prefilled WhatsApp deep link for a vehicle.
pub fn whatsapp_link(vehicle: &Vehicle, intent: ContactIntent) -> String {
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE,
        contact_digits(&vehicle.whatsapp),
        urlencoding::encode(&intent.greeting(vehicle))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_vehicles;

    #[test]
    fn test_digits_only() {
        assert_eq!(contact_digits("+853 6123-45(6)"), "8536123456");
        assert_eq!(contact_digits(""), "");
    }

    #[test]
    fn test_inquiry_link() {
        let civic = &seed_vehicles()[3];
        assert_eq!(
            whatsapp_link(civic, ContactIntent::Inquiry),
            "https://wa.me/853612345?text=Hello%2C%20I%27m%20interested%20in%20the%20Honda%20Civic%20Hatchback."
        );
    }

    #[test]
    fn test_viewing_link_names_vehicle() {
        let tesla = &seed_vehicles()[2];
        let link = whatsapp_link(tesla, ContactIntent::Viewing);
        assert!(link.starts_with("https://wa.me/85251234567?text="));
        assert!(link.contains("Tesla%20Model%203%20Long%20Range"));
    }
}
