//! Bundled sample inventory.
//!
//! Shown at startup and whenever the configured source fails or comes back
//! empty, so the storefront never renders a blank catalog.

use crate::catalog::Vehicle;
use crate::ids::VehicleId;

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    brand: &str,
    model: &str,
    year: i32,
    price: f64,
    mileage: f64,
    fuel_type: &str,
    transmission: &str,
    location: &str,
    description: &str,
    images: &[&str],
    whatsapp: &str,
) -> Vehicle {
    Vehicle {
        id: VehicleId::new(id),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel_type: fuel_type.to_string(),
        transmission: transmission.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        images: images.iter().map(|s| s.to_string()).collect(),
        whatsapp: whatsapp.to_string(),
    }
}

/// The four sample vehicles.
pub fn seed_vehicles() -> Vec<Vehicle> {
    vec![
        listing(
            "1",
            "Toyota",
            "RAV4 Adventure",
            2020,
            26800.0,
            34000.0,
            "Gasoline",
            "Automatic",
            "Shenzhen",
            "One-owner compact SUV with full service history and Toyota Safety Sense.",
            &[
                "https://images.pexels.com/photos/170811/pexels-photo-170811.jpeg",
                "https://images.pexels.com/photos/210019/pexels-photo-210019.jpeg",
                "https://images.pexels.com/photos/358070/pexels-photo-358070.jpeg",
            ],
            "+8613912345678",
        ),
        listing(
            "2",
            "BMW",
            "330i M Sport",
            2019,
            31800.0,
            29000.0,
            "Gasoline",
            "Automatic",
            "Guangzhou",
            "Dealer certified sedan with Harman Kardon audio and full M Sport package.",
            &[
                "https://images.pexels.com/photos/1402787/pexels-photo-1402787.jpeg",
                "https://images.pexels.com/photos/210019/pexels-photo-210019.jpeg",
            ],
            "+8613600001111",
        ),
        listing(
            "3",
            "Tesla",
            "Model 3 Long Range",
            2021,
            35200.0,
            18000.0,
            "Electric",
            "Automatic",
            "Hong Kong",
            "Dual motor AWD with premium connectivity and Enhanced Autopilot.",
            &[
                "https://images.pexels.com/photos/799443/pexels-photo-799443.jpeg",
                "https://images.pexels.com/photos/1149831/pexels-photo-1149831.jpeg",
                "https://images.pexels.com/photos/210019/pexels-photo-210019.jpeg",
            ],
            "+85251234567",
        ),
        listing(
            "4",
            "Honda",
            "Civic Hatchback",
            2018,
            16800.0,
            52000.0,
            "Gasoline",
            "Manual",
            "Macau",
            "Reliable daily driver with sport exhaust, Apple CarPlay, and two sets of keys.",
            &[
                "https://images.pexels.com/photos/210019/pexels-photo-210019.jpeg",
                "https://images.pexels.com/photos/358070/pexels-photo-358070.jpeg",
            ],
            "+853612345",
        ),
    ]
}
