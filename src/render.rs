//! Plain-text rendering of listings, pages and counters for the terminal

use crate::favorites::FavoriteState;
use crate::models::{Inquiry, Property, PropertyStatus, Stats};
use crate::search::SearchOrchestrator;
use std::fmt::Write;

/// Group thousands: 1234567 → "1,234,567"
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "$450,000", or "$2,400/mo" for rentals
pub fn price(property: &Property) -> String {
    let amount = format!("${}", thousands(property.price.max(0.0).round() as u64));
    match property.status {
        PropertyStatus::ForRent | PropertyStatus::Rented => format!("{}/mo", amount),
        PropertyStatus::ForSale | PropertyStatus::Sold => amount,
    }
}

/// Multi-line listing card
pub fn card(property: &Property, favorite: &FavoriteState) -> String {
    let mut out = String::new();
    let heart = if favorite.is_favorited() { "♥" } else { "♡" };
    let star = if property.is_featured { " ★" } else { "" };

    let _ = writeln!(out, "{} {}{}", heart, property.title, star);
    let _ = writeln!(
        out,
        "   {} · {} · {}",
        price(property),
        property.status.label(),
        property.property_type
    );
    let _ = writeln!(
        out,
        "   {} bd · {} ba · {} sqft",
        property.bedrooms,
        property.bathrooms,
        thousands(property.area_sqft.max(0.0).round() as u64)
    );
    let location = property.location();
    if location.is_empty() {
        let _ = writeln!(out, "   {}", property.address);
    } else {
        let _ = writeln!(out, "   {}, {}", property.address, location);
    }
    let _ = write!(out, "   ID: {}", property.id);
    out
}

/// Full detail view of one listing
pub fn detail(property: &Property) -> String {
    let mut out = card(property, &FavoriteState::new(&property.id));
    if !property.description.is_empty() {
        let _ = write!(out, "\n\n{}", property.description);
    }
    if !property.amenities.is_empty() {
        let _ = write!(out, "\n\nAmenities: {}", property.amenities.join(", "));
    }
    if let Some(year) = property.year_built {
        let _ = write!(out, "\nBuilt: {}", year);
    }
    if let Some(spaces) = property.parking_spaces {
        let _ = write!(out, "\nParking: {}", spaces);
    }
    if let Some(cover) = property.cover_image() {
        let _ = write!(out, "\nCover: {} ({} images)", cover, property.images.len());
    }
    let _ = write!(out, "\nViews: {}", property.views);
    out
}

/// Result count and the pagination controls that apply
pub fn pagination(view: &SearchOrchestrator) -> String {
    let mut controls = Vec::new();
    if view.has_previous() {
        controls.push("← Previous");
    }
    if view.has_next() {
        controls.push("Next →");
    }

    let mut out = format!("Page {} · {} properties", view.page(), view.count());
    if !controls.is_empty() {
        let _ = write!(out, " · {}", controls.join(" | "));
    }
    out
}

/// Empty state shown when a search finds nothing
pub fn empty_state(view: &SearchOrchestrator) -> String {
    if view.filters().is_active() {
        "No properties found. Clear the filters to see every listing.".to_string()
    } else {
        "No properties found.".to_string()
    }
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Properties: {}\nFor sale:   {}\nFor rent:   {}\nUsers:      {}",
        thousands(stats.total_properties),
        thousands(stats.properties_for_sale),
        thousands(stats.properties_for_rent),
        thousands(stats.total_users)
    )
}

pub fn inquiry(inquiry: &Inquiry) -> String {
    let mut out = format!(
        "[{}] {} → {}\n   {}",
        inquiry.status, inquiry.contact_email, inquiry.property_id, inquiry.message
    );
    if let Some(phone) = &inquiry.contact_phone {
        let _ = write!(out, "\n   Phone: {}", phone);
    }
    out
}
