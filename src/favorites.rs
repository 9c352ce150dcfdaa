//! Favorite toggling for a single listing card.
//!
//! The flag is pessimistic: it only changes once the add/remove call has
//! succeeded. Cards start unfavorited; membership is never fetched up front.

use crate::client::{ApiClient, Transport};
use crate::notify::{Notice, Notifications};
use crate::session::Session;
use tracing::{debug, error, info};

pub const LOGIN_REQUIRED: &str = "Please log in to save favorites";
pub const ADDED: &str = "Added to favorites";
pub const REMOVED: &str = "Removed from favorites";
pub const UPDATE_FAILED: &str = "Error updating favorites";

/// Toggle membership of `property_id` and return the resulting flag.
///
/// Signed out: nothing is sent and `currently_favorited` comes straight back.
pub async fn toggle<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    property_id: &str,
    currently_favorited: bool,
    notices: &mut Notifications,
) -> bool {
    if !session.is_authenticated() {
        debug!("Favorite toggle for {} refused: signed out", property_id);
        notices.push(Notice::info(LOGIN_REQUIRED));
        return currently_favorited;
    }

    let favorites = client.favorites();
    let (outcome, next, message) = if currently_favorited {
        (favorites.remove(session, property_id).await, false, REMOVED)
    } else {
        (favorites.add(session, property_id).await, true, ADDED)
    };

    match outcome {
        Ok(_) => {
            info!("{}: {}", message, property_id);
            notices.push(Notice::success(message));
            next
        }
        Err(e) => {
            error!("Failed to update favorite {}: {}", property_id, e);
            notices.push(Notice::error(UPDATE_FAILED));
            currently_favorited
        }
    }
}

/// Local favorite flag of one listing card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteState {
    property_id: String,
    favorited: bool,
}

impl FavoriteState {
    /// Every card starts unfavorited
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            favorited: false,
        }
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    /// Run [`toggle`] and adopt its result
    pub async fn toggle<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        session: &Session,
        notices: &mut Notifications,
    ) -> bool {
        self.favorited = toggle(client, session, &self.property_id, self.favorited, notices).await;
        self.favorited
    }
}
