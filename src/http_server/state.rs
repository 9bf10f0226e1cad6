//! Shared handler state.

use crate::auth::{AuthService, PasswordPolicy};
use crate::places::PlaceService;
use crate::store::Database;

/// Services shared by every route
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub places: PlaceService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            auth: AuthService::new(db.clone(), PasswordPolicy::default()),
            places: PlaceService::new(db),
        }
    }
}
