use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{ChangePassword, User, UserCreate, UserUpdate};
use crate::review::validation::{
    load_photo_upload, validate_login, validate_new_password, validate_registration, ValidationError,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LogoutOutcome {
    pub was_logged_in: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Profile,
    Cover,
}

/// `auth register`. Inputs are checked locally before anything is sent.
pub async fn handle_register(state: &AppState, name: &str, email: &str, password: &str) -> Result<User, AppError> {
    let errors = validate_registration(name, email, password);
    if !errors.is_empty() {
        return Err(errors.into());
    }
    let user = UserCreate {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    Ok(state.api.register(&user).await?)
}

/// `auth login`
pub async fn handle_login(state: &mut AppState, email: &str, password: &str) -> Result<User, AppError> {
    let errors = validate_login(email, password);
    if !errors.is_empty() {
        return Err(errors.into());
    }
    let user = state
        .session
        .login(&mut state.api, email.trim(), password)
        .await?;
    Ok(user.clone())
}

/// `auth logout`. Saved jobs are left alone.
pub async fn handle_logout(state: &mut AppState) -> Result<LogoutOutcome, AppError> {
    let was_logged_in = state.session.is_authenticated();
    state.session.logout(&mut state.api).await?;
    Ok(LogoutOutcome { was_logged_in })
}

/// `auth me`
pub fn handle_me(state: &AppState) -> Result<User, AppError> {
    state.session.user().cloned().ok_or(AppError::Unauthorized)
}

/// `auth update`
pub async fn handle_update(state: &AppState, update: UserUpdate) -> Result<User, AppError> {
    state.require_login()?;
    if update.name.is_none() && update.city.is_none() && update.lat.is_none() && update.lon.is_none() {
        return Err(AppError::Validation("nothing to update".to_string()));
    }
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name is required").into());
        }
    }
    Ok(state.api.update_me(&update).await?)
}

/// `auth change-password`
pub async fn handle_change_password(state: &AppState, current: &str, new: &str) -> Result<Value, AppError> {
    state.require_login()?;
    validate_new_password(new)?;
    if current == new {
        return Err(ValidationError::new("new_password", "New password must differ from the current one").into());
    }
    let change = ChangePassword {
        current_password: current.to_string(),
        new_password: new.to_string(),
    };
    Ok(state.api.change_password(&change).await?)
}

/// `auth delete --yes`. The server soft-deletes the account; the local
/// session is dropped afterwards. Saved jobs are left alone.
pub async fn handle_delete_account(state: &mut AppState, confirmed: bool) -> Result<DeleteOutcome, AppError> {
    state.require_login()?;
    if !confirmed {
        return Err(AppError::Validation(
            "account deletion needs --yes to confirm".to_string(),
        ));
    }
    let email = state
        .session
        .user()
        .map(|u| u.email.clone())
        .unwrap_or_default();
    state.api.delete_me().await?;
    state.session.clear(&mut state.api)?;
    info!("account {email} deleted");
    Ok(DeleteOutcome { email })
}

/// `auth photo --profile FILE | --cover FILE`
pub async fn handle_upload_photo(state: &AppState, kind: PhotoKind, file: &Path) -> Result<User, AppError> {
    state.require_login()?;
    let upload = load_photo_upload(file).await?;
    let user = match kind {
        PhotoKind::Profile => state.api.upload_profile_photo(upload).await?,
        PhotoKind::Cover => state.api.upload_cover_photo(upload).await?,
    };
    Ok(user)
}
