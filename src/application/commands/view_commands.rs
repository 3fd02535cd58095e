// src/application/commands/view_commands.rs

use crate::application::dto::ViewStateDto;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{AppMode, DomainError, GenerationMode, Language};

fn invalid(err: DomainError) -> String {
    ErrorResponse::validation(err.to_string()).into_command_error()
}

pub async fn current_view(state: &AppState) -> ViewStateDto {
    ViewStateDto::from(*state.view.read().await)
}

/// Switch screens; also closes the mobile menu
pub async fn select_mode(mode: String, state: &AppState) -> Result<ViewStateDto, String> {
    let mode: AppMode = mode.parse().map_err(invalid)?;

    let mut view = state.view.write().await;
    view.select_mode(mode);
    Ok(ViewStateDto::from(*view))
}

pub async fn select_language(language: String, state: &AppState) -> Result<ViewStateDto, String> {
    let language: Language = language.parse().map_err(invalid)?;

    let mut view = state.view.write().await;
    view.select_language(language);
    Ok(ViewStateDto::from(*view))
}

/// Story or song output for the next generation
pub async fn select_generation_mode(
    generation_mode: String,
    state: &AppState,
) -> Result<ViewStateDto, String> {
    let generation_mode: GenerationMode = generation_mode.parse().map_err(invalid)?;

    let mut view = state.view.write().await;
    view.select_generation_mode(generation_mode);
    Ok(ViewStateDto::from(*view))
}

/// Returns whether the menu is now open
pub async fn toggle_mobile_menu(state: &AppState) -> bool {
    state.view.write().await.toggle_mobile_menu()
}
