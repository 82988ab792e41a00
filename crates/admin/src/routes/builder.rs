//! Store builder: identity, menu editing, publishing, and a live preview.
//!
//! The store row is created on first visit. Every form on the page posts to
//! its own route and redirects back here with a flash.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::flash::Flash;
use foodia_core::menu::{Audience, MenuSection};
use foodia_core::models::{Category, Store};
use foodia_core::publish::ChecklistItem;
use foodia_core::{CategoryId, CustomOptionId, Language, MenuItemId, Money, StoreSlug};

use crate::db::{MenuRepository, RepositoryError, StoreRepository};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::products::{MISSING_FIELDS, ProductForm};
use crate::models::store_settings::StoreConfigForm;
use crate::state::AppState;

use super::{NavView, current_store, redirect_with, render, share_url};

const BUILDER: &str = "/admin/menu-builder";

/// Language choice for the store form.
#[derive(Debug, Clone)]
pub struct LanguageChoice {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub(crate) fn language_choices(current: Language) -> Vec<LanguageChoice> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageChoice {
            code: language.code(),
            label: language.label(),
            selected: language == current,
        })
        .collect()
}

/// Store builder template.
#[derive(Template)]
#[template(path = "menu_builder.html")]
pub struct BuilderTemplate {
    pub nav: NavView,
    pub store: Store,
    pub languages: Vec<LanguageChoice>,
    pub categories: Vec<Category>,
    pub editor: Vec<MenuSection>,
    pub preview: Vec<MenuSection>,
    pub checklist: Vec<ChecklistItem>,
    pub ready: bool,
    pub share_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct OptionForm {
    #[serde(default)]
    pub group_label: String,
    #[serde(default)]
    pub option_name: String,
    #[serde(default)]
    pub extra_cost: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/menu-builder", get(index))
        .route("/admin/menu-builder/store", post(save_store))
        .route("/admin/menu-builder/categories", post(add_category))
        .route("/admin/menu-builder/categories/{id}", post(rename_category))
        .route("/admin/menu-builder/categories/{id}/delete", post(delete_category))
        .route("/admin/menu-builder/items", post(add_item))
        .route("/admin/menu-builder/items/{id}", post(update_item))
        .route("/admin/menu-builder/items/{id}/delete", post(delete_item))
        .route("/admin/menu-builder/items/{id}/options", post(add_option))
        .route("/admin/menu-builder/options/{id}/delete", post(delete_option))
        .route("/admin/menu-builder/publish", post(publish))
        .route("/admin/menu-builder/unpublish", post(unpublish))
}

/// Link to publish under: the saved one, else one made from the name.
fn publish_slug(store: &Store) -> Option<StoreSlug> {
    store
        .store_url
        .clone()
        .or_else(|| StoreSlug::slugify(&store.name))
}

/// Flash for a failed write. Conflicts and missing rows are shown as they
/// are; anything else is logged and reported with `fallback`.
fn failure(error: &RepositoryError, fallback: &str) -> Flash {
    match error {
        RepositoryError::Conflict(message) => Flash::error("Store link taken", message.clone()),
        RepositoryError::NotFound(what) => Flash::error("Error", format!("{what} not found")),
        _ => {
            tracing::error!(error = %error, "{fallback}");
            Flash::error("Error", fallback)
        }
    }
}

#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let menu = MenuRepository::new(state.pool()).load(store.id).await?;

    let checklist = menu.checklist(&store.name);
    let share_url = store
        .store_url
        .as_ref()
        .filter(|_| store.is_published)
        .map(|slug| share_url(&state.config().storefront_base_url, slug));

    let template = BuilderTemplate {
        languages: language_choices(store.language),
        editor: menu.sections(Audience::Owner),
        preview: menu.sections(Audience::Customer),
        checklist: checklist.items(),
        ready: checklist.is_ready(),
        share_url,
        nav: NavView::new(&account, &store, &session, BUILDER).await,
        categories: menu.categories,
        store,
    };
    Ok(render(&template))
}

/// Save the store's identity.
#[instrument(skip(account, state, session, form))]
pub async fn save_store(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<StoreConfigForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let config = match form.validate() {
        Ok(config) => config,
        Err(e) => return Ok(redirect_with(&session, Flash::error("Error", e.to_string()), BUILDER).await),
    };

    let flash = match StoreRepository::new(state.pool())
        .update_config(store.id, &config)
        .await
    {
        Ok(_) => Flash::success("Store saved!", "Your store configuration was updated"),
        Err(e) => failure(&e, "Failed to save store"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session))]
pub async fn add_category(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool()).create_category(store.id).await {
        Ok(_) => Flash::success("Category created!", ""),
        Err(e) => failure(&e, "Failed to create category"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session, form))]
pub async fn rename_category(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let name = form.name.trim();
    if name.is_empty() {
        let flash = Flash::error("Error", "Category name is required");
        return Ok(redirect_with(&session, flash, BUILDER).await);
    }

    let flash = match MenuRepository::new(state.pool())
        .rename_category(store.id, id, name)
        .await
    {
        Ok(()) => Flash::success("Category updated!", ""),
        Err(e) => failure(&e, "Failed to update category"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session))]
pub async fn delete_category(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool())
        .delete_category(store.id, id)
        .await
    {
        Ok(()) => Flash::success("Category deleted", ""),
        Err(e) => failure(&e, "Failed to delete category"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

/// Add a placeholder item to the first category.
#[instrument(skip(account, state, session))]
pub async fn add_item(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool())
        .create_placeholder_item(store.id)
        .await
    {
        Ok(Some(_)) => Flash::success("Item created!", ""),
        Ok(None) => Flash::error("No categories found", "You must create a category first"),
        Err(e) => failure(&e, "Failed to create item"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session, form))]
pub async fn update_item(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let Ok(draft) = form.validate_builder_item() else {
        return Ok(redirect_with(&session, Flash::error("Error", MISSING_FIELDS), BUILDER).await);
    };

    let flash = match MenuRepository::new(state.pool())
        .update_item(store.id, id, &draft)
        .await
    {
        Ok(()) => Flash::success("Item updated!", ""),
        Err(e) => failure(&e, "Failed to update item"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session))]
pub async fn delete_item(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MenuItemId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool()).delete_item(store.id, id).await {
        Ok(()) => Flash::success("Item deleted", ""),
        Err(e) => failure(&e, "Failed to delete item"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session, form))]
pub async fn add_option(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<MenuItemId>,
    Form(form): Form<OptionForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let group_label = form.group_label.trim();
    let option_name = form.option_name.trim();
    let extra_cost = match form.extra_cost.trim() {
        "" => Ok(Money::ZERO),
        cost => Money::parse(cost),
    };
    let (false, false, Ok(extra_cost)) = (group_label.is_empty(), option_name.is_empty(), extra_cost)
    else {
        return Ok(redirect_with(&session, Flash::error("Error", MISSING_FIELDS), BUILDER).await);
    };

    let flash = match MenuRepository::new(state.pool())
        .create_option(store.id, item_id, group_label, option_name, extra_cost)
        .await
    {
        Ok(_) => Flash::success("Option added!", ""),
        Err(e) => failure(&e, "Failed to add option"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session))]
pub async fn delete_option(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CustomOptionId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match MenuRepository::new(state.pool())
        .delete_option(store.id, id)
        .await
    {
        Ok(()) => Flash::success("Option removed", ""),
        Err(e) => failure(&e, "Failed to remove option"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

/// Publish once the checklist passes.
#[instrument(skip(account, state, session))]
pub async fn publish(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;
    let menu = MenuRepository::new(state.pool()).load(store.id).await?;

    let checklist = menu.checklist(&store.name);
    if let Err(not_ready) = checklist.ensure_ready() {
        let flash = Flash::error(
            "Not ready to publish",
            format!("Add {} first", not_ready.missing.join(", ")),
        );
        return Ok(redirect_with(&session, flash, BUILDER).await);
    }

    let Some(slug) = publish_slug(&store) else {
        let flash = Flash::error("Error", "Set a store link before publishing");
        return Ok(redirect_with(&session, flash, BUILDER).await);
    };

    let flash = match StoreRepository::new(state.pool()).publish(store.id, &slug).await {
        Ok(()) => Flash::success("Store published!", "Your store is live for customers"),
        Err(e) => failure(&e, "Failed to publish store"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[instrument(skip(account, state, session))]
pub async fn unpublish(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match StoreRepository::new(state.pool()).unpublish(store.id).await {
        Ok(()) => Flash::success("Store unpublished", "Customers can no longer order"),
        Err(e) => failure(&e, "Failed to unpublish store"),
    };
    Ok(redirect_with(&session, flash, BUILDER).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use foodia_core::{AccountId, HexColor, StoreId};

    use super::*;

    fn store(name: &str, store_url: Option<&str>) -> Store {
        Store {
            id: StoreId::new(1),
            account_id: AccountId::new(1),
            name: name.to_owned(),
            description: String::new(),
            logo_url: None,
            banner_url: None,
            primary_color: HexColor::parse(HexColor::DEFAULT_PRIMARY).unwrap(),
            button_color: HexColor::parse(HexColor::DEFAULT_BUTTON).unwrap(),
            language: Language::En,
            gamified_ordering: false,
            is_published: false,
            store_url: store_url.map(|slug| StoreSlug::parse(slug).unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_publish_keeps_saved_link() {
        let slug = publish_slug(&store("Sabor Brasileiro", Some("sabor"))).unwrap();
        assert_eq!(slug.as_str(), "sabor");
    }

    #[test]
    fn test_publish_derives_link_from_name() {
        let slug = publish_slug(&store("Sabor Brasileiro", None)).unwrap();
        assert_eq!(slug.as_str(), "sabor-brasileiro");
    }

    #[test]
    fn test_conflict_flash_names_the_link() {
        let flash = failure(
            &RepositoryError::Conflict("a store with this link already exists".to_owned()),
            "Failed to publish store",
        );
        assert!(flash.is_error());
        assert_eq!(flash.title, "Store link taken");
    }

    #[test]
    fn test_language_choices_select_current() {
        let choices = language_choices(Language::Pt);
        assert_eq!(choices.len(), 3);
        assert!(choices.iter().any(|c| c.code == "pt" && c.selected));
    }
}
