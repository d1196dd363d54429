mod common;

use pet_adoption_api::{entity::enums::Role, routes::params::Pagination, services::favorite_service};

#[tokio::test]
async fn toggling_twice_restores_the_original_state() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user = common::account(&state, Role::User).await?;
    let pet_id = common::insert_pet(&state, "Biscuit").await?;

    let first = favorite_service::toggle_favorite(&state, &user, pet_id).await?;
    assert!(first.data.expect("state").favorited);
    let ids = favorite_service::favorite_ids(&state, &user).await?;
    assert!(ids.data.expect("ids").items.contains(&pet_id));

    let second = favorite_service::toggle_favorite(&state, &user, pet_id).await?;
    assert!(!second.data.expect("state").favorited);
    let ids = favorite_service::favorite_ids(&state, &user).await?;
    assert!(!ids.data.expect("ids").items.contains(&pet_id));
    Ok(())
}

#[tokio::test]
async fn add_and_remove_are_idempotent() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user = common::account(&state, Role::User).await?;
    let pet_id = common::insert_pet(&state, "Pepper").await?;

    favorite_service::add_favorite(&state, &user, pet_id).await?;
    let again = favorite_service::add_favorite(&state, &user, pet_id).await?;
    assert!(again.data.expect("state").favorited);

    let listed = favorite_service::list_favorites(&state, &user, Pagination::default()).await?;
    let pets = listed.data.expect("pets").items;
    assert_eq!(pets.iter().filter(|p| p.id == pet_id).count(), 1);

    favorite_service::remove_favorite(&state, &user, pet_id).await?;
    let removed = favorite_service::remove_favorite(&state, &user, pet_id).await?;
    assert!(!removed.data.expect("state").favorited);
    Ok(())
}

#[tokio::test]
async fn favoriting_a_missing_pet_is_not_found() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user = common::account(&state, Role::User).await?;

    let err = favorite_service::toggle_favorite(&state, &user, uuid::Uuid::new_v4())
        .await
        .err()
        .expect("missing pet should fail");
    assert!(matches!(err, pet_adoption_api::error::AppError::NotFound));
    Ok(())
}
