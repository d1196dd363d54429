mod common;

use pet_adoption_api::{
    routes::params::PetQuery,
    services::pet_service,
};
use uuid::Uuid;

#[tokio::test]
async fn underscore_in_search_matches_literally() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let token = Uuid::new_v4().simple().to_string();
    let plain = common::insert_pet(&state, &format!("{token}x")).await?;
    let underscored = common::insert_pet(&state, &format!("{token}_")).await?;

    let found = pet_service::list_pets(
        &state,
        PetQuery {
            q: Some(format!("{token}_")),
            per_page: Some(100),
            ..Default::default()
        },
    )
    .await?;
    let ids: Vec<Uuid> = found.data.expect("pets").items.iter().map(|p| p.id).collect();

    assert!(ids.contains(&underscored));
    assert!(!ids.contains(&plain));
    Ok(())
}
