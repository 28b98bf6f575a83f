//! Integration tests for the /recipe/ingredients endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use recipebox_shared::models::ingredient::{CreateIngredient, Ingredient};
use recipebox_shared::models::recipe::{CreateRecipe, Recipe};
use recipebox_shared::models::user::User;
use serde_json::json;
use tower::Service as _;

#[tokio::test]
async fn test_list_ingredients_requires_authentication() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/recipe/ingredients")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_ingredient() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/recipe/ingredients")
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": "Cabbage" }).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert_eq!(body["name"], "Cabbage");
    assert!(body["id"].is_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_ingredient_empty_name() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/recipe/ingredients")
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": "" }).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_ingredients_reverse_name_order() {
    let ctx = TestContext::new().await.unwrap();

    for name in ["Kale", "Vanilla", "Apple"] {
        Ingredient::create(
            &ctx.db,
            CreateIngredient {
                user_id: ctx.user.id,
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let request = Request::builder()
        .method("GET")
        .uri("/recipe/ingredients")
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Vanilla", "Kale", "Apple"]);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_ingredients_limited_to_owner() {
    let ctx = TestContext::new().await.unwrap();
    let (other_user, _) = common::create_user_with_token(&ctx.db, "Other User")
        .await
        .unwrap();

    Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: other_user.id,
            name: "Turmeric".to_string(),
        },
    )
    .await
    .unwrap();

    Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: ctx.user.id,
            name: "Tumeric".to_string(),
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/recipe/ingredients")
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let ingredients = body.as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["name"], "Tumeric");

    User::delete(&ctx.db, other_user.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_ingredients_assigned_only() {
    let ctx = TestContext::new().await.unwrap();

    let assigned = Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: ctx.user.id,
            name: "Apples".to_string(),
        },
    )
    .await
    .unwrap();

    Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: ctx.user.id,
            name: "Turkey".to_string(),
        },
    )
    .await
    .unwrap();

    Recipe::create(
        &ctx.db,
        CreateRecipe {
            user_id: ctx.user.id,
            title: "Apple crumble".to_string(),
            time_minutes: 50,
            price: 7.5,
            ingredient_ids: vec![assigned.id],
            tag_ids: vec![],
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/recipe/ingredients?assigned_only=1")
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let ingredients = body.as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["name"], "Apples");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_ingredients_assigned_only_unique() {
    let ctx = TestContext::new().await.unwrap();

    let ingredient = Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: ctx.user.id,
            name: "Eggs".to_string(),
        },
    )
    .await
    .unwrap();

    for title in ["Eggs benedict", "Herb eggs"] {
        Recipe::create(
            &ctx.db,
            CreateRecipe {
                user_id: ctx.user.id,
                title: title.to_string(),
                time_minutes: 25,
                price: 6.0,
                ingredient_ids: vec![ingredient.id],
                tag_ids: vec![],
            },
        )
        .await
        .unwrap();
    }

    let request = Request::builder()
        .method("GET")
        .uri("/recipe/ingredients?assigned_only=1")
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_delete_ingredient_of_other_user_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let (other_user, _) = common::create_user_with_token(&ctx.db, "Other User")
        .await
        .unwrap();

    let foreign = Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: other_user.id,
            name: "Saffron".to_string(),
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/recipe/ingredients/{}", foreign.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The ingredient survives untouched
    assert!(
        Ingredient::find_for_user(&ctx.db, foreign.id, other_user.id)
            .await
            .unwrap()
            .is_some()
    );

    User::delete(&ctx.db, other_user.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_delete_ingredient() {
    let ctx = TestContext::new().await.unwrap();

    let ingredient = Ingredient::create(
        &ctx.db,
        CreateIngredient {
            user_id: ctx.user.id,
            name: "Lettuce".to_string(),
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/recipe/ingredients/{}", ingredient.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(
        Ingredient::find_for_user(&ctx.db, ingredient.id, ctx.user.id)
            .await
            .unwrap()
            .is_none()
    );

    ctx.cleanup().await.unwrap();
}
