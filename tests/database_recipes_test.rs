// ABOUTME: Integration tests for recipe, favorite, cart and subscription persistence
// ABOUTME: Runs against an in-memory SQLite database with the full schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{
    create_test_database, create_test_ingredient, create_test_recipe, create_test_tags,
    create_test_user,
};
use foodgram::database::{CartSnapshotLoader, IngredientAmount, RecipeDraft, RecipeFilter};
use foodgram::shopping_list::{shopping_list_lines, AggregationKey};
use foodgram_core::errors::ErrorCode;
use foodgram_core::pagination::PageRequest;

#[tokio::test]
async fn test_create_and_get_recipe() -> Result<()> {
    let database = create_test_database().await?;
    let (author, _) = create_test_user(&database, "chef").await?;
    let (breakfast, lunch) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    let eggs = create_test_ingredient(&database, "eggs", "pcs").await?;

    let recipe_id = create_test_recipe(
        &database,
        author.id,
        "Pancakes",
        &[lunch.id, breakfast.id],
        &[(eggs.id, 2), (flour.id, 200)],
    )
    .await?;

    let recipe = database.get_recipe(recipe_id, None).await?.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.author.user.id, author.id);
    assert_eq!(
        recipe.tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(),
        vec!["breakfast", "lunch"]
    );
    // Ingredients keep submission order
    assert_eq!(
        recipe
            .ingredients
            .iter()
            .map(|i| (i.name.as_str(), i.amount))
            .collect::<Vec<_>>(),
        vec![("eggs", 2), ("flour", 200)]
    );
    assert!(!recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);
    Ok(())
}

#[tokio::test]
async fn test_create_recipe_rejects_unknown_references() -> Result<()> {
    let database = create_test_database().await?;
    let (author, _) = create_test_user(&database, "chef").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;

    let err = create_test_recipe(&database, author.id, "Bread", &[999], &[(flour.id, 1)])
        .await
        .unwrap_err();
    let err = err.downcast::<foodgram_core::errors::AppError>()?;
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = create_test_recipe(&database, author.id, "Bread", &[breakfast.id], &[(999, 1)])
        .await
        .unwrap_err()
        .downcast::<foodgram_core::errors::AppError>()?;
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let page = database
        .list_recipes(&RecipeFilter::default(), None, PageRequest::default())
        .await?;
    assert_eq!(page.count, 0);
    Ok(())
}

#[tokio::test]
async fn test_update_recipe_replaces_links_and_keeps_image() -> Result<()> {
    let database = create_test_database().await?;
    let (author, _) = create_test_user(&database, "chef").await?;
    let (breakfast, lunch) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    let milk = create_test_ingredient(&database, "milk", "ml").await?;
    let recipe_id =
        create_test_recipe(&database, author.id, "Crepes", &[breakfast.id], &[(flour.id, 100)])
            .await?;

    database
        .update_recipe(
            recipe_id,
            &RecipeDraft {
                name: "Thin crepes".to_owned(),
                image: None,
                text: "Whisk and fry".to_owned(),
                cooking_time: 25,
                tags: vec![lunch.id],
                ingredients: vec![IngredientAmount {
                    id: milk.id,
                    amount: 300,
                }],
            },
        )
        .await?;

    let recipe = database.get_recipe(recipe_id, None).await?.unwrap();
    assert_eq!(recipe.name, "Thin crepes");
    assert_eq!(recipe.cooking_time, 25);
    assert_eq!(recipe.image, "/media/recipes/images/test.png");
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].id, lunch.id);
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].name, "milk");
    Ok(())
}

#[tokio::test]
async fn test_list_recipes_filters() -> Result<()> {
    let database = create_test_database().await?;
    let (alice, _) = create_test_user(&database, "alice").await?;
    let (bob, _) = create_test_user(&database, "bob").await?;
    let (breakfast, lunch) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;

    let porridge =
        create_test_recipe(&database, alice.id, "Porridge", &[breakfast.id], &[(flour.id, 1)])
            .await?;
    let soup = create_test_recipe(&database, bob.id, "Soup", &[lunch.id], &[(flour.id, 1)]).await?;
    let brunch = create_test_recipe(
        &database,
        bob.id,
        "Brunch",
        &[breakfast.id, lunch.id],
        &[(flour.id, 1)],
    )
    .await?;

    let ids = |page: foodgram_core::pagination::Page<foodgram_core::models::Recipe>| {
        page.results.into_iter().map(|r| r.id).collect::<Vec<_>>()
    };

    // Newest first
    let all = database
        .list_recipes(&RecipeFilter::default(), None, PageRequest::default())
        .await?;
    assert_eq!(ids(all), vec![brunch, soup, porridge]);

    let by_author = RecipeFilter {
        author: Some(bob.id),
        ..RecipeFilter::default()
    };
    let page = database
        .list_recipes(&by_author, None, PageRequest::default())
        .await?;
    assert_eq!(ids(page), vec![brunch, soup]);

    // Any-of tag slugs, each recipe once
    let by_tags = RecipeFilter {
        tags: vec!["breakfast".to_owned(), "lunch".to_owned()],
        ..RecipeFilter::default()
    };
    let page = database
        .list_recipes(&by_tags, None, PageRequest::default())
        .await?;
    assert_eq!(page.count, 3);
    assert_eq!(ids(page), vec![brunch, soup, porridge]);

    database.add_favorite(alice.id, soup).await?;
    database.add_to_shopping_cart(alice.id, porridge).await?;

    let favorites = RecipeFilter {
        is_favorited: true,
        ..RecipeFilter::default()
    };
    let page = database
        .list_recipes(&favorites, Some(alice.id), PageRequest::default())
        .await?;
    assert_eq!(ids(page), vec![soup]);

    // Viewer-only filters are ignored for anonymous viewers
    let page = database
        .list_recipes(&favorites, None, PageRequest::default())
        .await?;
    assert_eq!(page.count, 3);

    let in_cart = RecipeFilter {
        is_in_shopping_cart: true,
        ..RecipeFilter::default()
    };
    let page = database
        .list_recipes(&in_cart, Some(alice.id), PageRequest::default())
        .await?;
    let results = page.results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, porridge);
    assert!(results[0].is_in_shopping_cart);
    Ok(())
}

#[tokio::test]
async fn test_list_recipes_pagination() -> Result<()> {
    let database = create_test_database().await?;
    let (author, _) = create_test_user(&database, "chef").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    for i in 0..5 {
        create_test_recipe(
            &database,
            author.id,
            &format!("Recipe {i}"),
            &[breakfast.id],
            &[(flour.id, 1)],
        )
        .await?;
    }

    let page = database
        .list_recipes(
            &RecipeFilter::default(),
            None,
            PageRequest { page: 2, limit: 2 },
        )
        .await?;
    assert_eq!(page.count, 5);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "Recipe 2");
    assert_eq!(page.next.as_deref(), Some("?page=3&limit=2"));
    assert_eq!(page.previous.as_deref(), Some("?page=1&limit=2"));
    Ok(())
}

#[tokio::test]
async fn test_favorites_and_cart_duplicates() -> Result<()> {
    let database = create_test_database().await?;
    let (user, _) = create_test_user(&database, "eater").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    let recipe = create_test_recipe(&database, user.id, "Toast", &[breakfast.id], &[(flour.id, 1)])
        .await?;

    database.add_favorite(user.id, recipe).await?;
    let err = database.add_favorite(user.id, recipe).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.code.http_status(), 400);
    database.remove_favorite(user.id, recipe).await?;
    let err = database.remove_favorite(user.id, recipe).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    database.add_to_shopping_cart(user.id, recipe).await?;
    assert!(database.is_in_shopping_cart(user.id, recipe).await?);
    let err = database.add_to_shopping_cart(user.id, recipe).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    database.remove_from_shopping_cart(user.id, recipe).await?;
    assert!(!database.is_in_shopping_cart(user.id, recipe).await?);
    Ok(())
}

#[tokio::test]
async fn test_cart_snapshot_order_and_aggregation() -> Result<()> {
    let database = create_test_database().await?;
    let (user, _) = create_test_user(&database, "shopper").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    let sugar = create_test_ingredient(&database, "sugar", "g").await?;

    // Recipe A is newer, so the snapshot lists it first
    let recipe_b = create_test_recipe(
        &database,
        user.id,
        "Recipe B",
        &[breakfast.id],
        &[(flour.id, 100), (sugar.id, 50)],
    )
    .await?;
    let recipe_a =
        create_test_recipe(&database, user.id, "Recipe A", &[breakfast.id], &[(flour.id, 200)])
            .await?;
    database.add_to_shopping_cart(user.id, recipe_b).await?;
    database.add_to_shopping_cart(user.id, recipe_a).await?;

    let snapshot = database.load_cart_snapshot(user.id).await?;
    assert_eq!(
        snapshot.entries.iter().map(|e| e.recipe.id).collect::<Vec<_>>(),
        vec![recipe_a, recipe_b]
    );
    assert_eq!(
        shopping_list_lines(&snapshot, AggregationKey::Name),
        vec!["flour (g) - 300", "sugar (g) - 50"]
    );
    Ok(())
}

#[tokio::test]
async fn test_cart_snapshot_conflates_units_by_name() -> Result<()> {
    let database = create_test_database().await?;
    let (user, _) = create_test_user(&database, "shopper").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let milk_l = create_test_ingredient(&database, "milk", "l").await?;
    let milk_ml = create_test_ingredient(&database, "milk", "ml").await?;

    let older =
        create_test_recipe(&database, user.id, "Latte", &[breakfast.id], &[(milk_l.id, 1)]).await?;
    let newer =
        create_test_recipe(&database, user.id, "Cocoa", &[breakfast.id], &[(milk_ml.id, 200)])
            .await?;
    database.add_to_shopping_cart(user.id, older).await?;
    database.add_to_shopping_cart(user.id, newer).await?;

    let snapshot = database.load_cart_snapshot(user.id).await?;
    assert_eq!(
        shopping_list_lines(&snapshot, AggregationKey::Name),
        vec!["milk (ml) - 201"]
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_cart_snapshot() -> Result<()> {
    let database = create_test_database().await?;
    let (user, _) = create_test_user(&database, "nobody").await?;
    let snapshot = database.load_cart_snapshot(user.id).await?;
    assert!(snapshot.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_subscriptions() -> Result<()> {
    let database = create_test_database().await?;
    let (reader, _) = create_test_user(&database, "reader").await?;
    let (author, _) = create_test_user(&database, "author").await?;
    let (breakfast, _) = create_test_tags(&database).await?;
    let flour = create_test_ingredient(&database, "flour", "g").await?;
    for i in 0..3 {
        create_test_recipe(
            &database,
            author.id,
            &format!("Dish {i}"),
            &[breakfast.id],
            &[(flour.id, 1)],
        )
        .await?;
    }

    let err = database.subscribe(reader.id, reader.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    database.subscribe(reader.id, author.id).await?;
    let err = database.subscribe(reader.id, author.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert!(database.is_subscribed(reader.id, author.id).await?);

    let profile = database.user_profile(author.clone(), Some(reader.id)).await?;
    assert!(profile.is_subscribed);

    let page = database
        .list_subscriptions(reader.id, PageRequest::default(), Some(2))
        .await?;
    assert_eq!(page.count, 1);
    let entry = &page.results[0];
    assert_eq!(entry.author.user.id, author.id);
    assert_eq!(entry.recipes_count, 3);
    assert_eq!(entry.recipes.len(), 2);
    assert_eq!(entry.recipes[0].name, "Dish 2");

    database.unsubscribe(reader.id, author.id).await?;
    let err = database.unsubscribe(reader.id, author.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_ingredient_prefix_search_is_case_insensitive() -> Result<()> {
    let database = create_test_database().await?;
    create_test_ingredient(&database, "Сахар", "г").await?;
    create_test_ingredient(&database, "сахарная пудра", "г").await?;
    create_test_ingredient(&database, "соль", "г").await?;

    let found = database.list_ingredients(Some("сах")).await?;
    assert_eq!(found.len(), 2);
    assert_eq!(database.list_ingredients(None).await?.len(), 3);
    Ok(())
}
