mod common;

use common::{app_with, dog, kennel, Call, FakeApi};
use fetchdogs::app::Tab;
use fetchdogs::error::FetchDogsError;
use fetchdogs::favorites::{request_match, Favorites, MATCH_FAILED, NO_FAVORITES};
use std::sync::Arc;

#[test]
fn test_toggle_parity() {
    let rex = dog("d1", "Rex", "Beagle", 3, "78701");
    let mut favorites = Favorites::new();

    assert!(favorites.toggle(&rex));
    assert!(favorites.contains("d1"));
    assert!(!favorites.toggle(&rex));
    assert!(!favorites.contains("d1"));

    for _ in 0..3 {
        favorites.toggle(&rex);
    }
    assert!(favorites.contains("d1"));
    assert_eq!(favorites.len(), 1);
}

#[test]
fn test_favorites_keep_insertion_order() {
    let mut favorites = Favorites::new();
    favorites.toggle(&dog("d3", "Max", "Poodle", 2, "10001"));
    favorites.toggle(&dog("d1", "Rex", "Beagle", 3, "78701"));
    favorites.toggle(&dog("d2", "Bella", "Poodle", 5, "78701"));
    favorites.toggle(&dog("d1", "Rex", "Beagle", 3, "78701"));

    assert_eq!(favorites.ids(), vec!["d3", "d2"]);
}

#[tokio::test]
async fn test_match_with_no_favorites_makes_no_request() {
    let api = FakeApi::new();

    let result = request_match(&api, &Favorites::new(), false).await;

    match result {
        Err(FetchDogsError::Validation(message)) => assert_eq!(message, NO_FAVORITES),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_match_resolves_against_favorites() {
    let mut api = FakeApi::new();
    api.match_id = Some("d2".to_string());

    let mut favorites = Favorites::new();
    favorites.toggle(&dog("d1", "Rex", "Beagle", 3, "78701"));
    favorites.toggle(&dog("d2", "Bella", "Poodle", 5, "78701"));

    let matched = request_match(&api, &favorites, false).await.unwrap().unwrap();

    assert_eq!(matched.name, "Bella");
    assert_eq!(
        api.calls(),
        vec![Call::Match(vec!["d1".to_string(), "d2".to_string()])]
    );
}

#[tokio::test]
async fn test_match_with_unknown_id_yields_none() {
    let mut api = FakeApi::new();
    api.match_id = Some("zz".to_string());

    let mut favorites = Favorites::new();
    favorites.toggle(&dog("d1", "Rex", "Beagle", 3, "78701"));

    let matched = request_match(&api, &favorites, false).await.unwrap();
    assert!(matched.is_none());
}

#[tokio::test]
async fn test_match_failure_message() {
    let api = FakeApi::new().failing("match");
    let mut favorites = Favorites::new();
    favorites.toggle(&dog("d1", "Rex", "Beagle", 3, "78701"));

    match request_match(&api, &favorites, false).await {
        Err(e) => assert_eq!(e.user_message(), MATCH_FAILED),
        Ok(_) => panic!("expected match failure"),
    }
}

#[tokio::test]
async fn test_app_match_announces_dog() {
    let mut api = kennel();
    api.match_id = Some("d3".to_string());
    let api = Arc::new(api);
    let mut app = app_with(api.clone());
    app.refresh().await;

    assert!(app.toggle_favorite("d3").unwrap());
    assert!(app.toggle_favorite("1").unwrap());
    assert!(app.toggle_favorite("nope").is_err());

    let matched = app.generate_match().await.unwrap();
    assert_eq!(matched.id, "d3");
    assert_eq!(app.last_match().unwrap().id, "d3");

    let announced = app.notices_mut().take_unseen();
    assert_eq!(
        announced.last().unwrap().message,
        "You've been matched with Max! A Poodle, 2 years old from New York, NY."
    );
}

#[tokio::test]
async fn test_app_match_without_favorites_raises_notice() {
    let api = Arc::new(kennel());
    let mut app = app_with(api.clone());

    assert!(app.generate_match().await.is_none());
    assert_eq!(app.notices().last_error(), Some(NO_FAVORITES));
    assert_eq!(api.count(|c| matches!(c, Call::Match(_))), 0);
}

#[tokio::test]
async fn test_logout_resets_application_state() {
    let api = Arc::new(kennel());
    let mut app = app_with(api.clone());
    app.load_breeds().await;
    app.select_breeds(vec!["Poodle"]).unwrap();
    app.refresh().await;
    app.toggle_favorite("1").unwrap();
    app.set_tab(Tab::Favorites);

    let in_flight = app.begin_refresh();
    app.logout().await;

    assert!(!app.is_authenticated());
    assert!(app.favorites().is_empty());
    assert!(app.breeds().is_empty());
    assert!(app.query().breeds().is_empty());
    assert!(app.listing().dogs().is_empty());
    assert_eq!(app.tab(), Tab::Search);
    assert_eq!(api.count(|c| *c == Call::Logout), 1);

    let (generation, outcome) = in_flight.run(api.as_ref(), false).await;
    assert_eq!(
        app.apply_listing(generation, outcome),
        fetchdogs::listing::ListingUpdate::Stale
    );
    assert!(app.listing().dogs().is_empty());
}

#[tokio::test]
async fn test_card_numbers_follow_the_favorites_tab() {
    let api = Arc::new(kennel());
    let mut app = app_with(api);
    app.refresh().await;

    assert!(app.toggle_favorite("d3").unwrap());
    assert!(app.toggle_favorite("d1").unwrap());

    app.set_tab(Tab::Favorites);
    // #1 on this tab is Max, not the first card of the search page
    assert!(!app.toggle_favorite("1").unwrap());

    let ids: Vec<&str> = app.favorites().dogs().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d1"]);
    assert!(app.toggle_favorite("2").is_err());
}
