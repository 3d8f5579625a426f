use fetchdogs::models::{SortDirection, SortField, SortOrder};
use fetchdogs::shell::Command;
use fetchdogs::ui::{format_pagination, Notifications, NoticeLevel};
use tokio::time::{advance, Duration};

#[test]
fn test_parse_simple_commands() {
    assert_eq!(Command::parse("").unwrap(), Command::Empty);
    assert_eq!(Command::parse("  help ").unwrap(), Command::Help);
    assert_eq!(Command::parse("n").unwrap(), Command::Next);
    assert_eq!(Command::parse("prev").unwrap(), Command::Prev);
    assert_eq!(Command::parse("favs").unwrap(), Command::Favs);
    assert_eq!(Command::parse("MATCH").unwrap(), Command::Match);
    assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
}

#[test]
fn test_parse_breed_filter() {
    assert_eq!(
        Command::parse("breed Golden Retriever, Poodle").unwrap(),
        Command::Breed(vec!["Golden Retriever".to_string(), "Poodle".to_string()])
    );
    assert_eq!(Command::parse("breed").unwrap(), Command::ClearBreeds);
    assert_eq!(Command::parse("breed clear").unwrap(), Command::ClearBreeds);
    assert_eq!(
        Command::parse("breeds ter").unwrap(),
        Command::Breeds(Some("ter".to_string()))
    );
    assert_eq!(Command::parse("breeds").unwrap(), Command::Breeds(None));
}

#[test]
fn test_parse_arguments() {
    assert_eq!(
        Command::parse("sort age:desc").unwrap(),
        Command::Sort(SortOrder::new(SortField::Age, SortDirection::Desc))
    );
    assert_eq!(Command::parse("page 3").unwrap(), Command::Page(3));
    assert_eq!(Command::parse("radius 25").unwrap(), Command::Radius(25));
    assert_eq!(Command::parse("pick 2").unwrap(), Command::Pick(2));
    assert_eq!(
        Command::parse("loc San Fr").unwrap(),
        Command::Locate("San Fr".to_string())
    );
    assert_eq!(Command::parse("fav 4").unwrap(), Command::Fav("4".to_string()));
}

#[test]
fn test_parse_errors() {
    assert!(Command::parse("page two").is_err());
    assert!(Command::parse("radius").is_err());
    assert!(Command::parse("sort height").is_err());
    assert!(Command::parse("fav").is_err());
    assert!(Command::parse("dance").unwrap_err().contains("Unknown command"));
}

#[test]
fn test_format_pagination() {
    let middle = format_pagination(2, 5);
    assert!(middle.contains("Page 2 of 5"));
    assert!(middle.contains("prev"));
    assert!(middle.contains("next"));

    let last = format_pagination(5, 5);
    assert!(!last.contains("next"));
}

#[tokio::test(start_paused = true)]
async fn test_notices_expire() {
    let mut notices = Notifications::new(Duration::from_secs(6));
    notices.error("Search failed: boom");
    advance(Duration::from_secs(4)).await;
    notices.success("Matched");

    let unseen = notices.take_unseen();
    assert_eq!(unseen.len(), 2);
    assert_eq!(unseen[0].level, NoticeLevel::Error);
    assert!(notices.take_unseen().is_empty());

    advance(Duration::from_secs(3)).await;
    notices.dismiss_expired();
    assert_eq!(notices.len(), 1);
    assert!(notices.last_error().is_none());

    advance(Duration::from_secs(3)).await;
    notices.dismiss_expired();
    assert!(notices.is_empty());
}
