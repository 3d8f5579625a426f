use super::notify::{Notice, NoticeLevel};
use crate::app::{App, Tab};
use crate::models::{Dog, Location};
use colored::*;
use terminal_size::{terminal_size, Width};

/// Verbose-only diagnostics on stderr.
pub fn debug(enabled: bool, message: impl AsRef<str>) {
    if enabled {
        eprintln!("{}", format!("[dogs] {}", message.as_ref()).dimmed());
    }
}

/// Usable line width, capped so cards stay readable on wide terminals.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80)
        .clamp(40, 100)
}

fn rule() -> String {
    "─".repeat(terminal_width())
}

pub fn format_dog_card(position: usize, dog: &Dog, location: &str, favorite: bool) -> String {
    let heart = if favorite { "♥".red() } else { "♡".normal() };
    let mut card = String::new();
    card.push_str(&format!(
        "{} {} {}\n",
        format!("{:>3}.", position).dimmed(),
        heart,
        dog.name.bold()
    ));
    card.push_str(&format!("      Breed: {}\n", dog.breed));
    card.push_str(&format!("      Age: {} years\n", dog.age));
    card.push_str(&format!("      Location: {}\n", location));
    card.push_str(&format!("      {}", format!("id {}  {}", dog.id, dog.img).dimmed()));
    card
}

pub fn format_filters(app: &App) -> String {
    let query = app.query();
    let breeds = if query.breeds().is_empty() {
        "all breeds".to_string()
    } else {
        query.breeds().join(", ")
    };

    let mut line = format!("Breeds: {}  |  Sort: {}", breeds, query.sort().describe());
    if let Some(location) = query.location() {
        line.push_str(&format!(
            "  |  Near {} {} ({} mi)",
            location.label(),
            location.zip_code,
            query.max_distance()
        ));
    } else {
        line.push_str(&format!("  |  Radius: {} mi", query.max_distance()));
    }
    line
}

pub fn format_pagination(page: u32, total_pages: u32) -> String {
    let prev = if page > 1 { "‹ prev" } else { "      " };
    let next = if page < total_pages { "next ›" } else { "" };
    format!("{}  Page {} of {}  {}", prev, page, total_pages, next)
        .trim_end()
        .to_string()
}

pub fn display_search_view(app: &App) {
    println!("{}", rule().dimmed());
    println!(
        "{}  {}",
        "Dog Finder".bold().cyan(),
        format!("Favorites ({})", app.favorites().len()).magenta()
    );
    println!("{}", format_filters(app).dimmed());
    println!("{}", rule().dimmed());

    let listing = app.listing();
    if listing.is_loading() {
        println!("{}", "Loading...".yellow());
    } else if listing.dogs().is_empty() {
        println!("{}", "No dogs to show.".dimmed());
    } else {
        for (index, dog) in listing.dogs().iter().enumerate() {
            let card = format_dog_card(
                index + 1,
                dog,
                &app.location_label(&dog.zip_code),
                app.favorites().contains(&dog.id),
            );
            println!("{}", card);
        }
    }

    println!("{}", rule().dimmed());
    println!(
        "{}",
        format_pagination(app.query().page(), listing.total_pages()).cyan()
    );
}

pub fn display_favorites(app: &App) {
    println!("{}", rule().dimmed());
    println!("{}", "Your Favorite Dogs".bold().magenta());
    println!("{}", rule().dimmed());

    if app.favorites().is_empty() {
        println!(
            "{}",
            "No favorite dogs yet. Like some dogs to see them here!".dimmed()
        );
        return;
    }

    for (index, dog) in app.favorites().dogs().iter().enumerate() {
        println!(
            "{}",
            format_dog_card(index + 1, dog, &app.location_label(&dog.zip_code), true)
        );
    }
}

pub fn display_view(app: &App) {
    match app.tab() {
        Tab::Search => display_search_view(app),
        Tab::Favorites => display_favorites(app),
    }
}

pub fn display_match_dialog(app: &App) {
    println!("{}", rule().dimmed());
    println!(
        "{}",
        format!("Your Liked Dogs ({})", app.favorites().len()).bold()
    );
    for dog in app.favorites().dogs() {
        println!(
            "  {} {}",
            dog.name.bold(),
            format!("{} • {} years", dog.breed, dog.age).dimmed()
        );
    }
    println!("{}", rule().dimmed());
}

pub fn display_match(app: &App) {
    match app.last_match() {
        Some(dog) => {
            println!("{}", "It's a match!".green().bold());
            println!(
                "{}",
                format_dog_card(1, dog, &app.location_label(&dog.zip_code), true)
            );
        }
        None => println!("{}", "No match to show.".dimmed()),
    }
}

pub fn display_breeds(breeds: &[String], prefix: Option<&str>) {
    let prefix = prefix.map(|p| p.to_lowercase());
    let shown: Vec<&String> = breeds
        .iter()
        .filter(|b| match &prefix {
            Some(p) => b.to_lowercase().starts_with(p.as_str()),
            None => true,
        })
        .collect();

    if shown.is_empty() {
        println!("{}", "No breeds found.".dimmed());
        return;
    }

    let width = terminal_width();
    let column = shown.iter().map(|b| b.chars().count()).max().unwrap_or(0) + 2;
    let per_line = (width / column).max(1);
    for chunk in shown.chunks(per_line) {
        let line: String = chunk
            .iter()
            .map(|b| format!("{:<width$}", b, width = column))
            .collect();
        println!("{}", line.trim_end());
    }
}

pub fn display_locations(results: &[Location], loading: bool, text: &str) {
    if loading {
        println!("{}", "Searching locations...".yellow());
        return;
    }
    if results.is_empty() {
        let hint = if text.chars().count() < crate::location::MIN_QUERY_CHARS {
            "Type to search..."
        } else {
            "No locations found"
        };
        println!("{}", hint.dimmed());
        return;
    }
    for (index, location) in results.iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{:>3}.", index + 1).dimmed(),
            location.label(),
            location.zip_code.cyan()
        );
    }
}

pub fn display_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Error => eprintln!("{} {}", "Error:".red(), notice.message),
            NoticeLevel::Success => println!("{}", notice.message.green()),
            NoticeLevel::Info => println!("{}", notice.message.cyan()),
        }
    }
}

pub fn display_help() {
    let commands: &[(&str, &str)] = &[
        ("list", "Show the current page of dogs"),
        ("breeds [prefix]", "List breed names"),
        ("breed <a, b, ...> | clear", "Filter by breeds"),
        ("sort <field:dir>", "breed|name|age : asc|desc"),
        ("page <n> | next | prev", "Change page"),
        ("loc <text>", "Search locations by city"),
        ("pick <n>", "Use location #n as the filter"),
        ("unloc", "Remove the location filter"),
        ("radius <miles>", "Max distance from the location (10, 25, 50, 100)"),
        ("fav <n|id>", "Toggle a favorite"),
        ("favs", "Show favorites"),
        ("match", "Generate a match from favorites"),
        ("logout", "End the session"),
        ("quit", "Exit"),
    ];
    for (command, about) in commands {
        println!("  {}{}", format!("{:<28}", command).cyan(), about.dimmed());
    }
}
