use crate::app::{App, Tab};
use crate::error::{FetchDogsError, Result};
use crate::listing::{ListingOutcome, ListingUpdate};
use crate::location::LocationUpdate;
use crate::location::search_locations;
use crate::login::{LoginForm, LoginOutcome};
use crate::models::{Location, SortOrder};
use crate::ui::{
    debug, display_breeds, display_favorites, display_help, display_locations, display_match,
    display_match_dialog, display_notices, display_view,
};
use colored::*;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Help,
    List,
    Breeds(Option<String>),
    Breed(Vec<String>),
    ClearBreeds,
    Sort(SortOrder),
    Page(u32),
    Next,
    Prev,
    Locate(String),
    Pick(usize),
    Unlocate,
    Radius(u32),
    Fav(String),
    Favs,
    Match,
    Logout,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "list" | "ls" => Command::List,
            "breeds" => Command::Breeds(Some(rest.to_string()).filter(|r| !r.is_empty())),
            "breed" => {
                if rest.is_empty() || rest.eq_ignore_ascii_case("clear") {
                    Command::ClearBreeds
                } else {
                    Command::Breed(
                        rest.split(',')
                            .map(|b| b.trim().to_string())
                            .filter(|b| !b.is_empty())
                            .collect(),
                    )
                }
            }
            "sort" => Command::Sort(rest.parse()?),
            "page" => Command::Page(parse_number(rest, "page")?),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "loc" | "location" => Command::Locate(rest.to_string()),
            "pick" => Command::Pick(parse_number(rest, "location number")?),
            "unloc" => Command::Unlocate,
            "radius" => Command::Radius(parse_number(rest, "radius")?),
            "fav" | "like" => {
                if rest.is_empty() {
                    return Err("Usage: fav <n|id>".to_string());
                }
                Command::Fav(rest.to_string())
            }
            "favs" | "favorites" => Command::Favs,
            "match" => Command::Match,
            "logout" => Command::Logout,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };

        Ok(command)
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> std::result::Result<T, String> {
    text.parse::<T>()
        .map_err(|_| format!("Expected a number for {}, got '{}'", what, text))
}

enum ShellEvent {
    Listing(u64, ListingOutcome),
    Locations(String, Result<Vec<Location>>),
}

enum Flow {
    Continue,
    Quit,
}

/// Name and email supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct LoginPrefill {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Interactive client: one prompt multiplexed with the location debouncer
/// and finished listing refreshes.
pub struct Shell {
    app: App,
    lines: Lines<BufReader<Stdin>>,
    events_tx: mpsc::UnboundedSender<ShellEvent>,
    events_rx: mpsc::UnboundedReceiver<ShellEvent>,
}

impl Shell {
    pub fn new(app: App) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            app,
            lines: BufReader::new(tokio::io::stdin()).lines(),
            events_tx,
            events_rx,
        }
    }

    pub async fn run(mut self, prefill: LoginPrefill) -> Result<()> {
        let mut prefill = Some(prefill);
        loop {
            if !self.app.is_authenticated() && !self.login(prefill.take()).await? {
                return Ok(());
            }

            self.app.load_breeds().await;
            self.spawn_refresh();
            println!("{}", "Type 'help' for commands.".dimmed());

            match self.event_loop().await? {
                Flow::Quit => return Ok(()),
                Flow::Continue => continue,
            }
        }
    }

    /// Returns `false` when input ends before a successful login.
    async fn login(&mut self, prefill: Option<LoginPrefill>) -> Result<bool> {
        println!("{}", "Welcome to Fetch".bold().cyan());
        println!("{}", "Find your perfect furry friend".dimmed());

        let prefill = prefill.unwrap_or_default();
        let mut form = LoginForm::new();
        let mut name = prefill.name;
        let mut email = prefill.email;

        loop {
            let entered_name = match name.take() {
                Some(n) => n,
                None => match self.ask("Name: ").await? {
                    Some(n) => n,
                    None => return Ok(false),
                },
            };
            let entered_email = match email.take() {
                Some(e) => e,
                None => match self.ask("Email: ").await? {
                    Some(e) => e,
                    None => return Ok(false),
                },
            };

            form.set_name(entered_name);
            form.set_email(entered_email);
            if !form.can_submit() {
                eprintln!(
                    "{} {}",
                    "Error:".red(),
                    "Enter a name and a valid email address"
                );
                continue;
            }

            println!("{}", "Logging in...".dimmed());
            let api = self.app.api();
            match form.submit(api.as_ref(), self.app.session_mut()).await {
                Ok(LoginOutcome::Authenticated) => return Ok(true),
                Err(_) => {
                    let message = form.error().unwrap_or(crate::login::LOGIN_FAILED);
                    eprintln!("{} {}", "Error:".red(), message);
                }
            }
        }
    }

    async fn event_loop(&mut self) -> Result<Flow> {
        loop {
            self.prompt()?;

            tokio::select! {
                line = self.lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => return Ok(Flow::Quit),
                    };
                    match self.handle_line(&line).await {
                        Ok(Some(flow)) => return Ok(flow),
                        Ok(None) => {}
                        Err(e) => self.app.notices_mut().error(e.user_message()),
                    }
                }
                text = self.app.location_due() => {
                    self.spawn_location_search(text);
                }
                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event);
                }
            }

            self.flush_notices();
        }
    }

    /// `Some(flow)` leaves the event loop.
    async fn handle_line(&mut self, line: &str) -> Result<Option<Flow>> {
        let command = Command::parse(line).map_err(FetchDogsError::Validation)?;

        let refresh = match command {
            Command::Empty => false,
            Command::Help => {
                display_help();
                false
            }
            Command::List => {
                self.app.set_tab(Tab::Search);
                display_view(&self.app);
                false
            }
            Command::Breeds(prefix) => {
                display_breeds(self.app.breeds(), prefix.as_deref());
                false
            }
            Command::Breed(breeds) => self.app.select_breeds(breeds)?,
            Command::ClearBreeds => self.app.select_breeds(Vec::<String>::new())?,
            Command::Sort(sort) => self.app.set_sort(sort),
            Command::Page(page) => self.app.set_page(page)?,
            Command::Next => self.app.next_page()?,
            Command::Prev => self.app.previous_page()?,
            Command::Locate(text) => {
                self.app.location_input(text);
                let search = self.app.location_search();
                if !search.has_pending_query() {
                    display_locations(search.results(), search.is_loading(), search.text());
                }
                false
            }
            Command::Pick(index) => self.app.select_location(index)?,
            Command::Unlocate => self.app.clear_location(),
            Command::Radius(miles) => self.app.set_max_distance(miles)?,
            Command::Fav(reference) => {
                let now_favorite = self.app.toggle_favorite(&reference)?;
                let verb = if now_favorite { "Added to" } else { "Removed from" };
                let message = format!("{} favorites ({})", verb, self.app.favorites().len());
                self.app.notices_mut().info(message);
                false
            }
            Command::Favs => {
                self.app.set_tab(Tab::Favorites);
                display_favorites(&self.app);
                false
            }
            Command::Match => {
                self.match_dialog().await?;
                false
            }
            Command::Logout => {
                self.app.logout().await;
                self.app.notices_mut().info("Logged out.");
                self.flush_notices();
                return Ok(Some(Flow::Continue));
            }
            Command::Quit => return Ok(Some(Flow::Quit)),
        };

        if refresh {
            self.app.set_tab(Tab::Search);
            self.spawn_refresh();
        }
        Ok(None)
    }

    async fn match_dialog(&mut self) -> Result<()> {
        if self.app.favorites().is_empty() {
            // Rejected locally; no request goes out.
            self.app.generate_match().await;
            return Ok(());
        }

        display_match_dialog(&self.app);
        let answer = self.ask("Generate match? [y/N] ").await?.unwrap_or_default();
        if answer.trim().eq_ignore_ascii_case("y") {
            self.app.generate_match().await;
            self.flush_notices();
            display_match(&self.app);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Listing(generation, outcome) => {
                let update = self.app.apply_listing(generation, outcome);
                if update != ListingUpdate::Stale && self.app.tab() == Tab::Search {
                    display_view(&self.app);
                }
            }
            ShellEvent::Locations(query, result) => {
                let update = self.app.apply_location_results(&query, result);
                if update != LocationUpdate::Stale {
                    let search = self.app.location_search();
                    display_locations(search.results(), search.is_loading(), search.text());
                }
            }
        }
    }

    fn spawn_refresh(&mut self) {
        let ticket = self.app.begin_refresh();
        let api = self.app.api();
        let tx = self.events_tx.clone();
        let verbose = self.app.verbose();
        debug(verbose, format!("Refresh #{} started", ticket.generation));

        tokio::spawn(async move {
            let (generation, outcome) = ticket.run(api.as_ref(), verbose).await;
            let _ = tx.send(ShellEvent::Listing(generation, outcome));
        });
    }

    fn spawn_location_search(&mut self, text: String) {
        let api = self.app.api();
        let tx = self.events_tx.clone();
        let limit = self.app.location_search().limit();
        debug(self.app.verbose(), format!("Location search for '{}'", text));

        tokio::spawn(async move {
            let result = search_locations(api.as_ref(), &text, limit).await;
            let _ = tx.send(ShellEvent::Locations(text, result));
        });
    }

    fn flush_notices(&mut self) {
        let notices = self.app.notices_mut();
        let unseen = notices.take_unseen();
        notices.dismiss_expired();
        display_notices(&unseen);
    }

    fn prompt(&self) -> Result<()> {
        print!("{}", "dogs> ".bold());
        io::stdout().flush()?;
        Ok(())
    }

    async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}
