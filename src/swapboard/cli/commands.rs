//! # CLI Layer
//!
//! This module is **one possible UI client** for swapboard. It is the only place
//! that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Parses command lines
//! - Remembers who is logged in
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `Session`: one platform plus the logged-in user; executes shell lines
//! - `Session::dispatch()`: per-command handling, role gating, rendering
//!
//! Role gating here only decides which commands a session may offer. The
//! platform enforces ownership and item state on its own.

use super::render::{
    render_error, render_item_detail, render_messages, render_profile, render_result,
    render_seller,
};
use super::setup::{command_help, shell_help, tokenize, Cli, Commands, ListAction, ShellCommand, ShellLine};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use swapboard::api::{CmdMessage, CmdResult, ItemList, ProfileUpdate, TradingPlatform};
use swapboard::config::MarketConfig;
use swapboard::error::{MarketError, Result};
use swapboard::model::{ItemDraft, ItemId, Profile, Role, UserId};
use swapboard::search::SearchCriteria;
use swapboard::store::memory::InMemoryStore;
use swapboard::store::MarketStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_dir = resolve_config_dir(cli.config_dir)?;
    let config = MarketConfig::load(&config_dir)?;
    tracing::debug!(dir = %config_dir.display(), "configuration loaded");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => handle_shell(config),
        Commands::Run { script } => handle_run(config, &script),
        Commands::Config { init } => handle_config(&config, &config_dir, init),
    }
}

/// Installs the global subscriber. Called once, before anything logs.
fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose, std::env::var("RUST_LOG").ok());

    // stdout belongs to the shell
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

fn log_filter(verbose: bool, env_filter: Option<String>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        env_filter.unwrap_or_else(|| "warn".to_string())
    }
}

fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "swapboard", "swapboard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| MarketError::Api("Could not determine config dir".into()))
}

fn handle_shell(config: MarketConfig) -> Result<()> {
    let mut session = Session::new(InMemoryStore::new(), config)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if interactive {
        writeln!(out, "Campus marketplace. Type `help` for commands.")?;
    }
    session.run_lines(stdin.lock(), &mut out, interactive)
}

fn handle_run(config: MarketConfig, script: &Path) -> Result<()> {
    let content = fs::read_to_string(script)?;
    let mut session = Session::new(InMemoryStore::new(), config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in content.lines().map(str::trim) {
        if is_skippable(line) {
            continue;
        }
        writeln!(out, "{} {}", ">".dimmed(), line)?;
        if session.execute_line(line, &mut out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn handle_config(config: &MarketConfig, config_dir: &Path, init: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if init {
        config.save(config_dir)?;
        print!(
            "{}",
            render_messages(&[CmdMessage::success(format!(
                "Configuration written to {}",
                config_dir.join("config.json").display()
            ))])
        );
    }
    Ok(())
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Who may run a command.
#[derive(Debug, Clone, Copy)]
enum Access {
    LoggedIn,
    Regular,
    Admin,
}

/// One marketplace and whoever is logged in to it.
pub struct Session<S: MarketStore> {
    platform: TradingPlatform<S>,
    config: MarketConfig,
    current: Option<UserId>,
}

impl<S: MarketStore> Session<S> {
    pub fn new(store: S, config: MarketConfig) -> Result<Self> {
        let platform = TradingPlatform::with_config(store, &config)?;
        Ok(Self {
            platform,
            config,
            current: None,
        })
    }

    /// Executes lines until EOF or `quit`. Prints a prompt before each line
    /// when `prompt` is set.
    pub fn run_lines<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        prompt: bool,
    ) -> Result<()> {
        loop {
            if prompt {
                write!(out, "{}", self.prompt())?;
                out.flush()?;
            }
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.execute_line(line.trim(), out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Parses and runs one line. Command failures are written to `out`; only
    /// write failures come back as errors.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if is_skippable(line) {
            return Ok(Flow::Continue);
        }

        let words = match tokenize(line) {
            Ok(words) => words,
            Err(message) => {
                write!(out, "{}", render_messages(&[CmdMessage::error(message)]))?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) if err.kind() == ClapErrorKind::DisplayHelp => {
                write!(out, "{}", err)?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                let message = CmdMessage::error(err.to_string().trim_end().to_string());
                write!(out, "{}", render_messages(&[message]))?;
                return Ok(Flow::Continue);
            }
        };

        if matches!(command, ShellCommand::Quit) {
            return Ok(Flow::Quit);
        }

        let output = self.dispatch(command).unwrap_or_else(|err| {
            tracing::debug!(%err, kind = ?err.kind(), "command failed");
            render_error(&err)
        });
        write!(out, "{}", output)?;
        Ok(Flow::Continue)
    }

    fn prompt(&self) -> String {
        match self.current.and_then(|id| self.platform.find_user_by_id(id)) {
            Some(user) => format!("swapboard({})> ", user.username()),
            None => "swapboard> ".to_string(),
        }
    }

    fn require(&self, access: Access) -> Result<UserId> {
        let user = self
            .current
            .and_then(|id| self.platform.find_user_by_id(id))
            .ok_or_else(|| MarketError::Api("Please log in first.".into()))?;

        match access {
            Access::LoggedIn => Ok(user.id),
            Access::Regular if !user.is_admin() => Ok(user.id),
            Access::Regular => Err(MarketError::Api(
                "Only regular users can do that.".into(),
            )),
            Access::Admin if user.is_admin() => Ok(user.id),
            Access::Admin => Err(MarketError::Api(
                "Administrator access required.".into(),
            )),
        }
    }

    fn render(&self, result: &CmdResult) -> String {
        render_result(result, self.config.list_width)
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<String> {
        match command {
            ShellCommand::Register {
                username,
                email,
                password,
                phone,
                student_id,
                real_name,
                college,
            } => {
                let profile = Profile::new(username, password, email)
                    .with_phone(phone)
                    .with_student_id(student_id)
                    .with_real_name(real_name)
                    .with_college(college);
                let result = self.platform.register_user(profile, Role::Regular)?;
                Ok(self.render(&result))
            }
            ShellCommand::Login { email, password } => self.handle_login(&email, &password),
            ShellCommand::Logout => Ok(self.handle_logout()),
            ShellCommand::Whoami => Ok(self.handle_whoami()),
            ShellCommand::Items { all } => {
                let result = if all {
                    self.require(Access::Admin)?;
                    self.platform.all_items()?
                } else {
                    self.platform.available_items()?
                };
                Ok(self.render(&result))
            }
            ShellCommand::Find { keyword } => {
                Ok(self.render(&self.platform.search_items_by_name(&keyword)?))
            }
            ShellCommand::Category { category } => {
                Ok(self.render(&self.platform.search_items_by_category(&category)?))
            }
            ShellCommand::Search {
                keyword,
                category,
                min,
                max,
                sort,
            } => {
                let criteria = SearchCriteria::new()
                    .with_keyword(keyword.unwrap_or_default())
                    .with_category(category.unwrap_or_default())
                    .with_price_range(min.unwrap_or(0.0), max.unwrap_or(self.config.max_price))
                    .with_sort(sort.unwrap_or_default());
                Ok(self.render(&self.platform.search(&criteria)?))
            }
            ShellCommand::Show { id } => {
                let item = self
                    .platform
                    .find_item_by_id(ItemId(id))
                    .ok_or(MarketError::ItemNotFound(ItemId(id)))?;
                Ok(render_item_detail(item))
            }
            ShellCommand::Contact { id } => {
                let item = self
                    .platform
                    .find_item_by_id(ItemId(id))
                    .ok_or(MarketError::ItemNotFound(ItemId(id)))?;
                let seller = self
                    .platform
                    .seller_of(item.id)
                    .ok_or(MarketError::UserNotFound(item.seller_id))?;
                Ok(render_seller(seller))
            }
            ShellCommand::Publish {
                name,
                category,
                price,
                description,
            } => {
                let seller = self.require(Access::Regular)?;
                let draft = ItemDraft::new(name, description, category, price);
                let result = self.platform.publish_item(draft, seller)?;
                Ok(self.render(&result))
            }
            ShellCommand::EditItem {
                id,
                name,
                description,
                category,
                price,
            } => {
                let requester = self.require(Access::LoggedIn)?;
                let item_id = ItemId(id);
                let current = self
                    .platform
                    .find_item_by_id(item_id)
                    .ok_or(MarketError::ItemNotFound(item_id))?;
                let draft = ItemDraft::new(
                    name.unwrap_or_else(|| current.name.clone()),
                    description.unwrap_or_else(|| current.description.clone()),
                    category.unwrap_or_else(|| current.category.clone()),
                    price.unwrap_or(current.price),
                );
                let result = self.platform.update_item(item_id, requester, draft)?;
                Ok(self.render(&result))
            }
            ShellCommand::Delete { id } => {
                let requester = self.require(Access::LoggedIn)?;
                let result = self.platform.delete_item(ItemId(id), requester)?;
                Ok(self.render(&result))
            }
            ShellCommand::Buy { id } => {
                let buyer = self.require(Access::Regular)?;
                let result = self.platform.purchase_item(ItemId(id), buyer)?;
                Ok(self.render(&result))
            }
            ShellCommand::Cart { action } => {
                let user = self.require(Access::Regular)?;
                let result = match action {
                    None => self.platform.user_items(user, ItemList::Cart)?,
                    Some(ListAction::Add { id }) => self.platform.add_to_cart(ItemId(id), user)?,
                    Some(ListAction::Remove { id }) => {
                        self.platform.remove_from_cart(ItemId(id), user)?
                    }
                };
                Ok(self.render(&result))
            }
            ShellCommand::Favorites { action } => {
                let user = self.require(Access::Regular)?;
                let result = match action {
                    None => self.platform.user_items(user, ItemList::Favorites)?,
                    Some(ListAction::Add { id }) => {
                        self.platform.add_to_favorites(ItemId(id), user)?
                    }
                    Some(ListAction::Remove { id }) => {
                        self.platform.remove_from_favorites(ItemId(id), user)?
                    }
                };
                Ok(self.render(&result))
            }
            ShellCommand::Purchases => {
                let user = self.require(Access::Regular)?;
                Ok(self.render(&self.platform.user_items(user, ItemList::Purchased)?))
            }
            ShellCommand::Published => {
                let user = self.require(Access::Regular)?;
                Ok(self.render(&self.platform.user_items(user, ItemList::Published)?))
            }
            ShellCommand::Profile {
                phone,
                email,
                password,
            } => {
                let user = self.require(Access::LoggedIn)?;
                let update = ProfileUpdate {
                    phone,
                    email,
                    password,
                };
                if update.is_empty() {
                    let user = self
                        .platform
                        .find_user_by_id(user)
                        .ok_or(MarketError::UserNotFound(user))?;
                    return Ok(render_profile(user));
                }
                let result = self.platform.edit_profile(user, update)?;
                Ok(self.render(&result))
            }
            ShellCommand::Stats => {
                self.require(Access::Admin)?;
                Ok(self.render(&self.platform.stats()?))
            }
            ShellCommand::Help { command } => match command {
                None => Ok(shell_help()),
                Some(name) => command_help(&name)
                    .ok_or_else(|| MarketError::Api(format!("Unknown command: {}", name))),
            },
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    fn handle_login(&mut self, email: &str, password: &str) -> Result<String> {
        let id = self
            .platform
            .login(email, password)
            .ok_or_else(|| MarketError::Api("Login failed: check your email and password.".into()))?;
        self.current = Some(id);

        let name = self
            .platform
            .find_user_by_id(id)
            .map(|user| user.username().to_string())
            .unwrap_or_default();
        tracing::info!(user = %id, "logged in");
        Ok(render_messages(&[CmdMessage::success(format!(
            "Welcome, {}.",
            name
        ))]))
    }

    fn handle_logout(&mut self) -> String {
        let message = match self.current.take() {
            Some(_) => CmdMessage::success("Logged out."),
            None => CmdMessage::info("Not logged in."),
        };
        render_messages(&[message])
    }

    fn handle_whoami(&self) -> String {
        let message = match self.current.and_then(|id| self.platform.find_user_by_id(id)) {
            Some(user) => CmdMessage::info(format!(
                "Logged in as {} ({}, id {})",
                user.username(),
                user.role(),
                user.id
            )),
            None => CmdMessage::info("Not logged in."),
        };
        render_messages(&[message])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> Session<InMemoryStore> {
        colored::control::set_override(false);
        Session::new(InMemoryStore::new(), MarketConfig::default()).unwrap()
    }

    fn run_script(session: &mut Session<InMemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        session
            .run_lines(Cursor::new(script.to_string()), &mut out, false)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    const SETUP: &str = "\
register alice alice@campus.edu pw --phone 13800000001
register bob bob@campus.edu pw
login alice@campus.edu pw
publish \"Desk lamp\" Home 20 -d \"warm light\"
publish Bike Sports 300
logout
";

    #[test]
    fn publish_requires_a_login() {
        let mut s = session();
        let out = run_script(&mut s, "publish Lamp Home 20\n");
        assert!(out.contains("Please log in first."));
        assert_eq!(s.platform.item_count(), 0);
    }

    #[test]
    fn regular_user_flow() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(
            &mut s,
            "login bob@campus.edu pw\ncart add 1\ncart add 1\nbuy 2\npurchases\ncart\n",
        );
        assert!(out.contains("Welcome, bob."));
        assert!(out.contains("Item 1 is already in the cart"));
        assert!(out.contains("Bike"));
        assert!(out.contains("Desk lamp"));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn admin_only_commands_are_gated() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(&mut s, "login bob@campus.edu pw\nstats\nitems --all\n");
        assert_eq!(out.matches("Administrator access required.").count(), 2);

        let out = run_script(&mut s, "logout\nlogin admin@nju.edu.cn admin123\nstats\n");
        assert!(out.contains("Users:      3"));
        assert!(out.contains("Items:      2"));
    }

    #[test]
    fn admin_cannot_shop() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(&mut s, "login admin@nju.edu.cn admin123\nbuy 1\ncart\n");
        assert_eq!(out.matches("Only regular users can do that.").count(), 2);
    }

    #[test]
    fn non_owner_delete_is_refused() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(&mut s, "login bob@campus.edu pw\ndelete 1\n");
        assert!(out.contains("Error: User 3 is not allowed to modify item 1"));
    }

    #[test]
    fn edit_item_keeps_unspecified_fields() {
        let mut s = session();
        run_script(&mut s, SETUP);
        run_script(&mut s, "login alice@campus.edu pw\nedit-item 1 --price 15\n");
        let item = s.platform.find_item_by_id(ItemId(1)).unwrap();
        assert_eq!(item.price, 15.0);
        assert_eq!(item.name, "Desk lamp");
        assert_eq!(item.description, "warm light");
    }

    #[test]
    fn search_uses_filters() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(&mut s, "search --max 100\n");
        assert!(out.contains("Desk lamp"));
        assert!(!out.contains("Bike"));
    }

    #[test]
    fn contact_shows_the_seller() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(&mut s, "contact 2\ncontact 9\n");
        assert!(out.contains("alice@campus.edu"));
        assert!(out.contains("13800000001"));
        assert!(out.contains("Item not found: 9"));
    }

    #[test]
    fn parse_errors_do_not_end_the_session() {
        let mut s = session();
        let out = run_script(&mut s, "frobnicate\nfind \"open\nwhoami\n");
        assert!(out.contains("frobnicate"));
        assert!(out.contains("Unterminated"));
        assert!(out.contains("Not logged in."));
    }

    #[test]
    fn quit_stops_reading() {
        let mut s = session();
        let out = run_script(&mut s, "quit\nregister x x@x pw\n");
        assert!(out.is_empty());
        assert_eq!(s.platform.user_count(), 1);
    }

    #[test]
    fn profile_edit_then_show() {
        let mut s = session();
        run_script(&mut s, SETUP);
        let out = run_script(
            &mut s,
            "login bob@campus.edu pw\nprofile --phone 555\nprofile\n",
        );
        assert!(out.contains("555"));
        assert!(out.contains("bob@campus.edu"));
    }

    #[test]
    fn prompt_names_the_user() {
        let mut s = session();
        assert_eq!(s.prompt(), "swapboard> ");
        run_script(&mut s, "login admin@nju.edu.cn admin123\n");
        assert_eq!(s.prompt(), "swapboard(admin)> ");
    }

    #[test]
    fn verbose_overrides_rust_log() {
        assert_eq!(log_filter(true, Some("error".into())), "debug");
        assert_eq!(log_filter(false, Some("swapboard=trace".into())), "swapboard=trace");
        assert_eq!(log_filter(false, None), "warn");
    }
}
