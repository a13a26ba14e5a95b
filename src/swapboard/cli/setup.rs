use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use swapboard::search::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "swapboard", bin_name = "swapboard", version)]
#[command(about = "Campus second-hand marketplace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read marketplace commands from stdin (default)
    Shell,

    /// Execute a file of marketplace commands
    Run {
        /// Script with one command per line; blank lines and # comments are skipped
        script: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Write the configuration to the config directory
        #[arg(long)]
        init: bool,
    },
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(
    name = "swapboard",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Create a regular account
    #[command(display_order = 1)]
    Register {
        username: String,
        email: String,
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        student_id: String,
        #[arg(long, default_value = "")]
        real_name: String,
        #[arg(long, default_value = "")]
        college: String,
    },

    /// Log in with email and password
    #[command(display_order = 2)]
    Login { email: String, password: String },

    /// Log out of the current account
    #[command(display_order = 3)]
    Logout,

    /// Show who is logged in
    #[command(display_order = 4)]
    Whoami,

    /// Browse available items
    #[command(alias = "ls", display_order = 10)]
    Items {
        /// Include sold and deleted items (admin only)
        #[arg(long)]
        all: bool,
    },

    /// Search item names
    #[command(display_order = 11)]
    Find { keyword: String },

    /// List items in one category
    #[command(display_order = 12)]
    Category { category: String },

    /// Search with combined filters
    #[command(display_order = 13)]
    Search {
        /// Matched against name and description
        keyword: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
        /// price_asc or price_desc
        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Show one item in detail
    #[command(display_order = 14)]
    Show { id: u32 },

    /// Show how to reach an item's seller
    #[command(display_order = 15)]
    Contact { id: u32 },

    /// Put an item up for sale
    #[command(display_order = 20)]
    Publish {
        name: String,
        category: String,
        #[arg(allow_negative_numbers = true)]
        price: f64,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Change one of your listings
    #[command(display_order = 21)]
    EditItem {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,
    },

    /// Take a listing down
    #[command(alias = "rm", display_order = 22)]
    Delete { id: u32 },

    /// Purchase an item
    #[command(display_order = 23)]
    Buy { id: u32 },

    /// Show or change your cart
    #[command(display_order = 30)]
    Cart {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Show or change your favorites
    #[command(alias = "favs", display_order = 31)]
    Favorites {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Items you bought
    #[command(display_order = 32)]
    Purchases,

    /// Items you put up for sale
    #[command(display_order = 33)]
    Published,

    /// Show or edit your profile
    #[command(display_order = 34)]
    Profile {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Platform statistics (admin only)
    #[command(display_order = 40)]
    Stats,

    /// Print help for the shell or one command
    #[command(display_order = 41)]
    Help { command: Option<String> },

    /// Leave the shell
    #[command(alias = "exit", display_order = 42)]
    Quit,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ListAction {
    Add { id: u32 },
    Remove { id: u32 },
}

/// Returns the shell help: every command with its one-line description.
pub fn shell_help() -> String {
    let cmd = ShellLine::command();
    let mut output = String::from("Commands:\n");
    for sc in cmd.get_subcommands().filter(|sc| !sc.is_hide_set()) {
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
    }
    output.push_str("\nRun `help <command>` for the arguments of one command.\n");
    output
}

/// Returns clap's help for one shell command, or `None` if there is no such command.
pub fn command_help(name: &str) -> Option<String> {
    let mut cmd = ShellLine::command();
    let help = cmd
        .get_subcommands_mut()
        .find(|sc| sc.get_name() == name || sc.get_all_aliases().any(|a| a == name))
        .map(|sc| sc.render_help().to_string());
    help
}

/// Splits a shell line into words. Single and double quotes group words and
/// a backslash escapes the next character outside single quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => return Err("Trailing backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
