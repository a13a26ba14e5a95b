//! # Rendering
//!
//! Turns command results into terminal text. Every function returns a `String`
//! so the shell loop decides where it goes and tests can inspect it.
//!
//! Layout math (width, truncation, padding) is Unicode-aware: item names are
//! often CJK and take two columns per character.

use colored::Colorize;
use swapboard::api::{CmdMessage, CmdResult, MessageLevel, PlatformStats};
use swapboard::error::MarketError;
use swapboard::model::{Item, ItemStatus, User};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 6;
const PRICE_WIDTH: usize = 12;
const CATEGORY_WIDTH: usize = 12;
const STATUS_WIDTH: usize = 10;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

/// Benign rejections read as warnings, everything else as errors.
pub fn render_error(err: &MarketError) -> String {
    let message = match err {
        MarketError::Api(text) => CmdMessage::error(text.clone()),
        other if other.is_benign() => CmdMessage::warning(other.to_string()),
        other => CmdMessage::error(format!("Error: {}", other)),
    };
    render_messages(&[message])
}

/// Listed items first, then the messages.
pub fn render_result(result: &CmdResult, width: usize) -> String {
    let mut output = render_item_list(&result.listed_items, width);
    if let Some(stats) = &result.stats {
        output.push_str(&render_stats(stats));
    }
    output.push_str(&render_messages(&result.messages));
    output
}

/// One line per item: id, name, category, price and, for items that can no
/// longer be bought, the status.
pub fn render_item_list(items: &[Item], width: usize) -> String {
    let mut output = String::new();
    for item in items {
        let id = format!("{:>w$}. ", item.id.0, w = ID_WIDTH - 2);
        let price = format!("{:>w$}", format_price(item.price), w = PRICE_WIDTH);
        let category = pad_to_width(
            &truncate_to_width(&item.category, CATEGORY_WIDTH),
            CATEGORY_WIDTH,
        );
        let status = match item.status {
            ItemStatus::Available => String::new(),
            other => format!(" [{}]", other),
        };

        let fixed = ID_WIDTH + CATEGORY_WIDTH + PRICE_WIDTH + STATUS_WIDTH + 2;
        let available = width.saturating_sub(fixed).max(8);
        let name = pad_to_width(&truncate_to_width(&item.name, available), available);

        let status = match item.status {
            ItemStatus::Available => status.normal(),
            ItemStatus::Sold => status.yellow(),
            ItemStatus::Deleted => status.red(),
        };
        output.push_str(&format!(
            "{}{} {}{}{}\n",
            id.yellow(),
            name,
            category.dimmed(),
            price,
            status
        ));
    }
    output
}

pub fn render_item_detail(item: &Item) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        format!("#{}", item.id).yellow(),
        item.name.bold()
    ));
    output.push_str("--------------------------------\n");
    output.push_str(&format!("Category:    {}\n", item.category));
    output.push_str(&format!("Price:       {}\n", format_price(item.price)));
    output.push_str(&format!("Status:      {}\n", item.status));
    output.push_str(&format!("Published:   {}\n", item.published_on));
    output.push_str(&format!("Seller:      user {}\n", item.seller_id));
    if !item.description.is_empty() {
        output.push_str(&format!("\n{}\n", item.description));
    }
    output
}

pub fn render_seller(seller: &User) -> String {
    let mut output = format!("Seller: {}\n", seller.username().bold());
    output.push_str(&format!("Email:  {}\n", seller.email()));
    if !seller.profile.phone.is_empty() {
        output.push_str(&format!("Phone:  {}\n", seller.profile.phone));
    }
    output
}

pub fn render_profile(user: &User) -> String {
    let profile = &user.profile;
    let mut output = format!(
        "{} {}\n",
        profile.username.bold(),
        format!("({}, id {})", user.role(), user.id).dimmed()
    );
    let fields = [
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("Student ID", &profile.student_id),
        ("Real name", &profile.real_name),
        ("College", &profile.college),
    ];
    for (label, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        output.push_str(&format!("  {:<11} {}\n", format!("{}:", label), value));
    }
    if let Some(activity) = user.activity() {
        output.push_str(&format!(
            "  {} published, {} purchased, {} in cart, {} favorites\n",
            activity.published.len(),
            activity.purchased.len(),
            activity.cart.len(),
            activity.favorites.len()
        ));
    }
    output
}

pub fn render_stats(stats: &PlatformStats) -> String {
    format!(
        "Users:      {}\nItems:      {}\n  available {}\n  sold      {}\n  deleted   {}\n",
        stats.users, stats.items, stats.available, stats.sold, stats.deleted
    )
}

fn format_price(price: f64) -> String {
    format!("¥{:.2}", price)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
