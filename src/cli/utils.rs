use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::{TodoItem, TodoList};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_item(output_format: &OutputFormat, item: &TodoItem) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Text => println!("✓ {}", format_item(item)),
    }
    Ok(())
}

pub fn output_list(output_format: &OutputFormat, list: &TodoList) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(list)?),
        OutputFormat::Text => {
            if list.items.is_empty() {
                println!("No todo items for {}", list.user_name);
                return Ok(());
            }
            println!("Todo items for {}:", list.user_name);
            for item in &list.items {
                println!("  {}", format_item(item));
            }
        }
    }
    Ok(())
}

fn format_item(item: &TodoItem) -> String {
    match item.item_create_date {
        Some(created) => format!("{}  {}  (created {})", item.id, item.item_name, created.format("%Y-%m-%d %H:%M")),
        None => format!("{}  {}", item.id, item.item_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn formats_item_with_and_without_date() {
        let mut item = TodoItem::new("Buy milk");
        item.id = "42".into();
        assert_eq!(format_item(&item), "42  Buy milk");

        item.item_create_date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        assert_eq!(format_item(&item), "42  Buy milk  (created 2024-03-01 09:30)");
    }
}
