use std::error::Error;

use chrono::{DateTime, Local};

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::ChatRoom;

const LOGIN_HINT: &str = "Run 'roomchat login' to sign in.";

/// Renders `created_at` in local time when it parses as RFC 3339, otherwise
/// shows the server's text unchanged.
pub fn format_created_at(created_at: Option<&str>) -> String {
    match created_at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

pub fn format_room_table(rooms: &[ChatRoom]) -> String {
    if rooms.is_empty() {
        return "No chat rooms yet.".to_string();
    }

    let id_width = rooms
        .iter()
        .map(|room| room.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = rooms
        .iter()
        .map(|room| room.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!("{:>id_width$}  {:<name_width$}  Created\n", "ID", "Name");
    for room in rooms {
        out.push_str(&format!(
            "{:>id_width$}  {:<name_width$}  {}\n",
            room.id,
            room.name,
            format_created_at(room.created_at.as_deref())
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

fn describe(room: &ChatRoom) -> String {
    format!(
        "#{} {} (created {})",
        room.id,
        room.name,
        format_created_at(room.created_at.as_deref())
    )
}

/// Adds a next step to errors the user can fix by signing in again.
fn with_hint(err: ApiError) -> Box<dyn Error> {
    if err.is_unauthorized() {
        format!("{err} {LOGIN_HINT}").into()
    } else {
        Box::new(err)
    }
}

pub async fn list_rooms(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    if !client.is_authenticated() {
        return Err(format!("Not signed in. {LOGIN_HINT}").into());
    }
    let rooms = client.get_chat_rooms().await.map_err(with_hint)?;
    println!("{}", format_room_table(&rooms));
    Ok(())
}

pub async fn show_room(client: &ApiClient, id: u64) -> Result<(), Box<dyn Error>> {
    let room = client.get_chat_room_detail(id).await.map_err(with_hint)?;
    println!("{}", describe(&room));
    Ok(())
}

pub async fn create_room(client: &ApiClient, name: &str) -> Result<(), Box<dyn Error>> {
    let room = client.create_chat_room(name).await.map_err(with_hint)?;
    println!("✅ Created {}", describe(&room));
    Ok(())
}

pub async fn rename_room(client: &ApiClient, id: u64, name: &str) -> Result<(), Box<dyn Error>> {
    let room = client.update_chat_room(id, name).await.map_err(with_hint)?;
    println!("✅ Renamed to {}", describe(&room));
    Ok(())
}

pub async fn delete_room(client: &ApiClient, id: u64) -> Result<(), Box<dyn Error>> {
    client.delete_chat_room(id).await.map_err(with_hint)?;
    println!("✅ Deleted chat room #{id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u64, name: &str, created_at: Option<&str>) -> ChatRoom {
        ChatRoom {
            id,
            name: name.to_string(),
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn empty_room_list_has_friendly_text() {
        assert_eq!(format_room_table(&[]), "No chat rooms yet.");
    }

    #[test]
    fn table_aligns_columns() {
        let table = format_room_table(&[
            room(1, "General", None),
            room(120, "Team", Some("not a date")),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " ID  Name     Created");
        assert_eq!(lines[1], "  1  General  -");
        assert_eq!(lines[2], "120  Team     not a date");
    }

    #[test]
    fn rfc3339_timestamps_are_reformatted() {
        let formatted = format_created_at(Some("2025-03-01T12:00:00Z"));
        assert_eq!(formatted.len(), "2025-03-01 10:00".len());
        assert!(formatted.starts_with("2025-03-0"));
    }

    #[test]
    fn unauthorized_errors_get_login_hint() {
        let hinted = with_hint(ApiError::Unauthorized).to_string();
        assert!(hinted.ends_with(LOGIN_HINT));

        let plain = with_hint(ApiError::Validation("Room name is required".to_string()));
        assert_eq!(plain.to_string(), "Room name is required");
    }
}
