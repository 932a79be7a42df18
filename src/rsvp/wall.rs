use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{db::{self, WallMessage, WallMessageJson, WALL_LIMIT}, escape_html, include_res, AppResult};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn messages(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<WallMessageJson>>> {
    let messages = db::recent_messages(&db_pool, WALL_LIMIT).await?;
    Ok(Json(messages.into_iter().map(WallMessageJson::from).collect()))
}

/// HTML list items for the wall; guest text is escaped.
pub fn render_wall(messages: &[WallMessage]) -> String {
    let mut items = String::new();
    for message in messages {
        items += &include_res!(str, "/pages/message.html")
            .replace("{date}", &format!(
                "{:04}-{:02}-{:02}",
                message.created_at.year(),
                u8::from(message.created_at.month()),
                message.created_at.day(),
            ))
            .replace("{name}", &escape_html(&message.name))
            .replace("{message}", &escape_html(&message.message));
    }
    items
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn wall_escapes_guest_text() {
        let html = render_wall(&[WallMessage {
            name: "Tía <Rosa>".into(),
            message: "<script>alert(1)</script>".into(),
            created_at: datetime!(2027-01-05 10:00:00 UTC),
        }]);
        assert!(html.contains("Tía &lt;Rosa&gt;"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("2027-01-05"));
    }

    #[test]
    fn empty_wall_renders_nothing() {
        assert_eq!(render_wall(&[]), "");
    }
}
