mod form;
mod wall;

use axum::{debug_handler, extract::State, response::Redirect, routing::{get, post}, Form, Router};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db, session::{self, Notice}, AppResult, AppState};

pub use form::{RsvpError, RsvpForm};
pub use wall::render_wall;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rsvp", post(submit))
        .route("/api/messages", get(wall::messages))
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RsvpForm>,
) -> AppResult<Redirect> {
    let guest = match form.validate() {
        Ok(guest) => guest,
        Err(err) => {
            tracing::debug!(?err, "rsvp rejected");
            session::set_notice(&session, Notice::error(err.key())).await?;
            return Ok(Redirect::to("/#rsvp"));
        }
    };

    let notice = match db::insert_guest(&db_pool, guest).await {
        Ok(_) => Notice::success("rsvp_ok"),
        Err(err) => {
            tracing::error!(error = %err, "could not store rsvp");
            Notice::error("rsvp_failed")
        }
    };
    session::set_notice(&session, notice).await?;

    Ok(Redirect::to("/#rsvp"))
}

#[cfg(test)]
mod tests {
    use axum::{http::{header::LOCATION, StatusCode}, response::IntoResponse};

    use crate::{session::test_session, test_state};

    use super::*;

    fn form() -> RsvpForm {
        RsvpForm {
            name: "Lucía".into(),
            email: "Lucia@Example.com".into(),
            phone: "5512345678".into(),
            guests: "2".into(),
            message: "¡Felicidades!".into(),
        }
    }

    fn assert_back_to_rsvp(redirect: Redirect) {
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/#rsvp");
    }

    #[tokio::test]
    async fn invalid_rsvp_keeps_first_error_and_stores_nothing() {
        let state = test_state(&[]).await;
        let session = test_session();
        let invalid = RsvpForm { email: "lucia".into(), phone: "x".into(), ..form() };

        let redirect = submit(State(state.db_pool.clone()), session.clone(), Form(invalid)).await.unwrap();
        assert_back_to_rsvp(redirect);
        assert_eq!(session::take_notice(&session).await.unwrap(), Some(Notice::error("err_email")));

        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM guests").fetch_one(&state.db_pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn valid_rsvp_is_stored() {
        let state = test_state(&[]).await;
        let session = test_session();

        let redirect = submit(State(state.db_pool.clone()), session.clone(), Form(form())).await.unwrap();
        assert_back_to_rsvp(redirect);
        assert_eq!(session::take_notice(&session).await.unwrap(), Some(Notice::success("rsvp_ok")));

        let email: String = sqlx::query_scalar("SELECT email FROM guests").fetch_one(&state.db_pool).await.unwrap();
        assert_eq!(email, "Lucia@Example.com");
    }

    #[tokio::test]
    async fn store_failure_is_a_notice() {
        let state = test_state(&[]).await;
        let session = test_session();
        state.db_pool.close().await;

        let redirect = submit(State(state.db_pool.clone()), session.clone(), Form(form())).await.unwrap();
        assert_back_to_rsvp(redirect);
        assert_eq!(session::take_notice(&session).await.unwrap(), Some(Notice::error("rsvp_failed")));
    }
}
