//! Checkout and thank-you route handlers.
//!
//! Both pages are reachable only by navigating from the right page; see
//! [`crate::middleware::guards`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::session::clear_cart;
use crate::models::{CheckoutErrors, CheckoutForm};
use crate::routes::context::CommonContext;
use crate::state::AppState;

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub form: CheckoutForm,
    pub errors: CheckoutErrors,
    pub ctx: CommonContext,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub ctx: CommonContext,
}

/// Display an empty checkout form.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CheckoutTemplate> {
    let ctx = CommonContext::load(&state, &session).await?;
    Ok(CheckoutTemplate {
        form: CheckoutForm::default(),
        errors: CheckoutErrors::default(),
        ctx,
    })
}

/// Validate the checkout form.
///
/// A valid submission empties the cart and redirects to the thank-you page;
/// otherwise the form is shown again with the submitted values and errors.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    match form.validate() {
        Ok(details) => {
            clear_cart(&session).await?;

            add_breadcrumb("checkout", "Checkout completed", None);
            tracing::info!(email_domain = %details.email.domain(), "Checkout completed");

            Ok(Redirect::to("/thank-you/").into_response())
        }
        Err(errors) => {
            tracing::debug!(?errors, "Checkout form rejected");
            let ctx = CommonContext::load(&state, &session).await?;
            Ok(CheckoutTemplate { form, errors, ctx }.into_response())
        }
    }
}

/// Display the thank-you page.
#[instrument(skip(state, session))]
pub async fn thank_you(
    State(state): State<AppState>,
    session: Session,
) -> Result<ThankYouTemplate> {
    let ctx = CommonContext::load(&state, &session).await?;
    Ok(ThankYouTemplate { ctx })
}
