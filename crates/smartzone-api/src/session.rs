// Service-ticket session
//
// `POST /serviceTicket` exchanges credentials for a ticket which then rides
// on every request as the `serviceTicket` query parameter.
// `DELETE /serviceTicket` invalidates it on the controller.

use tracing::{debug, warn};

use crate::auth::{LoginResponse, ServiceTicket};
use crate::client::{SmartZoneClient, decode_body, handle_empty, preview, scrub_transport};
use crate::error::Error;

impl SmartZoneClient {
    /// Obtain a service ticket with the client's credentials.
    ///
    /// Any previously held ticket is dropped before the request goes out, so
    /// a failed login always leaves the client unauthenticated.
    pub async fn login(&mut self) -> Result<(), Error> {
        self.ticket = None;
        self.controller_version = None;

        let url = self.public_url(&["serviceTicket"])?;
        debug!(username = %self.credentials.username, "logging in at {}", url);

        let resp = self
            .http
            .post(url)
            .json(&self.credentials.login_body())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {}", preview(&body)),
            });
        }

        let body = resp.text().await?;
        let login: LoginResponse = decode_body(body)?;
        let ticket = login
            .service_ticket
            .and_then(ServiceTicket::new)
            .ok_or_else(|| Error::Authentication {
                message: "controller returned no service ticket".into(),
            })?;

        debug!(controller_version = ?login.controller_version, "login successful");
        self.ticket = Some(ticket);
        self.controller_version = login.controller_version;
        Ok(())
    }

    /// Invalidate the service ticket on the controller.
    ///
    /// The local ticket is cleared before the request is sent: even when the
    /// controller call fails the client ends up unauthenticated, and the
    /// failure is still returned. Logging out without a ticket is a no-op.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let Some(ticket) = self.ticket.take() else {
            debug!("logout skipped, no active session");
            return Ok(());
        };
        self.controller_version = None;

        let url = self.public_url(&["serviceTicket"])?;
        debug!("logging out at {}", url);

        let result = match self
            .http
            .delete(url)
            .query(&[("serviceTicket", ticket.as_str())])
            .send()
            .await
        {
            Ok(resp) => handle_empty(resp).await,
            Err(e) => Err(scrub_transport(e)),
        };

        match &result {
            Ok(()) => debug!("logout complete"),
            Err(e) => warn!(error = %e, "controller rejected logout, ticket discarded locally"),
        }
        result
    }
}
