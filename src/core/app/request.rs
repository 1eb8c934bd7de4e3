use tokio_util::sync::CancellationToken;

use super::App;
use crate::core::session::SessionId;

/// The one outstanding exchange, if any.
#[derive(Debug)]
pub struct InFlightRequest {
    pub request_id: u64,
    /// Session that was active when the request was issued; its reply lands
    /// here no matter where the user navigated since.
    pub target_session: SessionId,
    cancel_token: CancellationToken,
}

/// Process-wide single-flight guard. While a request is in flight no other
/// send is admitted, on any session.
#[derive(Debug, Default)]
pub struct RequestState {
    in_flight: Option<InFlightRequest>,
    last_request_id: u64,
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current(&self) -> Option<&InFlightRequest> {
        self.in_flight.as_ref()
    }

    pub fn is_current(&self, request_id: u64) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|request| request.request_id == request_id)
    }

    /// Marks a request as in flight. Callers check `is_in_flight` first.
    pub(crate) fn begin(&mut self, target_session: SessionId) -> (u64, CancellationToken) {
        debug_assert!(self.in_flight.is_none(), "request started while one is in flight");
        self.last_request_id += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlightRequest {
            request_id: self.last_request_id,
            target_session,
            cancel_token: token.clone(),
        });
        (self.last_request_id, token)
    }

    /// Clears the guard and hands back what was in flight.
    pub(crate) fn finish(&mut self) -> Option<InFlightRequest> {
        self.in_flight.take()
    }

    /// Clears the guard and aborts the exchange.
    pub(crate) fn cancel(&mut self) -> Option<InFlightRequest> {
        let request = self.in_flight.take()?;
        request.cancel_token.cancel();
        Some(request)
    }
}

impl App {
    pub fn is_current_request(&self, request_id: u64) -> bool {
        self.request.is_current(request_id)
    }

    /// Used on shutdown. Returns whether anything was outstanding.
    pub fn cancel_current_request(&mut self) -> bool {
        self.conversation().cancel_request()
    }
}
