use crate::qr::QrImageOptions;

/// Where the current open cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Modal hidden, nothing captured.
    Idle,
    /// Modal visible, image generation in flight.
    Generating,
    /// Modal visible, image available.
    Ready,
    /// Modal visible, generation failed; the placeholder stays up.
    Failed,
}

/// One generation attempt handed to the renderer.
///
/// Carries the token tying the eventual result back to the cycle that
/// requested it, so a result that outlives its cycle can be recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub token: u64,
    pub url: String,
    pub options: QrImageOptions,
}

/// State for one open/close cycle of the access modal.
///
/// Opening captures the origin URL and issues exactly one generation
/// request. Nothing cancels an attempt in flight; instead each cycle owns a
/// token, and results are accepted only while their token is current and the
/// cycle is still generating. Closing or reopening advances the token, so a
/// late result lands on the floor instead of on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessSession {
    token: u64,
    phase: Phase,
    origin_url: Option<String>,
    image_data: Option<String>,
}

impl AccessSession {
    pub fn new() -> Self {
        Self {
            token: 0,
            phase: Phase::Idle,
            origin_url: None,
            image_data: None,
        }
    }

    /// Hidden→visible: reset state and request one generation for the given
    /// origin with the fixed visual parameters.
    pub fn begin(&mut self, origin_url: String) -> GenerateRequest {
        self.token += 1;
        self.phase = Phase::Generating;
        self.origin_url = Some(origin_url.clone());
        self.image_data = None;
        GenerateRequest {
            token: self.token,
            url: origin_url,
            options: QrImageOptions::default(),
        }
    }

    /// Visible→hidden: clear state and invalidate any in-flight token.
    pub fn end(&mut self) {
        self.token += 1;
        self.phase = Phase::Idle;
        self.origin_url = None;
        self.image_data = None;
    }

    /// The environment produced no origin; the cycle failed before a request
    /// was ever issued.
    pub fn fail_to_open(&mut self) {
        self.phase = Phase::Failed;
        self.origin_url = None;
        self.image_data = None;
    }

    /// Accept a successful generation, unless it belongs to an earlier
    /// cycle. Returns whether the image was taken.
    pub fn deliver_image(&mut self, token: u64, image_data: String) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = Phase::Ready;
        self.image_data = Some(image_data);
        true
    }

    /// Record a failed generation, unless it belongs to an earlier cycle.
    /// Returns whether the failure applied to the current cycle.
    pub fn deliver_failure(&mut self, token: u64) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = Phase::Failed;
        true
    }

    fn accepts(&self, token: u64) -> bool {
        self.phase == Phase::Generating && token == self.token
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn origin_url(&self) -> Option<&str> {
        self.origin_url.as_deref()
    }

    pub fn image_data(&self) -> Option<&str> {
        self.image_data.as_deref()
    }
}

impl Default for AccessSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://class.example.com";

    #[test]
    fn starts_idle_and_empty() {
        let session = AccessSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.origin_url(), None);
        assert_eq!(session.image_data(), None);
    }

    #[test]
    fn begin_requests_the_origin_with_fixed_options() {
        let mut session = AccessSession::new();
        let request = session.begin(ORIGIN.to_owned());

        assert_eq!(request.url, ORIGIN);
        assert_eq!(request.options, QrImageOptions::default());
        assert_eq!(request.options.width, 300);
        assert_eq!(request.options.margin, 2);
        assert_eq!(request.options.dark, "#000000");
        assert_eq!(request.options.light, "#FFFFFF");

        assert_eq!(session.phase(), Phase::Generating);
        assert_eq!(session.origin_url(), Some(ORIGIN));
        assert_eq!(session.image_data(), None);
    }

    #[test]
    fn successful_delivery_stores_the_image() {
        let mut session = AccessSession::new();
        let request = session.begin(ORIGIN.to_owned());

        assert!(session.deliver_image(request.token, "data:ok".to_owned()));
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.image_data(), Some("data:ok"));
        assert_eq!(session.origin_url(), Some(ORIGIN));
    }

    #[test]
    fn failed_delivery_keeps_the_placeholder_state() {
        let mut session = AccessSession::new();
        let request = session.begin(ORIGIN.to_owned());

        assert!(session.deliver_failure(request.token));
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.image_data(), None);
        // The URL stays available for the copy action.
        assert_eq!(session.origin_url(), Some(ORIGIN));
    }

    #[test]
    fn result_arriving_after_close_is_discarded() {
        let mut session = AccessSession::new();
        let request = session.begin(ORIGIN.to_owned());
        session.end();

        assert!(!session.deliver_image(request.token, "data:stale".to_owned()));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.image_data(), None);
    }

    #[test]
    fn reopening_discards_the_previous_attempt() {
        let mut session = AccessSession::new();
        let first = session.begin(ORIGIN.to_owned());
        session.end();
        let second = session.begin(ORIGIN.to_owned());

        assert_ne!(first.token, second.token);
        assert!(!session.deliver_image(first.token, "data:stale".to_owned()));
        assert_eq!(session.image_data(), None);

        assert!(session.deliver_image(second.token, "data:fresh".to_owned()));
        assert_eq!(session.image_data(), Some("data:fresh"));
    }

    #[test]
    fn reopening_never_shows_the_previous_image() {
        let mut session = AccessSession::new();
        let first = session.begin(ORIGIN.to_owned());
        assert!(session.deliver_image(first.token, "data:old".to_owned()));

        session.end();
        session.begin(ORIGIN.to_owned());
        assert_eq!(session.image_data(), None);
        assert_eq!(session.phase(), Phase::Generating);
    }

    #[test]
    fn only_the_first_result_of_a_cycle_counts() {
        let mut session = AccessSession::new();
        let request = session.begin(ORIGIN.to_owned());

        assert!(session.deliver_image(request.token, "data:first".to_owned()));
        assert!(!session.deliver_image(request.token, "data:second".to_owned()));
        assert!(!session.deliver_failure(request.token));
        assert_eq!(session.image_data(), Some("data:first"));
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn failing_to_open_leaves_nothing_to_copy() {
        let mut session = AccessSession::new();
        session.fail_to_open();

        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.origin_url(), None);
        assert_eq!(session.image_data(), None);
    }
}
