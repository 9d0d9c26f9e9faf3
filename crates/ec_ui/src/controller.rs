use std::sync::Arc;

use ec_core::{messages, Error, ExposureApi, ExposureCheckResponse, Result, SearchRequest};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::render;
use crate::view::Node;

/// Where the form is in its submit cycle. Each variant carries exactly the
/// data its view needs, so a busy form never shows an error or result.
#[derive(Debug)]
pub enum Phase {
    Idle,
    Submitting(SearchRequest),
    Succeeded(ExposureCheckResponse),
    Failed(Error),
}

impl Phase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Submitting(_))
    }

    pub fn control(&self) -> SubmitControl {
        if self.is_busy() {
            SubmitControl::BUSY
        } else {
            SubmitControl::READY
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Phase::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
}

impl SubmitControl {
    pub const READY: SubmitControl = SubmitControl { enabled: true };
    pub const BUSY: SubmitControl = SubmitControl { enabled: false };

    pub fn label(&self) -> &'static str {
        if self.enabled {
            messages::SUBMIT_LABEL
        } else {
            messages::SUBMIT_BUSY_LABEL
        }
    }

    pub fn shows_spinner(&self) -> bool {
        !self.enabled
    }
}

/// The two form fields as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub keyword: String,
    pub blog_url: String,
}

impl FormInput {
    pub fn new(keyword: impl Into<String>, blog_url: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            blog_url: blog_url.into(),
        }
    }
}

pub struct ExposureCheckController {
    api: Arc<dyn ExposureApi>,
    input: FormInput,
    phase: Phase,
    control: watch::Sender<SubmitControl>,
}

impl ExposureCheckController {
    pub fn new(api: Arc<dyn ExposureApi>) -> Self {
        let (control, _) = watch::channel(SubmitControl::READY);
        Self {
            api,
            input: FormInput::default(),
            phase: Phase::Idle,
            control,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn into_phase(self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Follow the submit button while a request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<SubmitControl> {
        self.control.subscribe()
    }

    pub fn view(&self) -> Node {
        render::page(&self.input, &self.phase)
    }

    /// React to one submit event. Invalid input fails without touching the
    /// network; otherwise exactly one call is made and its outcome decides
    /// the next phase. The submit control is ready again on every exit path,
    /// and `&mut self` keeps a second submit out while one is in flight.
    pub async fn handle_submit(&mut self, keyword: &str, blog_url: &str) -> &Phase {
        self.input = FormInput::new(keyword, blog_url);
        let request = match SearchRequest::new(keyword, blog_url) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected submit: {}", e);
                self.phase = Phase::Failed(e);
                return &self.phase;
            }
        };

        let api = Arc::clone(&self.api);
        let submission = Submission::begin(&mut self.phase, &self.control, request.clone());
        let outcome = api.check_exposure(&request).await;
        submission.finish(classify(outcome));

        &self.phase
    }
}

/// Holds the form in `Submitting` until finished. Dropping it early, for
/// instance when the future is cancelled or a panic unwinds through it,
/// puts the form back to `Idle`. The control is republished as ready in
/// both cases.
struct Submission<'a> {
    phase: &'a mut Phase,
    control: &'a watch::Sender<SubmitControl>,
    settled: bool,
}

impl<'a> Submission<'a> {
    fn begin(
        phase: &'a mut Phase,
        control: &'a watch::Sender<SubmitControl>,
        request: SearchRequest,
    ) -> Self {
        *phase = Phase::Submitting(request);
        control.send_replace(SubmitControl::BUSY);
        Self {
            phase,
            control,
            settled: false,
        }
    }

    fn finish(mut self, next: Phase) {
        *self.phase = next;
        self.settled = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Exposure check abandoned before completion");
            *self.phase = Phase::Idle;
        }
        self.control.send_replace(SubmitControl::READY);
    }
}

fn classify(outcome: Result<ExposureCheckResponse>) -> Phase {
    match outcome {
        Err(e) => {
            warn!("Exposure check failed: {}", e);
            Phase::Failed(e)
        }
        Ok(response) if !response.success => {
            let error = Error::application(response.message);
            warn!("Exposure check reported failure: {}", error);
            Phase::Failed(error)
        }
        Ok(response) => {
            match response.exposed_rank.filter(|_| response.is_exposed) {
                Some(rank) => info!("✨ '{}' exposed at rank {}", response.keyword, rank),
                None => info!(
                    "'{}' not exposed in {} results",
                    response.keyword, response.total_results
                ),
            }
            Phase::Succeeded(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_follows_phase() {
        assert_eq!(Phase::Idle.control(), SubmitControl::READY);
        let request = SearchRequest::new("k", "u").unwrap();
        assert_eq!(Phase::Submitting(request).control(), SubmitControl::BUSY);
        assert_eq!(Phase::Failed(Error::network()).control(), SubmitControl::READY);
        assert_eq!(SubmitControl::BUSY.label(), messages::SUBMIT_BUSY_LABEL);
        assert!(SubmitControl::BUSY.shows_spinner());
        assert_eq!(SubmitControl::READY.label(), messages::SUBMIT_LABEL);
    }

    #[test]
    fn test_classify_success_false() {
        let phase = classify(Ok(ExposureCheckResponse {
            success: false,
            message: Some("차단됨".to_string()),
            ..Default::default()
        }));
        assert_eq!(phase.error().map(|e| e.to_string()), Some("차단됨".to_string()));

        let phase = classify(Ok(ExposureCheckResponse::default()));
        assert_eq!(
            phase.error().map(|e| e.to_string()),
            Some(messages::SEARCH_FAILED.to_string())
        );
    }

    #[test]
    fn test_classify_transport_wins() {
        let phase = classify(Err(Error::http_status(500, Some("rate limited".to_string()))));
        let error = phase.error().unwrap();
        assert_eq!(error.kind(), ec_core::ErrorKind::Transport);
        assert_eq!(error.to_string(), "rate limited");
    }
}
