//! Unit tests for availability retry and fallback behaviour.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use rstest::{fixture, rstest};

use super::{AvailabilityClient, AvailabilityClientRuntime, AvailabilityRetryConfig};
use crate::domain::ports::{
    AuthorityAnswer, AuthorityVerdict, AvailabilityAuthority, AvailabilityAuthorityError,
    AvailabilityQuery, FixtureAvailabilityAuthority, MockAvailabilityAuthority,
};
use crate::domain::{
    AvailabilityCriteria, AvailabilityVerdict, CapacityHint, LocationCode, SlotWindow,
};
use crate::test_support::{ImmediateSleeper, NoJitter, RecordingSleeper, fixture_now};

type Scripted = Result<AuthorityAnswer, AvailabilityAuthorityError>;

struct AuthorityStub {
    scripted: Mutex<VecDeque<Scripted>>,
    calls: AtomicU32,
}

impl AuthorityStub {
    fn scripted(scripted: Vec<Scripted>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn failing_with(error: AvailabilityAuthorityError) -> Self {
        Self::scripted(std::iter::repeat_n(Err(error), 16).collect())
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityAuthority for AuthorityStub {
    async fn query(
        &self,
        _criteria: &AvailabilityCriteria,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .lock()
            .expect("authority mutex")
            .pop_front()
            .unwrap_or_else(|| Err(AvailabilityAuthorityError::decode("script exhausted")))
    }
}

/// Authority whose calls never complete on their own.
#[derive(Default)]
struct StallingAuthority {
    calls: AtomicU32,
}

#[async_trait]
impl AvailabilityAuthority for StallingAuthority {
    async fn query(
        &self,
        _criteria: &AvailabilityCriteria,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3_600)).await;
        Err(AvailabilityAuthorityError::timeout("stalled"))
    }
}

fn available(teu: u32) -> Scripted {
    Ok(AuthorityAnswer {
        verdict: AuthorityVerdict::Available,
        capacity: Some(CapacityHint::new(teu)),
    })
}

fn unavailable() -> Scripted {
    Ok(AuthorityAnswer {
        verdict: AuthorityVerdict::Unavailable,
        capacity: None,
    })
}

#[fixture]
fn criteria() -> AvailabilityCriteria {
    let now = fixture_now();
    let slot = SlotWindow::new(now, now + TimeDelta::days(7), now).expect("valid slot");
    AvailabilityCriteria::new(
        LocationCode::parse("origin", "CN-SHA").expect("valid origin"),
        LocationCode::parse("destination", "NL-RTM").expect("valid destination"),
        slot,
    )
    .expect("distinct locations")
}

fn immediate_client(authority: Arc<dyn AvailabilityAuthority>, max_attempts: u32) -> AvailabilityClient {
    AvailabilityClient::with_runtime(
        authority,
        AvailabilityClientRuntime {
            sleeper: Arc::new(ImmediateSleeper),
            jitter: Arc::new(NoJitter),
        },
        AvailabilityRetryConfig {
            max_attempts,
            ..AvailabilityRetryConfig::default()
        },
    )
}

#[rstest]
#[tokio::test]
async fn first_answer_is_returned_without_retry(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::scripted(vec![available(40)]));
    let client = immediate_client(authority.clone(), 3);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Available);
    assert_eq!(result.capacity_hint(), Some(CapacityHint::new(40)));
    assert!(!result.fallback_used());
    assert_eq!(result.attempts(), 1);
    assert_eq!(authority.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn negative_answer_is_final(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::scripted(vec![unavailable(), available(1)]));
    let client = immediate_client(authority.clone(), 3);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unavailable);
    assert!(!result.fallback_used());
    assert_eq!(authority.calls(), 1);
}

#[rstest]
#[case(AvailabilityAuthorityError::transport("connection reset"))]
#[case(AvailabilityAuthorityError::timeout("deadline"))]
#[case(AvailabilityAuthorityError::upstream(502_u16, "bad gateway"))]
#[case(AvailabilityAuthorityError::rate_limited("429"))]
#[tokio::test]
async fn transient_failure_then_answer_succeeds(
    criteria: AvailabilityCriteria,
    #[case] transient: AvailabilityAuthorityError,
) {
    let authority = Arc::new(AuthorityStub::scripted(vec![Err(transient), available(8)]));
    let client = immediate_client(authority.clone(), 3);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Available);
    assert_eq!(result.attempts(), 2);
    assert_eq!(authority.calls(), 2);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
#[tokio::test]
async fn exhausted_retries_make_exactly_max_attempts_calls(
    criteria: AvailabilityCriteria,
    #[case] max_attempts: u32,
) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::timeout("no answer"),
    ));
    let client = immediate_client(authority.clone(), max_attempts);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert!(result.fallback_used());
    assert_eq!(result.capacity_hint(), Some(CapacityHint::zero()));
    assert_eq!(result.attempts(), max_attempts);
    assert_eq!(authority.calls(), max_attempts);
}

#[rstest]
#[tokio::test]
async fn zero_max_attempts_still_calls_once(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::transport("down"),
    ));
    let client = immediate_client(authority.clone(), 0);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert_eq!(authority.calls(), 1);
}

#[rstest]
#[case(AvailabilityAuthorityError::decode("missing verdict"))]
#[case(AvailabilityAuthorityError::rejected(422_u16, "slot too far out"))]
#[tokio::test]
async fn final_errors_fall_back_without_retry(
    criteria: AvailabilityCriteria,
    #[case] error: AvailabilityAuthorityError,
) {
    let authority = Arc::new(AuthorityStub::scripted(vec![Err(error), available(1)]));
    let client = immediate_client(authority.clone(), 3);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert!(result.fallback_used());
    assert_eq!(result.attempts(), 1);
    assert_eq!(authority.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn backoff_doubles_between_attempts(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::upstream(503_u16, "busy"),
    ));
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = AvailabilityClient::with_runtime(
        authority,
        AvailabilityClientRuntime {
            sleeper: sleeper.clone(),
            jitter: Arc::new(NoJitter),
        },
        AvailabilityRetryConfig {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(300),
            total_timeout: Duration::from_secs(10),
        },
    );

    let _ = client.check(&criteria).await;

    assert_eq!(
        sleeper.recorded(),
        vec![
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(300),
        ]
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn real_backoff_finishes_within_ceiling(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::transport("refused"),
    ));
    let config = AvailabilityRetryConfig {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(200),
        max_backoff: Duration::from_secs(2),
        total_timeout: Duration::from_secs(10),
    };
    let client = AvailabilityClient::new(authority.clone(), config);

    let started = tokio::time::Instant::now();
    let result = client.check(&criteria).await;
    let elapsed = started.elapsed();

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert_eq!(authority.calls(), 3);
    // Two sleeps: 200ms and 400ms, each with at most 25% jitter.
    assert!(elapsed >= Duration::from_millis(600));
    assert!(elapsed <= Duration::from_millis(750));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn total_ceiling_cuts_stalled_attempts(criteria: AvailabilityCriteria) {
    let authority = Arc::new(StallingAuthority::default());
    let client = AvailabilityClient::new(
        authority.clone(),
        AvailabilityRetryConfig {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
            total_timeout: Duration::from_secs(5),
        },
    );

    let started = tokio::time::Instant::now();
    let result = client.check(&criteria).await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(5));
    assert!(elapsed < Duration::from_secs(6));
    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert!(result.fallback_used());
    assert_eq!(result.attempts(), 1);
    assert_eq!(authority.calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn ceiling_shorter_than_backoff_stops_retrying(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::timeout("slow"),
    ));
    let client = AvailabilityClient::new(
        authority.clone(),
        AvailabilityRetryConfig {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(4),
            total_timeout: Duration::from_millis(1_500),
        },
    );

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert_eq!(authority.calls(), 2);
    assert_eq!(result.attempts(), 2);
}

#[rstest]
#[tokio::test]
async fn concurrent_checks_keep_separate_budgets(criteria: AvailabilityCriteria) {
    let authority = Arc::new(AuthorityStub::failing_with(
        AvailabilityAuthorityError::transport("down"),
    ));
    let client = Arc::new(immediate_client(authority.clone(), 2));

    let (left, right) = tokio::join!(client.check(&criteria), client.check(&criteria));

    assert_eq!(left.attempts(), 2);
    assert_eq!(right.attempts(), 2);
    assert_eq!(authority.calls(), 4);
}

#[rstest]
#[tokio::test]
async fn fixture_authority_confirms_first_time(criteria: AvailabilityCriteria) {
    let client = immediate_client(Arc::new(FixtureAvailabilityAuthority), 3);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Available);
    assert_eq!(result.capacity_hint(), None);
    assert_eq!(result.attempts(), 1);
}

#[rstest]
#[tokio::test]
async fn refused_query_is_issued_once(criteria: AvailabilityCriteria) {
    let mut authority = MockAvailabilityAuthority::new();
    authority
        .expect_query()
        .times(1)
        .returning(|_| Err(AvailabilityAuthorityError::rejected(400_u16, "unknown lane")));
    let client = immediate_client(Arc::new(authority), 5);

    let result = client.check(&criteria).await;

    assert_eq!(result.verdict(), AvailabilityVerdict::Unknown);
    assert!(result.fallback_used());
    assert_eq!(result.attempts(), 1);
}
