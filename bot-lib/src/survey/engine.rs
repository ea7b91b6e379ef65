use crate::survey::{
    bank::{MAX_CHOICE_WEIGHT, Question, QuestionBank},
    classify::{ResultTier, classify},
    session::{SessionState, SessionStatus},
};
use bot_traits::ForwardRefToTracing;
use color_eyre::eyre::Result;
use std::{fmt, time::Duration};

pub const DEFAULT_QUESTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Binds a rendered question to the one response that may answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationToken {
    user_id: u64,
    question: usize,
}

impl CorrelationToken {
    pub fn new(user_id: u64, question: usize) -> Self {
        CorrelationToken { user_id, question }
    }

    /// The opaque id carried by the rendered component.
    pub fn custom_id(&self) -> String {
        format!("bdi:{}:{}", self.user_id, self.question)
    }

    /// Acceptance predicate: the response must carry this token's id and
    /// come from the session owner. Anything else is filtered out without
    /// consuming the wait.
    pub fn accepts(&self, custom_id: &str, responder: u64) -> bool {
        responder == self.user_id && custom_id == self.custom_id()
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.custom_id())
    }
}

/// A final message to the session owner.
#[derive(Debug, Clone, Copy)]
pub enum Notice {
    /// The pending question expired; the user has to start over.
    TimedOut,
    Scored { score: u32, tier: &'static ResultTier },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// No accepted response arrived within the wait window.
    Timeout { question: usize },
    /// The surface could not render a question; the session is dropped
    /// without a retry notice.
    Abandoned { question: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed { score: u32, tier: &'static ResultTier },
    Aborted(AbortReason),
}

/// The transport the engine runs against. Any chat platform that can render
/// a question with four choices, take it down again, and hand back a
/// correlated selection can drive a session.
pub trait InteractionSurface {
    type Handle;

    /// Render a question and its choices. At most once per question.
    async fn present(&self, question: &Question, token: &CorrelationToken) -> Result<Self::Handle>;

    /// Take a rendered question down. Best-effort: implementations log
    /// failures instead of returning them.
    async fn retract(&self, handle: Self::Handle);

    /// Wait for a response accepted by `token` from `owner`, or give up
    /// after `timeout`. Responses that fail the token's acceptance
    /// predicate never consume the wait.
    async fn await_response(
        &self,
        token: &CorrelationToken,
        owner: u64,
        timeout: Duration,
    ) -> Option<u8>;

    async fn notify(&self, owner: u64, notice: Notice) -> Result<()>;
}

/// Drives one end-to-end session: present a question, await a single
/// bounded response, accumulate, advance or abort.
///
/// Strictly sequential: question `i + 1` is never presented before
/// question `i` is answered or the session aborts, and exactly one
/// presentation is outstanding at a time. Nothing here is shared between
/// sessions, so any number of them can run concurrently.
pub struct QuestionnaireEngine<'a, S> {
    surface: &'a S,
    bank: &'a QuestionBank,
    question_timeout: Duration,
}

impl<'a, S: InteractionSurface> QuestionnaireEngine<'a, S> {
    pub fn new(surface: &'a S, bank: &'a QuestionBank, question_timeout: Duration) -> Self {
        QuestionnaireEngine {
            surface,
            bank,
            question_timeout,
        }
    }

    pub async fn run_session(&self, user_id: u64) -> Result<SessionOutcome> {
        let mut session = SessionState::new(user_id);

        while session.position < self.bank.size() {
            let question = self.bank.get(session.position)?;
            let token = CorrelationToken::new(user_id, question.index);

            let handle = match self.surface.present(question, &token).await {
                Ok(handle) => handle,
                Err(error) => {
                    tracing::error!(user_id, question = question.index, ?error, "failed to present question");
                    session.status = SessionStatus::Abandoned;

                    return Ok(SessionOutcome::Aborted(AbortReason::Abandoned {
                        question: question.index,
                    }));
                }
            };

            match self
                .surface
                .await_response(&token, user_id, self.question_timeout)
                .await
            {
                Some(weight) => {
                    debug_assert!(weight <= MAX_CHOICE_WEIGHT);

                    self.surface.retract(handle).await;
                    session.accept(weight);
                }
                None => {
                    self.surface.retract(handle).await;
                    session.status = SessionStatus::TimedOut;
                    self.surface
                        .notify(user_id, Notice::TimedOut)
                        .await
                        .trace_err_ok();

                    return Ok(SessionOutcome::Aborted(AbortReason::Timeout {
                        question: question.index,
                    }));
                }
            }
        }

        session.status = SessionStatus::Completed;
        let score = session.score;
        let tier = classify(score);

        self.surface
            .notify(user_id, Notice::Scored { score, tier })
            .await
            .trace_err_ok();

        Ok(SessionOutcome::Completed { score, tier })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::survey::bank::BANK;
    use color_eyre::eyre::bail;
    use std::{
        collections::VecDeque,
        sync::Mutex,
        time::Duration,
    };

    const OWNER: u64 = 7001;
    const STRANGER: u64 = 9999;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SurfaceEvent {
        Present(usize),
        Retract(usize),
        NotifiedTimeout,
        NotifiedScore(u32),
    }

    struct ScriptedResponse {
        custom_id: String,
        responder: u64,
        weight: u8,
    }

    impl ScriptedResponse {
        fn answer(user_id: u64, question: usize, weight: u8) -> Self {
            ScriptedResponse {
                custom_id: CorrelationToken::new(user_id, question).custom_id(),
                responder: user_id,
                weight,
            }
        }
    }

    /// Feeds a scripted stream of responses to the engine, applying the
    /// same acceptance predicate the real collector uses. Running out of
    /// script means the deadline passed.
    struct ScriptedSurface {
        responses: Mutex<VecDeque<ScriptedResponse>>,
        events: Mutex<Vec<SurfaceEvent>>,
        fail_present: bool,
    }

    impl ScriptedSurface {
        fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
            ScriptedSurface {
                responses: Mutex::new(responses.into_iter().collect()),
                events: Mutex::new(Vec::new()),
                fail_present: false,
            }
        }

        fn broken() -> Self {
            ScriptedSurface {
                responses: Mutex::new(VecDeque::new()),
                events: Mutex::new(Vec::new()),
                fail_present: true,
            }
        }

        fn events(&self) -> Vec<SurfaceEvent> {
            self.events.lock().unwrap().clone()
        }

        /// How many presentations were ever simultaneously un-retracted.
        fn max_outstanding(&self) -> usize {
            let mut outstanding = 0_usize;
            let mut max = 0;

            for event in self.events().iter() {
                match event {
                    SurfaceEvent::Present(_) => {
                        outstanding += 1;
                        max = max.max(outstanding);
                    }
                    SurfaceEvent::Retract(_) => outstanding -= 1,
                    _ => {}
                }
            }

            max
        }
    }

    impl InteractionSurface for ScriptedSurface {
        type Handle = usize;

        async fn present(&self, question: &Question, _token: &CorrelationToken) -> Result<usize> {
            if self.fail_present {
                bail!("surface is down");
            }

            self.events
                .lock()
                .unwrap()
                .push(SurfaceEvent::Present(question.index));

            Ok(question.index)
        }

        async fn retract(&self, handle: usize) {
            self.events
                .lock()
                .unwrap()
                .push(SurfaceEvent::Retract(handle));
        }

        async fn await_response(
            &self,
            token: &CorrelationToken,
            _owner: u64,
            _timeout: Duration,
        ) -> Option<u8> {
            let mut responses = self.responses.lock().unwrap();

            while let Some(response) = responses.pop_front() {
                if token.accepts(&response.custom_id, response.responder) {
                    return Some(response.weight);
                }
            }

            None
        }

        async fn notify(&self, _owner: u64, notice: Notice) -> Result<()> {
            self.events.lock().unwrap().push(match notice {
                Notice::TimedOut => SurfaceEvent::NotifiedTimeout,
                Notice::Scored { score, .. } => SurfaceEvent::NotifiedScore(score),
            });

            Ok(())
        }
    }

    fn engine(surface: &ScriptedSurface) -> QuestionnaireEngine<'_, ScriptedSurface> {
        QuestionnaireEngine::new(surface, &BANK, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn all_no_symptom_answers_score_normal() {
        let surface =
            ScriptedSurface::new((0..21).map(|q| ScriptedResponse::answer(OWNER, q, 0)));

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        let SessionOutcome::Completed { score, tier } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(score, 0);
        assert_eq!(tier.label, "Normal");

        let events = surface.events();
        let presents = events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Present(_)))
            .count();
        let retracts = events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Retract(_)))
            .count();

        assert_eq!(presents, 21);
        assert_eq!(retracts, 21);
        assert_eq!(events.last(), Some(&SurfaceEvent::NotifiedScore(0)));
        assert_eq!(surface.max_outstanding(), 1);
    }

    #[tokio::test]
    async fn uniform_moderate_answers_score_extreme() {
        let surface =
            ScriptedSurface::new((0..21).map(|q| ScriptedResponse::answer(OWNER, q, 2)));

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert!(matches!(
            outcome,
            SessionOutcome::Completed { score: 42, tier } if tier.label == "Extreme"
        ));
    }

    #[tokio::test]
    async fn worst_case_answers_stay_within_bounds() {
        let surface =
            ScriptedSurface::new((0..21).map(|q| ScriptedResponse::answer(OWNER, q, 3)));

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert!(matches!(
            outcome,
            SessionOutcome::Completed { score: 63, .. }
        ));
    }

    #[tokio::test]
    async fn timeout_aborts_without_a_score() {
        // Answers for the first five questions, then silence.
        let surface = ScriptedSurface::new((0..5).map(|q| ScriptedResponse::answer(OWNER, q, 1)));

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Aborted(AbortReason::Timeout { question: 5 })
        );

        let events = surface.events();
        assert_eq!(events.last(), Some(&SurfaceEvent::NotifiedTimeout));
        assert!(!events.iter().any(|e| matches!(e, SurfaceEvent::NotifiedScore(_))));
        // The expired presentation was still retracted.
        assert_eq!(events[events.len() - 2], SurfaceEvent::Retract(5));
        assert_eq!(surface.max_outstanding(), 1);
    }

    #[tokio::test]
    async fn timeout_on_the_first_question_aborts_immediately() {
        let surface = ScriptedSurface::new([]);

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Aborted(AbortReason::Timeout { question: 0 })
        );
    }

    #[tokio::test]
    async fn foreign_and_stale_responses_are_filtered() {
        // Before every real answer: one from a different user, one carrying
        // a stale token, one pure garbage. None of them may advance the
        // session or count toward the score.
        let mut script = Vec::new();
        for q in 0..21 {
            script.push(ScriptedResponse {
                custom_id: CorrelationToken::new(OWNER, q).custom_id(),
                responder: STRANGER,
                weight: 3,
            });
            script.push(ScriptedResponse {
                custom_id: CorrelationToken::new(OWNER, q.wrapping_sub(1)).custom_id(),
                responder: OWNER,
                weight: 3,
            });
            script.push(ScriptedResponse {
                custom_id: "not-a-token".to_owned(),
                responder: OWNER,
                weight: 3,
            });
            script.push(ScriptedResponse::answer(OWNER, q, 1));
        }

        let surface = ScriptedSurface::new(script);
        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert!(matches!(
            outcome,
            SessionOutcome::Completed { score: 21, tier } if tier.label == "Moderate"
        ));
    }

    #[tokio::test]
    async fn present_failure_abandons_the_session() {
        let surface = ScriptedSurface::broken();

        let outcome = engine(&surface).run_session(OWNER).await.unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Aborted(AbortReason::Abandoned { question: 0 })
        );
        assert!(surface.events().is_empty());
    }

    #[tokio::test]
    async fn concurrent_sessions_share_nothing() {
        let calm = ScriptedSurface::new((0..21).map(|q| ScriptedResponse::answer(OWNER, q, 0)));
        let distressed =
            ScriptedSurface::new((0..21).map(|q| ScriptedResponse::answer(STRANGER, q, 3)));

        let calm_engine = engine(&calm);
        let distressed_engine = engine(&distressed);
        let (calm_outcome, distressed_outcome) = tokio::join!(
            calm_engine.run_session(OWNER),
            distressed_engine.run_session(STRANGER),
        );

        assert!(matches!(
            calm_outcome.unwrap(),
            SessionOutcome::Completed { score: 0, .. }
        ));
        assert!(matches!(
            distressed_outcome.unwrap(),
            SessionOutcome::Completed { score: 63, .. }
        ));
    }

    #[test]
    fn tokens_only_accept_their_own_response() {
        let token = CorrelationToken::new(OWNER, 4);

        assert!(token.accepts(&token.custom_id(), OWNER));
        assert!(!token.accepts(&token.custom_id(), STRANGER));
        assert!(!token.accepts(&CorrelationToken::new(OWNER, 5).custom_id(), OWNER));
        assert!(!token.accepts("bdi:7001", OWNER));
        assert!(!token.accepts("", OWNER));
    }
}
