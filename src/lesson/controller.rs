//! The lesson flow state machine
//!
//! [`LessonFlowController`] owns the session state and moves it through
//! welcome → lesson → quiz → results. Timers, camera requests and narration
//! progress run elsewhere and come back as [`FlowEvent`]s, which the owner
//! feeds to [`LessonFlowController::handle_event`]. State is only ever
//! changed from the thread calling into the controller.

use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use super::error::FlowError;
use super::scoring::{self, PassingThreshold};
use super::session::{Phase, SessionState};
use super::timer::ScheduledTask;
use crate::camera::{CameraError, CameraPreview, CameraStream};
use crate::config::Config;
use crate::content::satellites::{self, QUIZ_TRANSITION};
use crate::content::{Curriculum, LessonStep, OPTION_COUNT};
use crate::narration::{NarrationEvent, NarrationSender, Narrator, Utterance, UtteranceId};

/// Shown when the camera cannot be opened
pub const CAMERA_ADVISORY: &str =
    "Camera access is optional but helps create a more personal learning experience!";

/// Tunable timing and scoring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSettings {
    /// Delay between entering the lesson and narrating the first step
    pub narration_delay: Duration,
    /// Badge threshold
    pub passing: PassingThreshold,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self { narration_delay: Duration::from_millis(500), passing: PassingThreshold::default() }
    }
}

impl FlowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            narration_delay: config.narration.start_delay(),
            passing: PassingThreshold::new(config.passing_ratio),
        }
    }
}

/// Something that happened outside the controller
#[derive(Debug)]
pub enum FlowEvent {
    /// The dwell time of a lesson step ran out
    StepElapsed { epoch: u64, step: usize },
    /// The delay before narrating the first step ran out
    FirstStepNarrationDue { epoch: u64 },
    /// A camera request finished
    CameraResolved(Result<CameraStream, CameraError>),
    /// Narration playback progress
    Narration(NarrationEvent),
}

/// Result of a submitted quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub badge_earned: bool,
}

/// Drives one learner through the lesson, quiz and results
pub struct LessonFlowController {
    curriculum: Curriculum,
    settings: FlowSettings,
    state: SessionState,

    narrator: Box<dyn Narrator>,
    next_utterance: UtteranceId,
    current_utterance: Option<UtteranceId>,

    camera: Box<dyn CameraPreview>,
    camera_stream: Option<CameraStream>,
    camera_pending: bool,

    /// Non-fatal message for the learner, e.g. camera refused
    advisory: Option<String>,

    /// Bumped whenever the lesson is entered or left, so stale timers are ignored
    epoch: u64,
    step_timer: Option<ScheduledTask>,
    narration_delay: Option<ScheduledTask>,

    events_tx: mpsc::UnboundedSender<FlowEvent>,
    events_rx: mpsc::UnboundedReceiver<FlowEvent>,
    narration_tx: NarrationSender,
    narration_rx: mpsc::UnboundedReceiver<NarrationEvent>,

    disposed: bool,
}

impl LessonFlowController {
    pub fn new(
        curriculum: Curriculum,
        settings: FlowSettings,
        narrator: Box<dyn Narrator>,
        camera: Box<dyn CameraPreview>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (narration_tx, narration_rx) = mpsc::unbounded_channel();

        Self {
            curriculum,
            settings,
            state: SessionState::default(),
            narrator,
            next_utterance: 0,
            current_utterance: None,
            camera,
            camera_stream: None,
            camera_pending: false,
            advisory: None,
            epoch: 0,
            step_timer: None,
            narration_delay: None,
            events_tx,
            events_rx,
            narration_tx,
            narration_rx,
            disposed: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// Lesson step currently on screen, only during the lesson
    pub fn current_step(&self) -> Option<&LessonStep> {
        match self.state.phase {
            Phase::Lesson => self.curriculum.step(self.state.current_step),
            Phase::Welcome | Phase::Quiz | Phase::Results => None,
        }
    }

    /// Whether every question has an answer
    pub fn can_submit(&self) -> bool {
        self.state.phase == Phase::Quiz
            && self.state.answered() >= self.curriculum.question_count()
    }

    /// Correct answers needed for the badge
    pub fn required_correct(&self) -> usize {
        self.settings.passing.required(self.curriculum.question_count())
    }

    /// Device backing the camera preview, while one is held
    pub fn camera_device(&self) -> Option<&Path> {
        self.camera_stream.as_ref().filter(|s| s.is_active()).map(CameraStream::device)
    }

    pub fn camera_pending(&self) -> bool {
        self.camera_pending
    }

    pub fn narration_available(&self) -> bool {
        self.narrator.is_available()
    }

    /// Take the pending advisory message, if any
    pub fn take_advisory(&mut self) -> Option<String> {
        self.advisory.take()
    }

    /// Ask for the camera without blocking the flow
    ///
    /// The outcome arrives later as [`FlowEvent::CameraResolved`]. Repeated
    /// calls while a request is in flight or a stream is held do nothing.
    pub fn enable_camera(&mut self) -> Result<(), FlowError> {
        self.ensure_live()?;
        if self.state.camera_enabled || self.camera_pending {
            return Ok(());
        }

        tracing::debug!("requesting camera access");
        self.camera_pending = true;
        let request = self.camera.request_access();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            // A closed channel drops the stream, which closes the device
            let _ = tx.send(FlowEvent::CameraResolved(request.await));
        });
        Ok(())
    }

    /// Leave the welcome screen and begin the lesson
    pub fn start_lesson(&mut self) -> Result<(), FlowError> {
        self.ensure_phase(Phase::Welcome)?;
        self.enter_lesson();
        Ok(())
    }

    /// Record or overwrite the answer to a question
    pub fn record_answer(&mut self, question_id: u32, option: usize) -> Result<(), FlowError> {
        self.ensure_phase(Phase::Quiz)?;
        if self.curriculum.question(question_id).is_none() {
            return Err(FlowError::UnknownQuestion { id: question_id });
        }
        if option >= OPTION_COUNT {
            return Err(FlowError::OptionOutOfRange { option });
        }

        self.state.answers.insert(question_id, option);
        tracing::debug!(question_id, option, "answer recorded");
        Ok(())
    }

    /// Score the quiz and show results
    pub fn submit_quiz(&mut self) -> Result<QuizOutcome, FlowError> {
        self.ensure_phase(Phase::Quiz)?;
        let total = self.curriculum.question_count();
        if !self.can_submit() {
            return Err(FlowError::QuizIncomplete { answered: self.state.answered(), total });
        }

        let score = scoring::score(self.curriculum.questions(), &self.state.answers);
        let badge_earned = self.settings.passing.is_met(score, total);
        self.state.score = score;
        self.state.badge_earned = badge_earned;

        let message = if badge_earned {
            satellites::congratulation(score, total)
        } else {
            satellites::encouragement(score, total)
        };
        self.narrate(message);
        self.set_phase(Phase::Results);

        tracing::info!(score, total, badge_earned, "quiz submitted");
        Ok(QuizOutcome { score, total, badge_earned })
    }

    /// Clear the session and take the lesson again
    pub fn restart_lesson(&mut self) -> Result<(), FlowError> {
        self.ensure_phase(Phase::Results)?;
        self.state.reset_progress();
        self.enter_lesson();
        Ok(())
    }

    /// Clear the session and go back to the welcome screen
    pub fn return_home(&mut self) -> Result<(), FlowError> {
        self.ensure_phase(Phase::Results)?;
        self.state.reset_progress();
        self.set_phase(Phase::Welcome);
        Ok(())
    }

    /// Wait for the next outside event. Cancel safe.
    pub async fn next_event(&mut self) -> Option<FlowEvent> {
        tokio::select! {
            Some(event) = self.events_rx.recv() => Some(event),
            Some(event) = self.narration_rx.recv() => Some(FlowEvent::Narration(event)),
            else => None,
        }
    }

    /// Handle every event already queued, returning how many there were
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.narration_rx.try_recv() {
            self.handle_event(FlowEvent::Narration(event));
            handled += 1;
        }
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply an outside event to the session
    pub fn handle_event(&mut self, event: FlowEvent) {
        if self.disposed {
            if let FlowEvent::CameraResolved(Ok(mut stream)) = event {
                tracing::debug!("camera granted after session ended, releasing");
                self.camera.stop(&mut stream);
            }
            return;
        }

        match event {
            FlowEvent::StepElapsed { epoch, step } => self.on_step_elapsed(epoch, step),
            FlowEvent::FirstStepNarrationDue { epoch } => {
                if self.in_current_lesson(epoch, 0) {
                    let text = self.curriculum.steps()[0].content.clone();
                    self.narrate(text);
                }
            }
            FlowEvent::CameraResolved(result) => self.on_camera_resolved(result),
            FlowEvent::Narration(event) => self.on_narration(event),
        }
    }

    /// Tear the session down: cancel timers, stop narration, release the camera
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.cancel_timers();
        self.narrator.cancel_current();
        self.current_utterance = None;
        self.state.narration_active = false;

        if let Some(mut stream) = self.camera_stream.take() {
            self.camera.stop(&mut stream);
        }
        self.state.camera_enabled = false;

        tracing::debug!("lesson session disposed");
    }

    fn ensure_live(&self) -> Result<(), FlowError> {
        if self.disposed { Err(FlowError::Disposed) } else { Ok(()) }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), FlowError> {
        self.ensure_live()?;
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(FlowError::WrongPhase { expected, actual: self.state.phase })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase == Phase::Lesson && phase != Phase::Lesson {
            self.cancel_timers();
            self.epoch += 1;
        }
        tracing::info!(from = %self.state.phase, to = %phase, "phase change");
        self.state.phase = phase;
    }

    fn enter_lesson(&mut self) {
        self.cancel_timers();
        self.epoch += 1;
        self.state.current_step = 0;
        self.state.progress_percent = 0.0;
        self.set_phase(Phase::Lesson);

        let epoch = self.epoch;
        let tx = self.events_tx.clone();
        self.narration_delay = Some(ScheduledTask::after(self.first_narration_delay(), move || {
            let _ = tx.send(FlowEvent::FirstStepNarrationDue { epoch });
        }));
        self.schedule_step_timer();
    }

    /// Delay before narrating step 0, kept well inside that step's dwell time
    fn first_narration_delay(&self) -> Duration {
        let configured = self.settings.narration_delay;
        let Some(first) = self.curriculum.step(0) else {
            return configured;
        };
        let limit = first.duration() / 2;
        if configured > limit {
            tracing::debug!(
                configured_ms = configured.as_millis() as u64,
                limit_ms = limit.as_millis() as u64,
                "narration delay outlasts the first step, shortening"
            );
            limit
        } else {
            configured
        }
    }

    /// Start the dwell timer for the current step, replacing any pending one
    fn schedule_step_timer(&mut self) {
        if let Some(timer) = self.step_timer.take() {
            timer.cancel();
        }

        let Some(step) = self.curriculum.step(self.state.current_step) else {
            return;
        };
        let epoch = self.epoch;
        let index = self.state.current_step;
        let tx = self.events_tx.clone();
        tracing::debug!(step = index, duration_ms = step.duration_ms, "scheduling step timer");
        self.step_timer = Some(ScheduledTask::after(step.duration(), move || {
            let _ = tx.send(FlowEvent::StepElapsed { epoch, step: index });
        }));
    }

    fn cancel_timers(&mut self) {
        if let Some(timer) = self.step_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.narration_delay.take() {
            timer.cancel();
        }
    }

    fn in_current_lesson(&self, epoch: u64, step: usize) -> bool {
        self.state.phase == Phase::Lesson && epoch == self.epoch && step == self.state.current_step
    }

    fn on_step_elapsed(&mut self, epoch: u64, step: usize) {
        if !self.in_current_lesson(epoch, step) {
            tracing::trace!(epoch, step, "ignoring stale step timer");
            return;
        }

        let total = self.curriculum.step_count();
        if step + 1 < total {
            // The first step's delayed narration is moot once we move on
            if let Some(timer) = self.narration_delay.take() {
                timer.cancel();
            }
            let next = step + 1;
            self.state.current_step = next;
            self.state.progress_percent = (next + 1) as f32 / total as f32 * 100.0;
            let text = self.curriculum.steps()[next].content.clone();
            self.narrate(text);
            self.schedule_step_timer();
        } else {
            self.state.progress_percent = 100.0;
            self.set_phase(Phase::Quiz);
            self.narrate(QUIZ_TRANSITION.to_string());
        }
    }

    fn on_camera_resolved(&mut self, result: Result<CameraStream, CameraError>) {
        self.camera_pending = false;
        match result {
            Ok(stream) => {
                tracing::info!(device = %stream.device().display(), "camera enabled");
                self.camera_stream = Some(stream);
                self.state.camera_enabled = true;
            }
            Err(e) => {
                tracing::warn!("camera unavailable: {}", e);
                self.state.camera_enabled = false;
                self.advisory = Some(CAMERA_ADVISORY.to_string());
            }
        }
    }

    fn on_narration(&mut self, event: NarrationEvent) {
        match event {
            NarrationEvent::Started(id) if Some(id) == self.current_utterance => {
                self.state.narration_active = true;
            }
            NarrationEvent::Ended(id) if Some(id) == self.current_utterance => {
                self.state.narration_active = false;
                self.current_utterance = None;
            }
            // Events from utterances already replaced
            NarrationEvent::Started(_) | NarrationEvent::Ended(_) => {}
        }
    }

    fn narrate(&mut self, text: String) {
        self.next_utterance += 1;
        let id = self.next_utterance;
        self.current_utterance = Some(id);
        self.state.narration_active = false;
        self.narrator.speak(Utterance::new(id, text), self.narration_tx.clone());
    }
}

impl Drop for LessonFlowController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use futures_util::future::BoxFuture;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Narrator that records what it was asked to say
    #[derive(Clone, Default)]
    struct RecordingNarrator {
        spoken: Arc<Mutex<Vec<String>>>,
        cancels: Arc<AtomicUsize>,
    }

    impl RecordingNarrator {
        fn spoken(&self) -> Vec<String> {
            self.spoken.lock().unwrap().clone()
        }
    }

    impl Narrator for RecordingNarrator {
        fn speak(&mut self, utterance: Utterance, _events: NarrationSender) {
            self.spoken.lock().unwrap().push(utterance.text);
        }

        fn cancel_current(&mut self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    /// Camera that grants or denies and counts stops
    #[derive(Clone)]
    struct FakeCamera {
        grant: bool,
        requests: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
    }

    impl FakeCamera {
        fn granting() -> Self {
            Self { grant: true, requests: Arc::default(), stops: Arc::default() }
        }

        fn denying() -> Self {
            Self { grant: false, ..Self::granting() }
        }

        fn stops(&self) -> usize {
            self.stops.load(Ordering::SeqCst)
        }
    }

    impl CameraPreview for FakeCamera {
        fn request_access(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let grant = self.grant;
            Box::pin(async move {
                let device = PathBuf::from("/dev/video0");
                if grant {
                    // Any open file stands in for the device handle
                    let handle = tokio::fs::File::from_std(tempfile::tempfile().unwrap());
                    Ok(CameraStream::new(device, Some(handle)))
                } else {
                    Err(CameraError::Denied { device })
                }
            })
        }

        fn stop(&self, stream: &mut CameraStream) {
            if stream.release() {
                self.stops.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn controller_with(
        narrator: &RecordingNarrator,
        camera: &FakeCamera,
    ) -> LessonFlowController {
        LessonFlowController::new(
            Curriculum::satellites(),
            FlowSettings::default(),
            Box::new(narrator.clone()),
            Box::new(camera.clone()),
        )
    }

    fn controller() -> LessonFlowController {
        controller_with(&RecordingNarrator::default(), &FakeCamera::granting())
    }

    /// Handle events until the phase changes away from `phase`
    async fn run_while(controller: &mut LessonFlowController, phase: Phase) {
        while controller.phase() == phase {
            let event = controller.next_event().await.expect("event channel closed");
            controller.handle_event(event);
        }
    }

    async fn controller_in_quiz() -> LessonFlowController {
        let mut controller = controller();
        controller.start_lesson().unwrap();
        run_while(&mut controller, Phase::Lesson).await;
        controller
    }

    fn answer_with_correct_count(controller: &mut LessonFlowController, correct: usize) {
        let questions = controller.curriculum().questions().to_vec();
        for (i, q) in questions.iter().enumerate() {
            let option =
                if i < correct { q.correct_index } else { (q.correct_index + 1) % OPTION_COUNT };
            controller.record_answer(q.id, option).unwrap();
        }
    }

    #[test]
    fn starts_on_welcome() {
        let controller = controller();
        assert_eq!(controller.state(), &SessionState::default());
        assert!(controller.current_step().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn lesson_visits_every_step_in_order() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(&narrator, &FakeCamera::granting());
        let start = tokio::time::Instant::now();

        controller.start_lesson().unwrap();
        assert_eq!(controller.phase(), Phase::Lesson);

        let mut visited = vec![controller.state().current_step];
        let mut progress = vec![controller.state().progress_percent];
        while controller.phase() == Phase::Lesson {
            let event = controller.next_event().await.unwrap();
            controller.handle_event(event);
            let step = controller.state().current_step;
            if controller.phase() == Phase::Lesson && visited.last() != Some(&step) {
                visited.push(step);
            }
            progress.push(controller.state().progress_percent);
        }

        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(controller.phase(), Phase::Quiz);
        assert_eq!(controller.state().progress_percent, 100.0);
        assert!(start.elapsed() >= controller.curriculum().total_duration());

        let mut expected: Vec<String> =
            controller.curriculum().steps().iter().map(|s| s.content.clone()).collect();
        expected.push(QUIZ_TRANSITION.to_string());
        assert_eq!(narrator.spoken(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn first_step_is_narrated_after_delay() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(&narrator, &FakeCamera::granting());
        let start = tokio::time::Instant::now();

        controller.start_lesson().unwrap();
        assert!(narrator.spoken().is_empty());

        let event = controller.next_event().await.unwrap();
        assert!(matches!(event, FlowEvent::FirstStepNarrationDue { .. }));
        assert!(start.elapsed() >= Duration::from_millis(500));
        controller.handle_event(event);

        assert_eq!(narrator.spoken(), vec![controller.curriculum().steps()[0].content.clone()]);
        assert_eq!(controller.state().current_step, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn long_narration_delay_still_narrates_first_step() {
        let narrator = RecordingNarrator::default();
        let settings =
            FlowSettings { narration_delay: Duration::from_millis(5000), ..Default::default() };
        let mut controller = LessonFlowController::new(
            Curriculum::satellites(),
            settings,
            Box::new(narrator.clone()),
            Box::new(FakeCamera::granting()),
        );

        controller.start_lesson().unwrap();
        run_while(&mut controller, Phase::Lesson).await;

        let spoken = narrator.spoken();
        assert_eq!(spoken.len(), controller.curriculum().step_count() + 1);
        assert_eq!(spoken[0], controller.curriculum().steps()[0].content);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_follows_step_index() {
        let mut controller = controller();
        controller.start_lesson().unwrap();

        while controller.state().current_step == 0 {
            let event = controller.next_event().await.unwrap();
            controller.handle_event(event);
        }

        assert_eq!(controller.state().current_step, 1);
        assert_eq!(controller.state().progress_percent, 40.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_step_timer_is_ignored() {
        let mut controller = controller();
        controller.start_lesson().unwrap();
        let old_epoch = controller.epoch;

        controller.handle_event(FlowEvent::StepElapsed { epoch: old_epoch - 1, step: 0 });
        controller.handle_event(FlowEvent::StepElapsed { epoch: old_epoch, step: 3 });

        assert_eq!(controller.state().current_step, 0);
        assert_eq!(controller.phase(), Phase::Lesson);
    }

    #[tokio::test(start_paused = true)]
    async fn score_counts_each_correct_answer() {
        for correct in 0..=4 {
            let mut controller = controller_in_quiz().await;
            answer_with_correct_count(&mut controller, correct);

            let outcome = controller.submit_quiz().unwrap();

            assert_eq!(outcome.score, correct);
            assert_eq!(outcome.total, 4);
            assert_eq!(controller.state().score, correct);
            assert_eq!(controller.phase(), Phase::Results);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn badge_requires_three_of_four() {
        let mut passing = controller_in_quiz().await;
        answer_with_correct_count(&mut passing, 3);
        assert!(passing.submit_quiz().unwrap().badge_earned);
        assert!(passing.state().badge_earned);

        let mut failing = controller_in_quiz().await;
        answer_with_correct_count(&mut failing, 2);
        assert!(!failing.submit_quiz().unwrap().badge_earned);
        assert!(!failing.state().badge_earned);
    }

    #[tokio::test(start_paused = true)]
    async fn results_narration_depends_on_badge() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(&narrator, &FakeCamera::granting());
        controller.start_lesson().unwrap();
        run_while(&mut controller, Phase::Lesson).await;

        answer_with_correct_count(&mut controller, 4);
        controller.submit_quiz().unwrap();

        let last = narrator.spoken().pop().unwrap();
        assert_eq!(last, satellites::congratulation(4, 4));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_rejected_until_all_answered() {
        let mut controller = controller_in_quiz().await;
        let ids: Vec<u32> = controller.curriculum().questions().iter().map(|q| q.id).collect();
        for id in &ids[..3] {
            controller.record_answer(*id, 0).unwrap();
        }

        assert!(!controller.can_submit());
        assert_eq!(
            controller.submit_quiz(),
            Err(FlowError::QuizIncomplete { answered: 3, total: 4 })
        );
        assert_eq!(controller.phase(), Phase::Quiz);
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_overwrites_answer() {
        let mut controller = controller_in_quiz().await;
        controller.record_answer(1, 0).unwrap();
        controller.record_answer(1, 1).unwrap();
        controller.record_answer(1, 1).unwrap();

        assert_eq!(controller.state().answered(), 1);
        assert_eq!(controller.state().answer(1), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_answers_are_rejected() {
        let mut controller = controller_in_quiz().await;

        assert_eq!(controller.record_answer(99, 0), Err(FlowError::UnknownQuestion { id: 99 }));
        assert_eq!(controller.record_answer(1, 4), Err(FlowError::OptionOutOfRange { option: 4 }));
        assert!(controller.state().answers.is_empty());
    }

    #[test]
    fn operations_check_phase() {
        let mut controller = controller();

        assert_eq!(
            controller.record_answer(1, 0),
            Err(FlowError::WrongPhase { expected: Phase::Quiz, actual: Phase::Welcome })
        );
        assert!(matches!(controller.submit_quiz(), Err(FlowError::WrongPhase { .. })));
        assert!(matches!(controller.restart_lesson(), Err(FlowError::WrongPhase { .. })));
        assert!(matches!(controller.return_home(), Err(FlowError::WrongPhase { .. })));
        assert_eq!(controller.phase(), Phase::Welcome);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_quiz_and_reruns_lesson() {
        let mut controller = controller_in_quiz().await;
        answer_with_correct_count(&mut controller, 4);
        controller.submit_quiz().unwrap();

        controller.restart_lesson().unwrap();

        let state = controller.state();
        assert_eq!(state.phase, Phase::Lesson);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.progress_percent, 0.0);
        assert!(state.answers.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.badge_earned);

        run_while(&mut controller, Phase::Lesson).await;
        assert_eq!(controller.phase(), Phase::Quiz);
    }

    #[tokio::test(start_paused = true)]
    async fn return_home_resets_to_welcome() {
        let mut controller = controller_in_quiz().await;
        answer_with_correct_count(&mut controller, 1);
        controller.submit_quiz().unwrap();

        controller.return_home().unwrap();

        let state = controller.state();
        assert_eq!(state.phase, Phase::Welcome);
        assert!(state.answers.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.badge_earned);
        assert!(controller.start_lesson().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn camera_denial_keeps_phase_and_sets_advisory() {
        let camera = FakeCamera::denying();
        let mut controller = controller_with(&RecordingNarrator::default(), &camera);

        controller.enable_camera().unwrap();
        assert!(controller.camera_pending());
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event);

        assert_eq!(controller.phase(), Phase::Welcome);
        assert!(!controller.state().camera_enabled);
        assert!(!controller.camera_pending());
        assert_eq!(controller.take_advisory().as_deref(), Some(CAMERA_ADVISORY));
        assert!(controller.take_advisory().is_none());

        controller.start_lesson().unwrap();
        assert_eq!(controller.phase(), Phase::Lesson);
    }

    #[tokio::test(start_paused = true)]
    async fn camera_grant_binds_stream() {
        let camera = FakeCamera::granting();
        let mut controller = controller_with(&RecordingNarrator::default(), &camera);

        controller.enable_camera().unwrap();
        controller.enable_camera().unwrap();
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event);

        assert!(controller.state().camera_enabled);
        assert_eq!(controller.camera_device(), Some(Path::new("/dev/video0")));
        assert_eq!(camera.requests.load(Ordering::SeqCst), 1);

        controller.enable_camera().unwrap();
        assert_eq!(camera.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn camera_request_does_not_block_lesson_start() {
        let mut controller = controller();

        controller.enable_camera().unwrap();
        controller.start_lesson().unwrap();
        assert_eq!(controller.phase(), Phase::Lesson);

        let event = controller.next_event().await.unwrap();
        controller.handle_event(event);
        assert!(controller.state().camera_enabled);
        assert_eq!(controller.phase(), Phase::Lesson);
    }

    #[tokio::test(start_paused = true)]
    async fn double_dispose_stops_camera_once() {
        let narrator = RecordingNarrator::default();
        let camera = FakeCamera::granting();
        let mut controller = controller_with(&narrator, &camera);
        controller.enable_camera().unwrap();
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event);

        controller.dispose();
        controller.dispose();
        drop(controller);

        assert_eq!(camera.stops(), 1);
        assert_eq!(narrator.cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_lesson_timers() {
        let mut controller = controller();
        controller.start_lesson().unwrap();

        controller.dispose();

        let next = tokio::time::timeout(Duration::from_secs(60), controller.next_event()).await;
        assert!(next.is_err(), "no timer should fire after dispose");
        assert!(controller.start_lesson().is_err());
        assert_eq!(controller.enable_camera(), Err(FlowError::Disposed));
    }

    #[tokio::test(start_paused = true)]
    async fn camera_granted_after_dispose_is_released() {
        let camera = FakeCamera::granting();
        let mut controller = controller_with(&RecordingNarrator::default(), &camera);

        controller.enable_camera().unwrap();
        controller.dispose();
        let event = controller.next_event().await.unwrap();
        controller.handle_event(event);

        assert_eq!(camera.stops(), 1);
        assert!(!controller.state().camera_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn narration_flag_tracks_latest_utterance() {
        let mut controller = controller_in_quiz().await;
        let latest = controller.current_utterance.unwrap();

        controller.handle_event(FlowEvent::Narration(NarrationEvent::Started(latest)));
        assert!(controller.state().narration_active);

        // A late end from an older utterance changes nothing
        controller.handle_event(FlowEvent::Narration(NarrationEvent::Ended(latest - 1)));
        assert!(controller.state().narration_active);

        controller.handle_event(FlowEvent::Narration(NarrationEvent::Ended(latest)));
        assert!(!controller.state().narration_active);
    }

    #[tokio::test(start_paused = true)]
    async fn pump_drains_queued_events() {
        let mut controller = controller();
        controller.enable_camera().unwrap();
        tokio::task::yield_now().await;

        // The request task may need a few polls to finish
        let mut handled = 0;
        while handled == 0 {
            handled = controller.pump();
            tokio::task::yield_now().await;
        }
        assert!(controller.state().camera_enabled);
    }

    #[test]
    fn proportional_threshold_for_larger_quiz() {
        let settings = FlowSettings { passing: PassingThreshold::new(0.75), ..Default::default() };
        let questions: Vec<_> = (1..=8)
            .map(|id| crate::content::QuizQuestion::new(id, "Q", ["a", "b", "c", "d"], 0))
            .collect();
        let curriculum =
            Curriculum::new(vec![LessonStep::new("Only", "Step", 1000)], questions).unwrap();
        let controller = LessonFlowController::new(
            curriculum,
            settings,
            Box::new(RecordingNarrator::default()),
            Box::new(FakeCamera::granting()),
        );

        assert_eq!(controller.required_correct(), 6);
    }
}
