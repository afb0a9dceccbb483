// Cancellable prediction task, driven one batch at a time

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use typeahead_dict::DictionaryStore;

use crate::SearchError;
use crate::cache::{CacheKey, LruCache};
use crate::nearby::NearbyKeys;
use crate::options::SearchOptions;
use crate::search::{Batch, Search, Suggestion, valid_chars};

/// Finished suggestion lists of one dictionary and adjacency map.
pub(crate) type ResultCache = LruCache<CacheKey, Vec<Suggestion>>;

/// Lifecycle of a [`Prediction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionState {
    Predicting,
    Done,
    Error,
    /// Abort requested; takes effect at the next batch boundary.
    Aborting,
    Aborted,
}

impl PredictionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predicting => "predicting",
            Self::Done => "done",
            Self::Error => "error",
            Self::Aborting => "aborting",
            Self::Aborted => "aborted",
        }
    }

    /// Whether the task has produced its outcome.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Aborted)
    }
}

impl std::fmt::Display for PredictionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single result of a prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Ranked suggestions, heaviest first. Possibly empty.
    Suggestions(Vec<Suggestion>),
    Failed(SearchError),
    Aborted,
}

fn request_abort(state: &Cell<PredictionState>) {
    if state.get() == PredictionState::Predicting {
        state.set(PredictionState::Aborting);
    }
}

/// Cancels a [`Prediction`] owned by someone else, such as an executor.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    state: Rc<Cell<PredictionState>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        request_abort(&self.state);
    }

    pub fn state(&self) -> PredictionState {
        self.state.get()
    }
}

enum Stage {
    Start,
    Searching(Box<Search>),
    Finished,
}

enum Begin {
    Cached(Vec<Suggestion>),
    Rejected,
    Search(Box<Search>),
}

/// An in-flight prediction.
///
/// Nothing happens until the task is driven, either by calling
/// [`step`](Self::step) from the host's scheduler or by polling it as a
/// future. Each step expands one batch of candidates. An abort request is
/// honoured at the start of the next step, after which the task yields
/// [`Outcome::Aborted`] and never a result.
///
/// Stepping a task after it produced its outcome panics.
pub struct Prediction {
    key: CacheKey,
    dictionary: Rc<DictionaryStore>,
    nearby: Rc<NearbyKeys>,
    options: SearchOptions,
    /// The cache current when the prediction was started. A replaced cache
    /// never receives results computed against the old dictionary.
    cache: Rc<RefCell<ResultCache>>,
    state: Rc<Cell<PredictionState>>,
    stage: Stage,
    batches: usize,
}

impl std::fmt::Debug for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prediction")
            .field("input", &self.key.input)
            .field("state", &self.state.get())
            .field("batches", &self.batches)
            .finish()
    }
}

impl Prediction {
    pub(crate) fn new(
        key: CacheKey,
        dictionary: Rc<DictionaryStore>,
        nearby: Rc<NearbyKeys>,
        options: SearchOptions,
        cache: Rc<RefCell<ResultCache>>,
    ) -> Self {
        Self {
            key,
            dictionary,
            nearby,
            options,
            cache,
            state: Rc::new(Cell::new(PredictionState::Predicting)),
            stage: Stage::Start,
            batches: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.key.input
    }

    pub fn state(&self) -> PredictionState {
        self.state.get()
    }

    /// Request cancellation. Has no effect once the task has settled.
    pub fn abort(&self) {
        request_abort(&self.state);
    }

    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Number of batches run so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Run one batch.
    ///
    /// Returns `Poll::Pending` when more work remains; the host should
    /// yield to its event loop and call `step` again.
    pub fn step(&mut self) -> Poll<Outcome> {
        let stage = std::mem::replace(&mut self.stage, Stage::Finished);
        let mut search = match stage {
            Stage::Finished => panic!("`Prediction` stepped after completion"),
            _ if self.state.get() == PredictionState::Aborting => {
                self.state.set(PredictionState::Aborted);
                tracing::debug!(
                    input = %self.key.input,
                    batches = self.batches,
                    "prediction aborted"
                );
                return Poll::Ready(Outcome::Aborted);
            }
            Stage::Start => match self.begin() {
                Begin::Cached(suggestions) => return Poll::Ready(self.settle(suggestions)),
                Begin::Rejected => return Poll::Ready(self.settle(Vec::new())),
                Begin::Search(search) => search,
            },
            Stage::Searching(search) => search,
        };

        self.batches += 1;
        match search.run_batch() {
            Ok(Batch::Pending) => {
                self.stage = Stage::Searching(search);
                Poll::Pending
            }
            Ok(Batch::Finished(suggestions)) => {
                tracing::debug!(
                    input = %self.key.input,
                    suggestions = suggestions.len(),
                    batches = self.batches,
                    expanded = search.expanded(),
                    "prediction complete"
                );
                self.cache
                    .borrow_mut()
                    .add(self.key.clone(), suggestions.clone());
                Poll::Ready(self.settle(suggestions))
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction failed");
                self.state.set(PredictionState::Error);
                Poll::Ready(Outcome::Failed(err))
            }
        }
    }

    /// Drive the task to its outcome without yielding.
    pub fn complete(mut self) -> Outcome {
        loop {
            if let Poll::Ready(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn begin(&self) -> Begin {
        let cached = self.cache.borrow_mut().get(&self.key).cloned();
        if let Some(suggestions) = cached {
            tracing::trace!(input = %self.key.input, "prediction served from cache");
            return Begin::Cached(suggestions);
        }

        let input = self.key.input.as_str();
        if self.key.limits.max_suggestions == 0
            || input.chars().count() > self.dictionary.max_word_length()
            || !valid_chars(&self.dictionary, &self.nearby, input)
        {
            tracing::trace!(input, "input cannot match any word");
            return Begin::Rejected;
        }

        Begin::Search(Box::new(Search::new(
            Rc::clone(&self.dictionary),
            Rc::clone(&self.nearby),
            self.options,
            input,
            self.key.limits,
        )))
    }

    fn settle(&mut self, suggestions: Vec<Suggestion>) -> Outcome {
        self.state.set(PredictionState::Done);
        Outcome::Suggestions(suggestions)
    }
}

impl Future for Prediction {
    type Output = Outcome;

    /// Runs one batch per poll, waking itself between batches so other
    /// tasks get a turn.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        let this = self.get_mut();
        let poll = this.step();
        if poll.is_pending() {
            cx.waker().wake_by_ref();
        }
        poll
    }
}
