use crate::core::{address, normalize, pipeline, suggest};
use crate::domain::model::{
    ConsultationMode, DirectoryView, Phase, Practitioner, QueryState, SortKey,
};

/// Navigable stack of published address strings, standing in for the
/// browser's history. Publishing while back in the stack discards the
/// forward tail, exactly like a browser does.
#[derive(Debug)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavigationHistory {
    pub fn seeded_with(initial: String) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn publish(&mut self, address: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(address);
        self.index += 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One browsing session: owns the normalized entity collection, the
/// single QueryState instance, the derived result list, and the address
/// history. All mutation entry points are synchronous and each runs one
/// explicit refresh-and-publish step, so the pipeline never sees a
/// partially updated state and the address is never stale.
#[derive(Debug)]
pub struct Session {
    entities: Vec<Practitioner>,
    specialty_options: Vec<String>,
    query: QueryState,
    results: Vec<Practitioner>,
    history: NavigationHistory,
}

impl Session {
    pub fn new(entities: Vec<Practitioner>) -> Self {
        Self::with_initial_address(entities, "")
    }

    /// Build a session hydrated from an incoming address (initial page
    /// load). The decoded state fully replaces the empty default and
    /// seeds the history with its canonical encoding.
    pub fn with_initial_address(entities: Vec<Practitioner>, initial_address: &str) -> Self {
        let specialty_options = normalize::unique_specialties(&entities);
        let query = address::decode(initial_address);
        let results = pipeline::apply(&entities, &query);
        let history = NavigationHistory::seeded_with(address::encode(&query));
        Self {
            entities,
            specialty_options,
            query,
            results,
            history,
        }
    }

    /// The one recompute-and-republish procedure every mutation entry
    /// point runs. Nothing recomputes implicitly.
    fn refresh_and_publish(&mut self) {
        self.results = pipeline::apply(&self.entities, &self.query);
        self.history.publish(address::encode(&self.query));
        tracing::debug!(
            "Query changed: {} of {} entities match, address '{}'",
            self.results.len(),
            self.entities.len(),
            self.history.current()
        );
    }

    pub fn set_search(&mut self, text: &str) {
        self.query.set_search(text);
        self.refresh_and_publish();
    }

    pub fn toggle_consultation(&mut self, mode: ConsultationMode) {
        self.query.toggle_consultation(mode);
        self.refresh_and_publish();
    }

    pub fn toggle_specialty(&mut self, specialty: &str) {
        self.query.toggle_specialty(specialty);
        self.refresh_and_publish();
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.query.toggle_sort(key);
        self.refresh_and_publish();
    }

    /// History navigation: the neighboring address fully replaces the
    /// current QueryState (never a merge) and the results are
    /// recomputed. No new history entry is published.
    pub fn back(&mut self) -> bool {
        match self.history.back() {
            Some(entry) => {
                self.query = address::decode(entry);
                self.results = pipeline::apply(&self.entities, &self.query);
                true
            }
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.history.forward() {
            Some(entry) => {
                self.query = address::decode(entry);
                self.results = pipeline::apply(&self.entities, &self.query);
                true
            }
            None => false,
        }
    }

    pub fn address(&self) -> &str {
        self.history.current()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn results(&self) -> &[Practitioner] {
        &self.results
    }

    pub fn specialty_options(&self) -> &[String] {
        &self.specialty_options
    }

    pub fn suggestions(&self, partial_text: &str, limit: usize) -> Vec<String> {
        suggest::suggest(&self.entities, partial_text, limit)
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// One render frame. Zero matches is `Phase::Empty`, a state of its
    /// own, never an error.
    pub fn view(&self) -> DirectoryView {
        let phase = if self.results.is_empty() {
            Phase::Empty
        } else {
            Phase::Ready
        };
        DirectoryView {
            phase,
            results: self.results.clone(),
            specialty_options: self.specialty_options.clone(),
            query: self.query.clone(),
            address: self.history.current().to_string(),
        }
    }
}
