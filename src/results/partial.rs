use std::{collections::HashMap, fmt::Display, hash::Hash};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessState {
    Open,
    Closed,
    Restricted,
}

impl Display for AccessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessState::Open => write!(f, "OPEN"),
            AccessState::Closed => write!(f, "CLOSED"),
            AccessState::Restricted => write!(f, "RESTRICTED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationType {
    Article,
    Book,
    BookPart,
    ConferencePaper,
    PeriodicalPart,
    Proceedings,
    ResearchReport,
    Thesis,
    WorkingPaper,
    Other,
}

impl Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PublicationType::Article => "ARTICLE",
            PublicationType::Book => "BOOK",
            PublicationType::BookPart => "BOOK_PART",
            PublicationType::ConferencePaper => "CONFERENCE_PAPER",
            PublicationType::PeriodicalPart => "PERIODICAL_PART",
            PublicationType::Proceedings => "PROCEEDINGS",
            PublicationType::ResearchReport => "RESEARCH_REPORT",
            PublicationType::Thesis => "THESIS",
            PublicationType::WorkingPaper => "WORKING_PAPER",
            PublicationType::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

/// The outcome of one independently executed partition of a search.
///
/// `items` is opaque to this crate and only ever concatenated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialResult<I> {
    pub count: u64,
    pub items: Vec<I>,
    pub access_state_counts: HashMap<AccessState, u64>,
    pub invalid_keys: Vec<String>,
    pub has_licence_contract: bool,
    pub has_open_content_licence: bool,
    pub has_unkeyed_token: bool,
    pub has_user_agreement: bool,
    pub paket_sigel_counts: HashMap<String, u64>,
    pub publication_type_counts: HashMap<PublicationType, u64>,
    pub zdb_id_counts: HashMap<String, u64>,
}

/// The zero result: nothing found, no facets, every flag unset.
impl<I> Default for PartialResult<I> {
    fn default() -> Self {
        PartialResult {
            count: 0,
            items: vec![],
            access_state_counts: HashMap::new(),
            invalid_keys: vec![],
            has_licence_contract: false,
            has_open_content_licence: false,
            has_unkeyed_token: false,
            has_user_agreement: false,
            paket_sigel_counts: HashMap::new(),
            publication_type_counts: HashMap::new(),
            zdb_id_counts: HashMap::new(),
        }
    }
}

impl<I> PartialResult<I> {
    /// Combines two results field by field, `self` first.
    ///
    /// Unlike [`reduce`](crate::results::reduce), invalid keys are
    /// concatenated here.
    pub fn merge(mut self, other: PartialResult<I>) -> PartialResult<I> {
        self.count = self.count.saturating_add(other.count);
        self.items.extend(other.items);
        self.invalid_keys.extend(other.invalid_keys);

        merge_counts(&mut self.access_state_counts, other.access_state_counts);
        merge_counts(&mut self.paket_sigel_counts, other.paket_sigel_counts);
        merge_counts(&mut self.publication_type_counts, other.publication_type_counts);
        merge_counts(&mut self.zdb_id_counts, other.zdb_id_counts);

        self.has_licence_contract |= other.has_licence_contract;
        self.has_open_content_licence |= other.has_open_content_licence;
        self.has_unkeyed_token |= other.has_unkeyed_token;
        self.has_user_agreement |= other.has_user_agreement;

        self
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.items.is_empty()
    }
}

/// Key-wise union of two facet maps, summing counts of shared keys.
pub fn merge_counts<K: Eq + Hash>(into: &mut HashMap<K, u64>, from: HashMap<K, u64>) {
    for (key, count) in from {
        let entry = into.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }
}
