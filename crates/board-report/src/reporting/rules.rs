//! Ordered list-name rules used by the status classifier.
//!
//! Rules run against the normalized list name in sequence; the first rule
//! that yields a status wins. Anything unmatched falls back to
//! [`StatusLabel::InProgress`]. The due-date override is applied afterwards
//! by the classifier and is not part of this table.

use super::domain::StatusLabel;
use super::normalizer::normalize_label;
use std::collections::HashMap;

/// Tokens that together mark a card as delivered and waiting on an outside
/// party ("awaiting return from third party").
pub const DEFAULT_AWAITING_RETURN_TOKENS: &[&str] = &["AGUARDANDO", "RETORNO", "TERCEIRO"];

/// Substrings meaning done / concluded / finalized / complete.
pub const DEFAULT_DONE_MARKERS: &[&str] =
    &["FEITO", "CONCLUÍD", "CONCLUID", "FINALIZAD", "COMPLET"];

const LIST_STATUS_TABLE: &[(&str, StatusLabel)] = &[
    ("PLANEJANDO ESTRATÉGIAS", StatusLabel::Planning),
    ("ATIVIDADES RECORRENTES", StatusLabel::Recurring),
    ("EM PROCESSO DE CONTEÚDO", StatusLabel::InProgress),
    ("EM PROCESSO DE QUALIDADE", StatusLabel::InProgress),
    ("EM PROCESSO DE EDIÇÃO E REVISÃO", StatusLabel::InProgress),
    ("EM PROCESSO DE MONTAGEM", StatusLabel::InProgress),
    ("EM PROCESSO DE REVISÃO", StatusLabel::InProgress),
    ("AGUARDANDO RETORNO DE CORREÇÕES", StatusLabel::Blocked),
    ("EM PROCESSO DE ENVIO", StatusLabel::InProgress),
    ("FEITO", StatusLabel::Completed),
];

/// One predicate over a normalized list name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRule {
    /// Every token must occur somewhere in the name.
    ContainsAll {
        tokens: Vec<String>,
        status: StatusLabel,
    },
    /// Any one marker occurring in the name is enough.
    ContainsAny {
        markers: Vec<String>,
        status: StatusLabel,
    },
    /// Exact match against known list names.
    ExactName { table: HashMap<String, StatusLabel> },
}

impl StatusRule {
    pub fn evaluate(&self, normalized_name: &str) -> Option<StatusLabel> {
        match self {
            StatusRule::ContainsAll { tokens, status } => {
                let matched = !tokens.is_empty()
                    && tokens.iter().all(|token| normalized_name.contains(token.as_str()));
                matched.then_some(*status)
            }
            StatusRule::ContainsAny { markers, status } => markers
                .iter()
                .any(|marker| normalized_name.contains(marker.as_str()))
                .then_some(*status),
            StatusRule::ExactName { table } => table.get(normalized_name).copied(),
        }
    }
}

/// Immutable rule set a report run classifies with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRules {
    rules: Vec<StatusRule>,
}

impl ClassificationRules {
    pub fn standard() -> Self {
        Self::from_tokens(DEFAULT_AWAITING_RETURN_TOKENS, DEFAULT_DONE_MARKERS)
    }

    /// Standard precedence (awaiting-return, done markers, exact table) with
    /// caller-supplied tokens. Tokens are normalized here.
    pub fn from_tokens<S: AsRef<str>>(awaiting_return_tokens: &[S], done_markers: &[S]) -> Self {
        let table = LIST_STATUS_TABLE
            .iter()
            .map(|(name, status)| (normalize_label(name), *status))
            .collect();

        Self::from_rules(vec![
            StatusRule::ContainsAll {
                tokens: normalize_all(awaiting_return_tokens),
                status: StatusLabel::Completed,
            },
            StatusRule::ContainsAny {
                markers: normalize_all(done_markers),
                status: StatusLabel::Completed,
            },
            StatusRule::ExactName { table },
        ])
    }

    pub fn from_rules(rules: Vec<StatusRule>) -> Self {
        Self { rules }
    }

    /// Status implied by the list name alone.
    pub fn resolve(&self, list_name: &str) -> StatusLabel {
        let normalized = normalize_label(list_name);
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(&normalized))
            .unwrap_or(StatusLabel::InProgress)
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| normalize_label(value.as_ref()))
        .filter(|value| !value.is_empty())
        .collect()
}
