//! Behavioural tests spanning selection, generation and citation.

mod answer_properties;
