// Text normalization — tokenizing, stopword filtering, lemmatizing.

pub mod lemma;
pub mod normalizer;

pub use normalizer::Normalizer;
